//! Fuzz target for the LAS reader.
//!
//! This fuzzer tests that the reader:
//! 1. Never panics on malformed input
//! 2. Only returns logs whose curves all have the same length
//! 3. Produces logs the writer can always serialize

#![no_main]

use libfuzzer_sys::fuzz_target;
use lasnorm::{LasReader, LasWriter};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(log) = LasReader::new().read_bytes("fuzz.las", data) {
        let rows = log.row_count();
        assert!(log.curves.iter().all(|c| c.data.len() == rows));
        assert!(LasWriter::new().to_bytes(&log).is_ok());
    }
});
