//! Fuzz target for mnemonic standardization.
//!
//! Standardizing arbitrary mnemonics against arbitrary name lists must
//! never panic. For ASCII input it must also be idempotent.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lasnorm::las::Curve;
use lasnorm::{StandardNames, Standardizer, WellLog};

#[derive(Debug, Arbitrary)]
struct Input {
    names: Vec<String>,
    mnemonics: Vec<String>,
}

fuzz_target!(|input: Input| {
    let mut log = WellLog::new("fuzz.las");
    log.curves.push(Curve::new("DEPT", Vec::new()));
    for mnemonic in input.mnemonics.iter().filter(|m| !m.is_empty()) {
        log.curves.push(Curve::new(mnemonic.clone(), Vec::new()));
    }

    let ascii = input.names.iter().all(|n| n.is_ascii())
        && input.mnemonics.iter().all(|m| m.is_ascii());

    let standardizer = Standardizer::new(StandardNames::new(input.names));
    let once = standardizer.apply(&log).log;
    let twice = standardizer.apply(&once).log;

    assert!(once.curves.iter().all(|c| !c.mnemonic.is_empty()));
    if ascii {
        assert_eq!(once, twice);
    }
});
