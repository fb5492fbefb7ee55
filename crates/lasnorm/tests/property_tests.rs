//! Property-based tests for standardization, fusion and the LAS reader.
//!
//! These tests use proptest to generate random logs and datasets and verify
//! that the pipeline keeps its invariants under all inputs.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p lasnorm --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p lasnorm --test property_tests
//! ```

use proptest::prelude::*;

use lasnorm::las::Curve;
use lasnorm::{ExternalDataset, LasReader, LasWriter, Pipeline, StandardNames, Standardizer, WellLog};

// =============================================================================
// Test Strategies
// =============================================================================

/// Mnemonics in the style found in real logs
fn mnemonic() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z]{2,4}(_[A-Z0-9]{1,4})?",
        "[a-z]{2,6}",
        "(S?GR|NPHI|RHOB|DT|CALI)[A-Z0-9]{0,3}",
    ]
}

fn name_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Z]{1,4}", 0..6)
}

/// A log with strictly increasing integer depths.
fn well_log() -> impl Strategy<Value = WellLog> {
    (prop::collection::vec(mnemonic(), 0..6), 0usize..20).prop_flat_map(|(names, rows)| {
        let curves = names.len();
        prop::collection::vec(
            prop::option::weighted(0.9, -1000.0f64..1000.0),
            curves * rows,
        )
        .prop_map(move |values| {
            let mut log = WellLog::new("prop.las");
            log.curves.push(Curve::new(
                "DEPT",
                (0..rows).map(|r| Some(1000.0 + r as f64)).collect(),
            ));
            for (c, name) in names.iter().enumerate() {
                let data = (0..rows).map(|r| values[r * curves + c]).collect();
                log.curves.push(Curve::new(name.clone(), data));
            }
            log
        })
    })
}

// =============================================================================
// Standardization
// =============================================================================

proptest! {
    #[test]
    fn standardize_is_idempotent(log in well_log(), names in name_list()) {
        let standardizer = Standardizer::new(StandardNames::new(names));
        let once = standardizer.apply(&log).log;
        let twice = standardizer.apply(&once).log;
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn standardized_mnemonics_never_empty(log in well_log(), names in name_list()) {
        let result = Standardizer::new(StandardNames::new(names)).apply(&log);
        prop_assert!(result.log.curves.iter().all(|c| !c.mnemonic.is_empty()));
    }

    #[test]
    fn standardize_keeps_curve_count_and_depth(log in well_log(), names in name_list()) {
        let result = Standardizer::new(StandardNames::new(names)).apply(&log);
        prop_assert_eq!(result.log.curves.len(), log.curves.len());
        prop_assert_eq!(&result.log.curves[0], &log.curves[0]);
    }
}

// =============================================================================
// Fusion
// =============================================================================

proptest! {
    #[test]
    fn fusion_preserves_row_count(
        log in well_log(),
        depths in prop::collection::vec(990i32..1030, 0..30),
    ) {
        let mut csv = String::from("DEPTH,EXTRA_COL\n");
        for d in &depths {
            csv.push_str(&format!("{},{}\n", d, d * 2));
        }
        let ds = ExternalDataset::from_bytes("p.csv", csv.as_bytes(), Default::default()).unwrap();

        let processed = Pipeline::new(StandardNames::default())
            .with_dataset(Some(&ds))
            .process(&log)
            .unwrap();

        prop_assert_eq!(processed.log.row_count(), log.row_count());
        prop_assert_eq!(&processed.log.curves[0].data, &log.curves[0].data);
    }
}

// =============================================================================
// LAS Reader
// =============================================================================

proptest! {
    #[test]
    fn reader_never_panics(text in "(~[VWCPAO]?[ -~]{0,30}\n|[ -~]{0,40}\n){0,20}") {
        let _ = LasReader::new().read_str("fuzz.las", &text);
    }

    #[test]
    fn write_then_read_keeps_samples(log in well_log()) {
        let bytes = LasWriter::new().to_bytes(&log).unwrap();
        let back = LasReader::new().read_bytes("prop.las", &bytes).unwrap();

        prop_assert_eq!(back.row_count(), log.row_count());
        for (a, b) in back.curves.iter().zip(&log.curves) {
            for (x, y) in a.data.iter().zip(&b.data) {
                match (x, y) {
                    (Some(x), Some(y)) => prop_assert!((x - y).abs() < 1e-4),
                    (None, None) => {}
                    _ => prop_assert!(false, "missing sample mismatch"),
                }
            }
        }
    }
}
