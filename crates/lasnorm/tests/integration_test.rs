//! Integration tests for lasnorm.

use std::io::{Cursor, Write};
use tempfile::{NamedTempFile, TempDir};

use lasnorm::export::read_archive;
use lasnorm::fusion::{CollisionResolution, FusionError};
use lasnorm::{
    CollisionPolicy, ExternalDataset, FusionOutcome, LasNormError, LasReader, LasWriter, Pipeline,
    Session, SessionConfig, StandardNames, Standardizer, WellLog,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// A small LAS 2.0 log with depths 100, 101, 102.
fn las_text(curves: &[&str]) -> String {
    let mut text = String::from(
        "~Version Information
 VERS.   2.0 : CWLS LOG ASCII STANDARD - VERSION 2.0
 WRAP.   NO  : One line per depth step
~Well Information
 STRT.M   100.0 : START DEPTH
 STOP.M   102.0 : STOP DEPTH
 STEP.M     1.0 : STEP
 NULL.  -999.25 : NULL VALUE
 COMP.  ACME OIL : COMPANY
 WELL.  A-1     : WELL
~Curve Information
 DEPT.M : Measured depth
",
    );
    for name in curves {
        text.push_str(&format!(" {}.UNIT : {} curve\n", name, name));
    }
    text.push_str("~Parameter Information\n BHT.DEGC  35.5 : BOTTOM HOLE TEMPERATURE\n");
    text.push_str("~Other\n Tool stuck at 625 m.\n");
    text.push_str("~A\n");
    for (row, depth) in [100.0, 101.0, 102.0].iter().enumerate() {
        text.push_str(&format!("{:.1}", depth));
        for col in 0..curves.len() {
            text.push_str(&format!(" {}.5", (row + 1) * 10 + col));
        }
        text.push('\n');
    }
    text
}

fn read(name: &str, curves: &[&str]) -> WellLog {
    LasReader::new()
        .read_str(name, &las_text(curves))
        .expect("Failed to read LAS")
}

fn dataset(csv: &str) -> ExternalDataset {
    ExternalDataset::from_bytes("core.csv", csv.as_bytes(), Default::default())
        .expect("Failed to parse dataset")
}

// =============================================================================
// Standardization
// =============================================================================

#[test]
fn test_standardize_is_idempotent() {
    let log = read("w.las", &["SGR", "NPHI_LS", "RHOZ", "ild"]);
    let standardizer = Standardizer::new(StandardNames::parse_list("GR, NPHI, RHO"));

    let once = standardizer.apply(&log).log;
    let twice = standardizer.apply(&once).log;

    assert_eq!(once, twice);
    assert!(standardizer.apply(&once).renames.is_empty());
}

#[test]
fn test_first_name_in_list_wins() {
    let log = read("w.las", &["NPHI_LS"]);

    let phi_first = Standardizer::new(StandardNames::parse_list("PHI,NPHI")).apply(&log);
    assert_eq!(phi_first.log.mnemonics(), vec!["DEPT", "PHI"]);

    let nphi_first = Standardizer::new(StandardNames::parse_list("NPHI,PHI")).apply(&log);
    assert_eq!(nphi_first.log.mnemonics(), vec!["DEPT", "NPHI"]);
}

#[test]
fn test_substring_match_is_permissive() {
    let log = read("w.las", &["GRAY"]);
    let result = Standardizer::new(StandardNames::parse_list("GR")).apply(&log);
    assert_eq!(result.log.mnemonics(), vec!["DEPT", "GR"]);
}

#[test]
fn test_unmatched_keep_original_case() {
    let log = read("w.las", &["ild", "Sp"]);
    let result = Standardizer::new(StandardNames::default()).apply(&log);

    assert_eq!(result.log.mnemonics(), vec!["DEPT", "ild", "Sp"]);
    assert!(result.renames.is_empty());
}

#[test]
fn test_standardize_keeps_sample_data() {
    let log = read("w.las", &["SGR"]);
    let result = Standardizer::new(StandardNames::default()).apply(&log);
    assert_eq!(result.log.curves[1].data, log.curves[1].data);
}

// =============================================================================
// Collisions
// =============================================================================

#[test]
fn test_collision_policies() {
    let log = read("w.las", &["GR_1", "GR_2"]);
    let names = StandardNames::parse_list("GR");

    let last = Pipeline::new(names.clone()).process(&log).unwrap();
    assert_eq!(last.log.mnemonics(), vec!["DEPT", "GR"]);
    assert_eq!(last.log.curves[1].data, log.curves[2].data);
    assert_eq!(last.collisions[0].resolution, CollisionResolution::Replaced);

    let first = Pipeline::new(names.clone())
        .with_collision_policy(CollisionPolicy::KeepFirst)
        .process(&log)
        .unwrap();
    assert_eq!(first.log.curves[1].data, log.curves[1].data);

    let suffix = Pipeline::new(names)
        .with_collision_policy(CollisionPolicy::Suffix)
        .process(&log)
        .unwrap();
    assert_eq!(suffix.log.mnemonics(), vec!["DEPT", "GR", "GR:1"]);
}

// =============================================================================
// Depth Fusion
// =============================================================================

#[test]
fn test_fusion_preserves_log_rows() {
    let log = read("w.las", &["SGR"]);
    let ds = dataset("DEPTH,POR\n101,0.25\n103,0.30\n");
    let processed = Pipeline::new(StandardNames::default())
        .with_dataset(Some(&ds))
        .process(&log)
        .unwrap();

    assert_eq!(processed.log.row_count(), 3);
    assert_eq!(processed.log.mnemonics(), vec!["DEPT", "GR", "POR"]);
    assert_eq!(
        processed.log.curve("POR").unwrap().data,
        vec![None, Some(0.25), None]
    );
    assert_eq!(
        processed.log.curve("DEPT").unwrap().data,
        vec![Some(100.0), Some(101.0), Some(102.0)]
    );
}

#[test]
fn test_fusion_skipped_without_depth_column() {
    let log = read("w.las", &["SGR"]);
    let ds = dataset("PHI,SW\n0.1,0.5\n");
    let processed = Pipeline::new(StandardNames::default())
        .with_dataset(Some(&ds))
        .process(&log)
        .unwrap();

    assert!(matches!(processed.fusion, FusionOutcome::Skipped { .. }));
    assert_eq!(processed.log.mnemonics(), vec!["DEPT", "GR"]);
}

#[test]
fn test_dataset_text_column_is_left_out_of_fusion() {
    let file = create_test_file("DEPTH,ZONE,POR\n101,SandA,0.2\n", ".csv");
    let (ds, _) = ExternalDataset::load(file.path(), Default::default()).unwrap();
    assert_eq!(ds.text_columns, vec!["ZONE"]);

    let log = read("w.las", &["SGR"]);
    let processed = Pipeline::new(StandardNames::default())
        .with_dataset(Some(&ds))
        .process(&log)
        .unwrap();

    assert!(processed.fusion.is_fused());
    assert_eq!(processed.log.mnemonics(), vec!["DEPT", "GR", "POR"]);
    assert_eq!(
        processed.log.curve("POR").unwrap().data,
        vec![None, Some(0.2), None]
    );
}

#[test]
fn test_dataset_from_workbook() {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Depth").unwrap();
    sheet.write_string(0, 1, "FACIES").unwrap();
    sheet.write_string(0, 2, "PERM").unwrap();
    sheet.write_number(1, 0, 102.0).unwrap();
    sheet.write_string(1, 1, "shale").unwrap();
    sheet.write_number(1, 2, 15.5).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("core.xlsx");
    workbook.save(&path).unwrap();

    let (ds, metadata) = ExternalDataset::load(&path, Default::default()).unwrap();
    assert_eq!(metadata.format, "xlsx");
    assert_eq!(metadata.file, "core.xlsx");
    assert_eq!(ds.headers, vec!["Depth", "PERM"]);
    assert_eq!(ds.text_columns, vec!["FACIES"]);

    let log = read("w.las", &["SGR"]);
    let processed = Pipeline::new(StandardNames::default())
        .with_dataset(Some(&ds))
        .process(&log)
        .unwrap();
    assert_eq!(
        processed.log.curve("PERM").unwrap().data,
        vec![None, None, Some(15.5)]
    );
}

#[test]
fn test_corrupt_workbook_fails_to_load() {
    let file = create_test_file("DEPTH,POR\n100,0.2\n", ".xlsx");
    let err = ExternalDataset::load(file.path(), Default::default()).unwrap_err();
    assert!(matches!(err, LasNormError::Spreadsheet(_)));
}

#[test]
fn test_dataset_delimiter_detected() {
    let file = create_test_file("depth\tPOR\n100\t0.2\n", ".tsv");
    let (ds, metadata) = ExternalDataset::load(file.path(), Default::default()).unwrap();

    assert_eq!(metadata.format, "tsv");
    assert_eq!(ds.depth_columns(), vec![0]);
    assert!(metadata.hash.starts_with("sha256:"));
}

// =============================================================================
// Batch Export
// =============================================================================

#[test]
fn test_batch_isolates_failing_fusion() {
    let logs = vec![
        read("a.las", &["SGR"]),
        // POR is already a curve here, so the join clashes
        read("b.las", &["SGR", "POR"]),
        read("c.las", &["NPHI_LS"]),
    ];
    let ds = dataset("DEPTH,POR\n101,0.25\n");
    let pipeline = Pipeline::new(StandardNames::default()).with_dataset(Some(&ds));

    let output = lasnorm::BatchExporter::new(&pipeline)
        .export_to_vec(&logs)
        .unwrap();
    let report = &output.report;

    assert_eq!(report.exported(), 3);
    assert_eq!(report.fusion_warnings(), 1);
    assert!(report.items[0].fusion.is_fused());
    assert_eq!(
        report.items[1].fusion,
        FusionOutcome::Failed {
            error: FusionError::ColumnClash { column: "POR".into() }
        }
    );
    assert!(report.items[2].fusion.is_fused());

    let files = read_archive(Cursor::new(output.archive)).unwrap();
    let names: Vec<&str> = files.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["a.las", "b.las", "c.las"]);

    let reader = LasReader::new();
    let b = reader.read_bytes("b.las", &files[1].1).unwrap();
    assert_eq!(b.mnemonics(), vec!["DEPT", "GR", "POR"]);
    assert_eq!(b.curve("POR").unwrap().data, logs[1].curves[2].data);

    let c = reader.read_bytes("c.las", &files[2].1).unwrap();
    assert_eq!(c.mnemonics(), vec!["DEPT", "NPHI", "POR"]);
}

#[test]
fn test_round_trip_keeps_metadata() {
    let log = read("w.las", &["SGR", "RHOZ"]);
    let processed = Pipeline::new(StandardNames::default()).process(&log).unwrap();
    let bytes = LasWriter::new().to_bytes(&processed.log).unwrap();
    let back = LasReader::new().read_bytes("w.las", &bytes).unwrap();

    assert_eq!(back.well, log.well);
    assert_eq!(back.params, log.params);
    assert_eq!(back.other, log.other);
    assert_eq!(back.curves[0].unit, "M");
    assert_eq!(back.curves[0].description, "Measured depth");
    assert_eq!(back.mnemonics(), vec!["DEPT", "GR", "RHOZ"]);
    assert_eq!(back.curves[1].data, log.curves[1].data);
}

#[test]
fn test_wrapped_reads_like_unwrapped() {
    let unwrapped = read("w.las", &["GR", "NPHI"]);
    let wrapped_text = "~V
 VERS. 2.0 :
 WRAP. YES :
~W
 NULL. -999.25 :
~C
 DEPT.M :
 GR.UNIT :
 NPHI.UNIT :
~A
100.0
 10.5 11.5
101.0
 20.5 21.5
102.0
 30.5 31.5
";
    let wrapped = LasReader::new().read_str("w.las", wrapped_text).unwrap();

    for (a, b) in wrapped.curves.iter().zip(&unwrapped.curves) {
        assert_eq!(a.data, b.data);
    }
}

#[test]
fn test_las3_rejected() {
    let text = "~V\n VERS. 3.0 :\n~C\n DEPT.M :\n~A\n1\n";
    let err = LasReader::new().read_str("v3.las", text).unwrap_err();
    assert!(matches!(err, LasNormError::UnsupportedFormat(_)));
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn test_session_end_to_end() {
    let dir = TempDir::new().unwrap();
    let las_path = dir.path().join("well_a.las");
    std::fs::write(&las_path, las_text(&["SGR", "DT24"])).unwrap();
    let csv_path = dir.path().join("core.csv");
    std::fs::write(&csv_path, "Depth,PERM\n100,12.5\n102,3.1\n").unwrap();

    let mut session = Session::with_config(SessionConfig {
        collision: CollisionPolicy::Suffix,
        ..Default::default()
    });
    session.set_names(StandardNames::parse_list("gr, dt"));
    session.load_log(&las_path).unwrap();
    session.load_dataset(&csv_path).unwrap();
    assert!(session.is_ready());

    let comparison = session.curve_comparison("well_a.las").unwrap();
    assert_eq!(comparison.after, vec!["DEPT", "GR", "DT"]);

    let (processed, bytes) = session.export_log("well_a.las").unwrap();
    assert_eq!(processed.log.mnemonics(), vec!["DEPT", "GR", "DT", "PERM"]);
    assert!(String::from_utf8(bytes).unwrap().contains("Merged from core.csv"));

    let series = session
        .plot_series("well_a.las", &["PERM".to_string()])
        .unwrap();
    assert_eq!(series[0].points, vec![(100.0, 12.5), (102.0, 3.1)]);

    // Nothing in the session changed
    assert_eq!(
        session.log("well_a.las").unwrap().mnemonics(),
        vec!["DEPT", "SGR", "DT24"]
    );
}

#[test]
fn test_session_bad_file_is_reported() {
    let file = create_test_file("not a las file\n", ".las");
    let mut session = Session::new();

    assert!(session.load_log(file.path()).is_err());
    assert!(!session.is_ready());
}
