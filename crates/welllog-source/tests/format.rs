//! Tests for format identification on disk.

use std::fs;
use std::path::PathBuf;

use welllog_model::WellLogFormat;
use welllog_source::{SourceError, identify_path};

fn temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("welllog_format_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn identifies_files_by_content() {
    let dir = temp_dir();
    let las = dir.join("well.las");
    fs::write(&las, "~Version Information\n VERS. 2.0: CWLS\n~Well\n").expect("write las");
    let dlis = dir.join("well.dlis");
    fs::write(&dlis, [b'V', b'1', 0, 0, 0x80, 0xFF]).expect("write dlis");
    let csv = dir.join("well.csv");
    fs::write(&csv, "DEPT,GR\n1000,55\n").expect("write csv");

    assert_eq!(identify_path(&las).expect("las"), WellLogFormat::Las);
    assert_eq!(identify_path(&dlis).expect("dlis"), WellLogFormat::Dlis);
    assert_eq!(identify_path(&csv).expect("csv"), WellLogFormat::Unknown);
    assert!(matches!(
        identify_path(&dir.join("absent.las")),
        Err(SourceError::Io { .. })
    ));

    fs::remove_dir_all(&dir).expect("cleanup");
}
