//! Integration tests for snapshot conversion and the audit log.

use std::fs;
use std::path::{Path, PathBuf};

use welllog_cli::audit::{append_audit_rows, audit_records, compute_file_sha256};
use welllog_cli::convert::{ConvertRequest, convert_snapshot};
use welllog_cli::types::SectionStatus;
use welllog_model::WellLogFormat;

const SNAPSHOT: &str = r#"{
  "format": "DLIS",
  "sections": [{
    "id": "LF-1",
    "origins": [{"name": "DEFINING", "attributes": {"well_name": "A-1", "company": "ACME"}}],
    "parameters": [{"name": "BHT", "attributes": {"values": [85]}, "units": {"VALUES": "degC"}}],
    "frames": [{
      "name": "MAIN",
      "attributes": {"channels": [{"$ref": "DEPT"}, {"$ref": "GR"}]},
      "channels": [
        {"name": "DEPT", "attributes": {"units": "m"}, "samples": [1000, 1001, 1002]},
        {"name": "GR", "attributes": {"units": "gAPI"}, "samples": [55, 60]}
      ]
    }]
  }, {
    "id": "LF-2",
    "origins": [{"name": "DEFINING", "attributes": {"well_name": "A-1"}}]
  }]
}"#;

fn temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("welllog_cli_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_snapshot(dir: &Path) -> PathBuf {
    let path = dir.join("well.json");
    fs::write(&path, SNAPSHOT).expect("write snapshot");
    path
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).expect("read output");
    serde_json::from_str(&text).expect("parse output")
}

#[test]
fn converts_every_section_to_its_own_file() {
    let dir = temp_dir();
    let snapshot = write_snapshot(&dir);
    let output_dir = dir.join("out");

    let result = convert_snapshot(&ConvertRequest::new(&snapshot, &output_dir))
        .expect("convert snapshot");

    assert!(!result.has_errors);
    assert_eq!(result.format, Some(WellLogFormat::Dlis));
    let ids: Vec<&str> = result
        .sections
        .iter()
        .map(|section| section.section_id.as_str())
        .collect();
    assert_eq!(ids, vec!["LF-1", "LF-2"]);

    let first = &result.sections[0];
    assert_eq!(first.status, SectionStatus::Success);
    assert_eq!(first.frames, vec!["MAIN".to_string()]);
    assert_eq!(first.curve_count, 2);
    assert_eq!(first.output_file, Some(output_dir.join("wellLF-1.json")));

    let documents = read_json(&output_dir.join("wellLF-1.json"));
    let documents = documents.as_array().expect("document list");
    assert_eq!(documents.len(), 1);
    let document = &documents[0];
    assert_eq!(document["header"]["well"], "A-1");
    assert_eq!(document["header"]["operator"], "ACME");
    assert_eq!(document["header"]["name"], "LF-1");
    assert_eq!(document["curves"][0]["name"], "DEPT");
    assert_eq!(document["curves"][1]["unit"], "gAPI");
    assert_eq!(document["data"].as_array().map(Vec::len), Some(3));
    assert_eq!(document["data"][2][1], -999.25);
    assert!(document["frame"]["objects"]["MAIN"].is_array());

    // A section without frames still gets a file, holding an empty list.
    let second = &result.sections[1];
    assert_eq!(second.status, SectionStatus::Success);
    assert_eq!(second.document_count(), 0);
    assert_eq!(read_json(&output_dir.join("wellLF-2.json")), serde_json::json!([]));
}

#[test]
fn converts_only_the_requested_section_in_compact_form() {
    let dir = temp_dir();
    let snapshot = write_snapshot(&dir);
    let mut request = ConvertRequest::new(&snapshot, &dir);
    request.section = Some("LF-1".to_string());
    request.compact = true;

    let result = convert_snapshot(&request).expect("convert snapshot");
    assert_eq!(result.sections.len(), 1);
    assert!(!dir.join("wellLF-2.json").exists());

    let text = fs::read_to_string(dir.join("wellLF-1.json")).expect("read output");
    assert!(!text.contains('\n'));
    assert_eq!(result.sections[0].output_file_size, Some(text.len() as u64));
}

#[test]
fn unknown_section_is_an_error() {
    let dir = temp_dir();
    let snapshot = write_snapshot(&dir);
    let mut request = ConvertRequest::new(&snapshot, &dir);
    request.section = Some("LF-9".to_string());

    let error = convert_snapshot(&request).expect_err("missing section");
    assert!(error.to_string().contains("LF-9"));
}

#[test]
fn unreadable_snapshot_is_an_error() {
    let dir = temp_dir();
    let snapshot = dir.join("broken.json");
    fs::write(&snapshot, "{not json").expect("write snapshot");

    assert!(convert_snapshot(&ConvertRequest::new(&snapshot, &dir)).is_err());
    assert!(convert_snapshot(&ConvertRequest::new(dir.join("missing.json"), &dir)).is_err());
}

#[test]
fn audit_header_is_written_once() {
    let dir = temp_dir();
    let snapshot = write_snapshot(&dir);
    let audit = dir.join("audit.csv");

    for _ in 0..2 {
        let result = convert_snapshot(&ConvertRequest::new(&snapshot, dir.join("out")))
            .expect("convert snapshot");
        let records = audit_records(&result).expect("audit records");
        append_audit_rows(&audit, &records).expect("append audit rows");
    }

    let mut reader = csv::Reader::from_path(&audit).expect("open audit log");
    let headers = reader.headers().expect("audit headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "status",
            "file_name",
            "input_file_path",
            "input_file_size",
            "input_file_creation_date",
            "file_checksum",
            "logical_file_id",
            "document_count",
            "output_file",
            "output_file_size",
            "message",
        ]
    );

    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("audit rows");
    assert_eq!(rows.len(), 4);

    let checksum = compute_file_sha256(&snapshot).expect("checksum");
    let size = SNAPSHOT.len().to_string();
    for row in &rows {
        assert_eq!(&row[0], "success");
        assert_eq!(&row[1], "well.json");
        assert_eq!(&row[3], size.as_str());
        assert_eq!(row[4].len(), "2026-01-01T00:00:00Z".len());
        assert!(row[4].ends_with('Z'));
        assert_eq!(&row[5], checksum.as_str());
        assert_eq!(&row[10], "");
    }
    let ids: Vec<&str> = rows.iter().map(|row| &row[6]).collect();
    assert_eq!(ids, vec!["LF-1", "LF-2", "LF-1", "LF-2"]);
    assert_eq!(&rows[0][7], "1");
    assert_eq!(&rows[1][7], "0");
}

#[test]
fn blank_section_id_never_replaces_the_snapshot() {
    let dir = temp_dir();
    let snapshot = dir.join("well.json");
    let text = r#"{"sections": [{"id": ""}]}"#;
    fs::write(&snapshot, text).expect("write snapshot");

    let result = convert_snapshot(&ConvertRequest::new(&snapshot, &dir)).expect("convert snapshot");

    assert_eq!(fs::read_to_string(&snapshot).expect("read snapshot"), text);
    assert_eq!(result.sections[0].status, SectionStatus::Success);
    assert_eq!(
        result.sections[0].output_file,
        Some(dir.join("well-unnamed.json"))
    );
    assert_eq!(read_json(&dir.join("well-unnamed.json")), serde_json::json!([]));
}

#[test]
fn duplicate_section_ids_convert_the_first_only() {
    let dir = temp_dir();
    let snapshot = dir.join("well.json");
    fs::write(
        &snapshot,
        r#"{"sections": [
            {"id": "LF", "frames": [{"name": "FIRST"}]},
            {"id": "LF", "frames": [{"name": "SECOND"}]}
        ]}"#,
    )
    .expect("write snapshot");
    let output_dir = dir.join("out");

    let result = convert_snapshot(&ConvertRequest::new(&snapshot, &output_dir))
        .expect("convert snapshot");

    assert!(result.has_errors);
    let first = &result.sections[0];
    assert_eq!(first.status, SectionStatus::Success);
    assert_eq!(first.frames, vec!["FIRST".to_string()]);
    let second = &result.sections[1];
    assert_eq!(second.status, SectionStatus::Failed);
    assert_eq!(second.output_file, None);
    assert!(
        second
            .message
            .as_deref()
            .is_some_and(|message| message.contains("wellLF.json"))
    );

    let written = fs::read(output_dir.join("wellLF.json")).expect("read output");
    assert_eq!(first.output_file_size, Some(written.len() as u64));
    let documents: serde_json::Value = serde_json::from_slice(&written).expect("parse output");
    assert!(documents[0]["frame"]["objects"]["FIRST"].is_array());

    let records = audit_records(&result).expect("audit records");
    assert_eq!(records[1].status, "failed");
    assert_eq!(records[1].output_file, "");
}
