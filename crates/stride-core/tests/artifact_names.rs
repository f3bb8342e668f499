use stride_core::artifact_names::{is_valid_report_filename, report_filename};
use stride_core::models::record::AssessmentRecord;

#[test]
fn report_filename_replaces_colons_and_dots() {
    let ts: jiff::Timestamp = "2025-03-04T10:20:30.5Z".parse().unwrap();
    let name = report_filename("as_hr_02", "session_001", ts);
    assert_eq!(name, "as_hr_02_session_001_2025-03-04T10-20-30-5Z.pdf");
    assert!(is_valid_report_filename(&name));
}

#[test]
fn rejects_path_separators_and_other_extensions() {
    assert!(!is_valid_report_filename("../secret.pdf"));
    assert!(!is_valid_report_filename("dir/report.pdf"));
    assert!(!is_valid_report_filename("report.txt"));
    assert!(!is_valid_report_filename(".pdf"));
    assert!(!is_valid_report_filename("report name.pdf"));
    assert!(is_valid_report_filename("as_card_01_s-2.pdf"));
}

#[test]
fn record_lifts_identifiers() {
    let record = AssessmentRecord::from_value(serde_json::json!({
        "session_id": "session_001",
        "assessment_id": "as_hr_02",
        "timestamp": 1750000000000u64,
        "accuracy": 80
    }))
    .unwrap();

    assert_eq!(record.session_id(), "session_001");
    assert_eq!(record.assessment_id(), "as_hr_02");
    assert_eq!(record.timestamp(), serde_json::json!(1750000000000u64));
    assert_eq!(record.document()["accuracy"], 80);
}

#[test]
fn record_requires_session_id() {
    let err = AssessmentRecord::from_value(serde_json::json!({ "assessment_id": "as_hr_02" }))
        .unwrap_err();
    assert!(err.to_string().contains("session_id"));
}

#[test]
fn record_deserializes_from_json() {
    let records: Vec<AssessmentRecord> = serde_json::from_str(
        r#"[{"session_id":"a","assessment_id":"as_hr_02"},{"session_id":"b","assessment_id":"as_card_01"}]"#,
    )
    .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].assessment_id(), "as_card_01");
}
