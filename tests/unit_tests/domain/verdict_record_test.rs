use truthbot::domain::{FailureClassification, VerdictRecord};

#[test]
fn given_percentage_above_range_when_creating_record_then_clamps_to_100() {
    let record = VerdictRecord::new(true, 250, "analysis", vec![], "summary");
    assert_eq!(record.percentage, 100);
}

#[test]
fn given_rejected_record_when_created_then_is_unverified_with_single_error() {
    let record = VerdictRecord::rejected(0, "Unsupported file type: .docx", "analysis", "summary");

    assert!(!record.verified);
    assert_eq!(record.percentage, 0);
    assert_eq!(record.errors, vec!["Unsupported file type: .docx".to_string()]);
}

#[test]
fn given_record_when_serializing_then_emits_exactly_five_fields() {
    let record = VerdictRecord::new(
        false,
        12,
        "The Earth is not flat.",
        vec!["Claims Earth is flat".to_string()],
        "False",
    );

    let value = serde_json::to_value(&record).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object.len(), 5);
    assert_eq!(object["verified"], serde_json::json!(false));
    assert_eq!(object["percentage"], serde_json::json!(12));
    assert_eq!(object["analysis"], serde_json::json!("The Earth is not flat."));
    assert_eq!(object["errors"], serde_json::json!(["Claims Earth is flat"]));
    assert_eq!(object["summary"], serde_json::json!("False"));
}

#[test]
fn given_record_json_when_deserializing_then_matches_fields() {
    let json = r#"{"verified":true,"percentage":92,"analysis":"a","errors":[],"summary":"s"}"#;

    let record: VerdictRecord = serde_json::from_str(json).unwrap();

    assert_eq!(record, VerdictRecord::new(true, 92, "a", vec![], "s"));
}

#[test]
fn given_input_classifications_when_checking_then_only_caller_failures_are_input_errors() {
    assert!(FailureClassification::UnsupportedFileType.is_input_error());
    assert!(FailureClassification::EmptyInput.is_input_error());
    assert!(FailureClassification::ExtractionFailed.is_input_error());
    assert!(!FailureClassification::BackendUnreachable.is_input_error());
    assert!(!FailureClassification::BackendRejectedContent.is_input_error());
    assert!(!FailureClassification::MalformedBackendResponse.is_input_error());
    assert!(!FailureClassification::PartialBackendResponse.is_input_error());
}

#[test]
fn given_classification_when_displayed_then_uses_snake_case() {
    assert_eq!(
        FailureClassification::MalformedBackendResponse.to_string(),
        "malformed_backend_response"
    );
}
