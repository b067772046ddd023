use crate::utils::{DatasetFixture, sample_patients};
use patient_directory::{DirectoryError, PatientRecord, load_patients};

/// Test a well-formed dataset loads in file order
#[test]
fn test_load_sample_dataset() -> patient_directory::Result<()> {
    let fixture = DatasetFixture::new(&sample_patients());
    let patients = load_patients(fixture.path())?;

    assert_eq!(patients.len(), 12);
    assert_eq!(patients[0].patient_name, "Ann Lee");
    assert_eq!(
        patients[0].primary_contact().email.as_deref(),
        Some("patient1@example.com")
    );
    Ok(())
}

/// Test records without photo or contact fields still load
#[test]
fn test_load_tolerates_missing_optional_fields() -> patient_directory::Result<()> {
    let fixture = DatasetFixture::with_content(
        r#"[
            {"patient_id": 3, "patient_name": "Kai", "age": 12, "medical_issue": "rash"},
            {"patient_id": 4, "patient_name": "Lu", "age": 40, "medical_issue": "fever",
             "photo_url": null, "contact": [{"number": "555-0000"}, {"email": "lu@example.com"}]}
        ]"#,
    );
    let patients = load_patients(fixture.path())?;

    assert!(patients[0].contact.is_empty());
    assert!(patients[0].primary_contact().is_empty());
    assert_eq!(patients[1].contact.len(), 2);
    assert_eq!(patients[1].primary_contact().number.as_deref(), Some("555-0000"));
    assert_eq!(patients[1].primary_contact().email, None);
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let fixture = DatasetFixture::new(&[]);
    let missing = fixture.path().with_file_name("absent.json");

    let err = load_patients(&missing).unwrap_err();
    assert!(matches!(err, DirectoryError::Io { .. }), "got {err:?}");
    assert!(err.is_dataset_failure());
}

#[test]
fn test_malformed_json_is_parse_error() {
    let fixture = DatasetFixture::with_content(r#"[{"patient_id": 1, "patient_name": "#);

    let err = load_patients(fixture.path()).unwrap_err();
    assert!(matches!(err, DirectoryError::Parse { .. }), "got {err:?}");
}

#[test]
fn test_wrong_field_type_is_parse_error() {
    let fixture = DatasetFixture::with_content(
        r#"[{"patient_id": 1, "patient_name": "Ann", "age": "old", "medical_issue": "fever"}]"#,
    );

    let err = load_patients(fixture.path()).unwrap_err();
    assert!(matches!(err, DirectoryError::Parse { .. }), "got {err:?}");
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let fixture = DatasetFixture::new(&[
        PatientRecord::new(7, "Ann", 30, "fever"),
        PatientRecord::new(7, "Bob", 40, "rash"),
    ]);

    let err = load_patients(fixture.path()).unwrap_err();
    match err {
        DirectoryError::InvalidDataset { reason, .. } => {
            assert!(reason.contains("duplicate patient_id 7"), "reason: {reason}");
        }
        other => panic!("expected InvalidDataset, got {other:?}"),
    }
}

#[test]
fn test_empty_dataset_loads() -> patient_directory::Result<()> {
    let fixture = DatasetFixture::new(&[]);
    assert!(load_patients(fixture.path())?.is_empty());
    Ok(())
}
