use std::io::Write;

use commonapp_autofill::context::{self, ContextSource, PASSWORD_VAR};
use commonapp_autofill::{Citizenship, Error, StaticSecrets};
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).expect("Failed to write temp file");
    file
}

#[tokio::test]
async fn test_structured_minimal_applicant() {
    let file = write_temp(r#"{"email":"a@b.com","colleges":["MIT"]}"#);
    let secrets = StaticSecrets::new().with(PASSWORD_VAR, "pw1");

    let record = context::load(&ContextSource::Structured(file.path().into()), &secrets)
        .await
        .expect("Failed to load applicant");

    assert_eq!(record.citizenship_status, Citizenship::International);
    assert_eq!(record.colleges, vec!["MIT"]);
    assert_eq!(record.credentials.password, "pw1");
    assert_eq!(record.email(), "a@b.com");
    assert!(!record.first_generation);
    assert!(!record.honors_college);
    assert!(!record.lived_outside_us);
    assert!(!record.parents_separate_address);
}

#[tokio::test]
async fn test_structured_full_applicant() {
    let file = write_temp(
        r#"{
            "email": "sam@example.org",
            "first_name": "Sam",
            "last_name": "Rivera",
            "age": 18,
            "colleges": ["Harvard", "Stanford", "Rice"],
            "application_term": "Spring 2027",
            "us_citizen": false,
            "permanent_resident": true,
            "first_generation": true,
            "siblings": 3,
            "birth_state": "Ohio",
            "gpa": 3.9
        }"#,
    );

    let record = context::load(&ContextSource::Structured(file.path().into()), &StaticSecrets::new())
        .await
        .expect("Failed to load applicant");

    assert_eq!(record.full_name(), "Sam Rivera");
    assert_eq!(record.age, 18);
    assert_eq!(record.colleges, vec!["Harvard", "Stanford", "Rice"]);
    assert_eq!(record.application_term, "Spring 2027");
    assert_eq!(record.citizenship_status, Citizenship::PermanentResident);
    assert!(record.first_generation);
    assert_eq!(record.siblings, 3);
    assert_eq!(record.birth_state, "Ohio");

    let reparsed: serde_json::Value =
        serde_json::from_str(&record.full_context).expect("full_context should be JSON");
    assert_eq!(reparsed["gpa"], 3.9);
    assert_eq!(reparsed["colleges"][2], "Rice");
}

#[tokio::test]
async fn test_free_text_echoes_file() {
    let notes = "Name: Priya\nI founded the robotics club.\n";
    let file = write_temp(notes);

    let record = context::load(&ContextSource::FreeText(file.path().into()), &StaticSecrets::new())
        .await
        .expect("Failed to load context");

    assert_eq!(record.full_context, notes);
    assert!(!record.colleges.is_empty());
    assert_eq!(record.application_term, "Fall 2026");
}

#[tokio::test]
async fn test_missing_files_are_not_found() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("nope.json");

    for source in [
        ContextSource::Structured(missing.clone()),
        ContextSource::FreeText(missing.clone()),
    ] {
        let err = context::load(&source, &StaticSecrets::new())
            .await
            .expect_err("missing file should fail");
        match err {
            Error::ContextNotFound(path) => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[tokio::test]
async fn test_malformed_json_fails() {
    let file = write_temp(r#"{"email": "a@b.com", "colleges": ["MIT""#);
    let err = context::load(&ContextSource::Structured(file.path().into()), &StaticSecrets::new())
        .await
        .expect_err("malformed JSON should fail");
    assert!(matches!(err, Error::Json(_)), "got {err}");
}

#[tokio::test]
async fn test_empty_college_list_defaults() {
    let file = write_temp(r#"{"colleges": []}"#);
    let record = context::load(&ContextSource::Structured(file.path().into()), &StaticSecrets::new())
        .await
        .expect("Failed to load applicant");
    assert_eq!(record.colleges, vec!["Stanford"]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_path_is_an_io_error() {
    // A regular file used as a directory fails with ENOTDIR, not "not found".
    let file = write_temp("not a directory");
    let nested = file.path().join("applicant.json");

    let err = context::load(&ContextSource::Structured(nested), &StaticSecrets::new())
        .await
        .expect_err("path under a regular file should fail");
    assert!(matches!(err, Error::IoError(_)), "got {err}");
}
