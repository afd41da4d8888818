use chrono::{Duration, Utc};

use crate::error::RobolabError;
use crate::model::*;

fn sample_new_project() -> NewProject {
    NewProject::new("Weather Station", "Measure temperature and humidity.")
        .with_category(Category::Science)
        .with_difficulty(Difficulty::Intermediate)
        .with_duration("4 hours")
        .with_materials(["ESP32", "DHT22"])
        .with_steps(["Wire the sensor", "Log readings"])
}

#[test]
fn test_new_project_defaults() {
    let input = NewProject::new("Title", "Description");
    assert_eq!(input.difficulty, Difficulty::Beginner);
    assert_eq!(input.category, Category::Electronics);
    assert!(input.available);
    assert!(input.image_url.is_none());
    assert!(input.materials.is_empty());
}

#[test]
fn test_into_project_assigns_placeholder_image() {
    let project = sample_new_project().into_project(ProjectId(9), Utc::now());
    assert_eq!(project.id, ProjectId(9));
    assert!(project
        .image_url
        .starts_with("https://api.a0.dev/assets/image?text=Weather+Station"));
    assert!(project.image_url.ends_with("aspect=1%3A1"));
}

#[test]
fn test_into_project_keeps_explicit_image() {
    let project = sample_new_project()
        .with_image_url("https://example.com/station.png")
        .into_project(ProjectId(1), Utc::now());
    assert_eq!(project.image_url, "https://example.com/station.png");
}

#[test]
fn test_placeholder_for_blank_title() {
    let url = placeholder_image_url("   ");
    assert!(url.contains("text=New+project"));
}

#[test]
fn test_validate_new_project_ok() {
    assert!(validate_new_project(&sample_new_project()).is_ok());
}

#[test]
fn test_validate_requires_materials_and_steps() {
    let no_materials = sample_new_project().with_materials(Vec::<String>::new());
    let err = validate_new_project(&no_materials).unwrap_err();
    assert!(err.to_string().contains("material"));

    let no_steps = sample_new_project().with_steps(Vec::<String>::new());
    let err = validate_new_project(&no_steps).unwrap_err();
    assert!(err.to_string().contains("step"));
}

#[test]
fn test_validate_rejects_blank_fields() {
    let mut input = sample_new_project();
    input.title = "  ".into();
    assert!(matches!(
        validate_new_project(&input),
        Err(RobolabError::InvalidInput(_))
    ));

    let mut input = sample_new_project();
    input.duration = String::new();
    assert!(validate_new_project(&input).is_err());

    let input = sample_new_project().with_materials(["ESP32", " "]);
    assert!(validate_new_project(&input).is_err());
}

#[test]
fn test_validate_title_length() {
    let mut input = sample_new_project();
    input.title = "x".repeat(MAX_TITLE_LENGTH + 1);
    assert!(validate_new_project(&input).is_err());
    input.title = "x".repeat(MAX_TITLE_LENGTH);
    assert!(validate_new_project(&input).is_ok());
}

#[test]
fn test_validate_patch_only_checks_touched_fields() {
    assert!(validate_patch(&ProjectPatch::default()).is_ok());
    assert!(validate_patch(&ProjectPatch::availability(false)).is_ok());

    let patch = ProjectPatch {
        steps: Some(Vec::new()),
        ..Default::default()
    };
    assert!(validate_patch(&patch).is_err());
}

#[test]
fn test_patch_apply_merges_fields() {
    let mut project = sample_new_project().into_project(ProjectId(1), Utc::now());
    let original_created = project.created_at;

    let patch = ProjectPatch {
        title: Some("Solar Weather Station".into()),
        available: Some(false),
        ..Default::default()
    };
    patch.apply(&mut project);

    assert_eq!(project.title, "Solar Weather Station");
    assert!(!project.available);
    assert_eq!(project.description, "Measure temperature and humidity.");
    assert_eq!(project.category, Category::Science);
    assert_eq!(project.created_at, original_created);
    assert_eq!(project.id, ProjectId(1));
}

#[test]
fn test_patch_is_empty() {
    assert!(ProjectPatch::default().is_empty());
    assert!(!ProjectPatch::availability(true).is_empty());
    assert!(!ProjectPatch::from_new(sample_new_project()).is_empty());
}

#[test]
fn test_matches_query_case_insensitive() {
    let project = sample_new_project().into_project(ProjectId(1), Utc::now());
    assert!(project.matches_query("weather"));
    assert!(project.matches_query("HUMIDITY"));
    assert!(project.matches_query("  "));
    assert!(!project.matches_query("arm"));
}

#[test]
fn test_category_roundtrip() {
    for category in Category::ALL {
        let parsed: Category = category.to_string().parse().unwrap();
        assert_eq!(parsed, category);
    }
    assert!("robots".parse::<Category>().is_err());
}

#[test]
fn test_difficulty_serde_snake_case() {
    let json = serde_json::to_string(&Difficulty::Intermediate).unwrap();
    assert_eq!(json, "\"intermediate\"");
    let parsed: Difficulty = serde_json::from_str("\"advanced\"").unwrap();
    assert_eq!(parsed, Difficulty::Advanced);
}

#[test]
fn test_id_parse() {
    assert_eq!("42".parse::<ProjectId>().unwrap(), ProjectId(42));
    assert_eq!(" 7 ".parse::<UserId>().unwrap(), UserId(7));
    let err = "abc".parse::<ProjectId>().unwrap_err();
    assert!(err.to_string().contains("invalid project id"));
}

#[test]
fn test_identity_strips_password() {
    let entry = RosterEntry::admin(1, "admin", "secret", "Admin");
    let json = serde_json::to_string(&entry.identity()).unwrap();
    assert!(!json.contains("secret"));
    assert!(!format!("{entry:?}").contains("secret"));
    assert!(entry.matches("admin", "secret"));
    assert!(!entry.matches("Admin", "secret"));
    assert!(entry.as_student().is_none());
}

#[test]
fn test_assignment_completion_keeps_first_timestamp() {
    let start = Utc::now();
    let mut a = Assignment::new(AssignmentId(1), UserId(2), ProjectId(3), start);
    assert!(!a.is_completed());
    assert!(a.completed_at().is_none());

    let first = start + Duration::minutes(5);
    assert!(a.complete(first));
    assert!(a.is_completed());

    assert!(!a.complete(first + Duration::hours(1)));
    assert_eq!(a.completed_at(), Some(first));
}

#[test]
fn test_assignment_serializes_completed_flag() {
    let a = Assignment::new(AssignmentId(1), UserId(2), ProjectId(3), Utc::now());
    let value = serde_json::to_value(&a).unwrap();
    assert_eq!(value["completed"], false);
    assert!(value["completed_at"].is_null());

    let back: Assignment = serde_json::from_value(value).unwrap();
    assert_eq!(back, a);
}

#[test]
fn test_assignment_rejects_inconsistent_record() {
    let json = serde_json::json!({
        "id": 1,
        "project_id": 1,
        "student_id": 2,
        "started_at": "2025-06-01T10:00:00Z",
        "completed_at": null,
        "completed": true,
    });
    assert!(serde_json::from_value::<Assignment>(json).is_err());
}
