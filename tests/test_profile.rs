//! Tests for [`chanakya::profile`] and the storage it writes through to.

use chanakya::profile::{
    demo_profile, toggle, ProfileForm, ProfileStore, ProfileUpdate, UserProfile, STORAGE_KEY,
};
use chanakya::storage::{FileStore, KeyValueStore, MemoryStore};
use chanakya::StudyError;

fn sample_form() -> ProfileForm {
    ProfileForm {
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        email: "asha@example.com".to_string(),
        standard: "12th Grade".to_string(),
        subjects: vec!["Physics".to_string()],
        parent_email: "   ".to_string(),
        parent_phone: "+91 98765 43210".to_string(),
        ..ProfileForm::default()
    }
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

/// Test 1: a fresh store has nobody signed in.
#[test]
fn test_empty_storage_loads_logged_out() {
    let store = ProfileStore::load(MemoryStore::new());
    assert!(!store.is_authenticated());
    assert!(store.user().is_none());
}

/// Test 2: login then load on a fresh store yields an equal profile.
#[test]
fn test_login_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let profile = sample_form().into_profile().unwrap();

    let mut store = ProfileStore::load(FileStore::in_base(dir.path()));
    store.login(profile.clone()).unwrap();

    let reloaded = ProfileStore::load(FileStore::in_base(dir.path()));
    assert_eq!(reloaded.user(), Some(&profile));
}

/// Test 3: logout then load yields no profile.
#[test]
fn test_logout_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ProfileStore::load(FileStore::in_base(dir.path()));
    store.login(demo_profile()).unwrap();
    store.logout().unwrap();
    assert!(!store.is_authenticated());

    let reloaded = ProfileStore::load(FileStore::in_base(dir.path()));
    assert!(reloaded.user().is_none());
}

/// Test 4: logout with nobody signed in is not an error.
#[test]
fn test_logout_when_logged_out() {
    let mut store = ProfileStore::load(MemoryStore::new());
    assert!(store.logout().is_ok());
}

/// Test 5: a corrupt record is cleared and treated as logged out.
#[test]
fn test_corrupt_record_is_discarded() {
    let storage = MemoryStore::new();
    storage.set(STORAGE_KEY, "{ not json").unwrap();

    let store = ProfileStore::load(storage.clone());
    assert!(store.user().is_none());
    assert_eq!(storage.get(STORAGE_KEY).unwrap(), None);
}

/// Test 6: a record with the wrong shape is also discarded.
#[test]
fn test_wrong_shape_record_is_discarded() {
    let storage = MemoryStore::new();
    storage.set(STORAGE_KEY, r#"{"id": 7}"#).unwrap();

    let store = ProfileStore::load(storage.clone());
    assert!(store.user().is_none());
    assert!(storage.is_empty());
}

/// Test 7: the persisted record uses camelCase keys and omits empty
/// optional contacts.
#[test]
fn test_persisted_shape() {
    let storage = MemoryStore::new();
    let mut store = ProfileStore::load(storage.clone());
    store.login(demo_profile()).unwrap();

    let raw = storage.get(STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["firstName"], "Demo");
    assert_eq!(json["learningGoals"][0], "Improve grades");
    assert!(json.get("createdAt").is_some());
    assert!(json.get("parentEmail").is_none());
}

// ── Updates ──────────────────────────────────────────────────────────────────

/// Test 8: an update merges into the current profile and is persisted.
#[test]
fn test_update_merges_and_persists() {
    let storage = MemoryStore::new();
    let mut store = ProfileStore::load(storage.clone());
    let before = demo_profile();
    store.login(before.clone()).unwrap();

    let changed = store
        .update_profile(ProfileUpdate {
            city: Some("Pune".to_string()),
            parent_email: Some(Some("parent@example.com".to_string())),
            ..ProfileUpdate::default()
        })
        .unwrap();
    assert!(changed);

    let user = store.user().unwrap();
    assert_eq!(user.city, "Pune");
    assert_eq!(user.parent_email.as_deref(), Some("parent@example.com"));
    assert_eq!(user.id, before.id);
    assert_eq!(user.created_at, before.created_at);
    assert_eq!(user.school, before.school);

    let reloaded = ProfileStore::load(storage);
    assert_eq!(reloaded.user().unwrap().city, "Pune");
}

/// Test 9: updating while logged out does nothing and writes nothing.
#[test]
fn test_update_when_logged_out_is_noop() {
    let storage = MemoryStore::new();
    let mut store = ProfileStore::load(storage.clone());
    let changed = store
        .update_profile(ProfileUpdate {
            city: Some("Pune".to_string()),
            ..ProfileUpdate::default()
        })
        .unwrap();
    assert!(!changed);
    assert!(storage.is_empty());
}

/// Test 10: JSON updates tell an explicit null apart from a missing key.
#[test]
fn test_update_json_null_clears_field() {
    let mut profile = demo_profile();
    profile.parent_phone = Some("123".to_string());
    profile.parent_email = Some("p@example.com".to_string());

    let update: ProfileUpdate =
        serde_json::from_str(r#"{"parentPhone": null, "school": "New School"}"#).unwrap();
    update.apply_to(&mut profile);

    assert_eq!(profile.parent_phone, None);
    assert_eq!(profile.parent_email.as_deref(), Some("p@example.com"));
    assert_eq!(profile.school, "New School");
}

/// Test 11: unknown keys and non-editable keys are rejected.
#[test]
fn test_update_rejects_unknown_keys() {
    assert!(serde_json::from_str::<ProfileUpdate>(r#"{"favouriteColour": "red"}"#).is_err());
    assert!(serde_json::from_str::<ProfileUpdate>(r#"{"id": "hijack"}"#).is_err());
    assert!(serde_json::from_str::<ProfileUpdate>(r#"{"createdAt": "2020-01-01T00:00:00Z"}"#).is_err());
}

/// Test 12: an empty JSON object is an empty update.
#[test]
fn test_empty_update() {
    let update: ProfileUpdate = serde_json::from_str("{}").unwrap();
    assert!(update.is_empty());
}

// ── Form ─────────────────────────────────────────────────────────────────────

/// Test 13: the form names each missing required field.
#[test]
fn test_form_reports_missing_fields() {
    let form = ProfileForm {
        first_name: "  ".to_string(),
        ..ProfileForm::default()
    };
    assert_eq!(
        form.missing_required_fields(),
        vec!["firstName", "email", "standard"]
    );
    assert!(!form.can_submit());
    match form.into_profile() {
        Err(StudyError::MissingFields(fields)) => assert_eq!(fields.len(), 3),
        other => panic!("expected MissingFields, got {other:?}"),
    }
}

/// Test 14: sign-up assigns an id and drops blank parent contacts.
#[test]
fn test_form_into_profile() {
    let a = sample_form().into_profile().unwrap();
    let b = sample_form().into_profile().unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(a.parent_email, None);
    assert_eq!(a.parent_phone.as_deref(), Some("+91 98765 43210"));
    assert_eq!(a.subjects, vec!["Physics".to_string()]);
}

/// Test 15: editing through the form keeps the id and clears blanked
/// contacts.
#[test]
fn test_form_edit_round() {
    let mut profile: UserProfile = demo_profile();
    profile.parent_email = Some("p@example.com".to_string());

    let mut form = ProfileForm::from_profile(&profile);
    assert_eq!(form.parent_email, "p@example.com");
    form.parent_email.clear();
    form.standard = "11th Grade".to_string();

    let mut store = ProfileStore::load(MemoryStore::new());
    store.login(profile.clone()).unwrap();
    store.update_profile(form.to_update()).unwrap();

    let user = store.user().unwrap();
    assert_eq!(user.id, "demo-user");
    assert_eq!(user.standard, "11th Grade");
    assert_eq!(user.parent_email, None);
}

/// Test 16: toggle adds and removes while keeping order.
#[test]
fn test_toggle() {
    let mut list = vec!["Physics".to_string(), "Biology".to_string()];
    toggle(&mut list, "Chemistry");
    assert_eq!(list, vec!["Physics", "Biology", "Chemistry"]);
    toggle(&mut list, "Physics");
    assert_eq!(list, vec!["Biology", "Chemistry"]);
}

/// Test 17: the demo profile has the fixed identity.
#[test]
fn test_demo_profile() {
    let p = demo_profile();
    assert_eq!(p.id, "demo-user");
    assert_eq!(p.email, "demo@chanakya.com");
    assert_eq!(p.standard, "10th Grade");
    assert_eq!(p.subjects.len(), 4);
}
