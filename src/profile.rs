//! The signed-in student profile and the store that keeps it.
//!
//! At most one profile is active. It is written through to the key-value
//! store on every change and removed on logout, so restarting the app picks
//! up exactly what the last session left behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use crate::error::StudyError;
use crate::storage::KeyValueStore;

pub const STORAGE_KEY: &str = "studygenie_user";

pub const STANDARDS: &[&str] = &[
    "6th Grade",
    "7th Grade",
    "8th Grade",
    "9th Grade",
    "10th Grade",
    "11th Grade",
    "12th Grade",
    "University 1st Year",
    "University 2nd Year",
    "University 3rd Year",
    "University 4th Year",
    "Graduate",
    "Professional",
];

pub const AVAILABLE_SUBJECTS: &[&str] = &[
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "Science",
    "English",
    "Hindi",
    "Computer Science",
    "History",
    "Geography",
    "Economics",
    "Political Science",
    "Psychology",
    "Literature",
    "Engineering",
    "Medicine",
    "Business Studies",
    "Accounting",
];

pub const LEARNING_GOAL_OPTIONS: &[&str] = &[
    "Improve grades",
    "Exam preparation",
    "Concept understanding",
    "Homework help",
    "Competitive exams",
    "Skill development",
    "Career preparation",
    "Personal growth",
];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
    pub standard: String,
    pub subjects: Vec<String>,
    pub school: String,
    pub city: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_phone: Option<String>,
    pub learning_goals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// The fixed profile behind the "try the demo" button.
pub fn demo_profile() -> UserProfile {
    UserProfile {
        id: "demo-user".to_string(),
        first_name: "Demo".to_string(),
        last_name: "Student".to_string(),
        email: "demo@chanakya.com".to_string(),
        date_of_birth: "2005-01-15".to_string(),
        standard: "10th Grade".to_string(),
        subjects: ["Mathematics", "Physics", "Chemistry", "Biology"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        school: "Demo High School".to_string(),
        city: "Demo City".to_string(),
        phone: "+1234567890".to_string(),
        parent_email: None,
        parent_phone: None,
        learning_goals: vec!["Improve grades".to_string(), "Exam preparation".to_string()],
        profile_image: None,
        created_at: Utc::now(),
    }
}

/// Adds `value` when absent, removes it when present. Order is kept.
pub fn toggle(list: &mut Vec<String>, value: &str) {
    if let Some(pos) = list.iter().position(|v| v == value) {
        list.remove(pos);
    } else {
        list.push(value.to_string());
    }
}

/// Editable profile fields, used both for sign-up and for the edit view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
    pub standard: String,
    pub subjects: Vec<String>,
    pub school: String,
    pub city: String,
    pub phone: String,
    pub parent_email: String,
    pub parent_phone: String,
    pub learning_goals: Vec<String>,
}

impl ProfileForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            date_of_birth: profile.date_of_birth.clone(),
            standard: profile.standard.clone(),
            subjects: profile.subjects.clone(),
            school: profile.school.clone(),
            city: profile.city.clone(),
            phone: profile.phone.clone(),
            parent_email: profile.parent_email.clone().unwrap_or_default(),
            parent_phone: profile.parent_phone.clone().unwrap_or_default(),
            learning_goals: profile.learning_goals.clone(),
        }
    }

    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.first_name.trim().is_empty() {
            missing.push("firstName");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.standard.trim().is_empty() {
            missing.push("standard");
        }
        missing
    }

    pub fn can_submit(&self) -> bool {
        self.missing_required_fields().is_empty()
    }

    /// Builds a brand new profile with a fresh id, as sign-up does.
    pub fn into_profile(self) -> Result<UserProfile, StudyError> {
        let missing = self.missing_required_fields();
        if !missing.is_empty() {
            return Err(StudyError::MissingFields(missing));
        }

        Ok(UserProfile {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date_of_birth: self.date_of_birth,
            standard: self.standard,
            subjects: self.subjects,
            school: self.school,
            city: self.city,
            phone: self.phone,
            parent_email: non_blank(self.parent_email),
            parent_phone: non_blank(self.parent_phone),
            learning_goals: self.learning_goals,
            profile_image: None,
            created_at: Utc::now(),
        })
    }

    /// Every editable field of the form as an update; blank parent contacts
    /// clear the stored value.
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            email: Some(self.email.clone()),
            date_of_birth: Some(self.date_of_birth.clone()),
            standard: Some(self.standard.clone()),
            subjects: Some(self.subjects.clone()),
            school: Some(self.school.clone()),
            city: Some(self.city.clone()),
            phone: Some(self.phone.clone()),
            parent_email: Some(non_blank(self.parent_email.clone())),
            parent_phone: Some(non_blank(self.parent_phone.clone())),
            learning_goals: Some(self.learning_goals.clone()),
            profile_image: None,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

// Keeps an explicit `null` apart from a missing key.
fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// A partial change to the active profile.
///
/// `None` leaves a field alone. The nullable fields take `Some(None)` to
/// clear them. `id` and `createdAt` are not editable.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub standard: Option<String>,
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub parent_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub parent_phone: Option<Option<String>>,
    #[serde(default)]
    pub learning_goals: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub profile_image: Option<Option<String>>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(self, profile: &mut UserProfile) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }

        set(&mut profile.first_name, self.first_name);
        set(&mut profile.last_name, self.last_name);
        set(&mut profile.email, self.email);
        set(&mut profile.date_of_birth, self.date_of_birth);
        set(&mut profile.standard, self.standard);
        set(&mut profile.subjects, self.subjects);
        set(&mut profile.school, self.school);
        set(&mut profile.city, self.city);
        set(&mut profile.phone, self.phone);
        set(&mut profile.parent_email, self.parent_email);
        set(&mut profile.parent_phone, self.parent_phone);
        set(&mut profile.learning_goals, self.learning_goals);
        set(&mut profile.profile_image, self.profile_image);
    }
}

/// Owns the active profile and writes every change through to `S`.
#[derive(Debug)]
pub struct ProfileStore<S: KeyValueStore> {
    storage: S,
    user: Option<UserProfile>,
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Startup: reads whatever the last session persisted. Unreadable or
    /// corrupt records are logged, cleared, and treated as logged out.
    pub fn load(storage: S) -> Self {
        let user = match storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(profile) => {
                    debug!("restored profile {}", profile.id);
                    Some(profile)
                }
                Err(e) => {
                    warn!("discarding corrupt profile record: {e}");
                    clear_record(&storage);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("could not read profile record: {e}");
                clear_record(&storage);
                None
            }
        };

        Self { storage, user }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, profile: UserProfile) -> Result<(), StudyError> {
        self.persist(&profile)?;
        info!("logged in as {}", profile.id);
        self.user = Some(profile);
        Ok(())
    }

    /// The in-memory profile is dropped even when removing the persisted
    /// copy fails; the error is still returned.
    pub fn logout(&mut self) -> Result<(), StudyError> {
        if let Some(user) = self.user.take() {
            info!("logged out {}", user.id);
        }
        self.storage.remove(STORAGE_KEY)
    }

    /// Returns `Ok(false)` without touching storage when nobody is logged in.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<bool, StudyError> {
        let Some(current) = self.user.as_ref() else {
            return Ok(false);
        };

        let mut updated = current.clone();
        update.apply_to(&mut updated);
        self.persist(&updated)?;
        self.user = Some(updated);
        Ok(true)
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&self, profile: &UserProfile) -> Result<(), StudyError> {
        let json = serde_json::to_string(profile)?;
        self.storage.set(STORAGE_KEY, &json)
    }
}

fn clear_record<S: KeyValueStore>(storage: &S) {
    if let Err(e) = storage.remove(STORAGE_KEY) {
        warn!("could not clear profile record: {e}");
    }
}
