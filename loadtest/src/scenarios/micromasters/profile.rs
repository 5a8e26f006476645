//! Edits applied to a learner's profile document between the profile tab submissions.

use common::micromasters::{EducationEntry, WorkHistoryEntry};
use serde_json::{Map, Value, json};

pub type Profile = Map<String, Value>;

/// Puts the profile back into an unfinished state so every run submits the
/// same tabs. Terms of service are toggled. Returns whether the profile was
/// filled out before the reset.
pub fn reset_profile(profile: &mut Profile) -> bool {
    profile.insert("education".to_string(), json!([]));
    profile.insert("work_history".to_string(), json!([]));
    if profile.get("agreed_to_terms_of_service") == Some(&Value::Bool(true)) {
        profile.remove("agreed_to_terms_of_service");
    } else {
        profile.insert("agreed_to_terms_of_service".to_string(), json!(true));
    }
    let filled_out = profile.remove("filled_out").is_some_and(|value| value == Value::Bool(true));
    profile.remove("email_optin");
    profile.remove("image");
    filled_out
}

pub fn apply_personal_info(profile: &mut Profile, username: &str) {
    let personal_info = json!({
        "birth_country": "IT",
        "city": "Los Angeles",
        "country": "US",
        "date_of_birth": "2000-01-12",
        "first_name": username,
        "gender": "f",
        "last_name": "Example",
        "nationality": "IT",
        "preferred_language": "en",
        "preferred_name": format!("{username} Preferred"),
        "state_or_territory": "US-CA",
    });
    if let Value::Object(fields) = personal_info {
        profile.extend(fields);
    }
}

fn push_entry(profile: &mut Profile, key: &str, entry: Value) {
    match profile.get_mut(key) {
        Some(Value::Array(entries)) => entries.push(entry),
        _ => {
            profile.insert(key.to_string(), Value::Array(vec![entry]));
        }
    }
}

pub fn push_education(profile: &mut Profile, entry: EducationEntry) {
    push_entry(profile, "education", json!(entry));
}

pub fn push_work_history(profile: &mut Profile, entry: WorkHistoryEntry) {
    push_entry(profile, "work_history", json!(entry));
}

pub fn mark_filled_out(profile: &mut Profile) {
    profile.insert("filled_out".to_string(), json!(true));
}
