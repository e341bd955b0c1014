use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lenient::{integer_or_string, text_or_json};

/// Outcome of a diagnosis session, assembled by the client and stored as-is.
///
/// `id` stays `None` until the result store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default, deserialize_with = "text_or_json")]
    pub symptoms: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default, deserialize_with = "integer_or_string")]
    pub year_of_birth: i32,
    #[serde(default, deserialize_with = "text_or_json")]
    pub diagnosis: String,
    #[serde(rename = "isValid", alias = "valid", default)]
    pub is_valid: bool,
    #[serde(default = "now")]
    pub timestamp: NaiveDateTime,
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

impl DiagnosisResult {
    pub fn new(
        symptoms: impl Into<String>,
        gender: impl Into<String>,
        year_of_birth: i32,
        diagnosis: impl Into<String>,
        is_valid: bool,
    ) -> Self {
        Self {
            id: None,
            symptoms: symptoms.into(),
            gender: gender.into(),
            year_of_birth,
            diagnosis: diagnosis.into(),
            is_valid,
            timestamp: now(),
        }
    }
}
