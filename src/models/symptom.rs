use serde::{Deserialize, Serialize};

use super::lenient::string_or_number;

/// One entry of the symptom catalog.
///
/// Serialized as `{"id": "...", "name": "..."}`. The upstream catalog sends
/// `{"ID": 10, "Name": "..."}`, so both spellings are accepted and numeric
/// ids are read as their decimal text. The web client labels the name
/// `description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    #[serde(alias = "ID", alias = "Id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "Name", alias = "description")]
    pub name: String,
}

impl Symptom {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
