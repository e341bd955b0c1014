use serde::{Deserialize, Serialize};

use super::lenient::integer_or_string;
use super::symptom::Symptom;

/// Patient data and selected symptoms sent for diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRequest {
    pub gender: String,
    #[serde(deserialize_with = "integer_or_string")]
    pub year_of_birth: i32,
    #[serde(default)]
    pub patient_name: String,
    pub symptoms: Vec<Symptom>,
}

/// One possible diagnosis, as returned upstream or by the mock generator.
/// Lists of candidates keep the order they were produced in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisCandidate {
    #[serde(alias = "Issue")]
    pub issue: Issue,
    #[serde(rename = "specialisation", alias = "Specialisation", default)]
    pub specialisations: Vec<Specialisation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(alias = "ID")]
    pub id: i64,
    #[serde(alias = "Name")]
    pub name: String,
    /// Confidence score, 0–100.
    #[serde(alias = "Accuracy")]
    pub accuracy: f64,
    #[serde(alias = "Icd")]
    pub icd: String,
    #[serde(alias = "IcdName")]
    pub icd_name: String,
    #[serde(alias = "ProfName")]
    pub prof_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialisation {
    #[serde(alias = "ID")]
    pub id: i64,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "SpecialistID")]
    pub spec_id: i64,
    #[serde(default)]
    pub specialist_name: String,
}
