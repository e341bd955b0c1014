//! Canned answers served when the upstream API is disabled.
//!
//! Parsed from compiled-in JSON on every call, through the same models as
//! live responses.

use serde::de::DeserializeOwned;

use super::GatewayError;
use crate::models::{DiagnosisCandidate, Symptom};

const MOCK_SYMPTOMS: &str = r#"[
  {"id": "10", "name": "Headache"},
  {"id": "15", "name": "Fever"},
  {"id": "20", "name": "Cough"},
  {"id": "25", "name": "Sore throat"},
  {"id": "30", "name": "Nausea"},
  {"id": "35", "name": "Fatigue"},
  {"id": "40", "name": "Dizziness"},
  {"id": "45", "name": "Shortness of breath"},
  {"id": "50", "name": "Chest pain"},
  {"id": "55", "name": "Abdominal pain"}
]"#;

const MOCK_DIAGNOSIS: &str = r#"[
  {
    "issue": {
      "id": 100,
      "name": "Urinary Tract Infection (UTI)",
      "accuracy": 85,
      "icd": "N39.0",
      "icdName": "Urinary tract infection, site not specified",
      "profName": "Urinary tract infection"
    },
    "specialisation": [
      {"id": 5, "name": "General practitioner", "specId": 5, "specialistName": "General medicine"}
    ]
  },
  {
    "issue": {
      "id": 150,
      "name": "Dehydration",
      "accuracy": 60,
      "icd": "E86.0",
      "icdName": "Volume depletion",
      "profName": "Dehydration"
    },
    "specialisation": [
      {"id": 10, "name": "Internal medicine", "specId": 10, "specialistName": "Internal medicine"}
    ]
  },
  {
    "issue": {
      "id": 210,
      "name": "Liver Disease (early stages)",
      "accuracy": 30,
      "icd": "K72.90",
      "icdName": "Hepatic failure, unspecified without coma",
      "profName": "Hepatic failure"
    },
    "specialisation": [
      {"id": 25, "name": "Hepatologist", "specId": 25, "specialistName": "Hepatology"}
    ]
  }
]"#;

pub fn mock_symptoms() -> Result<Vec<Symptom>, GatewayError> {
    parse_mock(MOCK_SYMPTOMS, "mock symptoms")
}

pub fn mock_diagnosis() -> Result<Vec<DiagnosisCandidate>, GatewayError> {
    parse_mock(MOCK_DIAGNOSIS, "mock diagnosis")
}

fn parse_mock<T: DeserializeOwned>(json: &str, what: &'static str) -> Result<T, GatewayError> {
    serde_json::from_str(json).map_err(|e| GatewayError::Parse {
        what,
        reason: e.to_string(),
    })
}
