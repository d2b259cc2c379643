//! Patient models.

use serde::{Deserialize, Serialize};

use super::same_text;

/// A home-care patient, reduced to what the shift board needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Local UUID
    pub patient_id: String,
    /// Patient name
    pub name: String,
    /// Neighborhood of the care address
    pub neighborhood: Option<String>,
    /// Care needs matched against professional specialties
    pub care_needs: Vec<String>,
    /// Free-form clinical summary, stored as JSON text
    pub clinical_summary: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Patient {
    /// Create a new patient with required fields.
    pub fn new(name: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            patient_id: uuid::Uuid::new_v4().to_string(),
            name,
            neighborhood: None,
            care_needs: Vec::new(),
            clinical_summary: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Whether a professional's neighborhood matches the care address.
    pub fn is_same_neighborhood(&self, other: Option<&str>) -> bool {
        match (self.neighborhood.as_deref(), other) {
            (Some(a), Some(b)) => same_text(a, b),
            _ => false,
        }
    }
}

/// Parse and re-serialize a clinical summary, rejecting invalid JSON.
pub fn normalize_clinical_summary(raw: &str) -> Result<String, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    serde_json::to_string(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient() {
        let patient = Patient::new("Dona Maria".into());
        assert_eq!(patient.name, "Dona Maria");
        assert!(patient.care_needs.is_empty());
        assert_eq!(patient.patient_id.len(), 36); // UUID format
    }

    #[test]
    fn test_same_neighborhood() {
        let mut patient = Patient::new("Seu João".into());
        assert!(!patient.is_same_neighborhood(Some("Moema")));

        patient.neighborhood = Some("Moema".into());
        assert!(patient.is_same_neighborhood(Some(" moema ")));
        assert!(!patient.is_same_neighborhood(Some("Pinheiros")));
        assert!(!patient.is_same_neighborhood(None));
    }

    #[test]
    fn test_same_neighborhood_accented() {
        let mut patient = Patient::new("Dona Lúcia".into());
        patient.neighborhood = Some("Tatuapé".into());
        assert!(patient.is_same_neighborhood(Some("TATUAPÉ")));
        assert!(patient.is_same_neighborhood(Some("tatuape")));
    }

    #[test]
    fn test_clinical_summary_json() {
        let normalized = normalize_clinical_summary(r#"{ "diagnosis": "AVC",  "o2": true }"#).unwrap();
        let value: serde_json::Value = serde_json::from_str(&normalized).unwrap();
        assert_eq!(value["diagnosis"], "AVC");

        assert!(normalize_clinical_summary("{ diagnosis: AVC }").is_err());
    }
}
