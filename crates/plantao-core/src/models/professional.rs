//! Professional (staff directory) models.

use serde::{Deserialize, Serialize};

use super::same_text;

/// Highest rating a professional can hold.
pub const MAX_RATING: f64 = 5.0;

/// Nursing council (COREN) registration status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CorenStatus {
    Active,
    Inactive,
}

impl CorenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorenStatus::Active => "active",
            CorenStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(CorenStatus::Active),
            "inactive" => Some(CorenStatus::Inactive),
            _ => None,
        }
    }
}

/// A nursing professional available for home-care shifts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Professional {
    /// Local UUID
    pub professional_id: String,
    /// Full name
    pub name: String,
    /// Role (e.g., "enfermeiro", "técnico de enfermagem")
    pub role: String,
    /// COREN registration number (e.g., "COREN-SP 123456")
    pub coren_number: Option<String>,
    pub coren_status: CorenStatus,
    /// Average rating, 0.0 - 5.0
    pub rating: f64,
    /// Care specialties (e.g., ["traqueostomia", "gtt"])
    pub specialties: Vec<String>,
    /// Home neighborhood, used for proximity tags
    pub neighborhood: Option<String>,
    pub phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Professional {
    /// Create a professional with required fields.
    pub fn new(name: String, role: String, coren_status: CorenStatus, rating: f64) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            professional_id: uuid::Uuid::new_v4().to_string(),
            name,
            role,
            coren_number: None,
            coren_status,
            rating,
            specialties: Vec::new(),
            neighborhood: None,
            phone: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Only professionals with an active COREN may take shifts.
    pub fn is_eligible(&self) -> bool {
        self.coren_status == CorenStatus::Active
    }

    /// Check whether any of the given care needs is among the specialties.
    pub fn covers_any(&self, care_needs: &[String]) -> bool {
        care_needs.iter().any(|need| {
            self.specialties
                .iter()
                .any(|s| same_text(s, need))
        })
    }

    /// Validate user-entered fields.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("professional name is required".into());
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(format!(
                "rating must be between 0 and {}, got {}",
                MAX_RATING, self.rating
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_professional() {
        let p = Professional::new(
            "Ana Souza".into(),
            "enfermeira".into(),
            CorenStatus::Active,
            4.6,
        );
        assert!(p.is_eligible());
        assert_eq!(p.professional_id.len(), 36);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_inactive_coren_not_eligible() {
        let p = Professional::new("Bruno".into(), "técnico".into(), CorenStatus::Inactive, 5.0);
        assert!(!p.is_eligible());
    }

    #[test]
    fn test_validate_rating_range() {
        let mut p = Professional::new("Carla".into(), "técnica".into(), CorenStatus::Active, 5.5);
        assert!(p.validate().is_err());

        p.rating = f64::NAN;
        assert!(p.validate().is_err());

        p.rating = 0.0;
        assert!(p.validate().is_ok());

        p.name = "  ".into();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_covers_any_ignores_case() {
        let mut p = Professional::new("Dora".into(), "técnica".into(), CorenStatus::Active, 4.0);
        p.specialties = vec!["Traqueostomia".into()];

        assert!(p.covers_any(&["traqueostomia".into(), "gtt".into()]));
        assert!(!p.covers_any(&["gtt".into()]));
        assert!(!p.covers_any(&[]));
    }

    #[test]
    fn test_covers_any_accented() {
        let mut p = Professional::new("Dora".into(), "técnica".into(), CorenStatus::Active, 4.0);
        p.specialties = vec!["Nutrição".into()];

        assert!(p.covers_any(&["NUTRIÇÃO".into()]));
        assert!(p.covers_any(&["nutricao enteral".into(), "nutricao".into()]));
    }
}
