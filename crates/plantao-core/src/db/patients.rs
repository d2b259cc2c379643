//! Patient database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::Patient;

const PATIENT_COLUMNS: &str = r#"
    patient_id, name, neighborhood, care_needs, clinical_summary, created_at, updated_at
"#;

impl Database {
    /// Insert a new patient.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        let care_needs_json = serde_json::to_string(&patient.care_needs)?;

        self.conn.execute(
            r#"
            INSERT INTO patients (
                patient_id, name, neighborhood, care_needs, clinical_summary,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                patient.patient_id,
                patient.name,
                patient.neighborhood,
                care_needs_json,
                patient.clinical_summary,
                patient.created_at,
                patient.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Update an existing patient.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        let care_needs_json = serde_json::to_string(&patient.care_needs)?;

        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                name = ?2,
                neighborhood = ?3,
                care_needs = ?4,
                clinical_summary = ?5,
                updated_at = datetime('now')
            WHERE patient_id = ?1
            "#,
            params![
                patient.patient_id,
                patient.name,
                patient.neighborhood,
                care_needs_json,
                patient.clinical_summary,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Replace the clinical summary JSON document.
    pub fn set_patient_clinical_summary(&self, patient_id: &str, summary: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE patients SET clinical_summary = ?2, updated_at = datetime('now') WHERE patient_id = ?1",
            params![patient_id, summary],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, patient_id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE patient_id = ?"),
                [patient_id],
                PatientRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List all patients ordered by name.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PATIENT_COLUMNS} FROM patients ORDER BY name"))?;

        let rows = stmt.query_map([], PatientRow::from_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    patient_id: String,
    name: String,
    neighborhood: Option<String>,
    care_needs: String,
    clinical_summary: Option<String>,
    created_at: String,
    updated_at: String,
}

impl PatientRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            patient_id: row.get(0)?,
            name: row.get(1)?,
            neighborhood: row.get(2)?,
            care_needs: row.get(3)?,
            clinical_summary: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        Ok(Patient {
            patient_id: row.patient_id,
            name: row.name,
            neighborhood: row.neighborhood,
            care_needs: serde_json::from_str(&row.care_needs)?,
            clinical_summary: row.clinical_summary,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let mut patient = Patient::new("Dona Maria".into());
        patient.neighborhood = Some("Moema".into());
        patient.care_needs = vec!["traqueostomia".into(), "gtt".into()];

        db.insert_patient(&patient).unwrap();

        let retrieved = db.get_patient(&patient.patient_id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Dona Maria");
        assert_eq!(retrieved.neighborhood, Some("Moema".into()));
        assert_eq!(retrieved.care_needs, vec!["traqueostomia", "gtt"]);
    }

    #[test]
    fn test_update_patient() {
        let db = setup_db();

        let mut patient = Patient::new("Seu João".into());
        db.insert_patient(&patient).unwrap();

        patient.neighborhood = Some("Pinheiros".into());
        assert!(db.update_patient(&patient).unwrap());

        let retrieved = db.get_patient(&patient.patient_id).unwrap().unwrap();
        assert_eq!(retrieved.neighborhood, Some("Pinheiros".into()));
    }

    #[test]
    fn test_list_patients_by_name() {
        let db = setup_db();

        db.insert_patient(&Patient::new("Zélia".into())).unwrap();
        db.insert_patient(&Patient::new("Antônio".into())).unwrap();

        let patients = db.list_patients().unwrap();
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].name, "Antônio");
    }

    #[test]
    fn test_clinical_summary_missing_patient() {
        let db = setup_db();
        assert!(!db.set_patient_clinical_summary("nope", "{}").unwrap());
    }
}
