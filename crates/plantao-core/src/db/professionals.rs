//! Professional directory database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{CorenStatus, Professional};

const PROFESSIONAL_COLUMNS: &str = r#"
    professional_id, name, role, coren_number, coren_status, rating,
    specialties, neighborhood, phone, created_at, updated_at
"#;

impl Database {
    /// Insert or update a professional.
    pub fn upsert_professional(&self, professional: &Professional) -> DbResult<()> {
        let specialties_json = serde_json::to_string(&professional.specialties)?;

        self.conn.execute(
            r#"
            INSERT INTO professionals (
                professional_id, name, role, coren_number, coren_status, rating,
                specialties, neighborhood, phone, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(professional_id) DO UPDATE SET
                name = excluded.name,
                role = excluded.role,
                coren_number = excluded.coren_number,
                coren_status = excluded.coren_status,
                rating = excluded.rating,
                specialties = excluded.specialties,
                neighborhood = excluded.neighborhood,
                phone = excluded.phone,
                updated_at = datetime('now')
            "#,
            params![
                professional.professional_id,
                professional.name,
                professional.role,
                professional.coren_number,
                professional.coren_status.as_str(),
                professional.rating,
                specialties_json,
                professional.neighborhood,
                professional.phone,
                professional.created_at,
                professional.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a professional by ID.
    pub fn get_professional(&self, professional_id: &str) -> DbResult<Option<Professional>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {PROFESSIONAL_COLUMNS} FROM professionals WHERE professional_id = ?"
                ),
                [professional_id],
                ProfessionalRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List every professional ordered by name.
    pub fn list_professionals(&self) -> DbResult<Vec<Professional>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PROFESSIONAL_COLUMNS} FROM professionals ORDER BY name"
        ))?;

        let rows = stmt.query_map([], ProfessionalRow::from_row)?;

        let mut professionals = Vec::new();
        for row in rows {
            professionals.push(row?.try_into()?);
        }
        Ok(professionals)
    }

    /// Update COREN status (e.g., after a council lookup).
    pub fn set_coren_status(&self, professional_id: &str, status: CorenStatus) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE professionals SET coren_status = ?2, updated_at = datetime('now') WHERE professional_id = ?1",
            params![professional_id, status.as_str()],
        )?;
        Ok(rows_affected > 0)
    }

    /// Count shifts a professional has attended for a patient.
    pub fn count_attended_shifts(&self, professional_id: &str, patient_id: &str) -> DbResult<u32> {
        let count: i64 = self.conn.query_row(
            r#"
            SELECT COUNT(*) FROM shift_slots
            WHERE professional_id = ?1
              AND patient_id = ?2
              AND status IN ('completed', 'issue')
            "#,
            params![professional_id, patient_id],
            |row| row.get(0),
        )?;
        Ok(count as u32)
    }
}

/// Intermediate row struct for database mapping.
struct ProfessionalRow {
    professional_id: String,
    name: String,
    role: String,
    coren_number: Option<String>,
    coren_status: String,
    rating: f64,
    specialties: String,
    neighborhood: Option<String>,
    phone: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ProfessionalRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            professional_id: row.get(0)?,
            name: row.get(1)?,
            role: row.get(2)?,
            coren_number: row.get(3)?,
            coren_status: row.get(4)?,
            rating: row.get(5)?,
            specialties: row.get(6)?,
            neighborhood: row.get(7)?,
            phone: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }
}

impl TryFrom<ProfessionalRow> for Professional {
    type Error = DbError;

    fn try_from(row: ProfessionalRow) -> Result<Self, Self::Error> {
        let coren_status = CorenStatus::parse(&row.coren_status).ok_or_else(|| {
            DbError::Constraint(format!("Unknown COREN status: {}", row.coren_status))
        })?;

        Ok(Professional {
            professional_id: row.professional_id,
            name: row.name,
            role: row.role,
            coren_number: row.coren_number,
            coren_status,
            rating: row.rating,
            specialties: serde_json::from_str(&row.specialties)?,
            neighborhood: row.neighborhood,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
