//! Builds ranked candidate lists for a slot from stored data.

use crate::db::Database;
use crate::models::{
    Candidacy, CandidacyStatus, Candidate, CompatibilityTag, Patient, Professional, ShiftSlot,
};

use super::{rank_candidates, CandidateFilter, RankingError, RankingResult};

/// Ranks applicants (or the whole directory) for one vacancy.
pub struct CandidateRanker<'a> {
    db: &'a Database,
}

impl<'a> CandidateRanker<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Rank professionals with an open application on the slot.
    pub fn rank_for_slot(&self, slot_id: &str, filter: &CandidateFilter) -> RankingResult<Vec<Candidate>> {
        let (_, patient) = self.load_context(slot_id)?;

        let mut candidates = Vec::new();
        for candidacy in self
            .db
            .list_candidacies_for_slot(slot_id, Some(CandidacyStatus::Applied))?
        {
            let Candidacy { professional_id, .. } = candidacy;
            if let Some(professional) = self.db.get_professional(&professional_id)? {
                candidates.push(self.candidate_for(&professional, &patient)?);
            }
        }

        let total = candidates.len();
        let ranked = rank_candidates(candidates, filter);
        tracing::debug!(slot_id, total, shown = ranked.len(), "ranked applicants");
        Ok(ranked)
    }

    /// Rank every professional in the directory for a direct assignment.
    pub fn rank_pool_for_slot(&self, slot_id: &str, filter: &CandidateFilter) -> RankingResult<Vec<Candidate>> {
        let (_, patient) = self.load_context(slot_id)?;

        let candidates = self
            .db
            .list_professionals()?
            .iter()
            .map(|p| self.candidate_for(p, &patient))
            .collect::<RankingResult<Vec<_>>>()?;

        let total = candidates.len();
        let ranked = rank_candidates(candidates, filter);
        tracing::debug!(slot_id, total, shown = ranked.len(), "ranked directory pool");
        Ok(ranked)
    }

    /// Compute compatibility tags of a professional for a patient.
    pub fn candidate_for(&self, professional: &Professional, patient: &Patient) -> RankingResult<Candidate> {
        let mut tags = Vec::new();

        if self
            .db
            .count_attended_shifts(&professional.professional_id, &patient.patient_id)?
            > 0
        {
            tags.push(CompatibilityTag::TreatedPatientBefore);
        }
        if patient.is_same_neighborhood(professional.neighborhood.as_deref()) {
            tags.push(CompatibilityTag::SameNeighborhood);
        }
        if professional.covers_any(&patient.care_needs) {
            tags.push(CompatibilityTag::SpecialtyMatch);
        }

        Ok(Candidate::from_professional(professional, tags))
    }

    fn load_context(&self, slot_id: &str) -> RankingResult<(ShiftSlot, Patient)> {
        let slot = self
            .db
            .get_slot(slot_id)?
            .ok_or_else(|| RankingError::SlotNotFound(slot_id.to_string()))?;
        let patient = self
            .db
            .get_patient(&slot.patient_id)?
            .ok_or_else(|| RankingError::PatientNotFound(slot.patient_id.clone()))?;
        Ok((slot, patient))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CorenStatus, ShiftType, SlotStatus};
    use chrono::NaiveDate;

    struct Fixture {
        db: Database,
        patient: Patient,
        slot_id: String,
    }

    fn setup() -> Fixture {
        let db = Database::open_in_memory().unwrap();
        let mut patient = Patient::new("Dona Maria".into());
        patient.neighborhood = Some("Moema".into());
        patient.care_needs = vec!["traqueostomia".into()];
        db.insert_patient(&patient).unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let slot = db
            .get_or_create_slot(&patient.patient_id, day, ShiftType::Day)
            .unwrap();

        Fixture {
            db,
            patient,
            slot_id: slot.slot_id,
        }
    }

    fn add_pro(db: &Database, name: &str, coren: CorenStatus, rating: f64) -> Professional {
        let p = Professional::new(name.into(), "técnico".into(), coren, rating);
        db.upsert_professional(&p).unwrap();
        p
    }

    fn mark_attended(db: &Database, patient_id: &str, pro: &Professional) {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut past = db.get_or_create_slot(patient_id, day, ShiftType::Night).unwrap();
        past.status = SlotStatus::Completed;
        past.professional_id = Some(pro.professional_id.clone());
        db.update_slot_if_status(&past, SlotStatus::Open).unwrap();
    }

    #[test]
    fn test_tags_computed() {
        let f = setup();
        let ranker = CandidateRanker::new(&f.db);

        let mut pro = add_pro(&f.db, "Ana", CorenStatus::Active, 4.5);
        pro.neighborhood = Some("moema".into());
        pro.specialties = vec!["Traqueostomia".into()];
        f.db.upsert_professional(&pro).unwrap();
        mark_attended(&f.db, &f.patient.patient_id, &pro);

        let candidate = ranker.candidate_for(&pro, &f.patient).unwrap();
        assert!(candidate.worked_before());
        assert!(candidate.has_tag(CompatibilityTag::SameNeighborhood));
        assert!(candidate.has_tag(CompatibilityTag::SpecialtyMatch));

        let stranger = add_pro(&f.db, "Bruno", CorenStatus::Active, 4.5);
        let candidate = ranker.candidate_for(&stranger, &f.patient).unwrap();
        assert!(candidate.tags.is_empty());
    }

    #[test]
    fn test_rank_for_slot_uses_open_applications_only() {
        let f = setup();
        let ranker = CandidateRanker::new(&f.db);

        let ana = add_pro(&f.db, "Ana", CorenStatus::Active, 4.2);
        let bruno = add_pro(&f.db, "Bruno", CorenStatus::Active, 4.9);
        let carla = add_pro(&f.db, "Carla", CorenStatus::Inactive, 5.0);
        let dora = add_pro(&f.db, "Dora", CorenStatus::Active, 4.7);
        let edu = add_pro(&f.db, "Edu", CorenStatus::Active, 3.0);
        mark_attended(&f.db, &f.patient.patient_id, &ana);

        for pro in [&ana, &bruno, &carla, &dora, &edu] {
            f.db.insert_candidacy(&Candidacy::new(f.slot_id.clone(), pro.professional_id.clone()))
                .unwrap();
        }
        f.db.decide_candidacy(&f.slot_id, &dora.professional_id, CandidacyStatus::Withdrawn)
            .unwrap();

        let ranked = ranker
            .rank_for_slot(&f.slot_id, &CandidateFilter::default())
            .unwrap();
        let names: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);
    }

    #[test]
    fn test_rank_pool_covers_directory() {
        let f = setup();
        let ranker = CandidateRanker::new(&f.db);

        add_pro(&f.db, "Ana", CorenStatus::Active, 4.2);
        add_pro(&f.db, "Bruno", CorenStatus::Active, 4.9);
        add_pro(&f.db, "Edu", CorenStatus::Active, 3.0);

        let ranked = ranker
            .rank_pool_for_slot(&f.slot_id, &CandidateFilter::new(3.0))
            .unwrap();
        let names: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Bruno", "Ana", "Edu"]);
    }

    #[test]
    fn test_unknown_slot() {
        let f = setup();
        let ranker = CandidateRanker::new(&f.db);

        let result = ranker.rank_for_slot("missing", &CandidateFilter::default());
        assert!(matches!(result, Err(RankingError::SlotNotFound(_))));
    }
}
