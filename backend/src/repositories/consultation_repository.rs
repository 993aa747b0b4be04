use diesel::prelude::*;
use crate::{
    error::RepositoryError,
    models::consultation_models::{Consultation, NewConsultation},
    schema::consultations,
    DbPool,
};

pub struct ConsultationRepository {
    pool: DbPool,
}

impl ConsultationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // Insert a new consultation and read it back with its db defaults filled in
    pub fn create(&self, new_consultation: NewConsultation) -> Result<Consultation, RepositoryError> {
        let mut conn = self.pool.get()?;
        let id = new_consultation.id.clone();
        diesel::insert_into(consultations::table)
            .values(&new_consultation)
            .execute(&mut conn)?;
        let consultation = consultations::table
            .find(id)
            .select(Consultation::as_select())
            .first(&mut conn)?;
        Ok(consultation)
    }

    pub fn find_by_id(&self, consultation_id: &str) -> Result<Option<Consultation>, RepositoryError> {
        let mut conn = self.pool.get()?;
        let consultation = consultations::table
            .find(consultation_id)
            .select(Consultation::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(consultation)
    }

    // Newest first, optionally only one status
    pub fn list(&self, status_filter: Option<&str>) -> Result<Vec<Consultation>, RepositoryError> {
        let mut conn = self.pool.get()?;
        let mut query = consultations::table
            .select(Consultation::as_select())
            .order((consultations::created_at.desc(), consultations::id.desc()))
            .into_boxed();
        if let Some(status) = status_filter {
            query = query.filter(consultations::status.eq(status));
        }
        Ok(query.load(&mut conn)?)
    }

    // Returns false when no consultation has that id
    pub fn update_status(&self, consultation_id: &str, new_status: &str, now: i64) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get()?;
        let updated = diesel::update(consultations::table.find(consultation_id))
            .set((
                consultations::status.eq(new_status),
                consultations::updated_at.eq(now),
            ))
            .execute(&mut conn)?;
        Ok(updated > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    fn new_consultation(id: &str, created_at: i64) -> NewConsultation {
        NewConsultation {
            id: id.to_string(),
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            company_name: "Acme Inc".to_string(),
            service_selection: "ai-agents".to_string(),
            problems: "Our sales team loses hours every week copying leads between tools.".to_string(),
            additional_info: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn create_assigns_pending_status() {
        let repo = ConsultationRepository::new(test_pool());
        let stored = repo.create(new_consultation("a", 100)).unwrap();
        assert_eq!(stored.id, "a");
        assert_eq!(stored.status, "pending");
        assert_eq!(stored.created_at, 100);
        assert_eq!(stored.additional_info, None);
    }

    #[test]
    fn duplicate_id_is_a_query_error() {
        let repo = ConsultationRepository::new(test_pool());
        repo.create(new_consultation("a", 100)).unwrap();
        let err = repo.create(new_consultation("a", 101)).unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));
    }

    #[test]
    fn list_is_newest_first_and_filters_by_status() {
        let repo = ConsultationRepository::new(test_pool());
        repo.create(new_consultation("old", 100)).unwrap();
        repo.create(new_consultation("new", 200)).unwrap();
        assert!(repo.update_status("old", "contacted", 300).unwrap());

        let all: Vec<String> = repo.list(None).unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(all, vec!["new", "old"]);

        let contacted = repo.list(Some("contacted")).unwrap();
        assert_eq!(contacted.len(), 1);
        assert_eq!(contacted[0].id, "old");
        assert_eq!(contacted[0].updated_at, 300);
    }

    #[test]
    fn update_status_of_missing_row_reports_false() {
        let repo = ConsultationRepository::new(test_pool());
        assert!(!repo.update_status("nope", "closed", 1).unwrap());
        assert_eq!(repo.find_by_id("nope").unwrap(), None);
    }
}
