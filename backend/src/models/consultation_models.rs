use diesel::prelude::*;
use serde::Serialize;
use crate::schema::consultations;

pub const STATUS_PENDING: &str = "pending";
pub const STATUSES: [&str; 4] = [STATUS_PENDING, "contacted", "booked", "closed"];

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = consultations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Consultation {
    pub id: String, // uuid v4
    pub full_name: String,
    pub email: String, // stored lowercased
    pub company_name: String,
    pub service_selection: String, // slug, e.g. "ai-agents"
    pub problems: String,
    pub additional_info: Option<String>,
    pub status: String, // one of STATUSES, db default 'pending'
    pub created_at: i64, // unix seconds utc
    pub updated_at: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = consultations)]
pub struct NewConsultation {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub service_selection: String,
    pub problems: String,
    pub additional_info: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}
