use account_manager_api::FormSubmissionResponse;
use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};

use crate::db::schema::form_submissions;

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = form_submissions)]
pub struct NewFormSubmission {
    #[diesel(column_name = type_)]
    pub submission_type: String,
    pub data: String,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = form_submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FormSubmission {
    pub id: i32,
    #[diesel(column_name = type_)]
    pub submission_type: String,
    /// Serialized payload; its shape is implied by `submission_type` only
    pub data: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FormSubmission> for FormSubmissionResponse {
    fn from(submission: FormSubmission) -> Self {
        // Nothing at the storage layer guarantees the payload is JSON
        let data = serde_json::from_str(&submission.data)
            .unwrap_or(serde_json::Value::String(submission.data));

        FormSubmissionResponse {
            id: submission.id,
            submission_type: submission.submission_type,
            data,
            created_at: submission.created_at,
            updated_at: submission.updated_at,
        }
    }
}
