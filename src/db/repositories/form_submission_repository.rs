use diesel::prelude::*;

use crate::db::error::RepositoryError;
use crate::db::models::form_submission::{FormSubmission, NewFormSubmission};
use crate::db::schema::form_submissions;

pub struct FormSubmissionRepository;

impl FormSubmissionRepository {
    pub fn create(
        conn: &mut PgConnection,
        submission: &NewFormSubmission,
    ) -> Result<FormSubmission, RepositoryError> {
        diesel::insert_into(form_submissions::table)
            .values(submission)
            .returning(FormSubmission::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        id: i32,
    ) -> Result<Option<FormSubmission>, RepositoryError> {
        form_submissions::table
            .find(id)
            .select(FormSubmission::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    /// Newest first, optionally restricted to one form type
    pub fn list(
        conn: &mut PgConnection,
        submission_type: Option<&str>,
    ) -> Result<Vec<FormSubmission>, RepositoryError> {
        let mut query = form_submissions::table.into_boxed();
        if let Some(submission_type) = submission_type {
            query = query.filter(form_submissions::type_.eq(submission_type));
        }

        query
            .order(form_submissions::id.desc())
            .select(FormSubmission::as_select())
            .load(conn)
            .map_err(Into::into)
    }

    /// Returns whether a row was removed
    pub fn delete(conn: &mut PgConnection, id: i32) -> Result<bool, RepositoryError> {
        let deleted = diesel::delete(form_submissions::table.find(id)).execute(conn)?;
        Ok(deleted > 0)
    }
}
