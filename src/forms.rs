//! Generic form payload storage: a type discriminator and an opaque JSON body.

use std::sync::Arc;

use account_manager_api::FormSubmissionResponse;

use crate::account::profile::UserProfile;
use crate::db::models::form_submission::NewFormSubmission;
use crate::db::store::FormSubmissionStore;
use crate::error::AppError;
use crate::validation::ValidationErrors;

const MAX_TYPE_LENGTH: usize = 255;

pub struct FormService {
    submissions: Arc<dyn FormSubmissionStore>,
}

impl FormService {
    pub fn new(submissions: Arc<dyn FormSubmissionStore>) -> Self {
        Self { submissions }
    }

    pub fn submit(
        &self,
        submission_type: &str,
        data: &serde_json::Value,
    ) -> Result<FormSubmissionResponse, AppError> {
        let mut errors = ValidationErrors::new();
        if !is_valid_type(submission_type) {
            errors.add(
                "type",
                "The type may only contain lowercase letters, digits, dashes and underscores.",
            );
        }
        errors.into_result()?;

        let data = serde_json::to_string(data)
            .map_err(|e| AppError::internal(format!("Cannot serialize form data: {e}")))?;

        let submission = self.submissions.create_submission(&NewFormSubmission {
            submission_type: submission_type.to_string(),
            data,
        })?;
        tracing::info!(id = submission.id, submission_type, "Form submitted");

        Ok(submission.into())
    }

    pub fn list(
        &self,
        actor: &UserProfile,
        submission_type: Option<&str>,
    ) -> Result<Vec<FormSubmissionResponse>, AppError> {
        actor.authorize("view form_submissions")?;

        Ok(self
            .submissions
            .list_submissions(submission_type)?
            .into_iter()
            .map(FormSubmissionResponse::from)
            .collect())
    }

    pub fn show(&self, actor: &UserProfile, id: i32) -> Result<FormSubmissionResponse, AppError> {
        actor.authorize("view form_submissions")?;

        self.submissions
            .find_submission(id)?
            .map(FormSubmissionResponse::from)
            .ok_or_else(|| AppError::not_found("Form submission not found"))
    }

    pub fn delete(&self, actor: &UserProfile, id: i32) -> Result<(), AppError> {
        actor.authorize("delete form_submissions")?;

        if !self.submissions.delete_submission(id)? {
            return Err(AppError::not_found("Form submission not found"));
        }
        tracing::info!(id, deleted_by = actor.id(), "Form submission deleted");
        Ok(())
    }
}

fn is_valid_type(submission_type: &str) -> bool {
    !submission_type.is_empty()
        && submission_type.len() <= MAX_TYPE_LENGTH
        && submission_type
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}
