use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use super::errors::InterviewError;
use super::models::Interview;
use super::models::InterviewCommand;
use super::models::InterviewId;
use super::models::NewInterview;
use crate::domain::application::models::JobApplicationId;
use crate::domain::auth::models::UserId;
use crate::domain::auth::principal::Principal;
use crate::domain::company::models::CompanyId;
use crate::domain::errors::StoreError;

/// Port for interview domain service operations.
#[async_trait]
pub trait InterviewServicePort: Send + Sync + 'static {
    /// Schedule an interview on an application to one of the caller's jobs.
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not the company owning the application's job
    /// * `ApplicationNotFound` - Application does not exist
    async fn schedule_interview(
        &self,
        principal: &Principal,
        command: InterviewCommand,
    ) -> Result<Interview, InterviewError>;

    /// Interviews visible to the caller: on its own applications for a
    /// user, on applications to its jobs for a company.
    async fn list_interviews(&self, principal: &Principal)
        -> Result<Vec<Interview>, InterviewError>;

    /// Visible interviews after `now`, soonest first.
    async fn list_upcoming(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<Vec<Interview>, InterviewError>;

    /// Visible interviews before `now`, most recent first.
    async fn list_completed(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<Vec<Interview>, InterviewError>;

    /// # Errors
    /// * `Forbidden` - Caller owns neither side of the application
    /// * `ApplicationNotFound` - Application does not exist
    async fn list_for_application(
        &self,
        principal: &Principal,
        application_id: JobApplicationId,
    ) -> Result<Vec<Interview>, InterviewError>;

    /// # Errors
    /// * `Forbidden` - Caller owns neither side of the application
    /// * `NotFound` - Interview does not exist
    async fn get_interview(
        &self,
        principal: &Principal,
        id: InterviewId,
    ) -> Result<Interview, InterviewError>;

    /// Reschedule an interview, possibly onto another application the same
    /// company owns.
    async fn update_interview(
        &self,
        principal: &Principal,
        id: InterviewId,
        command: InterviewCommand,
    ) -> Result<Interview, InterviewError>;

    async fn delete_interview(
        &self,
        principal: &Principal,
        id: InterviewId,
    ) -> Result<(), InterviewError>;
}

/// Persistence operations for the interview aggregate.
#[async_trait]
pub trait InterviewRepository: Send + Sync + 'static {
    async fn create(&self, interview: NewInterview) -> Result<Interview, StoreError>;

    async fn find_by_id(&self, id: InterviewId) -> Result<Option<Interview>, StoreError>;

    async fn list_by_application(
        &self,
        application_id: JobApplicationId,
    ) -> Result<Vec<Interview>, StoreError>;

    /// Interviews on applications of `user_id`.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Interview>, StoreError>;

    /// Interviews on applications to jobs of `company_id`.
    async fn list_by_company(&self, company_id: CompanyId) -> Result<Vec<Interview>, StoreError>;

    async fn update(&self, interview: Interview) -> Result<Interview, StoreError>;

    /// # Returns
    /// False when no such interview existed
    async fn delete(&self, id: InterviewId) -> Result<bool, StoreError>;
}
