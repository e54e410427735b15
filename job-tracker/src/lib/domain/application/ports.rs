use async_trait::async_trait;

use super::errors::JobApplicationError;
use super::models::ApplicationDetails;
use super::models::ApplyForJobCommand;
use super::models::JobApplication;
use super::models::JobApplicationId;
use super::models::NewJobApplication;
use crate::domain::auth::models::UserId;
use crate::domain::auth::principal::Principal;
use crate::domain::errors::StoreError;
use crate::domain::job::models::JobId;

/// Port for job application domain service operations.
#[async_trait]
pub trait JobApplicationServicePort: Send + Sync + 'static {
    /// Apply to a listed job as the calling user.
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not a user
    /// * `JobNotFound` - Job does not exist
    /// * `Validation` - Job no longer accepts applications
    async fn apply_for_job(
        &self,
        principal: &Principal,
        command: ApplyForJobCommand,
    ) -> Result<JobApplication, JobApplicationError>;

    /// Track an application made outside the platform.
    async fn create_application(
        &self,
        principal: &Principal,
        details: ApplicationDetails,
    ) -> Result<JobApplication, JobApplicationError>;

    /// Applications of the calling user, most recent first.
    async fn list_my_applications(
        &self,
        principal: &Principal,
    ) -> Result<Vec<JobApplication>, JobApplicationError>;

    /// # Errors
    /// * `Forbidden` - Caller is not the owning user
    /// * `NotFound` - Application does not exist
    async fn get_application(
        &self,
        principal: &Principal,
        id: JobApplicationId,
    ) -> Result<JobApplication, JobApplicationError>;

    /// Applications filed against a job of the calling company.
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not the company owning the job
    /// * `JobNotFound` - Job does not exist
    async fn list_applications_for_job(
        &self,
        principal: &Principal,
        job_id: JobId,
    ) -> Result<Vec<JobApplication>, JobApplicationError>;

    /// Replace the details of an application owned by the calling user.
    ///
    /// The listing link is kept.
    async fn update_application(
        &self,
        principal: &Principal,
        id: JobApplicationId,
        details: ApplicationDetails,
    ) -> Result<JobApplication, JobApplicationError>;

    /// Delete an application owned by the calling user with its interviews.
    async fn delete_application(
        &self,
        principal: &Principal,
        id: JobApplicationId,
    ) -> Result<(), JobApplicationError>;
}

/// Persistence operations for the job application aggregate.
#[async_trait]
pub trait JobApplicationRepository: Send + Sync + 'static {
    async fn create(&self, application: NewJobApplication) -> Result<JobApplication, StoreError>;

    async fn find_by_id(&self, id: JobApplicationId)
        -> Result<Option<JobApplication>, StoreError>;

    /// Ordered by application date, newest first.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<JobApplication>, StoreError>;

    async fn list_by_job(&self, job_id: JobId) -> Result<Vec<JobApplication>, StoreError>;

    async fn update(&self, application: JobApplication) -> Result<JobApplication, StoreError>;

    /// Remove an application and its interviews.
    ///
    /// # Returns
    /// False when no such application existed
    async fn delete(&self, id: JobApplicationId) -> Result<bool, StoreError>;
}
