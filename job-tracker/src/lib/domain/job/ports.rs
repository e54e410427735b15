use async_trait::async_trait;
use chrono::NaiveDate;

use super::errors::JobError;
use super::models::CreateJobCommand;
use super::models::Job;
use super::models::JobId;
use super::models::NewJob;
use super::models::UpdateJobCommand;
use crate::domain::auth::principal::Principal;
use crate::domain::company::models::CompanyId;
use crate::domain::errors::StoreError;

/// Port for job domain service operations.
#[async_trait]
pub trait JobServicePort: Send + Sync + 'static {
    /// Post a job for the calling company.
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not a company
    async fn create_job(&self, principal: &Principal, command: CreateJobCommand)
        -> Result<Job, JobError>;

    /// # Errors
    /// * `NotFound` - Job does not exist
    async fn get_job(&self, id: JobId) -> Result<Job, JobError>;

    /// Active jobs, newest posting first.
    async fn list_active_jobs(&self) -> Result<Vec<Job>, JobError>;

    /// Active jobs whose title or description contains `term`, ignoring case.
    async fn search_active_jobs(&self, term: &str) -> Result<Vec<Job>, JobError>;

    /// Active jobs with a deadline on or after `today`, soonest first.
    async fn list_upcoming_deadlines(&self, today: NaiveDate) -> Result<Vec<Job>, JobError>;

    /// Active jobs of the calling company.
    async fn list_my_jobs(&self, principal: &Principal) -> Result<Vec<Job>, JobError>;

    /// Partially update a job owned by the calling company.
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not the owning company
    /// * `NotFound` - Job does not exist
    /// * `Validation` - Merged salary range is inverted
    async fn update_job(
        &self,
        principal: &Principal,
        id: JobId,
        command: UpdateJobCommand,
    ) -> Result<Job, JobError>;

    /// Mark a job owned by the calling company inactive.
    async fn deactivate_job(&self, principal: &Principal, id: JobId) -> Result<Job, JobError>;

    /// Delete a job owned by the calling company.
    async fn delete_job(&self, principal: &Principal, id: JobId) -> Result<(), JobError>;
}

/// Persistence operations for the job aggregate.
#[async_trait]
pub trait JobRepository: Send + Sync + 'static {
    async fn create(&self, job: NewJob) -> Result<Job, StoreError>;

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, StoreError>;

    /// Active jobs ordered by posted date, newest first.
    async fn list_active(&self) -> Result<Vec<Job>, StoreError>;

    async fn list_active_by_company(&self, company_id: CompanyId) -> Result<Vec<Job>, StoreError>;

    /// Case-insensitive substring match on title or description.
    async fn search_active(&self, term: &str) -> Result<Vec<Job>, StoreError>;

    /// Active jobs with `deadline_date >= from`, ordered by deadline.
    async fn list_upcoming_deadlines(&self, from: NaiveDate) -> Result<Vec<Job>, StoreError>;

    async fn update(&self, job: Job) -> Result<Job, StoreError>;

    /// # Returns
    /// False when no such job existed
    async fn delete(&self, id: JobId) -> Result<bool, StoreError>;
}
