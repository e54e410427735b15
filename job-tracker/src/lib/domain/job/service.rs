use std::sync::Arc;

use async_trait::async_trait;
use auth::PrincipalKind;
use chrono::NaiveDate;
use chrono::Utc;

use super::errors::JobError;
use super::models::CreateJobCommand;
use super::models::Job;
use super::models::JobId;
use super::models::NewJob;
use super::models::UpdateJobCommand;
use super::ports::JobRepository;
use super::ports::JobServicePort;
use crate::domain::auth::policy;
use crate::domain::auth::principal::Principal;
use crate::domain::company::ports::CompanyRepository;
use crate::domain::errors::StoreError;

/// Concrete implementation of JobServicePort.
///
/// Generic over repositories for testability.
pub struct JobService<JR, CR>
where
    JR: JobRepository,
    CR: CompanyRepository,
{
    job_repository: Arc<JR>,
    company_repository: Arc<CR>,
}

impl<JR, CR> JobService<JR, CR>
where
    JR: JobRepository,
    CR: CompanyRepository,
{
    pub fn new(job_repository: Arc<JR>, company_repository: Arc<CR>) -> Self {
        Self {
            job_repository,
            company_repository,
        }
    }

    async fn find(&self, id: JobId) -> Result<Job, JobError> {
        self.job_repository
            .find_by_id(id)
            .await?
            .ok_or(JobError::NotFound(id))
    }

    /// Load a job the calling company owns.
    async fn find_owned(&self, principal: &Principal, id: JobId) -> Result<Job, JobError> {
        policy::require_company(principal)?;
        let job = self.find(id).await?;

        policy::authorize(principal, Some(PrincipalKind::Company), Some(job.company_id.0)).map_err(
            |e| {
                tracing::warn!(job_id = %id, subject_id = principal.subject_id(), "Job access denied");
                e
            },
        )?;

        Ok(job)
    }
}

#[async_trait]
impl<JR, CR> JobServicePort for JobService<JR, CR>
where
    JR: JobRepository,
    CR: CompanyRepository,
{
    async fn create_job(
        &self,
        principal: &Principal,
        command: CreateJobCommand,
    ) -> Result<Job, JobError> {
        let company_id = policy::require_company(principal)?;

        // Tokens outlive their company.
        if self.company_repository.find_by_id(company_id).await?.is_none() {
            tracing::warn!(company_id = %company_id, "Job posted by a deleted company");
            return Err(JobError::CompanyNotFound(company_id));
        }

        let job = self
            .job_repository
            .create(NewJob::from_command(
                company_id,
                command,
                Utc::now().date_naive(),
            ))
            .await
            .map_err(|e| match e {
                StoreError::MissingReference(_) => JobError::CompanyNotFound(company_id),
                e => JobError::Store(e),
            })?;

        tracing::info!(job_id = %job.id, company_id = %company_id, "Job posted");
        Ok(job)
    }

    async fn get_job(&self, id: JobId) -> Result<Job, JobError> {
        self.find(id).await
    }

    async fn list_active_jobs(&self) -> Result<Vec<Job>, JobError> {
        Ok(self.job_repository.list_active().await?)
    }

    async fn search_active_jobs(&self, term: &str) -> Result<Vec<Job>, JobError> {
        let term = term.trim();
        if term.is_empty() {
            return self.list_active_jobs().await;
        }
        Ok(self.job_repository.search_active(term).await?)
    }

    async fn list_upcoming_deadlines(&self, today: NaiveDate) -> Result<Vec<Job>, JobError> {
        Ok(self.job_repository.list_upcoming_deadlines(today).await?)
    }

    async fn list_my_jobs(&self, principal: &Principal) -> Result<Vec<Job>, JobError> {
        let company_id = policy::require_company(principal)?;
        Ok(self.job_repository.list_active_by_company(company_id).await?)
    }

    async fn update_job(
        &self,
        principal: &Principal,
        id: JobId,
        command: UpdateJobCommand,
    ) -> Result<Job, JobError> {
        let mut job = self.find_owned(principal, id).await?;
        job.apply(command, Utc::now())?;
        Ok(self.job_repository.update(job).await?)
    }

    async fn deactivate_job(&self, principal: &Principal, id: JobId) -> Result<Job, JobError> {
        let mut job = self.find_owned(principal, id).await?;
        job.is_active = false;
        job.updated_at = Utc::now();

        let job = self.job_repository.update(job).await?;
        tracing::info!(job_id = %id, "Job deactivated");
        Ok(job)
    }

    async fn delete_job(&self, principal: &Principal, id: JobId) -> Result<(), JobError> {
        self.find_owned(principal, id).await?;

        if !self.job_repository.delete(id).await? {
            return Err(JobError::NotFound(id));
        }

        tracing::info!(job_id = %id, "Job deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::application::service::tests::company as company_record;
    use crate::domain::application::service::tests::MockTestCompanyRepository;
    use crate::domain::auth::errors::AccessError;
    use crate::domain::auth::models::UserId;
    use crate::domain::company::models::CompanyId;
    use crate::domain::job::models::JobType;
    use crate::domain::job::models::SalaryRange;
    use crate::domain::job::models::WorkMode;
    use crate::domain::values::RequiredText;

    mock! {
        pub TestJobRepository {}

        #[async_trait]
        impl JobRepository for TestJobRepository {
            async fn create(&self, job: NewJob) -> Result<Job, StoreError>;
            async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, StoreError>;
            async fn list_active(&self) -> Result<Vec<Job>, StoreError>;
            async fn list_active_by_company(&self, company_id: CompanyId) -> Result<Vec<Job>, StoreError>;
            async fn search_active(&self, term: &str) -> Result<Vec<Job>, StoreError>;
            async fn list_upcoming_deadlines(&self, from: NaiveDate) -> Result<Vec<Job>, StoreError>;
            async fn update(&self, job: Job) -> Result<Job, StoreError>;
            async fn delete(&self, id: JobId) -> Result<bool, StoreError>;
        }
    }

    fn job(id: i64, company_id: i64) -> Job {
        let now = Utc::now();
        Job {
            id: JobId(id),
            company_id: CompanyId(company_id),
            title: "Backend Engineer".to_string(),
            description: "Build services".to_string(),
            requirements: None,
            location: "Berlin".to_string(),
            job_type: JobType::FullTime,
            work_mode: WorkMode::Remote,
            salary: SalaryRange::default(),
            currency: None,
            job_url: None,
            posted_date: now.date_naive(),
            deadline_date: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn company(id: i64) -> Principal {
        Principal::company(CompanyId(id), "hr@acme.com")
    }

    /// Companies 7 and 8 exist.
    fn companies() -> MockTestCompanyRepository {
        let mut companies = MockTestCompanyRepository::new();
        companies.expect_find_by_id().returning(|id| match id.0 {
            7 | 8 => Ok(Some(company_record(id.0))),
            _ => Ok(None),
        });
        companies
    }

    fn create_command() -> CreateJobCommand {
        CreateJobCommand {
            title: RequiredText::new("Backend Engineer").unwrap(),
            description: RequiredText::new("Build services").unwrap(),
            requirements: None,
            location: RequiredText::new("Berlin").unwrap(),
            job_type: JobType::FullTime,
            work_mode: WorkMode::Remote,
            salary: SalaryRange::default(),
            currency: None,
            job_url: None,
            posted_date: None,
            deadline_date: None,
        }
    }

    fn repository_with_job(job: Job) -> MockTestJobRepository {
        let mut repository = MockTestJobRepository::new();
        let id = job.id;
        repository
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(job.clone())));
        repository
    }

    #[tokio::test]
    async fn test_create_job_defaults_posted_date_to_today() {
        let mut repository = MockTestJobRepository::new();
        let today = Utc::now().date_naive();

        repository
            .expect_create()
            .withf(move |job| job.company_id == CompanyId(7) && job.posted_date == today)
            .times(1)
            .returning(|new_job| {
                let mut created = job(1, new_job.company_id.0);
                created.posted_date = new_job.posted_date;
                Ok(created)
            });

        let created = JobService::new(Arc::new(repository), Arc::new(companies()))
            .create_job(&company(7), create_command())
            .await
            .unwrap();

        assert_eq!(created.company_id, CompanyId(7));
        assert!(created.is_active);
    }

    #[tokio::test]
    async fn test_create_job_requires_company() {
        let mut repository = MockTestJobRepository::new();
        repository.expect_create().times(0);

        let result = JobService::new(Arc::new(repository), Arc::new(companies()))
            .create_job(&Principal::user(UserId(7), "a@x.com"), create_command())
            .await;

        assert!(matches!(
            result,
            Err(JobError::Forbidden(AccessError::RoleMismatch { .. }))
        ));
    }

    #[tokio::test]
    async fn test_create_job_for_deleted_company_is_not_found() {
        let mut repository = MockTestJobRepository::new();
        repository.expect_create().times(0);

        let result = JobService::new(Arc::new(repository), Arc::new(companies()))
            .create_job(&company(9), create_command())
            .await;

        assert!(matches!(
            result,
            Err(JobError::CompanyNotFound(CompanyId(9)))
        ));
    }

    #[tokio::test]
    async fn test_create_job_lost_race_with_company_deletion() {
        let mut repository = MockTestJobRepository::new();
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(StoreError::MissingReference("company".to_string())));

        let result = JobService::new(Arc::new(repository), Arc::new(companies()))
            .create_job(&company(7), create_command())
            .await;

        assert!(matches!(
            result,
            Err(JobError::CompanyNotFound(CompanyId(7)))
        ));
    }

    #[tokio::test]
    async fn test_owner_company_may_update_its_job() {
        let mut repository = repository_with_job(job(1, 7));
        repository
            .expect_update()
            .withf(|job| job.location == "Remote")
            .times(1)
            .returning(Ok);

        let command = UpdateJobCommand {
            location: Some(RequiredText::new("Remote").unwrap()),
            ..UpdateJobCommand::default()
        };

        let updated = JobService::new(Arc::new(repository), Arc::new(companies()))
            .update_job(&company(7), JobId(1), command)
            .await
            .unwrap();

        assert_eq!(updated.location, "Remote");
    }

    #[tokio::test]
    async fn test_other_company_is_denied_on_job() {
        let mut repository = repository_with_job(job(1, 8));
        repository.expect_update().times(0);
        repository.expect_delete().times(0);

        let service = JobService::new(Arc::new(repository), Arc::new(companies()));

        let update = service
            .update_job(&company(7), JobId(1), UpdateJobCommand::default())
            .await;
        assert!(matches!(
            update,
            Err(JobError::Forbidden(AccessError::NotOwner))
        ));

        let deactivate = service.deactivate_job(&company(7), JobId(1)).await;
        assert!(matches!(deactivate, Err(JobError::Forbidden(_))));

        let delete = service.delete_job(&company(7), JobId(1)).await;
        assert!(matches!(delete, Err(JobError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_deactivate_job() {
        let mut repository = repository_with_job(job(1, 7));
        repository
            .expect_update()
            .withf(|job| !job.is_active)
            .times(1)
            .returning(Ok);

        let job = JobService::new(Arc::new(repository), Arc::new(companies()))
            .deactivate_job(&company(7), JobId(1))
            .await
            .unwrap();

        assert!(!job.is_active);
    }

    #[tokio::test]
    async fn test_delete_missing_job_is_not_found() {
        let mut repository = MockTestJobRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let result = JobService::new(Arc::new(repository), Arc::new(companies()))
            .delete_job(&company(7), JobId(99))
            .await;

        assert!(matches!(result, Err(JobError::NotFound(JobId(99)))));
    }

    #[tokio::test]
    async fn test_blank_search_lists_all_active() {
        let mut repository = MockTestJobRepository::new();
        repository.expect_search_active().times(0);
        repository
            .expect_list_active()
            .times(1)
            .returning(|| Ok(vec![job(1, 7), job(2, 8)]));

        let jobs = JobService::new(Arc::new(repository), Arc::new(companies()))
            .search_active_jobs("   ")
            .await
            .unwrap();

        assert_eq!(jobs.len(), 2);
    }

    #[tokio::test]
    async fn test_search_passes_trimmed_term() {
        let mut repository = MockTestJobRepository::new();
        repository
            .expect_search_active()
            .withf(|term| term == "rust")
            .times(1)
            .returning(|_| Ok(vec![job(1, 7)]));

        let jobs = JobService::new(Arc::new(repository), Arc::new(companies()))
            .search_active_jobs("  rust ")
            .await
            .unwrap();

        assert_eq!(jobs.len(), 1);
    }

    #[tokio::test]
    async fn test_list_my_jobs_scopes_to_caller() {
        let mut repository = MockTestJobRepository::new();
        repository
            .expect_list_active_by_company()
            .with(eq(CompanyId(7)))
            .times(1)
            .returning(|_| Ok(vec![job(1, 7)]));

        let jobs = JobService::new(Arc::new(repository), Arc::new(companies()))
            .list_my_jobs(&company(7))
            .await
            .unwrap();

        assert_eq!(jobs[0].company_id, CompanyId(7));
    }
}
