use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::JobApplicationError;
use super::models::ApplicationDetails;
use super::models::ApplyForJobCommand;
use super::models::JobApplication;
use super::models::JobApplicationId;
use super::models::NewJobApplication;
use super::ports::JobApplicationRepository;
use super::ports::JobApplicationServicePort;
use crate::domain::auth::policy;
use crate::domain::auth::policy::ResourceOwners;
use crate::domain::auth::principal::Principal;
use crate::domain::company::ports::CompanyRepository;
use crate::domain::errors::FieldErrors;
use crate::domain::errors::StoreError;
use crate::domain::job::models::JobId;
use crate::domain::job::ports::JobRepository;

/// Owners of an application: its user, plus the company owning the listing
/// it was filed against, if that listing still exists.
pub async fn application_owners<JR>(
    jobs: &JR,
    application: &JobApplication,
) -> Result<ResourceOwners, StoreError>
where
    JR: JobRepository + ?Sized,
{
    let company = match application.job_id {
        Some(job_id) => jobs.find_by_id(job_id).await?.map(|job| job.company_id),
        None => None,
    };

    Ok(ResourceOwners::user(application.user_id).with_company(company))
}

/// Concrete implementation of JobApplicationServicePort.
///
/// Reads jobs and companies to copy listing data and to resolve ownership.
pub struct JobApplicationService<AR, JR, CR>
where
    AR: JobApplicationRepository,
    JR: JobRepository,
    CR: CompanyRepository,
{
    application_repository: Arc<AR>,
    job_repository: Arc<JR>,
    company_repository: Arc<CR>,
}

impl<AR, JR, CR> JobApplicationService<AR, JR, CR>
where
    AR: JobApplicationRepository,
    JR: JobRepository,
    CR: CompanyRepository,
{
    pub fn new(
        application_repository: Arc<AR>,
        job_repository: Arc<JR>,
        company_repository: Arc<CR>,
    ) -> Self {
        Self {
            application_repository,
            job_repository,
            company_repository,
        }
    }

    /// Load an application the calling user owns.
    async fn find_owned(
        &self,
        principal: &Principal,
        id: JobApplicationId,
    ) -> Result<JobApplication, JobApplicationError> {
        let user_id = policy::require_user(principal)?;
        let application = self
            .application_repository
            .find_by_id(id)
            .await?
            .ok_or(JobApplicationError::NotFound(id))?;

        policy::authorize_owners(principal, &ResourceOwners::user(application.user_id)).map_err(
            |e| {
                tracing::warn!(application_id = %id, user_id = %user_id, "Application access denied");
                e
            },
        )?;

        Ok(application)
    }
}

#[async_trait]
impl<AR, JR, CR> JobApplicationServicePort for JobApplicationService<AR, JR, CR>
where
    AR: JobApplicationRepository,
    JR: JobRepository,
    CR: CompanyRepository,
{
    async fn apply_for_job(
        &self,
        principal: &Principal,
        command: ApplyForJobCommand,
    ) -> Result<JobApplication, JobApplicationError> {
        let user_id = policy::require_user(principal)?;
        let job_id = command.job_id;

        let job = self
            .job_repository
            .find_by_id(job_id)
            .await?
            .ok_or(JobApplicationError::JobNotFound(job_id))?;
        if !job.is_active {
            return Err(FieldErrors::single("job_id", "is no longer accepting applications").into());
        }

        let company = self
            .company_repository
            .find_by_id(job.company_id)
            .await?
            .ok_or(JobApplicationError::JobNotFound(job_id))?;

        let details =
            ApplicationDetails::from_listing(&job, &company, command, Utc::now().date_naive())
                .map_err(|e| FieldErrors::single("job_id", e.to_string()))?;

        let application = self
            .application_repository
            .create(NewJobApplication {
                user_id,
                job_id: Some(job_id),
                details,
            })
            .await?;

        tracing::info!(
            application_id = %application.id,
            job_id = %job_id,
            user_id = %user_id,
            "Applied for job"
        );
        Ok(application)
    }

    async fn create_application(
        &self,
        principal: &Principal,
        details: ApplicationDetails,
    ) -> Result<JobApplication, JobApplicationError> {
        let user_id = policy::require_user(principal)?;

        let application = self
            .application_repository
            .create(NewJobApplication {
                user_id,
                job_id: None,
                details,
            })
            .await?;

        tracing::info!(application_id = %application.id, user_id = %user_id, "Application tracked");
        Ok(application)
    }

    async fn list_my_applications(
        &self,
        principal: &Principal,
    ) -> Result<Vec<JobApplication>, JobApplicationError> {
        let user_id = policy::require_user(principal)?;
        Ok(self.application_repository.list_by_user(user_id).await?)
    }

    async fn get_application(
        &self,
        principal: &Principal,
        id: JobApplicationId,
    ) -> Result<JobApplication, JobApplicationError> {
        self.find_owned(principal, id).await
    }

    async fn list_applications_for_job(
        &self,
        principal: &Principal,
        job_id: JobId,
    ) -> Result<Vec<JobApplication>, JobApplicationError> {
        policy::require_company(principal)?;

        let job = self
            .job_repository
            .find_by_id(job_id)
            .await?
            .ok_or(JobApplicationError::JobNotFound(job_id))?;
        policy::authorize_owners(principal, &ResourceOwners::company(job.company_id))?;

        Ok(self.application_repository.list_by_job(job_id).await?)
    }

    async fn update_application(
        &self,
        principal: &Principal,
        id: JobApplicationId,
        details: ApplicationDetails,
    ) -> Result<JobApplication, JobApplicationError> {
        let mut application = self.find_owned(principal, id).await?;
        application.details = details;
        application.updated_at = Utc::now();

        Ok(self.application_repository.update(application).await?)
    }

    async fn delete_application(
        &self,
        principal: &Principal,
        id: JobApplicationId,
    ) -> Result<(), JobApplicationError> {
        self.find_owned(principal, id).await?;

        if !self.application_repository.delete(id).await? {
            return Err(JobApplicationError::NotFound(id));
        }

        tracing::info!(application_id = %id, "Application deleted");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::NaiveDate;
    use mockall::mock;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::application::models::ApplicationStatus;
    use crate::domain::auth::errors::AccessError;
    use crate::domain::auth::models::EmailAddress;
    use crate::domain::auth::models::UserId;
    use crate::domain::company::models::Company;
    use crate::domain::company::models::CompanyId;
    use crate::domain::company::models::CompanyName;
    use crate::domain::company::models::CompanyProfile;
    use crate::domain::job::models::Job;
    use crate::domain::job::models::JobType;
    use crate::domain::job::models::NewJob;
    use crate::domain::job::models::SalaryRange;
    use crate::domain::job::models::WorkMode;
    use crate::domain::values::RequiredText;

    mock! {
        pub TestApplicationRepository {}

        #[async_trait]
        impl JobApplicationRepository for TestApplicationRepository {
            async fn create(&self, application: NewJobApplication) -> Result<JobApplication, StoreError>;
            async fn find_by_id(&self, id: JobApplicationId) -> Result<Option<JobApplication>, StoreError>;
            async fn list_by_user(&self, user_id: UserId) -> Result<Vec<JobApplication>, StoreError>;
            async fn list_by_job(&self, job_id: JobId) -> Result<Vec<JobApplication>, StoreError>;
            async fn update(&self, application: JobApplication) -> Result<JobApplication, StoreError>;
            async fn delete(&self, id: JobApplicationId) -> Result<bool, StoreError>;
        }
    }

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

    mock! {
        pub TestCompanyRepository {}

        #[async_trait]
        impl CompanyRepository for TestCompanyRepository {
            async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, StoreError>;
            async fn find_by_name(&self, name: &str) -> Result<Option<Company>, StoreError>;
            async fn list_all(&self) -> Result<Vec<Company>, StoreError>;
            async fn update(&self, company: Company) -> Result<Company, StoreError>;
            async fn delete(&self, id: CompanyId) -> Result<bool, StoreError>;
        }
    }

    pub(crate) fn job(id: i64, company_id: i64, is_active: bool) -> Job {
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
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn company(id: i64) -> Company {
        let now = Utc::now();
        Company {
            id: CompanyId(id),
            email: EmailAddress::new("hr@acme.com").unwrap(),
            password_hash: String::new(),
            name: CompanyName::new("Acme").unwrap(),
            profile: CompanyProfile::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn details(company_name: &str) -> ApplicationDetails {
        ApplicationDetails {
            company_name: RequiredText::new(company_name).unwrap(),
            job_title: RequiredText::new("Engineer").unwrap(),
            job_url: None,
            application_date: Utc::now().date_naive(),
            status: ApplicationStatus::Applied,
            location: None,
            salary_range: None,
            job_type: None,
            work_mode: None,
            notes: None,
            company_website: None,
            contact_person: None,
            contact_email: None,
        }
    }

    pub(crate) fn application(id: i64, user_id: i64, job_id: Option<i64>) -> JobApplication {
        let now = Utc::now();
        JobApplication {
            id: JobApplicationId(id),
            user_id: UserId(user_id),
            job_id: job_id.map(JobId),
            details: details("Acme"),
            created_at: now,
            updated_at: now,
        }
    }

    fn created(new: NewJobApplication) -> JobApplication {
        let now = Utc::now();
        JobApplication {
            id: JobApplicationId(1),
            user_id: new.user_id,
            job_id: new.job_id,
            details: new.details,
            created_at: now,
            updated_at: now,
        }
    }

    fn user(id: i64) -> Principal {
        Principal::user(UserId(id), "a@x.com")
    }

    fn company_principal(id: i64) -> Principal {
        Principal::company(CompanyId(id), "hr@acme.com")
    }

    fn apply_command(job_id: i64) -> ApplyForJobCommand {
        ApplyForJobCommand {
            job_id: JobId(job_id),
            status: None,
            notes: None,
            contact_person: None,
            contact_email: None,
        }
    }

    fn service(
        applications: MockTestApplicationRepository,
        jobs: MockTestJobRepository,
        companies: MockTestCompanyRepository,
    ) -> JobApplicationService<
        MockTestApplicationRepository,
        MockTestJobRepository,
        MockTestCompanyRepository,
    > {
        JobApplicationService::new(Arc::new(applications), Arc::new(jobs), Arc::new(companies))
    }

    fn with_application(app: JobApplication) -> MockTestApplicationRepository {
        let mut applications = MockTestApplicationRepository::new();
        let id = app.id;
        applications
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(app.clone())));
        applications
    }

    #[tokio::test]
    async fn test_apply_for_active_job_links_listing() {
        let mut applications = MockTestApplicationRepository::new();
        applications
            .expect_create()
            .withf(|new| {
                new.user_id == UserId(1)
                    && new.job_id == Some(JobId(3))
                    && new.details.company_name.as_str() == "Acme"
                    && new.details.status == ApplicationStatus::Applied
            })
            .times(1)
            .returning(|new| Ok(created(new)));

        let mut jobs = MockTestJobRepository::new();
        jobs.expect_find_by_id()
            .with(eq(JobId(3)))
            .returning(|_| Ok(Some(job(3, 7, true))));

        let mut companies = MockTestCompanyRepository::new();
        companies
            .expect_find_by_id()
            .with(eq(CompanyId(7)))
            .returning(|_| Ok(Some(company(7))));

        let application = service(applications, jobs, companies)
            .apply_for_job(&user(1), apply_command(3))
            .await
            .unwrap();

        assert_eq!(application.job_id, Some(JobId(3)));
        assert_eq!(application.details.job_title.as_str(), "Backend Engineer");
    }

    #[tokio::test]
    async fn test_apply_for_inactive_job_is_rejected() {
        let mut applications = MockTestApplicationRepository::new();
        applications.expect_create().times(0);

        let mut jobs = MockTestJobRepository::new();
        jobs.expect_find_by_id()
            .returning(|_| Ok(Some(job(3, 7, false))));

        let result = service(applications, jobs, MockTestCompanyRepository::new())
            .apply_for_job(&user(1), apply_command(3))
            .await;

        match result {
            Err(JobApplicationError::Validation(fields)) => assert!(fields.contains("job_id")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_apply_for_missing_job() {
        let mut jobs = MockTestJobRepository::new();
        jobs.expect_find_by_id().returning(|_| Ok(None));

        let result = service(
            MockTestApplicationRepository::new(),
            jobs,
            MockTestCompanyRepository::new(),
        )
        .apply_for_job(&user(1), apply_command(42))
        .await;

        assert!(matches!(result, Err(JobApplicationError::JobNotFound(JobId(42)))));
    }

    #[tokio::test]
    async fn test_company_cannot_apply() {
        let result = service(
            MockTestApplicationRepository::new(),
            MockTestJobRepository::new(),
            MockTestCompanyRepository::new(),
        )
        .apply_for_job(&company_principal(7), apply_command(3))
        .await;

        assert!(matches!(
            result,
            Err(JobApplicationError::Forbidden(AccessError::RoleMismatch { .. }))
        ));
    }

    #[tokio::test]
    async fn test_create_self_tracked_application() {
        let mut applications = MockTestApplicationRepository::new();
        applications
            .expect_create()
            .withf(|new| new.user_id == UserId(1) && new.job_id.is_none())
            .times(1)
            .returning(|new| Ok(created(new)));

        let application = service(
            applications,
            MockTestJobRepository::new(),
            MockTestCompanyRepository::new(),
        )
        .create_application(&user(1), details("Initech"))
        .await
        .unwrap();

        assert_eq!(application.details.company_name.as_str(), "Initech");
    }

    #[tokio::test]
    async fn test_other_user_is_denied_on_application() {
        let mut applications = with_application(application(5, 2, None));
        applications.expect_update().times(0);
        applications.expect_delete().times(0);

        let service = service(
            applications,
            MockTestJobRepository::new(),
            MockTestCompanyRepository::new(),
        );

        let get = service.get_application(&user(1), JobApplicationId(5)).await;
        assert!(matches!(
            get,
            Err(JobApplicationError::Forbidden(AccessError::NotOwner))
        ));

        let update = service
            .update_application(&user(1), JobApplicationId(5), details("Acme"))
            .await;
        assert!(matches!(update, Err(JobApplicationError::Forbidden(_))));

        let delete = service.delete_application(&user(1), JobApplicationId(5)).await;
        assert!(matches!(delete, Err(JobApplicationError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_job_link() {
        let mut applications = with_application(application(5, 1, Some(3)));
        applications
            .expect_update()
            .withf(|app| app.job_id == Some(JobId(3)) && app.details.company_name.as_str() == "Globex")
            .times(1)
            .returning(Ok);

        let updated = service(
            applications,
            MockTestJobRepository::new(),
            MockTestCompanyRepository::new(),
        )
        .update_application(&user(1), JobApplicationId(5), details("Globex"))
        .await
        .unwrap();

        assert_eq!(updated.job_id, Some(JobId(3)));
    }

    #[tokio::test]
    async fn test_list_for_job_requires_owning_company() {
        let mut applications = MockTestApplicationRepository::new();
        applications
            .expect_list_by_job()
            .with(eq(JobId(3)))
            .times(1)
            .returning(|_| Ok(vec![application(5, 1, Some(3))]));

        let mut jobs = MockTestJobRepository::new();
        jobs.expect_find_by_id()
            .with(eq(JobId(3)))
            .returning(|_| Ok(Some(job(3, 7, true))));

        let service = service(applications, jobs, MockTestCompanyRepository::new());

        let owned = service
            .list_applications_for_job(&company_principal(7), JobId(3))
            .await
            .unwrap();
        assert_eq!(owned.len(), 1);

        let denied = service
            .list_applications_for_job(&company_principal(8), JobId(3))
            .await;
        assert!(matches!(
            denied,
            Err(JobApplicationError::Forbidden(AccessError::NotOwner))
        ));
    }

    #[tokio::test]
    async fn test_application_owners_walk_to_job_company() {
        let mut jobs = MockTestJobRepository::new();
        jobs.expect_find_by_id()
            .with(eq(JobId(3)))
            .returning(|_| Ok(Some(job(3, 7, true))));
        jobs.expect_find_by_id()
            .with(eq(JobId(4)))
            .returning(|_| Ok(None));

        let linked = application_owners(&jobs, &application(5, 1, Some(3)))
            .await
            .unwrap();
        assert_eq!(linked.user, Some(UserId(1)));
        assert_eq!(linked.company, Some(CompanyId(7)));

        let orphaned = application_owners(&jobs, &application(6, 1, Some(4)))
            .await
            .unwrap();
        assert_eq!(orphaned.company, None);

        let self_tracked = application_owners(&jobs, &application(7, 1, None))
            .await
            .unwrap();
        assert_eq!(self_tracked, ResourceOwners::user(UserId(1)));
    }
}
