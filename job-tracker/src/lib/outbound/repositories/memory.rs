use std::collections::BTreeMap;

use async_trait::async_trait;
use auth::PrincipalKind;
use chrono::NaiveDate;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::application::models::JobApplication;
use crate::domain::application::models::JobApplicationId;
use crate::domain::application::models::NewJobApplication;
use crate::domain::application::ports::JobApplicationRepository;
use crate::domain::auth::models::Account;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::NewCompany;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::company::models::Company;
use crate::domain::company::models::CompanyId;
use crate::domain::company::models::CompanyName;
use crate::domain::company::models::CompanyProfile;
use crate::domain::company::ports::CompanyRepository;
use crate::domain::errors::StoreError;
use crate::domain::interview::models::Interview;
use crate::domain::interview::models::InterviewId;
use crate::domain::interview::models::NewInterview;
use crate::domain::interview::ports::InterviewRepository;
use crate::domain::job::models::Job;
use crate::domain::job::models::JobId;
use crate::domain::job::models::NewJob;
use crate::domain::job::ports::JobRepository;

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, User>,
    companies: BTreeMap<i64, Company>,
    jobs: BTreeMap<i64, Job>,
    applications: BTreeMap<i64, JobApplication>,
    interviews: BTreeMap<i64, Interview>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn email_taken(&self, email: &str) -> bool {
        self.users.values().any(|u| u.email.as_str() == email)
            || self.companies.values().any(|c| c.email.as_str() == email)
    }

    fn name_holder(&self, name: &str) -> Option<&Company> {
        let name = name.trim().to_lowercase();
        self.companies
            .values()
            .find(|c| c.name.as_str().to_lowercase() == name)
    }

    /// Company owning the job an application was filed against.
    fn application_company(&self, application: &JobApplication) -> Option<CompanyId> {
        application
            .job_id
            .and_then(|job_id| self.jobs.get(&job_id.0))
            .map(|job| job.company_id)
    }

    /// Unlink applications from a removed job, as `ON DELETE SET NULL` does.
    fn unlink_job(&mut self, job_id: JobId) {
        for application in self.applications.values_mut() {
            if application.job_id == Some(job_id) {
                application.job_id = None;
            }
        }
    }
}

/// Process-local store implementing every repository port.
///
/// Mirrors the PostgreSQL schema's uniqueness and cascade rules. All tables
/// sit behind one lock, so each operation is atomic.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(key);
    items
}

#[async_trait]
impl CredentialStore for InMemoryStore {
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.email_taken(email.as_str()))
    }

    async fn company_name_exists(&self, name: &CompanyName) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.name_holder(name.as_str()).is_some())
    }

    async fn find_account_by_email(
        &self,
        kind: PrincipalKind,
        email: &str,
    ) -> Result<Option<Account>, StoreError> {
        let tables = self.tables.read().await;

        let account = match kind {
            PrincipalKind::User => tables
                .users
                .values()
                .find(|u| u.email.as_str() == email)
                .cloned()
                .map(Account::User),
            PrincipalKind::Company => tables
                .companies
                .values()
                .find(|c| c.email.as_str() == email)
                .cloned()
                .map(Account::Company),
        };
        Ok(account)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(user.email.as_str()) {
            return Err(StoreError::DuplicateEmail(user.email.to_string()));
        }

        let created = User {
            id: UserId(tables.next_id()),
            email: user.email,
            password_hash: user.password_hash,
            full_name: user.full_name,
            username: user.username,
            created_at: Utc::now(),
        };
        tables.users.insert(created.id.0, created.clone());
        Ok(created)
    }

    async fn create_company(&self, company: NewCompany) -> Result<Company, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(company.email.as_str()) {
            return Err(StoreError::DuplicateEmail(company.email.to_string()));
        }
        if tables.name_holder(company.name.as_str()).is_some() {
            return Err(StoreError::DuplicateCompanyName(company.name.to_string()));
        }

        let now = Utc::now();
        let created = Company {
            id: CompanyId(tables.next_id()),
            email: company.email,
            password_hash: company.password_hash,
            name: company.name,
            profile: CompanyProfile::default(),
            created_at: now,
            updated_at: now,
        };
        tables.companies.insert(created.id.0, created.clone());
        Ok(created)
    }
}

#[async_trait]
impl CompanyRepository for InMemoryStore {
    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, StoreError> {
        Ok(self.tables.read().await.companies.get(&id.0).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, StoreError> {
        Ok(self.tables.read().await.name_holder(name).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Company>, StoreError> {
        let companies = self.tables.read().await.companies.values().cloned().collect();
        Ok(sorted_by(companies, |c: &Company| c.name.as_str().to_string()))
    }

    async fn update(&self, company: Company) -> Result<Company, StoreError> {
        let mut tables = self.tables.write().await;

        if let Some(holder) = tables.name_holder(company.name.as_str()) {
            if holder.id != company.id {
                return Err(StoreError::DuplicateCompanyName(company.name.to_string()));
            }
        }
        match tables.companies.get_mut(&company.id.0) {
            Some(stored) => {
                *stored = company.clone();
                Ok(company)
            }
            None => Err(StoreError::Database(format!("no company {}", company.id))),
        }
    }

    async fn delete(&self, id: CompanyId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.companies.remove(&id.0).is_none() {
            return Ok(false);
        }

        let jobs: Vec<JobId> = tables
            .jobs
            .values()
            .filter(|job| job.company_id == id)
            .map(|job| job.id)
            .collect();
        for job_id in jobs {
            tables.jobs.remove(&job_id.0);
            tables.unlink_job(job_id);
        }
        Ok(true)
    }
}

#[async_trait]
impl JobRepository for InMemoryStore {
    async fn create(&self, job: NewJob) -> Result<Job, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.companies.contains_key(&job.company_id.0) {
            return Err(StoreError::MissingReference("company".to_string()));
        }
        let now = Utc::now();

        let created = Job {
            id: JobId(tables.next_id()),
            company_id: job.company_id,
            title: job.title,
            description: job.description,
            requirements: job.requirements,
            location: job.location,
            job_type: job.job_type,
            work_mode: job.work_mode,
            salary: job.salary,
            currency: job.currency,
            job_url: job.job_url,
            posted_date: job.posted_date,
            deadline_date: job.deadline_date,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.jobs.insert(created.id.0, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, StoreError> {
        Ok(self.tables.read().await.jobs.get(&id.0).cloned())
    }

    async fn list_active(&self) -> Result<Vec<Job>, StoreError> {
        let jobs = self
            .tables
            .read()
            .await
            .jobs
            .values()
            .filter(|job| job.is_active)
            .cloned()
            .collect();
        Ok(sorted_by(jobs, |j: &Job| std::cmp::Reverse((j.posted_date, j.id))))
    }

    async fn list_active_by_company(&self, company_id: CompanyId) -> Result<Vec<Job>, StoreError> {
        let jobs = self
            .tables
            .read()
            .await
            .jobs
            .values()
            .filter(|job| job.is_active && job.company_id == company_id)
            .cloned()
            .collect();
        Ok(sorted_by(jobs, |j: &Job| std::cmp::Reverse((j.posted_date, j.id))))
    }

    async fn search_active(&self, term: &str) -> Result<Vec<Job>, StoreError> {
        let term = term.to_lowercase();
        let jobs = self
            .tables
            .read()
            .await
            .jobs
            .values()
            .filter(|job| {
                job.is_active
                    && (job.title.to_lowercase().contains(&term)
                        || job.description.to_lowercase().contains(&term))
            })
            .cloned()
            .collect();
        Ok(sorted_by(jobs, |j: &Job| std::cmp::Reverse((j.posted_date, j.id))))
    }

    async fn list_upcoming_deadlines(&self, from: NaiveDate) -> Result<Vec<Job>, StoreError> {
        let jobs = self
            .tables
            .read()
            .await
            .jobs
            .values()
            .filter(|job| job.is_active && job.deadline_date.is_some_and(|d| d >= from))
            .cloned()
            .collect();
        Ok(sorted_by(jobs, |j: &Job| (j.deadline_date, j.id)))
    }

    async fn update(&self, job: Job) -> Result<Job, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.jobs.get_mut(&job.id.0) {
            Some(stored) => {
                *stored = job.clone();
                Ok(job)
            }
            None => Err(StoreError::Database(format!("no job {}", job.id))),
        }
    }

    async fn delete(&self, id: JobId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.jobs.remove(&id.0).is_none() {
            return Ok(false);
        }
        tables.unlink_job(id);
        Ok(true)
    }
}

#[async_trait]
impl JobApplicationRepository for InMemoryStore {
    async fn create(&self, application: NewJobApplication) -> Result<JobApplication, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        let created = JobApplication {
            id: JobApplicationId(tables.next_id()),
            user_id: application.user_id,
            job_id: application.job_id,
            details: application.details,
            created_at: now,
            updated_at: now,
        };
        tables.applications.insert(created.id.0, created.clone());
        Ok(created)
    }

    async fn find_by_id(
        &self,
        id: JobApplicationId,
    ) -> Result<Option<JobApplication>, StoreError> {
        Ok(self.tables.read().await.applications.get(&id.0).cloned())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<JobApplication>, StoreError> {
        let applications = self
            .tables
            .read()
            .await
            .applications
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        Ok(sorted_by(applications, |a: &JobApplication| {
            std::cmp::Reverse((a.details.application_date, a.id))
        }))
    }

    async fn list_by_job(&self, job_id: JobId) -> Result<Vec<JobApplication>, StoreError> {
        let applications = self
            .tables
            .read()
            .await
            .applications
            .values()
            .filter(|a| a.job_id == Some(job_id))
            .cloned()
            .collect();
        Ok(sorted_by(applications, |a: &JobApplication| {
            std::cmp::Reverse((a.details.application_date, a.id))
        }))
    }

    async fn update(&self, application: JobApplication) -> Result<JobApplication, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.applications.get_mut(&application.id.0) {
            Some(stored) => {
                *stored = application.clone();
                Ok(application)
            }
            None => Err(StoreError::Database(format!(
                "no application {}",
                application.id
            ))),
        }
    }

    async fn delete(&self, id: JobApplicationId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.applications.remove(&id.0).is_none() {
            return Ok(false);
        }
        tables.interviews.retain(|_, i| i.application_id != id);
        Ok(true)
    }
}

#[async_trait]
impl InterviewRepository for InMemoryStore {
    async fn create(&self, interview: NewInterview) -> Result<Interview, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        let created = Interview {
            id: InterviewId(tables.next_id()),
            application_id: interview.application_id,
            details: interview.details,
            created_at: now,
            updated_at: now,
        };
        tables.interviews.insert(created.id.0, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: InterviewId) -> Result<Option<Interview>, StoreError> {
        Ok(self.tables.read().await.interviews.get(&id.0).cloned())
    }

    async fn list_by_application(
        &self,
        application_id: JobApplicationId,
    ) -> Result<Vec<Interview>, StoreError> {
        let interviews = self
            .tables
            .read()
            .await
            .interviews
            .values()
            .filter(|i| i.application_id == application_id)
            .cloned()
            .collect();
        Ok(sorted_by(interviews, |i: &Interview| i.details.interview_date))
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Interview>, StoreError> {
        let tables = self.tables.read().await;
        let interviews = tables
            .interviews
            .values()
            .filter(|i| {
                tables
                    .applications
                    .get(&i.application_id.0)
                    .is_some_and(|a| a.user_id == user_id)
            })
            .cloned()
            .collect();
        Ok(sorted_by(interviews, |i: &Interview| i.details.interview_date))
    }

    async fn list_by_company(&self, company_id: CompanyId) -> Result<Vec<Interview>, StoreError> {
        let tables = self.tables.read().await;
        let interviews = tables
            .interviews
            .values()
            .filter(|i| {
                tables
                    .applications
                    .get(&i.application_id.0)
                    .and_then(|a| tables.application_company(a))
                    == Some(company_id)
            })
            .cloned()
            .collect();
        Ok(sorted_by(interviews, |i: &Interview| i.details.interview_date))
    }

    async fn update(&self, interview: Interview) -> Result<Interview, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.interviews.get_mut(&interview.id.0) {
            Some(stored) => {
                *stored = interview.clone();
                Ok(interview)
            }
            None => Err(StoreError::Database(format!("no interview {}", interview.id))),
        }
    }

    async fn delete(&self, id: InterviewId) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.interviews.remove(&id.0).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::application::service::tests::details;
    use crate::domain::job::models::JobType;
    use crate::domain::job::models::SalaryRange;
    use crate::domain::job::models::WorkMode;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: EmailAddress::new(email).unwrap(),
            password_hash: "hash".to_string(),
            full_name: None,
            username: None,
        }
    }

    fn new_company(email: &str, name: &str) -> NewCompany {
        NewCompany {
            email: EmailAddress::new(email).unwrap(),
            password_hash: "hash".to_string(),
            name: CompanyName::new(name).unwrap(),
        }
    }

    fn new_job(company_id: CompanyId, title: &str) -> NewJob {
        NewJob {
            company_id,
            title: title.to_string(),
            description: "Build services".to_string(),
            requirements: None,
            location: "Berlin".to_string(),
            job_type: JobType::FullTime,
            work_mode: WorkMode::Remote,
            salary: SalaryRange::default(),
            currency: None,
            job_url: None,
            posted_date: Utc::now().date_naive(),
            deadline_date: None,
        }
    }

    #[tokio::test]
    async fn test_email_is_unique_across_kinds() {
        let store = InMemoryStore::new();
        store.create_user(new_user("a@x.com")).await.unwrap();

        let email = EmailAddress::new("a@x.com").unwrap();
        assert!(store.email_exists(&email).await.unwrap());

        let result = store.create_company(new_company("a@x.com", "Acme")).await;
        assert_eq!(result, Err(StoreError::DuplicateEmail("a@x.com".to_string())));
    }

    #[tokio::test]
    async fn test_company_email_blocks_user_registration() {
        let store = InMemoryStore::new();
        store
            .create_company(new_company("acme@x.com", "Acme"))
            .await
            .unwrap();

        let result = store.create_user(new_user("acme@x.com")).await;
        assert_eq!(result, Err(StoreError::DuplicateEmail("acme@x.com".to_string())));
    }

    #[tokio::test]
    async fn test_job_requires_existing_company() {
        let store = InMemoryStore::new();
        let company = store
            .create_company(new_company("hr@acme.com", "Acme"))
            .await
            .unwrap();
        assert!(CompanyRepository::delete(&store, company.id).await.unwrap());

        let result = JobRepository::create(&store, new_job(company.id, "Engineer")).await;
        assert_eq!(
            result,
            Err(StoreError::MissingReference("company".to_string()))
        );
        assert!(JobRepository::list_active(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_company_name_is_unique_ignoring_case() {
        let store = InMemoryStore::new();
        store
            .create_company(new_company("hr@acme.com", "Acme"))
            .await
            .unwrap();

        let name = CompanyName::new("ACME").unwrap();
        assert!(store.company_name_exists(&name).await.unwrap());

        let result = store
            .create_company(new_company("jobs@acme.com", "acme"))
            .await;
        assert_eq!(result, Err(StoreError::DuplicateCompanyName("acme".to_string())));
    }

    #[tokio::test]
    async fn test_find_account_respects_kind() {
        let store = InMemoryStore::new();
        store.create_user(new_user("a@x.com")).await.unwrap();

        let user = store
            .find_account_by_email(PrincipalKind::User, "a@x.com")
            .await
            .unwrap();
        assert!(matches!(user, Some(Account::User(_))));

        let company = store
            .find_account_by_email(PrincipalKind::Company, "a@x.com")
            .await
            .unwrap();
        assert!(company.is_none());
    }

    #[tokio::test]
    async fn test_deleting_company_removes_jobs_and_frees_email() {
        let store = InMemoryStore::new();
        let company = store
            .create_company(new_company("hr@acme.com", "Acme"))
            .await
            .unwrap();
        let user = store.create_user(new_user("a@x.com")).await.unwrap();
        let job = JobRepository::create(&store, new_job(company.id, "Engineer"))
            .await
            .unwrap();
        let application = JobApplicationRepository::create(
            &store,
            NewJobApplication {
                user_id: user.id,
                job_id: Some(job.id),
                details: details("Acme"),
            },
        )
        .await
        .unwrap();

        assert!(CompanyRepository::delete(&store, company.id).await.unwrap());
        assert!(!CompanyRepository::delete(&store, company.id).await.unwrap());

        assert_eq!(JobRepository::find_by_id(&store, job.id).await.unwrap(), None);
        let kept = JobApplicationRepository::find_by_id(&store, application.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.job_id, None);

        let email = EmailAddress::new("hr@acme.com").unwrap();
        assert!(!store.email_exists(&email).await.unwrap());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_active_only() {
        let store = InMemoryStore::new();
        let company = store
            .create_company(new_company("hr@acme.com", "Acme"))
            .await
            .unwrap();
        JobRepository::create(&store, new_job(company.id, "Senior Rust Engineer"))
            .await
            .unwrap();
        let mut closed = JobRepository::create(&store, new_job(company.id, "Rust Intern"))
            .await
            .unwrap();
        closed.is_active = false;
        JobRepository::update(&store, closed).await.unwrap();

        let found = store.search_active("rust").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Senior Rust Engineer");
    }

    #[tokio::test]
    async fn test_deleting_application_removes_interviews() {
        use crate::domain::interview::models::InterviewDetails;
        use crate::domain::interview::models::InterviewStatus;
        use crate::domain::interview::models::InterviewType;

        let store = InMemoryStore::new();
        let user = store.create_user(new_user("a@x.com")).await.unwrap();
        let application = JobApplicationRepository::create(
            &store,
            NewJobApplication {
                user_id: user.id,
                job_id: None,
                details: details("Initech"),
            },
        )
        .await
        .unwrap();
        let interview = InterviewRepository::create(
            &store,
            NewInterview {
                application_id: application.id,
                details: InterviewDetails {
                    interview_date: Utc::now(),
                    interview_type: InterviewType::Phone,
                    status: InterviewStatus::Scheduled,
                    location: None,
                    interviewer_name: None,
                    duration_minutes: None,
                    notes: None,
                    feedback: None,
                    result: None,
                },
            },
        )
        .await
        .unwrap();

        assert!(JobApplicationRepository::delete(&store, application.id)
            .await
            .unwrap());
        assert_eq!(
            InterviewRepository::find_by_id(&store, interview.id)
                .await
                .unwrap(),
            None
        );
    }
}
