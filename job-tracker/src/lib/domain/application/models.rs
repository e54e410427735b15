use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::UserId;
use crate::domain::company::models::Company;
use crate::domain::job::models::Job;
use crate::domain::job::models::JobId;
use crate::domain::job::models::JobType;
use crate::domain::job::models::WorkMode;
use crate::domain::values::RequiredText;

labelled_enum! {
    /// Progress of an application through a hiring pipeline.
    pub enum ApplicationStatus ("application status") {
        Applied => "APPLIED",
        Screening => "SCREENING",
        Interviewing => "INTERVIEWING",
        Offered => "OFFERED",
        Accepted => "ACCEPTED",
        Rejected => "REJECTED",
        Withdrawn => "WITHDRAWN",
    }
}

/// JobApplication aggregate entity.
///
/// Tracked by the user who filed it. When filed against a listing it keeps
/// the listing's id; the descriptive fields are copied at filing time so
/// they survive the listing being deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct JobApplication {
    pub id: JobApplicationId,
    pub user_id: UserId,
    pub job_id: Option<JobId>,
    pub details: ApplicationDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// JobApplication unique identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobApplicationId(pub i64);

impl fmt::Display for JobApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User-maintained fields of an application.
///
/// Used as-is for self-tracked creation and for full updates.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDetails {
    pub company_name: RequiredText,
    pub job_title: RequiredText,
    pub job_url: Option<String>,
    pub application_date: NaiveDate,
    pub status: ApplicationStatus,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<JobType>,
    pub work_mode: Option<WorkMode>,
    pub notes: Option<String>,
    pub company_website: Option<String>,
    pub contact_person: Option<String>,
    pub contact_email: Option<EmailAddress>,
}

impl ApplicationDetails {
    /// Details of an application filed against `job`, copied from the listing.
    pub fn from_listing(
        job: &Job,
        company: &Company,
        command: ApplyForJobCommand,
        today: NaiveDate,
    ) -> Result<Self, crate::domain::values::RequiredTextError> {
        Ok(Self {
            company_name: RequiredText::new(company.name.as_str())?,
            job_title: RequiredText::new(&job.title)?,
            job_url: job.job_url.clone(),
            application_date: today,
            status: command.status.unwrap_or(ApplicationStatus::Applied),
            location: Some(job.location.clone()),
            salary_range: describe_salary(job),
            job_type: Some(job.job_type),
            work_mode: Some(job.work_mode),
            notes: command.notes,
            company_website: company.profile.website.clone(),
            contact_person: command.contact_person,
            contact_email: command.contact_email,
        })
    }
}

fn describe_salary(job: &Job) -> Option<String> {
    let currency = job
        .currency
        .as_deref()
        .map(|c| format!(" {}", c))
        .unwrap_or_default();

    match (job.salary.min(), job.salary.max()) {
        (Some(min), Some(max)) => Some(format!("{}-{}{}", min, max, currency)),
        (Some(min), None) => Some(format!("from {}{}", min, currency)),
        (None, Some(max)) => Some(format!("up to {}{}", max, currency)),
        (None, None) => None,
    }
}

/// Command to apply to a listed job.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyForJobCommand {
    pub job_id: JobId,
    /// Defaults to `APPLIED`
    pub status: Option<ApplicationStatus>,
    pub notes: Option<String>,
    pub contact_person: Option<String>,
    pub contact_email: Option<EmailAddress>,
}

/// Application data handed to the repository on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJobApplication {
    pub user_id: UserId,
    pub job_id: Option<JobId>,
    pub details: ApplicationDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::company::models::CompanyId;
    use crate::domain::company::models::CompanyName;
    use crate::domain::company::models::CompanyProfile;
    use crate::domain::job::models::SalaryRange;

    fn listing() -> (Job, Company) {
        let now = Utc::now();
        let job = Job {
            id: JobId(3),
            company_id: CompanyId(7),
            title: "Backend Engineer".to_string(),
            description: "Build services".to_string(),
            requirements: None,
            location: "Berlin".to_string(),
            job_type: JobType::Contract,
            work_mode: WorkMode::Hybrid,
            salary: SalaryRange::new(Some(50_000), Some(70_000)).unwrap(),
            currency: Some("EUR".to_string()),
            job_url: Some("https://acme.example/jobs/3".to_string()),
            posted_date: now.date_naive(),
            deadline_date: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let company = Company {
            id: CompanyId(7),
            email: EmailAddress::new("hr@acme.com").unwrap(),
            password_hash: String::new(),
            name: CompanyName::new("Acme").unwrap(),
            profile: CompanyProfile {
                website: Some("https://acme.example".to_string()),
                ..CompanyProfile::default()
            },
            created_at: now,
            updated_at: now,
        };
        (job, company)
    }

    #[test]
    fn test_from_listing_copies_job_fields() {
        let (job, company) = listing();
        let today = Utc::now().date_naive();

        let details = ApplicationDetails::from_listing(
            &job,
            &company,
            ApplyForJobCommand {
                job_id: job.id,
                status: None,
                notes: Some("Referred by Bo".to_string()),
                contact_person: None,
                contact_email: None,
            },
            today,
        )
        .unwrap();

        assert_eq!(details.company_name.as_str(), "Acme");
        assert_eq!(details.job_title.as_str(), "Backend Engineer");
        assert_eq!(details.job_url, job.job_url);
        assert_eq!(details.location.as_deref(), Some("Berlin"));
        assert_eq!(details.job_type, Some(JobType::Contract));
        assert_eq!(details.work_mode, Some(WorkMode::Hybrid));
        assert_eq!(details.salary_range.as_deref(), Some("50000-70000 EUR"));
        assert_eq!(details.company_website.as_deref(), Some("https://acme.example"));
        assert_eq!(details.status, ApplicationStatus::Applied);
        assert_eq!(details.application_date, today);
        assert_eq!(details.notes.as_deref(), Some("Referred by Bo"));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(
            "interviewing".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::Interviewing)
        );
        assert_eq!(ApplicationStatus::Withdrawn.as_str(), "WITHDRAWN");
    }
}
