use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use super::errors::SalaryRangeError;
use crate::domain::company::models::CompanyId;
use crate::domain::errors::FieldErrors;
use crate::domain::values::RequiredText;

labelled_enum! {
    /// Contract type of a job listing.
    pub enum JobType ("job type") {
        FullTime => "FULL_TIME",
        PartTime => "PART_TIME",
        Contract => "CONTRACT",
        Internship => "INTERNSHIP",
        Temporary => "TEMPORARY",
        Freelance => "FREELANCE",
    }
}

labelled_enum! {
    /// Where the work happens.
    pub enum WorkMode ("work mode") {
        Onsite => "ONSITE",
        Remote => "REMOTE",
        Hybrid => "HYBRID",
    }
}

/// Job aggregate entity.
///
/// A listing posted by a company. Owned by that company.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub company_id: CompanyId,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub location: String,
    pub job_type: JobType,
    pub work_mode: WorkMode,
    pub salary: SalaryRange,
    pub currency: Option<String>,
    pub job_url: Option<String>,
    pub posted_date: NaiveDate,
    pub deadline_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Apply the provided fields of a partial update.
    ///
    /// # Errors
    /// * `salary_min` - The merged salary range is inverted
    pub fn apply(&mut self, command: UpdateJobCommand, now: DateTime<Utc>) -> Result<(), FieldErrors> {
        let salary = SalaryRange::new(
            command.salary_min.or(self.salary.min()),
            command.salary_max.or(self.salary.max()),
        )
        .map_err(|e| FieldErrors::single("salary_min", e.to_string()))?;

        if let Some(title) = command.title {
            self.title = title.into_inner();
        }
        if let Some(description) = command.description {
            self.description = description.into_inner();
        }
        if let Some(location) = command.location {
            self.location = location.into_inner();
        }
        if command.requirements.is_some() {
            self.requirements = command.requirements;
        }
        if let Some(job_type) = command.job_type {
            self.job_type = job_type;
        }
        if let Some(work_mode) = command.work_mode {
            self.work_mode = work_mode;
        }
        if command.currency.is_some() {
            self.currency = command.currency;
        }
        if command.job_url.is_some() {
            self.job_url = command.job_url;
        }
        if command.deadline_date.is_some() {
            self.deadline_date = command.deadline_date;
        }
        if let Some(is_active) = command.is_active {
            self.is_active = is_active;
        }

        self.salary = salary;
        self.updated_at = now;
        Ok(())
    }
}

/// Job unique identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub i64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Offered salary bounds in whole currency units.
///
/// Both bounds are optional; when both are present `min <= max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalaryRange {
    min: Option<i64>,
    max: Option<i64>,
}

impl SalaryRange {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Result<Self, SalaryRangeError> {
        if min.is_some_and(|v| v < 0) || max.is_some_and(|v| v < 0) {
            return Err(SalaryRangeError::Negative);
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(SalaryRangeError::Inverted { min, max });
            }
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Option<i64> {
        self.min
    }

    pub fn max(&self) -> Option<i64> {
        self.max
    }
}

/// Command to post a new job with validated fields
#[derive(Debug, Clone, PartialEq)]
pub struct CreateJobCommand {
    pub title: RequiredText,
    pub description: RequiredText,
    pub requirements: Option<String>,
    pub location: RequiredText,
    pub job_type: JobType,
    pub work_mode: WorkMode,
    pub salary: SalaryRange,
    pub currency: Option<String>,
    pub job_url: Option<String>,
    /// Defaults to the day of creation
    pub posted_date: Option<NaiveDate>,
    pub deadline_date: Option<NaiveDate>,
}

/// Command to update an existing job.
///
/// All fields are optional to support partial updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateJobCommand {
    pub title: Option<RequiredText>,
    pub description: Option<RequiredText>,
    pub requirements: Option<String>,
    pub location: Option<RequiredText>,
    pub job_type: Option<JobType>,
    pub work_mode: Option<WorkMode>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub currency: Option<String>,
    pub job_url: Option<String>,
    pub deadline_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

/// Job data handed to the repository on creation. New jobs are active.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub company_id: CompanyId,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub location: String,
    pub job_type: JobType,
    pub work_mode: WorkMode,
    pub salary: SalaryRange,
    pub currency: Option<String>,
    pub job_url: Option<String>,
    pub posted_date: NaiveDate,
    pub deadline_date: Option<NaiveDate>,
}

impl NewJob {
    pub fn from_command(company_id: CompanyId, command: CreateJobCommand, today: NaiveDate) -> Self {
        Self {
            company_id,
            title: command.title.into_inner(),
            description: command.description.into_inner(),
            requirements: command.requirements,
            location: command.location.into_inner(),
            job_type: command.job_type,
            work_mode: command.work_mode,
            salary: command.salary,
            currency: command.currency,
            job_url: command.job_url,
            posted_date: command.posted_date.unwrap_or(today),
            deadline_date: command.deadline_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

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
            work_mode: WorkMode::Hybrid,
            salary: SalaryRange::new(Some(50_000), Some(70_000)).unwrap(),
            currency: Some("EUR".to_string()),
            job_url: None,
            posted_date: now.date_naive(),
            deadline_date: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_labels_parse_case_insensitively() {
        assert_eq!("FULL_TIME".parse::<JobType>(), Ok(JobType::FullTime));
        assert_eq!(" remote ".parse::<WorkMode>(), Ok(WorkMode::Remote));
        assert_eq!(
            "WEEKENDS".parse::<JobType>().unwrap_err().to_string(),
            "unknown job type: WEEKENDS"
        );
        assert_eq!(JobType::PartTime.to_string(), "PART_TIME");
    }

    #[test]
    fn test_labels_serde() {
        let json = serde_json::to_string(&WorkMode::Onsite).unwrap();
        assert_eq!(json, "\"ONSITE\"");
        let parsed: JobType = serde_json::from_str("\"internship\"").unwrap();
        assert_eq!(parsed, JobType::Internship);
        assert!(serde_json::from_str::<JobType>("\"nope\"").is_err());
    }

    #[test]
    fn test_salary_range() {
        assert!(SalaryRange::new(Some(10), Some(10)).is_ok());
        assert!(SalaryRange::new(None, Some(10)).is_ok());
        assert_eq!(
            SalaryRange::new(Some(11), Some(10)),
            Err(SalaryRangeError::Inverted { min: 11, max: 10 })
        );
        assert_eq!(
            SalaryRange::new(Some(-1), None),
            Err(SalaryRangeError::Negative)
        );
    }

    #[test]
    fn test_apply_partial_update() {
        let mut job = job(1, 7);
        let later = job.updated_at + Duration::minutes(1);

        job.apply(
            UpdateJobCommand {
                title: Some(RequiredText::new("Staff Engineer").unwrap()),
                salary_max: Some(90_000),
                ..UpdateJobCommand::default()
            },
            later,
        )
        .unwrap();

        assert_eq!(job.title, "Staff Engineer");
        assert_eq!(job.description, "Build services");
        assert_eq!(job.salary.min(), Some(50_000));
        assert_eq!(job.salary.max(), Some(90_000));
        assert_eq!(job.updated_at, later);
    }

    #[test]
    fn test_apply_rejects_inverted_merge() {
        let mut job = job(1, 7);
        let before = job.clone();

        let errors = job
            .apply(
                UpdateJobCommand {
                    salary_max: Some(10),
                    ..UpdateJobCommand::default()
                },
                Utc::now(),
            )
            .unwrap_err();

        assert!(errors.contains("salary_min"));
        assert_eq!(job, before);
    }
}
