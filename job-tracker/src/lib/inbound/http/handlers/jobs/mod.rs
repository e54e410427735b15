pub mod create_job;
pub mod deactivate_job;
pub mod delete_job;
pub mod get_job;
pub mod list_jobs;
pub mod update_job;

pub use create_job::create_job;
pub use deactivate_job::deactivate_job;
pub use delete_job::delete_job;
pub use get_job::get_job;
pub use list_jobs::list_jobs;
pub use list_jobs::list_my_jobs;
pub use list_jobs::list_upcoming_deadlines;
pub use update_job::update_job;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;

use crate::domain::job::models::Job;
use crate::domain::job::models::JobType;
use crate::domain::job::models::WorkMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobResponseData {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub location: String,
    pub job_type: JobType,
    pub work_mode: WorkMode,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub currency: Option<String>,
    pub job_url: Option<String>,
    pub posted_date: NaiveDate,
    pub deadline_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Job> for JobResponseData {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.0,
            company_id: job.company_id.0,
            title: job.title.clone(),
            description: job.description.clone(),
            requirements: job.requirements.clone(),
            location: job.location.clone(),
            job_type: job.job_type,
            work_mode: job.work_mode,
            salary_min: job.salary.min(),
            salary_max: job.salary.max(),
            currency: job.currency.clone(),
            job_url: job.job_url.clone(),
            posted_date: job.posted_date,
            deadline_date: job.deadline_date,
            is_active: job.is_active,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

fn job_list(jobs: Vec<Job>) -> Vec<JobResponseData> {
    jobs.iter().map(JobResponseData::from).collect()
}
