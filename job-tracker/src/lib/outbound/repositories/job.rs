use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::contains_pattern;
use super::corrupt;
use super::missing_reference;
use super::parse_label;
use crate::domain::company::models::CompanyId;
use crate::domain::errors::StoreError;
use crate::domain::job::models::Job;
use crate::domain::job::models::JobId;
use crate::domain::job::models::NewJob;
use crate::domain::job::models::SalaryRange;
use crate::domain::job::ports::JobRepository;

const JOB_COLUMNS: &str = "id, company_id, title, description, requirements, location, job_type, \
     work_mode, salary_min, salary_max, currency, job_url, posted_date, deadline_date, is_active, \
     created_at, updated_at";

fn job_from_row(row: &PgRow) -> Result<Job, StoreError> {
    let job_type: String = row.try_get("job_type")?;
    let work_mode: String = row.try_get("work_mode")?;
    let salary = SalaryRange::new(row.try_get("salary_min")?, row.try_get("salary_max")?)
        .map_err(|e| corrupt("salary", e))?;

    Ok(Job {
        id: JobId(row.try_get("id")?),
        company_id: CompanyId(row.try_get("company_id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        requirements: row.try_get("requirements")?,
        location: row.try_get("location")?,
        job_type: parse_label("job_type", &job_type)?,
        work_mode: parse_label("work_mode", &work_mode)?,
        salary,
        currency: row.try_get("currency")?,
        job_url: row.try_get("job_url")?,
        posted_date: row.try_get("posted_date")?,
        deadline_date: row.try_get("deadline_date")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn create(&self, job: NewJob) -> Result<Job, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO jobs (company_id, title, description, requirements, location, job_type,
                              work_mode, salary_min, salary_max, currency, job_url, posted_date,
                              deadline_date, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, TRUE)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(job.company_id.0)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.location)
        .bind(job.job_type.as_str())
        .bind(job.work_mode.as_str())
        .bind(job.salary.min())
        .bind(job.salary.max())
        .bind(&job.currency)
        .bind(&job.job_url)
        .bind(job.posted_date)
        .bind(job.deadline_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| missing_reference(e, "company"))?;

        job_from_row(&row)
    }

    async fn find_by_id(&self, id: JobId) -> Result<Option<Job>, StoreError> {
        let row = sqlx::query(&format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(job_from_row).transpose()
    }

    async fn list_active(&self) -> Result<Vec<Job>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM jobs WHERE is_active ORDER BY posted_date DESC, id DESC",
            JOB_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(job_from_row).collect()
    }

    async fn list_active_by_company(&self, company_id: CompanyId) -> Result<Vec<Job>, StoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM jobs
            WHERE is_active AND company_id = $1
            ORDER BY posted_date DESC, id DESC
            "#,
            JOB_COLUMNS
        ))
        .bind(company_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(job_from_row).collect()
    }

    async fn search_active(&self, term: &str) -> Result<Vec<Job>, StoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM jobs
            WHERE is_active AND (title ILIKE $1 OR description ILIKE $1)
            ORDER BY posted_date DESC, id DESC
            "#,
            JOB_COLUMNS
        ))
        .bind(contains_pattern(term))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(job_from_row).collect()
    }

    async fn list_upcoming_deadlines(&self, from: NaiveDate) -> Result<Vec<Job>, StoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM jobs
            WHERE is_active AND deadline_date >= $1
            ORDER BY deadline_date ASC, id ASC
            "#,
            JOB_COLUMNS
        ))
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(job_from_row).collect()
    }

    async fn update(&self, job: Job) -> Result<Job, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE jobs
            SET title = $2, description = $3, requirements = $4, location = $5, job_type = $6,
                work_mode = $7, salary_min = $8, salary_max = $9, currency = $10, job_url = $11,
                deadline_date = $12, is_active = $13, updated_at = $14
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(job.id.0)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.location)
        .bind(job.job_type.as_str())
        .bind(job.work_mode.as_str())
        .bind(job.salary.min())
        .bind(job.salary.max())
        .bind(&job.currency)
        .bind(&job.job_url)
        .bind(job.deadline_date)
        .bind(job.is_active)
        .bind(job.updated_at)
        .fetch_one(&self.pool)
        .await?;

        job_from_row(&row)
    }

    async fn delete(&self, id: JobId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
