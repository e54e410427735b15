use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::corrupt;
use super::parse_label;
use super::parse_optional_label;
use crate::domain::application::models::ApplicationDetails;
use crate::domain::application::models::JobApplication;
use crate::domain::application::models::JobApplicationId;
use crate::domain::application::models::NewJobApplication;
use crate::domain::application::ports::JobApplicationRepository;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::UserId;
use crate::domain::errors::StoreError;
use crate::domain::job::models::JobId;
use crate::domain::values::RequiredText;

const APPLICATION_COLUMNS: &str = "id, user_id, job_id, company_name, job_title, job_url, \
     application_date, status, location, salary_range, job_type, work_mode, notes, \
     company_website, contact_person, contact_email, created_at, updated_at";

fn application_from_row(row: &PgRow) -> Result<JobApplication, StoreError> {
    let company_name: String = row.try_get("company_name")?;
    let job_title: String = row.try_get("job_title")?;
    let status: String = row.try_get("status")?;
    let contact_email: Option<String> = row.try_get("contact_email")?;
    let job_id: Option<i64> = row.try_get("job_id")?;

    Ok(JobApplication {
        id: JobApplicationId(row.try_get("id")?),
        user_id: UserId(row.try_get("user_id")?),
        job_id: job_id.map(JobId),
        details: ApplicationDetails {
            company_name: RequiredText::new(&company_name)
                .map_err(|e| corrupt("company_name", e))?,
            job_title: RequiredText::new(&job_title).map_err(|e| corrupt("job_title", e))?,
            job_url: row.try_get("job_url")?,
            application_date: row.try_get("application_date")?,
            status: parse_label("status", &status)?,
            location: row.try_get("location")?,
            salary_range: row.try_get("salary_range")?,
            job_type: parse_optional_label("job_type", row.try_get("job_type")?)?,
            work_mode: parse_optional_label("work_mode", row.try_get("work_mode")?)?,
            notes: row.try_get("notes")?,
            company_website: row.try_get("company_website")?,
            contact_person: row.try_get("contact_person")?,
            contact_email: contact_email
                .map(|e| EmailAddress::new(&e))
                .transpose()
                .map_err(|e| corrupt("contact_email", e))?,
        },
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub struct PostgresJobApplicationRepository {
    pool: PgPool,
}

impl PostgresJobApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobApplicationRepository for PostgresJobApplicationRepository {
    async fn create(&self, application: NewJobApplication) -> Result<JobApplication, StoreError> {
        let details = &application.details;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO job_applications (user_id, job_id, company_name, job_title, job_url,
                                          application_date, status, location, salary_range,
                                          job_type, work_mode, notes, company_website,
                                          contact_person, contact_email)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(application.user_id.0)
        .bind(application.job_id.map(|id| id.0))
        .bind(details.company_name.as_str())
        .bind(details.job_title.as_str())
        .bind(&details.job_url)
        .bind(details.application_date)
        .bind(details.status.as_str())
        .bind(&details.location)
        .bind(&details.salary_range)
        .bind(details.job_type.map(|t| t.as_str()))
        .bind(details.work_mode.map(|m| m.as_str()))
        .bind(&details.notes)
        .bind(&details.company_website)
        .bind(&details.contact_person)
        .bind(details.contact_email.as_ref().map(|e| e.as_str()))
        .fetch_one(&self.pool)
        .await?;

        application_from_row(&row)
    }

    async fn find_by_id(
        &self,
        id: JobApplicationId,
    ) -> Result<Option<JobApplication>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM job_applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(application_from_row).transpose()
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<JobApplication>, StoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM job_applications
            WHERE user_id = $1
            ORDER BY application_date DESC, id DESC
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(application_from_row).collect()
    }

    async fn list_by_job(&self, job_id: JobId) -> Result<Vec<JobApplication>, StoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM job_applications
            WHERE job_id = $1
            ORDER BY application_date DESC, id DESC
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(job_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(application_from_row).collect()
    }

    async fn update(&self, application: JobApplication) -> Result<JobApplication, StoreError> {
        let details = &application.details;

        let row = sqlx::query(&format!(
            r#"
            UPDATE job_applications
            SET company_name = $2, job_title = $3, job_url = $4, application_date = $5,
                status = $6, location = $7, salary_range = $8, job_type = $9, work_mode = $10,
                notes = $11, company_website = $12, contact_person = $13, contact_email = $14,
                updated_at = $15
            WHERE id = $1
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        ))
        .bind(application.id.0)
        .bind(details.company_name.as_str())
        .bind(details.job_title.as_str())
        .bind(&details.job_url)
        .bind(details.application_date)
        .bind(details.status.as_str())
        .bind(&details.location)
        .bind(&details.salary_range)
        .bind(details.job_type.map(|t| t.as_str()))
        .bind(details.work_mode.map(|m| m.as_str()))
        .bind(&details.notes)
        .bind(&details.company_website)
        .bind(&details.contact_person)
        .bind(details.contact_email.as_ref().map(|e| e.as_str()))
        .bind(application.updated_at)
        .fetch_one(&self.pool)
        .await?;

        application_from_row(&row)
    }

    async fn delete(&self, id: JobApplicationId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM job_applications WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
