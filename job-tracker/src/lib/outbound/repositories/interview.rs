use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::parse_label;
use super::parse_optional_label;
use crate::domain::application::models::JobApplicationId;
use crate::domain::auth::models::UserId;
use crate::domain::company::models::CompanyId;
use crate::domain::errors::StoreError;
use crate::domain::interview::models::Interview;
use crate::domain::interview::models::InterviewDetails;
use crate::domain::interview::models::InterviewId;
use crate::domain::interview::models::NewInterview;
use crate::domain::interview::ports::InterviewRepository;

/// Columns qualified with the `i` alias so they survive joins.
const INTERVIEW_COLUMNS: &str = "i.id, i.job_application_id, i.interview_date, i.interview_type, \
     i.status, i.location, i.interviewer_name, i.duration_minutes, i.notes, i.feedback, \
     i.result, i.created_at, i.updated_at";

fn interview_from_row(row: &PgRow) -> Result<Interview, StoreError> {
    let interview_type: String = row.try_get("interview_type")?;
    let status: String = row.try_get("status")?;

    Ok(Interview {
        id: InterviewId(row.try_get("id")?),
        application_id: JobApplicationId(row.try_get("job_application_id")?),
        details: InterviewDetails {
            interview_date: row.try_get("interview_date")?,
            interview_type: parse_label("interview_type", &interview_type)?,
            status: parse_label("status", &status)?,
            location: row.try_get("location")?,
            interviewer_name: row.try_get("interviewer_name")?,
            duration_minutes: row.try_get("duration_minutes")?,
            notes: row.try_get("notes")?,
            feedback: row.try_get("feedback")?,
            result: parse_optional_label("result", row.try_get("result")?)?,
        },
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub struct PostgresInterviewRepository {
    pool: PgPool,
}

impl PostgresInterviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewRepository for PostgresInterviewRepository {
    async fn create(&self, interview: NewInterview) -> Result<Interview, StoreError> {
        let details = &interview.details;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO interviews AS i (job_application_id, interview_date, interview_type,
                                         status, location, interviewer_name, duration_minutes,
                                         notes, feedback, result)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            INTERVIEW_COLUMNS
        ))
        .bind(interview.application_id.0)
        .bind(details.interview_date)
        .bind(details.interview_type.as_str())
        .bind(details.status.as_str())
        .bind(&details.location)
        .bind(&details.interviewer_name)
        .bind(details.duration_minutes)
        .bind(&details.notes)
        .bind(&details.feedback)
        .bind(details.result.map(|r| r.as_str()))
        .fetch_one(&self.pool)
        .await?;

        interview_from_row(&row)
    }

    async fn find_by_id(&self, id: InterviewId) -> Result<Option<Interview>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM interviews i WHERE i.id = $1",
            INTERVIEW_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(interview_from_row).transpose()
    }

    async fn list_by_application(
        &self,
        application_id: JobApplicationId,
    ) -> Result<Vec<Interview>, StoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM interviews i
            WHERE i.job_application_id = $1
            ORDER BY i.interview_date ASC
            "#,
            INTERVIEW_COLUMNS
        ))
        .bind(application_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(interview_from_row).collect()
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Interview>, StoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM interviews i
            JOIN job_applications a ON a.id = i.job_application_id
            WHERE a.user_id = $1
            ORDER BY i.interview_date ASC
            "#,
            INTERVIEW_COLUMNS
        ))
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(interview_from_row).collect()
    }

    async fn list_by_company(&self, company_id: CompanyId) -> Result<Vec<Interview>, StoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM interviews i
            JOIN job_applications a ON a.id = i.job_application_id
            JOIN jobs j ON j.id = a.job_id
            WHERE j.company_id = $1
            ORDER BY i.interview_date ASC
            "#,
            INTERVIEW_COLUMNS
        ))
        .bind(company_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(interview_from_row).collect()
    }

    async fn update(&self, interview: Interview) -> Result<Interview, StoreError> {
        let details = &interview.details;

        let row = sqlx::query(&format!(
            r#"
            UPDATE interviews AS i
            SET job_application_id = $2, interview_date = $3, interview_type = $4, status = $5,
                location = $6, interviewer_name = $7, duration_minutes = $8, notes = $9,
                feedback = $10, result = $11, updated_at = $12
            WHERE i.id = $1
            RETURNING {}
            "#,
            INTERVIEW_COLUMNS
        ))
        .bind(interview.id.0)
        .bind(interview.application_id.0)
        .bind(details.interview_date)
        .bind(details.interview_type.as_str())
        .bind(details.status.as_str())
        .bind(&details.location)
        .bind(&details.interviewer_name)
        .bind(details.duration_minutes)
        .bind(&details.notes)
        .bind(&details.feedback)
        .bind(details.result.map(|r| r.as_str()))
        .bind(interview.updated_at)
        .fetch_one(&self.pool)
        .await?;

        interview_from_row(&row)
    }

    async fn delete(&self, id: InterviewId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM interviews WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
