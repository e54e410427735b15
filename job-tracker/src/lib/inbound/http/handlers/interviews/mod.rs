pub mod delete_interview;
pub mod get_interview;
pub mod list_interviews;
pub mod schedule_interview;
pub mod update_interview;

pub use delete_interview::delete_interview;
pub use get_interview::get_interview;
pub use list_interviews::list_completed;
pub use list_interviews::list_for_application;
pub use list_interviews::list_interviews;
pub use list_interviews::list_upcoming;
pub use schedule_interview::schedule_interview;
pub use update_interview::update_interview;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::application::models::JobApplicationId;
use crate::domain::errors::FieldErrors;
use crate::domain::interview::models::Interview;
use crate::domain::interview::models::InterviewCommand;
use crate::domain::interview::models::InterviewResult;
use crate::domain::interview::models::InterviewStatus;
use crate::domain::interview::models::InterviewType;
use crate::domain::values::optional_text;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewResponseData {
    pub id: i64,
    pub application_id: i64,
    pub interview_date: DateTime<Utc>,
    pub interview_type: InterviewType,
    pub status: InterviewStatus,
    pub location: Option<String>,
    pub interviewer_name: Option<String>,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
    pub feedback: Option<String>,
    pub result: Option<InterviewResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Interview> for InterviewResponseData {
    fn from(interview: &Interview) -> Self {
        let details = &interview.details;
        Self {
            id: interview.id.0,
            application_id: interview.application_id.0,
            interview_date: details.interview_date,
            interview_type: details.interview_type,
            status: details.status,
            location: details.location.clone(),
            interviewer_name: details.interviewer_name.clone(),
            duration_minutes: details.duration_minutes,
            notes: details.notes.clone(),
            feedback: details.feedback.clone(),
            result: details.result,
            created_at: interview.created_at,
            updated_at: interview.updated_at,
        }
    }
}

fn interview_list(interviews: Vec<Interview>) -> Vec<InterviewResponseData> {
    interviews.iter().map(InterviewResponseData::from).collect()
}

/// HTTP request body for scheduling or rescheduling an interview (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InterviewRequest {
    application_id: Option<i64>,
    interview_date: Option<DateTime<Utc>>,
    interview_type: Option<String>,
    status: Option<String>,
    location: Option<String>,
    interviewer_name: Option<String>,
    duration_minutes: Option<i32>,
    notes: Option<String>,
    feedback: Option<String>,
    result: Option<String>,
}

impl InterviewRequest {
    fn try_into_command(self) -> Result<InterviewCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.application_id.is_none() {
            errors.add("application_id", "must be provided");
        }
        if self.interview_date.is_none() {
            errors.add("interview_date", "must be provided");
        }
        let interview_type = match self.interview_type.as_deref() {
            Some(raw) => errors.check("interview_type", raw.parse::<InterviewType>()),
            None => {
                errors.add("interview_type", "must be provided");
                None
            }
        };
        let status = self
            .status
            .and_then(|raw| errors.check("status", raw.parse::<InterviewStatus>()));
        let result = self
            .result
            .and_then(|raw| errors.check("result", raw.parse::<InterviewResult>()));
        if self.duration_minutes.is_some_and(|minutes| minutes <= 0) {
            errors.add("duration_minutes", "must be positive");
        }

        match (self.application_id, self.interview_date, interview_type) {
            (Some(application_id), Some(interview_date), Some(interview_type)) => {
                errors.into_result(InterviewCommand {
                    application_id: JobApplicationId(application_id),
                    interview_date,
                    interview_type,
                    status,
                    location: optional_text(self.location),
                    interviewer_name: optional_text(self.interviewer_name),
                    duration_minutes: self.duration_minutes,
                    notes: optional_text(self.notes),
                    feedback: optional_text(self.feedback),
                    result,
                })
            }
            _ => Err(errors),
        }
    }
}
