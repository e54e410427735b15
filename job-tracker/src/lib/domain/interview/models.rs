use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::application::models::JobApplicationId;

labelled_enum! {
    pub enum InterviewType ("interview type") {
        Phone => "PHONE",
        Video => "VIDEO",
        Onsite => "ONSITE",
        Technical => "TECHNICAL",
        Hr => "HR",
        Final => "FINAL",
    }
}

labelled_enum! {
    pub enum InterviewStatus ("interview status") {
        Scheduled => "SCHEDULED",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
        Rescheduled => "RESCHEDULED",
        NoShow => "NO_SHOW",
    }
}

labelled_enum! {
    /// Outcome recorded once an interview has taken place.
    pub enum InterviewResult ("interview result") {
        Pending => "PENDING",
        Passed => "PASSED",
        Failed => "FAILED",
    }
}

/// Interview aggregate entity.
///
/// Belongs to a job application; the scheduling company is the one owning
/// the application's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Interview {
    pub id: InterviewId,
    pub application_id: JobApplicationId,
    pub details: InterviewDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Interview {
    /// Replace the scheduled details, keeping the status when none is given.
    pub fn apply(&mut self, command: InterviewCommand, now: DateTime<Utc>) {
        let status = command.status.unwrap_or(self.details.status);
        self.application_id = command.application_id;
        self.details = command.into_details(status);
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterviewId(pub i64);

impl fmt::Display for InterviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterviewDetails {
    pub interview_date: DateTime<Utc>,
    pub interview_type: InterviewType,
    pub status: InterviewStatus,
    pub location: Option<String>,
    pub interviewer_name: Option<String>,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
    pub feedback: Option<String>,
    pub result: Option<InterviewResult>,
}

/// Schedule or reschedule an interview.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewCommand {
    pub application_id: JobApplicationId,
    pub interview_date: DateTime<Utc>,
    pub interview_type: InterviewType,
    /// `SCHEDULED` on create, unchanged on update when absent
    pub status: Option<InterviewStatus>,
    pub location: Option<String>,
    pub interviewer_name: Option<String>,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
    pub feedback: Option<String>,
    pub result: Option<InterviewResult>,
}

impl InterviewCommand {
    pub fn into_details(self, status: InterviewStatus) -> InterviewDetails {
        InterviewDetails {
            interview_date: self.interview_date,
            interview_type: self.interview_type,
            status,
            location: self.location,
            interviewer_name: self.interviewer_name,
            duration_minutes: self.duration_minutes,
            notes: self.notes,
            feedback: self.feedback,
            result: self.result,
        }
    }
}

/// Interview data handed to the repository on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInterview {
    pub application_id: JobApplicationId,
    pub details: InterviewDetails,
}

impl From<InterviewCommand> for NewInterview {
    fn from(command: InterviewCommand) -> Self {
        let status = command.status.unwrap_or(InterviewStatus::Scheduled);
        Self {
            application_id: command.application_id,
            details: command.into_details(status),
        }
    }
}
