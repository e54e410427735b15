pub mod apply;
pub mod create_application;
pub mod delete_application;
pub mod get_application;
pub mod list_applications;
pub mod update_application;

pub use apply::apply_for_job;
pub use create_application::create_application;
pub use delete_application::delete_application;
pub use get_application::get_application;
pub use list_applications::list_applications_for_job;
pub use list_applications::list_my_applications;
pub use update_application::update_application;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::application::models::ApplicationDetails;
use crate::domain::application::models::ApplicationStatus;
use crate::domain::application::models::JobApplication;
use crate::domain::auth::models::EmailAddress;
use crate::domain::errors::FieldErrors;
use crate::domain::job::models::JobType;
use crate::domain::job::models::WorkMode;
use crate::domain::values::optional_text;
use crate::domain::values::RequiredText;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationResponseData {
    pub id: i64,
    pub user_id: i64,
    pub job_id: Option<i64>,
    pub company_name: String,
    pub job_title: String,
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
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&JobApplication> for ApplicationResponseData {
    fn from(application: &JobApplication) -> Self {
        let details = &application.details;
        Self {
            id: application.id.0,
            user_id: application.user_id.0,
            job_id: application.job_id.map(|id| id.0),
            company_name: details.company_name.to_string(),
            job_title: details.job_title.to_string(),
            job_url: details.job_url.clone(),
            application_date: details.application_date,
            status: details.status,
            location: details.location.clone(),
            salary_range: details.salary_range.clone(),
            job_type: details.job_type,
            work_mode: details.work_mode,
            notes: details.notes.clone(),
            company_website: details.company_website.clone(),
            contact_person: details.contact_person.clone(),
            contact_email: details.contact_email.as_ref().map(|e| e.to_string()),
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

fn application_list(applications: Vec<JobApplication>) -> Vec<ApplicationResponseData> {
    applications
        .iter()
        .map(ApplicationResponseData::from)
        .collect()
}

/// HTTP request body for a self-tracked application (raw JSON).
///
/// Shared by create and full update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApplicationRequest {
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    job_title: String,
    job_url: Option<String>,
    /// Defaults to today
    application_date: Option<NaiveDate>,
    /// Defaults to `APPLIED`
    status: Option<String>,
    location: Option<String>,
    salary_range: Option<String>,
    job_type: Option<String>,
    work_mode: Option<String>,
    notes: Option<String>,
    company_website: Option<String>,
    contact_person: Option<String>,
    contact_email: Option<String>,
}

impl ApplicationRequest {
    fn try_into_details(self, today: NaiveDate) -> Result<ApplicationDetails, FieldErrors> {
        let mut errors = FieldErrors::new();

        let company_name = errors.check("company_name", RequiredText::new(&self.company_name));
        let job_title = errors.check("job_title", RequiredText::new(&self.job_title));
        let status = match self.status.as_deref() {
            Some(raw) => errors.check("status", raw.parse::<ApplicationStatus>()),
            None => Some(ApplicationStatus::Applied),
        };
        let job_type = self
            .job_type
            .and_then(|raw| errors.check("job_type", raw.parse::<JobType>()));
        let work_mode = self
            .work_mode
            .and_then(|raw| errors.check("work_mode", raw.parse::<WorkMode>()));
        let contact_email = optional_email(&mut errors, self.contact_email);

        match (company_name, job_title, status) {
            (Some(company_name), Some(job_title), Some(status)) => {
                errors.into_result(ApplicationDetails {
                    company_name,
                    job_title,
                    job_url: optional_text(self.job_url),
                    application_date: self.application_date.unwrap_or(today),
                    status,
                    location: optional_text(self.location),
                    salary_range: optional_text(self.salary_range),
                    job_type,
                    work_mode,
                    notes: optional_text(self.notes),
                    company_website: optional_text(self.company_website),
                    contact_person: optional_text(self.contact_person),
                    contact_email,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Validate an optional `contact_email`; blank counts as absent.
fn optional_email(errors: &mut FieldErrors, raw: Option<String>) -> Option<EmailAddress> {
    optional_text(raw).and_then(|raw| errors.check("contact_email", EmailAddress::new(&raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_defaults_date_and_status() {
        let details = ApplicationRequest {
            company_name: "Acme".to_string(),
            job_title: "Engineer".to_string(),
            contact_email: Some("  ".to_string()),
            ..ApplicationRequest::default()
        }
        .try_into_details(today())
        .unwrap();

        assert_eq!(details.application_date, today());
        assert_eq!(details.status, ApplicationStatus::Applied);
        assert_eq!(details.contact_email, None);
    }

    #[test]
    fn test_rejects_bad_fields() {
        let errors = ApplicationRequest {
            company_name: " ".to_string(),
            job_title: "Engineer".to_string(),
            status: Some("GHOSTED".to_string()),
            contact_email: Some("not-an-email".to_string()),
            ..ApplicationRequest::default()
        }
        .try_into_details(today())
        .unwrap_err();

        assert_eq!(errors.get("company_name"), Some("must not be blank"));
        assert_eq!(errors.get("status"), Some("unknown application status: GHOSTED"));
        assert!(errors.contains("contact_email"));
        assert!(!errors.contains("job_title"));
    }

    #[test]
    fn test_response_flattens_details() {
        let application = JobApplication {
            id: crate::domain::application::models::JobApplicationId(4),
            user_id: crate::domain::auth::models::UserId(1),
            job_id: None,
            details: ApplicationRequest {
                company_name: "Acme".to_string(),
                job_title: "Engineer".to_string(),
                contact_email: Some("hr@acme.com".to_string()),
                ..ApplicationRequest::default()
            }
            .try_into_details(today())
            .unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(ApplicationResponseData::from(&application)).unwrap();
        assert_eq!(json["company_name"], "Acme");
        assert_eq!(json["status"], "APPLIED");
        assert_eq!(json["contact_email"], "hr@acme.com");
        assert!(json["job_id"].is_null());
    }
}
