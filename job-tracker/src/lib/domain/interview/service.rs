use std::sync::Arc;

use async_trait::async_trait;
use auth::PrincipalKind;
use chrono::DateTime;
use chrono::Utc;

use super::errors::InterviewError;
use super::models::Interview;
use super::models::InterviewCommand;
use super::models::InterviewId;
use super::models::NewInterview;
use super::ports::InterviewRepository;
use super::ports::InterviewServicePort;
use crate::domain::application::models::JobApplicationId;
use crate::domain::application::ports::JobApplicationRepository;
use crate::domain::application::service::application_owners;
use crate::domain::auth::models::UserId;
use crate::domain::auth::policy;
use crate::domain::auth::principal::Principal;
use crate::domain::company::models::CompanyId;
use crate::domain::job::ports::JobRepository;

/// Concrete implementation of InterviewServicePort.
///
/// Ownership of an interview is the ownership of its application, resolved
/// through the application's job.
pub struct InterviewService<IR, AR, JR>
where
    IR: InterviewRepository,
    AR: JobApplicationRepository,
    JR: JobRepository,
{
    interview_repository: Arc<IR>,
    application_repository: Arc<AR>,
    job_repository: Arc<JR>,
}

impl<IR, AR, JR> InterviewService<IR, AR, JR>
where
    IR: InterviewRepository,
    AR: JobApplicationRepository,
    JR: JobRepository,
{
    pub fn new(
        interview_repository: Arc<IR>,
        application_repository: Arc<AR>,
        job_repository: Arc<JR>,
    ) -> Self {
        Self {
            interview_repository,
            application_repository,
            job_repository,
        }
    }

    /// Check the caller against either owner of an application.
    async fn authorize_application(
        &self,
        principal: &Principal,
        application_id: JobApplicationId,
    ) -> Result<(), InterviewError> {
        let application = self
            .application_repository
            .find_by_id(application_id)
            .await?
            .ok_or(InterviewError::ApplicationNotFound(application_id))?;

        let owners = application_owners(self.job_repository.as_ref(), &application).await?;
        policy::authorize_owners(principal, &owners).map_err(|e| {
            tracing::warn!(
                application_id = %application_id,
                subject_id = principal.subject_id(),
                "Interview access denied"
            );
            e
        })?;

        Ok(())
    }

    async fn find_visible(
        &self,
        principal: &Principal,
        id: InterviewId,
    ) -> Result<Interview, InterviewError> {
        let interview = self
            .interview_repository
            .find_by_id(id)
            .await?
            .ok_or(InterviewError::NotFound(id))?;

        self.authorize_application(principal, interview.application_id)
            .await?;
        Ok(interview)
    }

    async fn find_managed(
        &self,
        principal: &Principal,
        id: InterviewId,
    ) -> Result<Interview, InterviewError> {
        policy::require_company(principal)?;
        self.find_visible(principal, id).await
    }
}

#[async_trait]
impl<IR, AR, JR> InterviewServicePort for InterviewService<IR, AR, JR>
where
    IR: InterviewRepository,
    AR: JobApplicationRepository,
    JR: JobRepository,
{
    async fn schedule_interview(
        &self,
        principal: &Principal,
        command: InterviewCommand,
    ) -> Result<Interview, InterviewError> {
        policy::require_company(principal)?;
        self.authorize_application(principal, command.application_id)
            .await?;

        let interview = self
            .interview_repository
            .create(NewInterview::from(command))
            .await?;

        tracing::info!(
            interview_id = %interview.id,
            application_id = %interview.application_id,
            "Interview scheduled"
        );
        Ok(interview)
    }

    async fn list_interviews(
        &self,
        principal: &Principal,
    ) -> Result<Vec<Interview>, InterviewError> {
        let interviews = match principal.kind() {
            PrincipalKind::User => {
                self.interview_repository
                    .list_by_user(UserId(principal.subject_id()))
                    .await?
            }
            PrincipalKind::Company => {
                let company_id: CompanyId = policy::require_company(principal)?;
                self.interview_repository.list_by_company(company_id).await?
            }
        };
        Ok(interviews)
    }

    async fn list_upcoming(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<Vec<Interview>, InterviewError> {
        let mut interviews: Vec<Interview> = self
            .list_interviews(principal)
            .await?
            .into_iter()
            .filter(|i| i.details.interview_date > now)
            .collect();
        interviews.sort_by_key(|i| i.details.interview_date);
        Ok(interviews)
    }

    async fn list_completed(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<Vec<Interview>, InterviewError> {
        let mut interviews: Vec<Interview> = self
            .list_interviews(principal)
            .await?
            .into_iter()
            .filter(|i| i.details.interview_date < now)
            .collect();
        interviews.sort_by_key(|i| std::cmp::Reverse(i.details.interview_date));
        Ok(interviews)
    }

    async fn list_for_application(
        &self,
        principal: &Principal,
        application_id: JobApplicationId,
    ) -> Result<Vec<Interview>, InterviewError> {
        self.authorize_application(principal, application_id)
            .await?;
        Ok(self
            .interview_repository
            .list_by_application(application_id)
            .await?)
    }

    async fn get_interview(
        &self,
        principal: &Principal,
        id: InterviewId,
    ) -> Result<Interview, InterviewError> {
        self.find_visible(principal, id).await
    }

    async fn update_interview(
        &self,
        principal: &Principal,
        id: InterviewId,
        command: InterviewCommand,
    ) -> Result<Interview, InterviewError> {
        let mut interview = self.find_managed(principal, id).await?;

        if command.application_id != interview.application_id {
            self.authorize_application(principal, command.application_id)
                .await?;
        }

        interview.apply(command, Utc::now());
        Ok(self.interview_repository.update(interview).await?)
    }

    async fn delete_interview(
        &self,
        principal: &Principal,
        id: InterviewId,
    ) -> Result<(), InterviewError> {
        self.find_managed(principal, id).await?;

        if !self.interview_repository.delete(id).await? {
            return Err(InterviewError::NotFound(id));
        }

        tracing::info!(interview_id = %id, "Interview deleted");
        Ok(())
    }
}
