use std::sync::Arc;

use async_trait::async_trait;
use auth::PrincipalKind;
use chrono::Utc;

use super::errors::CompanyError;
use super::models::Company;
use super::models::CompanyId;
use super::models::UpdateCompanyProfileCommand;
use super::ports::CompanyRepository;
use super::ports::CompanyServicePort;
use crate::domain::auth::policy;
use crate::domain::auth::principal::Principal;

/// Concrete implementation of CompanyServicePort.
pub struct CompanyService<CR>
where
    CR: CompanyRepository,
{
    company_repository: Arc<CR>,
}

impl<CR> CompanyService<CR>
where
    CR: CompanyRepository,
{
    pub fn new(company_repository: Arc<CR>) -> Self {
        Self { company_repository }
    }

    async fn find(&self, id: CompanyId) -> Result<Company, CompanyError> {
        self.company_repository
            .find_by_id(id)
            .await?
            .ok_or(CompanyError::NotFound(id))
    }
}

#[async_trait]
impl<CR> CompanyServicePort for CompanyService<CR>
where
    CR: CompanyRepository,
{
    async fn list_companies(&self) -> Result<Vec<Company>, CompanyError> {
        Ok(self.company_repository.list_all().await?)
    }

    async fn get_company(&self, id: CompanyId) -> Result<Company, CompanyError> {
        self.find(id).await
    }

    async fn get_profile(&self, principal: &Principal) -> Result<Company, CompanyError> {
        let company_id = policy::require_company(principal)?;
        self.find(company_id).await
    }

    async fn update_profile(
        &self,
        principal: &Principal,
        command: UpdateCompanyProfileCommand,
    ) -> Result<Company, CompanyError> {
        let company_id = policy::require_company(principal)?;
        let mut company = self.find(company_id).await?;

        if let Some(name) = &command.name {
            if let Some(holder) = self.company_repository.find_by_name(name.as_str()).await? {
                if holder.id != company_id {
                    return Err(CompanyError::NameAlreadyExists(name.to_string()));
                }
            }
        }

        company.apply(command, Utc::now());
        let updated = self.company_repository.update(company).await?;

        tracing::info!(company_id = %updated.id, "Company profile updated");
        Ok(updated)
    }

    async fn delete_company(
        &self,
        principal: &Principal,
        id: CompanyId,
    ) -> Result<(), CompanyError> {
        policy::authorize(principal, Some(PrincipalKind::Company), Some(id.0)).map_err(|e| {
            tracing::warn!(company_id = %id, subject_id = principal.subject_id(), "Company deletion denied");
            e
        })?;

        if !self.company_repository.delete(id).await? {
            return Err(CompanyError::NotFound(id));
        }

        tracing::info!(company_id = %id, "Company deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::auth::errors::AccessError;
    use crate::domain::auth::models::EmailAddress;
    use crate::domain::auth::models::UserId;
    use crate::domain::company::models::CompanyName;
    use crate::domain::company::models::CompanyProfile;
    use crate::domain::errors::StoreError;

    mock! {
        pub TestCompanyRepository {}

        #[async_trait]
        impl CompanyRepository for TestCompanyRepository {
            async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, StoreError>;
            async fn find_by_name(&self, name: &str) -> Result<Option<Company>, StoreError>;
            async fn list_all(&self) -> Result<Vec<Company>, StoreError>;
            async fn update(&self, company: Company) -> Result<Company, StoreError>;
            async fn delete(&self, id: CompanyId) -> Result<bool, StoreError>;
        }
    }

    fn company(id: i64, name: &str) -> Company {
        let now = Utc::now();
        Company {
            id: CompanyId(id),
            email: EmailAddress::new(&format!("hr{}@acme.com", id)).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            name: CompanyName::new(name).unwrap(),
            profile: CompanyProfile::default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn principal(id: i64) -> Principal {
        Principal::company(CompanyId(id), format!("hr{}@acme.com", id))
    }

    fn rename(name: &str) -> UpdateCompanyProfileCommand {
        UpdateCompanyProfileCommand::new(Some(name), CompanyProfile::default()).unwrap()
    }

    #[tokio::test]
    async fn test_get_company_not_found() {
        let mut repository = MockTestCompanyRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let result = CompanyService::new(Arc::new(repository))
            .get_company(CompanyId(42))
            .await;

        assert!(matches!(result, Err(CompanyError::NotFound(CompanyId(42)))));
    }

    #[tokio::test]
    async fn test_get_profile_requires_company() {
        let repository = MockTestCompanyRepository::new();
        let service = CompanyService::new(Arc::new(repository));

        let result = service
            .get_profile(&Principal::user(UserId(1), "a@x.com"))
            .await;

        assert!(matches!(
            result,
            Err(CompanyError::Forbidden(AccessError::RoleMismatch { .. }))
        ));
    }

    #[tokio::test]
    async fn test_update_profile_renames() {
        let mut repository = MockTestCompanyRepository::new();

        repository
            .expect_find_by_id()
            .withf(|id| *id == CompanyId(7))
            .returning(|_| Ok(Some(company(7, "Acme"))));
        repository
            .expect_find_by_name()
            .withf(|name| name == "Acme Labs")
            .returning(|_| Ok(None));
        repository
            .expect_update()
            .withf(|company| company.name.as_str() == "Acme Labs")
            .times(1)
            .returning(Ok);

        let updated = CompanyService::new(Arc::new(repository))
            .update_profile(&principal(7), rename("Acme Labs"))
            .await
            .unwrap();

        assert_eq!(updated.name.as_str(), "Acme Labs");
    }

    #[tokio::test]
    async fn test_update_profile_keeps_own_name_with_other_case() {
        let mut repository = MockTestCompanyRepository::new();

        repository
            .expect_find_by_id()
            .returning(|_| Ok(Some(company(7, "Acme"))));
        repository
            .expect_find_by_name()
            .returning(|_| Ok(Some(company(7, "Acme"))));
        repository.expect_update().times(1).returning(Ok);

        let result = CompanyService::new(Arc::new(repository))
            .update_profile(&principal(7), rename("ACME"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_profile_name_taken() {
        let mut repository = MockTestCompanyRepository::new();

        repository
            .expect_find_by_id()
            .returning(|_| Ok(Some(company(7, "Acme"))));
        repository
            .expect_find_by_name()
            .returning(|_| Ok(Some(company(8, "Globex"))));
        repository.expect_update().times(0);

        let result = CompanyService::new(Arc::new(repository))
            .update_profile(&principal(7), rename("globex"))
            .await;

        assert!(matches!(result, Err(CompanyError::NameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_delete_company_owner_only() {
        let mut repository = MockTestCompanyRepository::new();
        repository
            .expect_delete()
            .withf(|id| *id == CompanyId(7))
            .times(1)
            .returning(|_| Ok(true));

        let service = CompanyService::new(Arc::new(repository));

        assert!(service
            .delete_company(&principal(7), CompanyId(7))
            .await
            .is_ok());

        let denied = service.delete_company(&principal(7), CompanyId(8)).await;
        assert!(matches!(
            denied,
            Err(CompanyError::Forbidden(AccessError::NotOwner))
        ));
    }

    #[tokio::test]
    async fn test_delete_company_not_found() {
        let mut repository = MockTestCompanyRepository::new();
        repository.expect_delete().returning(|_| Ok(false));

        let result = CompanyService::new(Arc::new(repository))
            .delete_company(&principal(7), CompanyId(7))
            .await;

        assert!(matches!(result, Err(CompanyError::NotFound(_))));
    }
}
