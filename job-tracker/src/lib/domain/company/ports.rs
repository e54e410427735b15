use async_trait::async_trait;

use super::errors::CompanyError;
use super::models::Company;
use super::models::CompanyId;
use super::models::UpdateCompanyProfileCommand;
use crate::domain::auth::principal::Principal;
use crate::domain::errors::StoreError;

/// Port for company domain service operations.
#[async_trait]
pub trait CompanyServicePort: Send + Sync + 'static {
    /// List every registered company.
    async fn list_companies(&self) -> Result<Vec<Company>, CompanyError>;

    /// Retrieve a company by id.
    ///
    /// # Errors
    /// * `NotFound` - Company does not exist
    async fn get_company(&self, id: CompanyId) -> Result<Company, CompanyError>;

    /// The calling company's own profile.
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not a company
    async fn get_profile(&self, principal: &Principal) -> Result<Company, CompanyError>;

    /// Update the calling company's own profile.
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not a company
    /// * `NameAlreadyExists` - Another company uses the new name
    async fn update_profile(
        &self,
        principal: &Principal,
        command: UpdateCompanyProfileCommand,
    ) -> Result<Company, CompanyError>;

    /// Delete a company together with its jobs.
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not this company
    /// * `NotFound` - Company does not exist
    async fn delete_company(&self, principal: &Principal, id: CompanyId)
        -> Result<(), CompanyError>;
}

/// Persistence operations for the company aggregate.
///
/// Companies are created through the credential store at registration.
#[async_trait]
pub trait CompanyRepository: Send + Sync + 'static {
    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, StoreError>;

    /// Case-insensitive lookup by name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, StoreError>;

    /// All companies ordered by name.
    async fn list_all(&self) -> Result<Vec<Company>, StoreError>;

    /// Persist name and profile changes.
    ///
    /// # Errors
    /// * `DuplicateCompanyName` - New name collides ignoring case
    async fn update(&self, company: Company) -> Result<Company, StoreError>;

    /// Remove a company, its jobs and its registered email.
    ///
    /// # Returns
    /// False when no such company existed
    async fn delete(&self, id: CompanyId) -> Result<bool, StoreError>;
}
