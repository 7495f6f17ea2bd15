//! Accounts service - customers and the savings account opened with them.
//!
//! The mobile number identifies the customer. Creating a customer always opens
//! one default savings account; both records are written as a unit by the
//! repository.
//!
//! # Update semantics
//!
//! An update without an `accountsDto` section has nothing to address and
//! reports `false` instead of failing. With one, the account is located by its
//! account number and the owning customer by id.

use std::sync::Arc;

use crate::{
    audit::Auditor,
    error::AppError,
    models::account::{CustomerDto, NewAccount, NewCustomer},
    numbers::{NumberGenerator, allocate_unique},
    repositories::AccountRepository,
};

pub struct AccountsService {
    repository: Arc<dyn AccountRepository>,
    numbers: Arc<dyn NumberGenerator>,
    auditor: Arc<dyn Auditor>,
}

impl AccountsService {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        numbers: Arc<dyn NumberGenerator>,
        auditor: Arc<dyn Auditor>,
    ) -> Self {
        Self {
            repository,
            numbers,
            auditor,
        }
    }

    /// Register the customer and open a default savings account.
    ///
    /// Only `name`, `email` and `mobile_number` are read from `dto`.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists`: a customer already uses the mobile number
    /// - `Internal`: no free account number could be generated
    pub async fn create_account(&self, dto: &CustomerDto) -> Result<(), AppError> {
        if self
            .repository
            .find_customer_by_mobile_number(&dto.mobile_number)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "Customer with mobile number {} already exists.",
                dto.mobile_number
            )));
        }

        let repository = &self.repository;
        let account_number = allocate_unique(self.numbers.as_ref(), "account", |n| async move {
            repository
                .find_account_by_number(n)
                .await
                .map(|found| found.is_some())
        })
        .await?;

        let (customer, account) = self
            .repository
            .create_customer_with_account(
                &NewCustomer::from(dto),
                &NewAccount::savings(account_number),
                &self.auditor.current_actor(),
            )
            .await?;

        tracing::info!(
            customer_id = customer.customer_id,
            account_number = account.account_number,
            "Customer and account created"
        );
        Ok(())
    }

    /// Customer with its account.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no customer uses the mobile number, or it has no account
    pub async fn fetch_account(&self, mobile_number: &str) -> Result<CustomerDto, AppError> {
        let customer = self
            .repository
            .find_customer_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| AppError::not_found("Customer", "mobileNumber", mobile_number))?;

        let account = self
            .repository
            .find_account_by_customer_id(customer.customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account", "customerId", customer.customer_id))?;

        tracing::debug!(customer_id = customer.customer_id, "Customer fetched");
        Ok(CustomerDto::from_parts(customer, account))
    }

    /// Returns `Ok(false)` when `dto` carries no account section.
    ///
    /// # Errors
    ///
    /// - `NotFound`: the account number is unknown, or its customer is gone
    pub async fn update_account(&self, dto: &CustomerDto) -> Result<bool, AppError> {
        let Some(accounts_dto) = &dto.accounts_dto else {
            tracing::debug!("Update without account details, nothing to do");
            return Ok(false);
        };

        let mut account = self
            .repository
            .find_account_by_number(accounts_dto.account_number)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Account", "AccountNumber", accounts_dto.account_number)
            })?;
        account.apply(accounts_dto);

        let mut customer = self
            .repository
            .find_customer_by_id(account.customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer", "CustomerID", account.customer_id))?;
        customer.apply(dto);

        self.repository
            .update_customer_and_account(&customer, &account, &self.auditor.current_actor())
            .await?;

        tracing::info!(
            customer_id = customer.customer_id,
            account_number = account.account_number,
            "Customer and account updated"
        );
        Ok(true)
    }

    /// # Errors
    ///
    /// - `NotFound`: no customer uses the mobile number
    pub async fn delete_account(&self, mobile_number: &str) -> Result<bool, AppError> {
        let customer = self
            .repository
            .find_customer_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| AppError::not_found("Customer", "mobileNumber", mobile_number))?;

        self.repository.delete_customer(customer.customer_id).await?;

        tracing::info!(customer_id = customer.customer_id, "Customer and account deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::{
        audit::{ACCOUNTS_ACTOR, FixedAuditor},
        models::account::{ADDRESS, AccountsDto, SAVINGS},
        numbers::{RandomNumberGenerator, SequenceNumberGenerator},
        repositories::InMemoryAccountRepository,
    };

    const MOBILE: &str = "9876543210";

    fn customer() -> CustomerDto {
        CustomerDto {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            mobile_number: MOBILE.into(),
            accounts_dto: None,
        }
    }

    fn service_with(numbers: Arc<dyn NumberGenerator>) -> (AccountsService, Arc<InMemoryAccountRepository>) {
        let repository = Arc::new(InMemoryAccountRepository::new());
        let service = AccountsService::new(
            repository.clone(),
            numbers,
            Arc::new(FixedAuditor::new(ACCOUNTS_ACTOR)),
        );
        (service, repository)
    }

    fn service() -> (AccountsService, Arc<InMemoryAccountRepository>) {
        service_with(Arc::new(SequenceNumberGenerator::starting_at(1_000_000_001)))
    }

    #[tokio::test]
    async fn create_fetch_delete_lifecycle() {
        let (service, _) = service_with(Arc::new(RandomNumberGenerator::account_numbers()));

        service.create_account(&customer()).await.unwrap();

        let fetched = service.fetch_account(MOBILE).await.unwrap();
        let account = fetched.accounts_dto.clone().unwrap();
        assert_eq!(fetched.mobile_number, MOBILE);
        assert_eq!(account.account_number.to_string().len(), 10);
        assert_eq!(account.account_type, SAVINGS);
        assert_eq!(account.branch_address, ADDRESS);

        assert!(service.delete_account(MOBILE).await.unwrap());
        assert!(matches!(
            service.fetch_account(MOBILE).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn duplicate_customer_is_rejected() {
        let (service, _) = service();
        service.create_account(&customer()).await.unwrap();

        let err = service.create_account(&customer()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Customer with mobile number 9876543210 already exists."
        );
    }

    #[tokio::test]
    async fn create_stamps_audit_actor() {
        let (service, repository) = service();
        service.create_account(&customer()).await.unwrap();

        let stored = repository
            .find_customer_by_mobile_number(MOBILE)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(stored.audit.created_by, ACCOUNTS_ACTOR);
        assert_eq!(stored.audit.updated_by, None);
    }

    #[tokio::test]
    async fn update_without_account_section_reports_false() {
        let (service, _) = service();
        service.create_account(&customer()).await.unwrap();

        assert!(!service.update_account(&customer()).await.unwrap());
    }

    #[tokio::test]
    async fn update_with_unknown_account_number_is_not_found() {
        let (service, _) = service();
        let dto = CustomerDto {
            accounts_dto: Some(AccountsDto {
                account_number: 1_999_999_999,
                account_type: SAVINGS.into(),
                branch_address: ADDRESS.into(),
            }),
            ..customer()
        };

        let err = service.update_account(&dto).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Account not found with the given input data AccountNumber : '1999999999'"
        );
    }

    #[tokio::test]
    async fn update_rewrites_customer_and_account_but_not_keys() {
        let (service, repository) = service();
        service.create_account(&customer()).await.unwrap();
        let mut dto = service.fetch_account(MOBILE).await.unwrap();
        let account_number = dto.accounts_dto.as_ref().unwrap().account_number;

        dto.name = "Jane Smith".into();
        dto.mobile_number = "1112223333".into();
        if let Some(account) = dto.accounts_dto.as_mut() {
            account.account_type = "Current".into();
            account.branch_address = "1 Harbour Road".into();
        }

        assert!(service.update_account(&dto).await.unwrap());

        let after = service.fetch_account(MOBILE).await.unwrap();
        assert_eq!(after.name, "Jane Smith");
        assert_eq!(after.mobile_number, MOBILE);
        assert_eq!(
            after.accounts_dto,
            Some(AccountsDto {
                account_number,
                account_type: "Current".into(),
                branch_address: "1 Harbour Road".into(),
            })
        );

        let stored = repository
            .find_account_by_number(account_number)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.audit.updated_by.as_deref(), Some(ACCOUNTS_ACTOR));
    }

    #[tokio::test]
    async fn delete_unknown_customer_is_not_found() {
        let (service, _) = service();

        assert!(matches!(
            service.delete_account(MOBILE).await,
            Err(AppError::NotFound { .. })
        ));
    }
}
