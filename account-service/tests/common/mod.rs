use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use account_service::account::errors::AccountError;
use account_service::account::errors::NotifierError;
use account_service::account::models::Account;
use account_service::account::models::AccountId;
use account_service::account::models::EmailAddress;
use account_service::account::ports::AccountRepository;
use account_service::account::ports::Notifier;
use account_service::account::service::AccountService;
use async_trait::async_trait;
use auth::TokenCodec;
use chrono::Duration;
use uuid::Uuid;

pub const SECRET: &[u8] = b"test-secret-key-for-signing-at-least-32-bytes";

/// Credential store backed by a mutex-guarded map; enough to run the full
/// credential flows without a database.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<Uuid, Account>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ));
        }
        accounts.insert(account.id.0, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.lock().unwrap().get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.email == *email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.accounts.lock().unwrap().values().cloned().collect())
    }

    async fn update_password_hash(
        &self,
        id: &AccountId,
        password_hash: &str,
    ) -> Result<(), AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(&id.0)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;
        account.password_hash = password_hash.to_string();
        Ok(())
    }
}

/// Notifier that records outbound messages for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifierError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

pub fn test_service() -> AccountService<InMemoryAccountRepository> {
    let codec = Arc::new(TokenCodec::new(SECRET).expect("valid test secret"));
    AccountService::new(
        Arc::new(InMemoryAccountRepository::default()),
        codec,
        Duration::minutes(120),
        Duration::minutes(15),
    )
}
