use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::errors::NotifierError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::CreateAccountCommand;
use crate::account::models::EmailAddress;

/// Port for credential service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Create a new account with a hashed password.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - A record already holds this email
    ///   (case-insensitive); the existing record is left untouched
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Store operation failed
    async fn create_account(&self, command: CreateAccountCommand) -> Result<Account, AccountError>;

    /// Verify credentials and mint a session token.
    ///
    /// Unknown email and wrong password both surface as
    /// `InvalidCredentials`; callers must not be able to tell them apart.
    ///
    /// # Returns
    /// The account and its serialized session token
    async fn login(&self, email: &str, password: &str) -> Result<(Account, String), AccountError>;

    /// Begin password recovery for an email address.
    ///
    /// # Returns
    /// `None` when no account holds the email (callers respond generically
    /// either way); otherwise the account and a fresh single-purpose reset
    /// token for link building.
    async fn start_password_recovery(
        &self,
        email: &str,
    ) -> Result<Option<(Account, String)>, AccountError>;

    /// Redeem a password-reset token and overwrite the stored hash.
    ///
    /// # Errors
    /// * `Token` - Inbound token is malformed, forged, or expired
    /// * `WrongPurpose` - Token is valid but not a password-reset token
    /// * `NotFound` - The account the token names no longer exists
    async fn redeem_password_reset_token(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<Account, AccountError>;

    /// Retrieve account by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Retrieve all accounts.
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError>;
}

/// Persistence operations for the credential store.
///
/// The store must enforce email uniqueness and apply `update_password_hash`
/// atomically with respect to concurrent reads.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Unique constraint on email violated
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by (normalized) email address.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;

    /// Retrieve all accounts.
    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;

    /// Overwrite the stored password hash in a single atomic write.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn update_password_hash(
        &self,
        id: &AccountId,
        password_hash: &str,
    ) -> Result<(), AccountError>;
}

/// Outbound notification delivery (email or similar).
///
/// Invoked by the inbound layer after signup, login, and reset-link
/// issuance; the domain service only produces the data these calls need.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifierError>;
}
