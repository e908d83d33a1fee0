use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth::TokenError;
use auth::TokenPurpose;
use chrono::Duration;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::CreateAccountCommand;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Credential service implementation.
///
/// Orchestrates lookup, hash verification, and token issuance. Stateless:
/// the only shared resource is the backing repository, whose per-record
/// atomicity the store enforces itself.
pub struct AccountService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    password_hasher: PasswordHasher,
    token_codec: Arc<TokenCodec>,
    session_ttl: Duration,
    reset_ttl: Duration,
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `token_codec` - Configured token codec (secret validated at startup)
    /// * `session_ttl` - Lifetime of session tokens
    /// * `reset_ttl` - Lifetime of password-reset tokens (minutes-scale)
    pub fn new(
        repository: Arc<R>,
        token_codec: Arc<TokenCodec>,
        session_ttl: Duration,
        reset_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
            token_codec,
            session_ttl,
            reset_ttl,
        }
    }

    /// Mint a session token for an authenticated account.
    ///
    /// Claims: subject = email, account id, admin flag, fresh `jti`.
    pub fn issue_session_token(&self, account: &Account) -> Result<String, AccountError> {
        let claims = Claims::for_session(
            account.id.0,
            account.email.as_str(),
            account.is_admin,
        );
        Ok(self.token_codec.issue(&claims, self.session_ttl)?)
    }

    /// Mint a short-lived, purpose-scoped password-reset token.
    pub fn issue_password_reset_token(&self, account: &Account) -> Result<String, AccountError> {
        let claims = Claims::for_password_reset(account.id.0);
        Ok(self.token_codec.issue(&claims, self.reset_ttl)?)
    }
}

#[async_trait]
impl<R> AccountServicePort for AccountService<R>
where
    R: AccountRepository,
{
    async fn create_account(&self, command: CreateAccountCommand) -> Result<Account, AccountError> {
        // The unique index on email is authoritative; this check only gives
        // the common case a clean error without a failed insert.
        if let Some(existing) = self.repository.find_by_email(&command.email).await? {
            return Err(AccountError::EmailAlreadyExists(
                existing.email.as_str().to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let account = Account {
            id: AccountId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            is_admin: false,
            phone: command.phone,
            birth: command.birth,
            created_at: Utc::now(),
        };

        let created = self.repository.create(account).await?;

        tracing::info!(account_id = %created.id, "Account created");

        Ok(created)
    }

    async fn login(&self, email: &str, password: &str) -> Result<(Account, String), AccountError> {
        // A syntactically invalid email cannot name an account; fold it into
        // the uniform failure.
        let email = EmailAddress::new(email.to_string())
            .map_err(|_| AccountError::InvalidCredentials)?;

        let account = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(password, &account.password_hash)
        {
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.issue_session_token(&account)?;

        Ok((account, token))
    }

    async fn start_password_recovery(
        &self,
        email: &str,
    ) -> Result<Option<(Account, String)>, AccountError> {
        let Ok(email) = EmailAddress::new(email.to_string()) else {
            return Ok(None);
        };

        let Some(account) = self.repository.find_by_email(&email).await? else {
            tracing::debug!("Password recovery requested for unknown email");
            return Ok(None);
        };

        let token = self.issue_password_reset_token(&account)?;

        Ok(Some((account, token)))
    }

    async fn redeem_password_reset_token(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<Account, AccountError> {
        let claims = self.token_codec.parse(token)?;

        if claims.purpose != TokenPurpose::PasswordReset {
            return Err(AccountError::WrongPurpose);
        }

        let user_id = claims.user_id.ok_or_else(|| {
            AccountError::Token(TokenError::Malformed("missing user_id claim".to_string()))
        })?;

        let id = AccountId(user_id);
        let mut account = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        let password_hash = self.password_hasher.hash(new_password)?;
        self.repository
            .update_password_hash(&id, &password_hash)
            .await?;
        account.password_hash = password_hash;

        tracing::info!(account_id = %id, "Password reset redeemed");

        Ok(account)
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.repository.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;
            async fn list_all(&self) -> Result<Vec<Account>, AccountError>;
            async fn update_password_hash(&self, id: &AccountId, password_hash: &str) -> Result<(), AccountError>;
        }
    }

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn service(repository: MockTestAccountRepository) -> AccountService<MockTestAccountRepository> {
        let codec = Arc::new(TokenCodec::new(SECRET).unwrap());
        AccountService::new(
            Arc::new(repository),
            codec,
            Duration::minutes(120),
            Duration::minutes(15),
        )
    }

    fn account_with_password(password: &str) -> Account {
        let hasher = PasswordHasher::new();
        Account {
            id: AccountId::new(),
            name: "Alice".to_string(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: hasher.hash(password).unwrap(),
            is_admin: false,
            phone: None,
            birth: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_account_success() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|account| {
                account.email.as_str() == "alice@example.com"
                    && account.password_hash.starts_with("$argon2")
                    && account.password_hash != "password123"
                    && !account.is_admin
            })
            .times(1)
            .returning(|account| Ok(account));

        let service = service(repository);

        let command = CreateAccountCommand::new(
            "Alice".to_string(),
            EmailAddress::new("Alice@Example.com".to_string()).unwrap(),
            "password123".to_string(),
        );

        let account = service.create_account(command).await.unwrap();
        assert_eq!(account.email.as_str(), "alice@example.com");
        assert!(account.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_create_account_duplicate_email() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(account_with_password("unrelated"))));
        // The existing record is never touched.
        repository.expect_create().times(0);

        let service = service(repository);

        let command = CreateAccountCommand::new(
            "Alice".to_string(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            "password123".to_string(),
        );

        let result = service.create_account(command).await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_login_success_returns_session_token() {
        let mut repository = MockTestAccountRepository::new();

        let account = account_with_password("p1");
        let account_id = account.id;
        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "alice@example.com")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = service(repository);

        let (account, token) = service.login("alice@example.com", "p1").await.unwrap();
        assert_eq!(account.id, account_id);

        let codec = TokenCodec::new(SECRET).unwrap();
        let claims = codec.parse(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("alice@example.com"));
        assert_eq!(claims.user_id, Some(account_id.0));
        assert_eq!(claims.purpose, TokenPurpose::Session);
        assert!(!claims.is_admin);
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_uniform() {
        let mut repository = MockTestAccountRepository::new();

        let account = account_with_password("p1");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = service(repository);

        let result = service.login("alice@example.com", "wrong").await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_uniform() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository);

        let result = service.login("nobody@example.com", "p1").await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_start_password_recovery_unknown_email() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository);

        let result = service
            .start_password_recovery("nobody@example.com")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_start_password_recovery_issues_reset_token() {
        let mut repository = MockTestAccountRepository::new();

        let account = account_with_password("p1");
        let account_id = account.id;
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = service(repository);

        let (_, token) = service
            .start_password_recovery("alice@example.com")
            .await
            .unwrap()
            .expect("recovery should start for a known email");

        let codec = TokenCodec::new(SECRET).unwrap();
        let claims = codec.parse(&token).unwrap();
        assert_eq!(claims.purpose, TokenPurpose::PasswordReset);
        assert_eq!(claims.user_id, Some(account_id.0));
        assert!(claims.sub.is_none());
    }

    #[tokio::test]
    async fn test_redeem_with_session_token_fails_wrong_purpose() {
        let mut repository = MockTestAccountRepository::new();
        repository.expect_update_password_hash().times(0);
        repository.expect_find_by_id().times(0);

        let service = service(repository);

        let account = account_with_password("p1");
        let session_token = service.issue_session_token(&account).unwrap();

        let result = service
            .redeem_password_reset_token(&session_token, "new_password")
            .await;
        assert!(matches!(result.unwrap_err(), AccountError::WrongPurpose));
    }

    #[tokio::test]
    async fn test_redeem_success_rotates_hash() {
        let mut repository = MockTestAccountRepository::new();

        let account = account_with_password("old_password");
        let account_id = account.id;
        let old_hash = account.password_hash.clone();

        let found = account.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == account_id)
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        repository
            .expect_update_password_hash()
            .withf(move |id, hash| {
                let hasher = PasswordHasher::new();
                *id == account_id
                    && *hash != old_hash
                    && hasher.verify("new_password", hash)
                    && !hasher.verify("old_password", hash)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(repository);

        let token = service.issue_password_reset_token(&account).unwrap();
        let updated = service
            .redeem_password_reset_token(&token, "new_password")
            .await
            .unwrap();

        let hasher = PasswordHasher::new();
        assert!(hasher.verify("new_password", &updated.password_hash));
        assert!(!hasher.verify("old_password", &updated.password_hash));
    }

    #[tokio::test]
    async fn test_redeem_expired_token() {
        let mut repository = MockTestAccountRepository::new();
        repository.expect_find_by_id().times(0);
        repository.expect_update_password_hash().times(0);

        let service = service(repository);

        // Issue directly with a negative ttl so the token is already dead.
        let codec = TokenCodec::new(SECRET).unwrap();
        let claims = Claims::for_password_reset(AccountId::new().0);
        let token = codec.issue(&claims, Duration::minutes(-5)).unwrap();

        let result = service.redeem_password_reset_token(&token, "pw").await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::Token(TokenError::Expired)
        ));
    }

    #[tokio::test]
    async fn test_redeem_tampered_token() {
        let repository = MockTestAccountRepository::new();
        let service = service(repository);

        let account = account_with_password("p1");
        let token = service.issue_password_reset_token(&account).unwrap();

        let (head, sig) = token.rsplit_once('.').unwrap();
        let first = sig.as_bytes()[0];
        let flipped = if first == b'A' { 'B' } else { 'A' };
        let tampered = format!("{head}.{flipped}{}", &sig[1..]);

        let result = service.redeem_password_reset_token(&tampered, "pw").await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::Token(TokenError::BadSignature)
        ));
    }

    #[tokio::test]
    async fn test_redeem_for_deleted_account() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update_password_hash().times(0);

        let service = service(repository);

        let account = account_with_password("p1");
        let token = service.issue_password_reset_token(&account).unwrap();

        let result = service.redeem_password_reset_token(&token, "pw").await;
        assert!(matches!(result.unwrap_err(), AccountError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository);

        let result = service.get_account(&AccountId::new()).await;
        assert!(matches!(result.unwrap_err(), AccountError::NotFound(_)));
    }
}
