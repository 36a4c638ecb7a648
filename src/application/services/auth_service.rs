//! Account authentication and session lifecycle service.

use std::sync::Arc;

use crate::application::token_manager::TokenManager;
use crate::domain::entities::{Account, NewAccount, Role, Session};
use crate::domain::repositories::{AccountRepository, SessionRepository};
use crate::error::AppError;

/// A freshly issued access/refresh pair.
///
/// `registration` signals to the caller whether this was a new-account flow.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub registration: bool,
}

/// Authenticated identity resolved from a bearer token.
///
/// Populated once by the authentication boundary and passed explicitly;
/// never mutated afterwards.
#[derive(Debug, Clone, Copy)]
pub struct AuthIdentity {
    pub account_id: i64,
    pub role: Role,
}

/// Service owning the session state machine per account:
/// no-session → active → active (rotated) → no-session.
///
/// Each transition is atomic from the caller's point of view. Every failure
/// is terminal for the request; nothing here retries.
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    sessions: Arc<dyn SessionRepository>,
    tokens: Arc<TokenManager>,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        sessions: Arc<dyn SessionRepository>,
        tokens: Arc<TokenManager>,
    ) -> Self {
        Self {
            accounts,
            sessions,
            tokens,
        }
    }

    /// Registers a new account and opens its first session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EmailAlreadyTaken`] when the email is on file.
    pub async fn sign_up(&self, email: String, password: String) -> Result<AuthTokens, AppError> {
        if self.accounts.exists_by_email(&email).await? {
            return Err(AppError::EmailAlreadyTaken);
        }

        let account = self
            .accounts
            .create(NewAccount {
                email,
                password,
                role: Role::Standard,
            })
            .await?;

        self.issue(&account, true).await
    }

    /// Authenticates credentials and opens a session, destroying any prior
    /// one for the account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown email and
    /// [`AppError::InvalidPassword`] on credential mismatch.
    pub async fn sign_in(&self, email: String, password: String) -> Result<AuthTokens, AppError> {
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("account"))?;

        if account.password != password {
            return Err(AppError::InvalidPassword);
        }

        self.issue(&account, false).await
    }

    /// Rotates a session: mints a new pair and overwrites the record in
    /// place, conditional on the presented token still being the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRefreshToken`] unless all of: signature and
    /// expiry are valid against the refresh key, a session record exists for
    /// the subject account, and the stored refresh token is byte-for-byte
    /// equal to the presented one. A refresh that loses a concurrent race
    /// fails the conditional overwrite and is rejected the same way.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, AppError> {
        let claims = self
            .tokens
            .refresh_claims(refresh_token)
            .ok_or(AppError::InvalidRefreshToken)?;
        let account_id = claims.account_id()?;

        let session = self
            .sessions
            .find_by_account_id(account_id)
            .await?
            .ok_or(AppError::InvalidRefreshToken)?;

        // Replay/rotation guard: a token that was already rotated away no
        // longer matches the stored one.
        if session.refresh_token != refresh_token {
            return Err(AppError::InvalidRefreshToken);
        }

        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AppError::InvalidRefreshToken)?;

        let next = Session::new(
            account_id,
            self.tokens.generate_access_token(&account)?,
            self.tokens.generate_refresh_token(&account)?,
        );

        if !self.sessions.rotate(refresh_token, next.clone()).await? {
            return Err(AppError::InvalidRefreshToken);
        }

        Ok(AuthTokens {
            access_token: next.access_token,
            refresh_token: next.refresh_token,
            registration: false,
        })
    }

    /// Closes the account's session unconditionally.
    ///
    /// Already-issued access tokens stay cryptographically valid until their
    /// own expiry, but the session-store match in [`Self::authenticate`] and
    /// any further refresh are blocked immediately.
    pub async fn sign_out(&self, account_id: i64) -> Result<(), AppError> {
        self.sessions.delete_by_account_id(account_id).await
    }

    /// Changes the account password after checking the old credential.
    ///
    /// The current session stays valid; only the stored credential changes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown account and
    /// [`AppError::InvalidPassword`] when the old password does not match.
    pub async fn set_password(
        &self,
        account_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::not_found("account"))?;

        if account.password != old_password {
            return Err(AppError::InvalidPassword);
        }

        self.accounts.set_password(account_id, new_password).await
    }

    /// Resolves a bearer access token to an authenticated identity.
    ///
    /// Beyond signature + expiry, the session record for the subject account
    /// must currently store this exact string as its access token, so a
    /// structurally valid but rotated-away token is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AccessDenied`] on any check failing.
    pub async fn authenticate(&self, access_token: &str) -> Result<AuthIdentity, AppError> {
        let claims = self
            .tokens
            .access_claims(access_token)
            .ok_or(AppError::AccessDenied)?;
        let account_id = claims.account_id().map_err(|_| AppError::AccessDenied)?;
        let role = claims.roles.ok_or(AppError::AccessDenied)?;

        let session = self
            .sessions
            .find_by_account_id(account_id)
            .await?
            .ok_or(AppError::AccessDenied)?;

        if session.access_token != access_token {
            return Err(AppError::AccessDenied);
        }

        Ok(AuthIdentity { account_id, role })
    }

    /// Opens a fresh session for an account: deletes any prior record, then
    /// stores the new pair. Used by both sign-up and sign-in.
    async fn issue(&self, account: &Account, registration: bool) -> Result<AuthTokens, AppError> {
        self.sessions.delete_by_account_id(account.id).await?;

        let access_token = self.tokens.generate_access_token(account)?;
        let refresh_token = self.tokens.generate_refresh_token(account)?;

        self.sessions
            .insert(Session::new(
                account.id,
                access_token.clone(),
                refresh_token.clone(),
            ))
            .await?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            registration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockAccountRepository, MockSessionRepository};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn token_manager() -> Arc<TokenManager> {
        Arc::new(TokenManager::new("access-test-secret", "refresh-test-secret"))
    }

    fn test_account(id: i64) -> Account {
        Account {
            id,
            email: format!("user{id}@example.com"),
            password: "password123".to_string(),
            role: Role::Standard,
            created_at: Utc::now(),
        }
    }

    fn service(
        accounts: MockAccountRepository,
        sessions: MockSessionRepository,
    ) -> AuthService {
        AuthService::new(Arc::new(accounts), Arc::new(sessions), token_manager())
    }

    #[tokio::test]
    async fn test_sign_up_issues_pair_with_registration_flag() {
        let mut accounts = MockAccountRepository::new();
        let mut sessions = MockSessionRepository::new();

        accounts
            .expect_exists_by_email()
            .withf(|email| email == "new@example.com")
            .times(1)
            .returning(|_| Ok(false));
        accounts
            .expect_create()
            .withf(|n| n.email == "new@example.com" && n.role == Role::Standard)
            .times(1)
            .returning(|n| {
                Ok(Account {
                    id: 1,
                    email: n.email,
                    password: n.password,
                    role: n.role,
                    created_at: Utc::now(),
                })
            });
        sessions
            .expect_delete_by_account_id()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(()));
        sessions
            .expect_insert()
            .withf(|s| s.account_id == 1)
            .times(1)
            .returning(|_| Ok(()));

        let tokens = service(accounts, sessions)
            .sign_up("new@example.com".to_string(), "password123".to_string())
            .await
            .unwrap();

        assert!(tokens.registration);
        assert_ne!(tokens.access_token, tokens.refresh_token);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_taken_email() {
        let mut accounts = MockAccountRepository::new();
        let sessions = MockSessionRepository::new();

        accounts
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(true));
        accounts.expect_create().times(0);

        let result = service(accounts, sessions)
            .sign_up("taken@example.com".to_string(), "password123".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::EmailAlreadyTaken));
    }

    #[tokio::test]
    async fn test_sign_in_success_replaces_session() {
        let mut accounts = MockAccountRepository::new();
        let mut sessions = MockSessionRepository::new();

        accounts
            .expect_find_by_email()
            .withf(|email| email == "user5@example.com")
            .times(1)
            .returning(|_| Ok(Some(test_account(5))));
        sessions
            .expect_delete_by_account_id()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(()));
        sessions
            .expect_insert()
            .withf(|s| s.account_id == 5)
            .times(1)
            .returning(|_| Ok(()));

        let tokens = service(accounts, sessions)
            .sign_in("user5@example.com".to_string(), "password123".to_string())
            .await
            .unwrap();

        assert!(!tokens.registration);
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let mut accounts = MockAccountRepository::new();
        let sessions = MockSessionRepository::new();

        accounts
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(test_account(5))));

        let result = service(accounts, sessions)
            .sign_in("user5@example.com".to_string(), "wrong-password".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidPassword));
    }

    #[tokio::test]
    async fn test_sign_in_unknown_email() {
        let mut accounts = MockAccountRepository::new();
        let sessions = MockSessionRepository::new();

        accounts
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(accounts, sessions)
            .sign_in("ghost@example.com".to_string(), "password123".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_refresh_success_rotates_in_place() {
        let tokens = token_manager();
        let account = test_account(5);
        let current = tokens.generate_refresh_token(&account).unwrap();

        let mut accounts = MockAccountRepository::new();
        let mut sessions = MockSessionRepository::new();

        let stored = Session::new(5, "old-access".to_string(), current.clone());
        sessions
            .expect_find_by_account_id()
            .with(eq(5))
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        accounts
            .expect_find_by_id()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(Some(test_account(5))));

        let expected_current = current.clone();
        sessions
            .expect_rotate()
            .withf(move |cur, next| cur == expected_current && next.account_id == 5)
            .times(1)
            .returning(|_, _| Ok(true));

        let service = AuthService::new(Arc::new(accounts), Arc::new(sessions), tokens);
        let pair = service.refresh(&current).await.unwrap();

        assert!(!pair.registration);
        assert_ne!(pair.refresh_token, current);
    }

    #[tokio::test]
    async fn test_refresh_rejects_garbage_token() {
        let accounts = MockAccountRepository::new();
        let sessions = MockSessionRepository::new();

        let result = service(accounts, sessions).refresh("not-a-jwt").await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidRefreshToken));
    }

    #[tokio::test]
    async fn test_refresh_rejects_rotated_away_token() {
        let tokens = token_manager();
        let account = test_account(5);
        let old = tokens.generate_refresh_token(&account).unwrap();
        let newer = tokens.generate_refresh_token(&account).unwrap();

        let accounts = MockAccountRepository::new();
        let mut sessions = MockSessionRepository::new();

        let stored = Session::new(5, "access".to_string(), newer);
        sessions
            .expect_find_by_account_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AuthService::new(Arc::new(accounts), Arc::new(sessions), tokens);
        let result = service.refresh(&old).await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidRefreshToken));
    }

    #[tokio::test]
    async fn test_refresh_rejects_after_sign_out() {
        let tokens = token_manager();
        let account = test_account(5);
        let current = tokens.generate_refresh_token(&account).unwrap();

        let accounts = MockAccountRepository::new();
        let mut sessions = MockSessionRepository::new();

        sessions
            .expect_find_by_account_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(accounts), Arc::new(sessions), tokens);
        let result = service.refresh(&current).await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidRefreshToken));
    }

    #[tokio::test]
    async fn test_refresh_lost_race_is_rejected() {
        let tokens = token_manager();
        let account = test_account(5);
        let current = tokens.generate_refresh_token(&account).unwrap();

        let mut accounts = MockAccountRepository::new();
        let mut sessions = MockSessionRepository::new();

        let stored = Session::new(5, "access".to_string(), current.clone());
        sessions
            .expect_find_by_account_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        accounts
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(test_account(5))));
        // Conditional overwrite misses: a concurrent refresh won.
        sessions.expect_rotate().times(1).returning(|_, _| Ok(false));

        let service = AuthService::new(Arc::new(accounts), Arc::new(sessions), tokens);
        let result = service.refresh(&current).await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidRefreshToken));
    }

    #[tokio::test]
    async fn test_sign_out_is_unconditional() {
        let accounts = MockAccountRepository::new();
        let mut sessions = MockSessionRepository::new();

        sessions
            .expect_delete_by_account_id()
            .with(eq(9))
            .times(1)
            .returning(|_| Ok(()));

        assert!(service(accounts, sessions).sign_out(9).await.is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let tokens = token_manager();
        let account = test_account(5);
        let access = tokens.generate_access_token(&account).unwrap();

        let accounts = MockAccountRepository::new();
        let mut sessions = MockSessionRepository::new();

        let stored = Session::new(5, access.clone(), "refresh".to_string());
        sessions
            .expect_find_by_account_id()
            .with(eq(5))
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AuthService::new(Arc::new(accounts), Arc::new(sessions), tokens);
        let identity = service.authenticate(&access).await.unwrap();

        assert_eq!(identity.account_id, 5);
        assert_eq!(identity.role, Role::Standard);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_rotated_access_token() {
        let tokens = token_manager();
        let account = test_account(5);
        let old_access = tokens.generate_access_token(&account).unwrap();
        let new_access = tokens.generate_access_token(&account).unwrap();

        let accounts = MockAccountRepository::new();
        let mut sessions = MockSessionRepository::new();

        let stored = Session::new(5, new_access, "refresh".to_string());
        sessions
            .expect_find_by_account_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AuthService::new(Arc::new(accounts), Arc::new(sessions), tokens);
        let result = service.authenticate(&old_access).await;

        assert!(matches!(result.unwrap_err(), AppError::AccessDenied));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_refresh_token() {
        let tokens = token_manager();
        let account = test_account(5);
        let refresh = tokens.generate_refresh_token(&account).unwrap();

        let accounts = MockAccountRepository::new();
        let sessions = MockSessionRepository::new();

        let service = AuthService::new(Arc::new(accounts), Arc::new(sessions), tokens);
        let result = service.authenticate(&refresh).await;

        assert!(matches!(result.unwrap_err(), AppError::AccessDenied));
    }

    #[tokio::test]
    async fn test_set_password_checks_old_credential() {
        let mut accounts = MockAccountRepository::new();
        let sessions = MockSessionRepository::new();

        accounts
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(test_account(5))));

        let result = service(accounts, sessions)
            .set_password(5, "wrong-old", "new-password-1")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidPassword));
    }

    #[tokio::test]
    async fn test_set_password_success_keeps_session() {
        let mut accounts = MockAccountRepository::new();
        let mut sessions = MockSessionRepository::new();

        accounts
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(test_account(5))));
        accounts
            .expect_set_password()
            .withf(|id, password| *id == 5 && password == "new-password-1")
            .times(1)
            .returning(|_, _| Ok(()));
        // Session store is untouched by a password change.
        sessions.expect_delete_by_account_id().times(0);

        let result = service(accounts, sessions)
            .set_password(5, "password123", "new-password-1")
            .await;

        assert!(result.is_ok());
    }
}
