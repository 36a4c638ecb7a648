#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use shortlink::application::services::{AccountService, AuthService, LinkService};
use shortlink::application::token_manager::TokenManager;
use shortlink::domain::entities::{
    Account, Link, LinkUpdate, NewAccount, NewLink, NewVisit, Role, Session, Visit,
};
use shortlink::domain::repositories::{
    AccountRepository, LinkRepository, SessionRepository, VisitRepository,
};
use shortlink::error::AppError;
use shortlink::state::AppState;

/// In-memory account store mirroring the PostgreSQL schema, including the
/// unique email constraint.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    rows: Mutex<Vec<Account>>,
    next_id: AtomicI64,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|a| a.email == new_account.email) {
            return Err(AppError::EmailAlreadyTaken);
        }
        let account = Account {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            email: new_account.email,
            password: new_account.password,
            role: new_account.role,
            created_at: Utc::now(),
        };
        rows.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.rows.lock().unwrap().iter().any(|a| a.email == email))
    }

    async fn set_password(&self, id: i64, password: &str) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(account) = rows.iter_mut().find(|a| a.id == id) {
            account.password = password.to_string();
        }
        Ok(())
    }

    async fn set_role(&self, id: i64, role: Role) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(account) = rows.iter_mut().find(|a| a.id == id) {
            account.role = role;
        }
        Ok(())
    }
}

/// In-memory link store.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    rows: Mutex<Vec<Link>>,
    next_id: AtomicI64,
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = Link {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            account_id: new_link.account_id,
            ios_url: new_link.ios_url,
            android_url: new_link.android_url,
            desktop_url: new_link.desktop_url,
            default_url: new_link.default_url,
            description: new_link.description,
            short_id: None,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(link.clone());
        Ok(link)
    }

    async fn set_short_id(&self, id: i64, short_id: &str) -> Result<Link, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let link = rows
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::not_found("link"))?;
        link.short_id = Some(short_id.to_string());
        Ok(link.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.short_id.as_deref() == Some(short_id))
            .cloned())
    }

    async fn list_by_account(&self, account_id: i64) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.account_id == account_id)
            .cloned()
            .collect();
        links.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(links)
    }

    async fn update(&self, id: i64, update: LinkUpdate) -> Result<Link, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let link = rows
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::not_found("link"))?;
        link.ios_url = update.ios_url;
        link.android_url = update.android_url;
        link.desktop_url = update.desktop_url;
        link.default_url = update.default_url;
        link.description = update.description;
        Ok(link.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.rows.lock().unwrap().retain(|l| l.id != id);
        Ok(())
    }
}

/// In-memory visit store with direct inspection for assertions.
#[derive(Default)]
pub struct InMemoryVisitRepository {
    rows: Mutex<Vec<Visit>>,
    next_id: AtomicI64,
}

impl InMemoryVisitRepository {
    /// Everything recorded so far, oldest first.
    pub fn recorded(&self) -> Vec<Visit> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisitRepository for InMemoryVisitRepository {
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let visit = Visit {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            link_id: new_visit.link_id,
            ip_address: new_visit.ip_address,
            language: new_visit.language,
            device_type: new_visit.device_type,
            referer: new_visit.referer,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(visit.clone());
        Ok(visit)
    }

    async fn find_by_link_in_range(
        &self,
        link_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Visit>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.link_id == link_id && v.created_at >= from && v.created_at < to)
            .cloned()
            .collect())
    }
}

/// In-memory session store with the same conditional-overwrite rotation
/// semantics as the PostgreSQL implementation.
#[derive(Default)]
pub struct InMemorySessionRepository {
    rows: Mutex<HashMap<i64, Session>>,
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_account_id(&self, account_id: i64) -> Result<Option<Session>, AppError> {
        Ok(self.rows.lock().unwrap().get(&account_id).cloned())
    }

    async fn insert(&self, session: Session) -> Result<(), AppError> {
        self.rows.lock().unwrap().insert(session.account_id, session);
        Ok(())
    }

    async fn rotate(
        &self,
        current_refresh_token: &str,
        next: Session,
    ) -> Result<bool, AppError> {
        // Compare-and-swap under one lock, like the conditional UPDATE.
        let mut rows = self.rows.lock().unwrap();
        match rows.get(&next.account_id) {
            Some(current) if current.refresh_token == current_refresh_token => {
                rows.insert(next.account_id, next);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_by_account_id(&self, account_id: i64) -> Result<(), AppError> {
        self.rows.lock().unwrap().remove(&account_id);
        Ok(())
    }
}

/// Fully wired application state over in-memory stores, with handles kept
/// for direct inspection.
pub struct TestContext {
    pub state: AppState,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub links: Arc<InMemoryLinkRepository>,
    pub visits: Arc<InMemoryVisitRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub tokens: Arc<TokenManager>,
}

pub fn create_test_state() -> TestContext {
    let accounts = Arc::new(InMemoryAccountRepository::default());
    let links = Arc::new(InMemoryLinkRepository::default());
    let visits = Arc::new(InMemoryVisitRepository::default());
    let sessions = Arc::new(InMemorySessionRepository::default());

    let tokens = Arc::new(TokenManager::new(
        "test-access-secret",
        "test-refresh-secret",
    ));

    let auth_service = Arc::new(AuthService::new(
        accounts.clone(),
        sessions.clone(),
        tokens.clone(),
    ));
    let link_service = Arc::new(LinkService::new(
        links.clone(),
        accounts.clone(),
        visits.clone(),
    ));
    let account_service = Arc::new(AccountService::new(accounts.clone()));

    TestContext {
        state: AppState::new(auth_service, link_service, account_service),
        accounts,
        links,
        visits,
        sessions,
        tokens,
    }
}

/// Creates an account directly in the store, bypassing the signup flow.
pub async fn create_test_account(
    ctx: &TestContext,
    email: &str,
    password: &str,
    role: Role,
) -> Account {
    ctx.accounts
        .create(NewAccount {
            email: email.to_string(),
            password: password.to_string(),
            role,
        })
        .await
        .unwrap()
}

/// Creates a link with its short id assigned, as the service would.
pub async fn create_test_link(ctx: &TestContext, account_id: i64, default_url: &str) -> Link {
    ctx.state
        .link_service
        .create_link(NewLink {
            account_id,
            ios_url: None,
            android_url: None,
            desktop_url: None,
            default_url: default_url.to_string(),
            description: None,
        })
        .await
        .unwrap()
}
