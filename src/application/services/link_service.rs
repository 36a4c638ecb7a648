//! Link management and redirect resolution service.

use std::sync::Arc;

use chrono::{Days, NaiveDate};

use crate::domain::entities::{Link, LinkUpdate, NewLink, NewVisit, Visit};
use crate::domain::repositories::{AccountRepository, LinkRepository, VisitRepository};
use crate::error::AppError;
use crate::utils::short_id;
use crate::utils::traffic;

/// Request metadata needed to classify a redirect visit.
///
/// Collected once at the HTTP boundary; the resolver itself never touches
/// framework types.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub peer_addr: String,
    pub forwarded_for: Option<String>,
    pub user_agent: Option<String>,
    pub accept_language: Option<String>,
    pub referer: Option<String>,
    pub query: Option<String>,
}

/// Service for creating, resolving and inspecting shortened links.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    accounts: Arc<dyn AccountRepository>,
    visits: Arc<dyn VisitRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        accounts: Arc<dyn AccountRepository>,
        visits: Arc<dyn VisitRepository>,
    ) -> Self {
        Self {
            links,
            accounts,
            visits,
        }
    }

    /// Creates a link for an account and derives its short identifier.
    ///
    /// The short id is a pure function of the store-assigned numeric id and
    /// is persisted immediately, so it can never change afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the owning account does not exist.
    pub async fn create_link(&self, new_link: NewLink) -> Result<Link, AppError> {
        if self
            .accounts
            .find_by_id(new_link.account_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found("account"));
        }

        let link = self.links.create(new_link).await?;

        let id = u64::try_from(link.id)
            .map_err(|_| AppError::internal(format!("negative link id {}", link.id)))?;
        self.links.set_short_id(link.id, &short_id::encode(id)).await
    }

    /// Resolves a short identifier to a destination URL, recording one visit.
    ///
    /// The visit is written unconditionally before destination selection:
    /// every resolution that finds the link produces exactly one record,
    /// even when the chosen destination is the default URL. A failed lookup
    /// writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown short identifier.
    pub async fn resolve(&self, short_id: &str, meta: &RequestMeta) -> Result<String, AppError> {
        let link = self
            .links
            .find_by_short_id(short_id)
            .await?
            .ok_or_else(|| AppError::not_found("link"))?;

        let device = traffic::detect_device(meta.user_agent.as_deref());

        self.visits
            .record(NewVisit {
                link_id: link.id,
                ip_address: traffic::client_ip(meta.forwarded_for.as_deref(), &meta.peer_addr),
                language: traffic::detect_language(meta.accept_language.as_deref()),
                device_type: device.as_str().to_string(),
                referer: traffic::referrer_source(meta.query.as_deref(), meta.referer.as_deref()),
            })
            .await?;

        Ok(link.destination_for(device).to_string())
    }

    /// Retrieves a link, restricted to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown link and
    /// [`AppError::AccessDenied`] when the caller does not own it.
    pub async fn get_link(&self, account_id: i64, link_id: i64) -> Result<Link, AppError> {
        let link = self
            .links
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("link"))?;

        if link.account_id != account_id {
            return Err(AppError::AccessDenied);
        }

        Ok(link)
    }

    /// Replaces the destination set of an owned link.
    pub async fn update_link(
        &self,
        account_id: i64,
        link_id: i64,
        update: LinkUpdate,
    ) -> Result<Link, AppError> {
        // Ownership check happens on the current row before any write.
        self.get_link(account_id, link_id).await?;
        self.links.update(link_id, update).await
    }

    /// Deletes an owned link together with its visit records.
    pub async fn delete_link(&self, account_id: i64, link_id: i64) -> Result<(), AppError> {
        self.get_link(account_id, link_id).await?;
        self.links.delete_by_id(link_id).await
    }

    /// Returns the visit records of an owned link inside an inclusive
    /// calendar-date range.
    pub async fn get_statistics(
        &self,
        account_id: i64,
        link_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Visit>, AppError> {
        self.get_link(account_id, link_id).await?;

        // Inclusive dates become a half-open UTC instant range.
        let from = start_date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| AppError::internal("invalid start date"))?
            .and_utc();
        let to = end_date
            .checked_add_days(Days::new(1))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| AppError::internal("invalid end date"))?
            .and_utc();

        self.visits.find_by_link_in_range(link_id, from, to).await
    }

    /// Lists the links owned by an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the account does not exist.
    pub async fn list_account_links(&self, account_id: i64) -> Result<Vec<Link>, AppError> {
        if self.accounts.find_by_id(account_id).await?.is_none() {
            return Err(AppError::not_found("account"));
        }
        self.links.list_by_account(account_id).await
    }
}
