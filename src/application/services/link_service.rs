//! Link creation, listing and redirect resolution.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_well_formed};
use crate::utils::url_normalizer::normalize_url;
use serde_json::json;

/// Attempts at finding a free short code before giving up.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Service for creating and resolving shortened links.
///
/// Every link belongs to exactly one user. Short codes are random and unique
/// across all users; the click counter is only touched by [`Self::resolve`].
pub struct LinkService<L: LinkRepository + ?Sized, U: UserRepository + ?Sized> {
    link_repository: Arc<L>,
    user_repository: Arc<U>,
    base_url: String,
}

impl<L: LinkRepository + ?Sized, U: UserRepository + ?Sized> LinkService<L, U> {
    /// Creates a new link service.
    ///
    /// `base_url` is the public origin short URLs are built on, for example
    /// `https://s.example.com`.
    pub fn new(link_repository: Arc<L>, user_repository: Arc<U>, base_url: String) -> Self {
        Self {
            link_repository,
            user_repository,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short link owned by `owner_id`.
    ///
    /// # Code Generation
    ///
    /// A random 12-character code is checked against the store and inserted;
    /// a collision, either seen up front or reported by the unique constraint
    /// on insert, triggers another attempt. Gives up after 10 attempts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute HTTP(S) URL.
    ///
    /// Returns [`AppError::NotFound`] if the owner does not exist.
    ///
    /// Returns [`AppError::Internal`] if no free code was found.
    pub async fn create_link(&self, owner_id: i64, original_url: &str) -> Result<Link, AppError> {
        let original_url = normalize_url(original_url).map_err(|e| {
            AppError::bad_request(
                "Invalid URL format",
                json!({ "originalUrl": [e.to_string()] }),
            )
        })?;

        if self.user_repository.find_by_id(owner_id).await?.is_none() {
            return Err(AppError::not_found(
                "User not found",
                json!({ "user_id": owner_id }),
            ));
        }

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = generate_code().map_err(|e| {
                AppError::internal("Failed to generate code", json!({ "reason": e.to_string() }))
            })?;

            if self.link_repository.find_by_code(&code).await?.is_some() {
                tracing::warn!(attempt, "Short code collision, retrying");
                continue;
            }

            let new_link = NewLink {
                owner_id,
                original_url: original_url.clone(),
                code,
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    tracing::info!(link_id = link.id, owner_id, code = %link.code, "Link created");
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => {
                    tracing::warn!(attempt, "Short code taken on insert, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Lists every link owned by `owner_id`, newest first.
    pub async fn list_links(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let links = self.link_repository.list_by_owner(owner_id).await?;

        // Never hand out links of another owner.
        Ok(links
            .into_iter()
            .filter(|link| link.is_owned_by(owner_id))
            .collect())
    }

    /// Returns one link of `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist or belongs to
    /// another user.
    pub async fn get_link(&self, owner_id: i64, link_id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(link_id)
            .await?
            .filter(|link| link.is_owned_by(owner_id))
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": link_id })))
    }

    /// Resolves a short code, counting the click.
    ///
    /// The counter is incremented by exactly one per successful call, in a
    /// single store operation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        let not_found = || AppError::not_found("Short link not found", json!({ "code": code }));

        if !is_well_formed(code) {
            return Err(not_found());
        }

        let link = self
            .link_repository
            .increment_clicks(code)
            .await?
            .ok_or_else(not_found)?;

        tracing::debug!(link_id = link.id, clicks = link.clicks, "Short link resolved");
        Ok(link)
    }

    /// Checks that the link store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Builds the public short URL for a code: `{base_url}/t/{code}`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/t/{}", self.base_url, code)
    }
}
