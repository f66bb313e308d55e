use chrono::{DateTime, Utc};
use lostfound_result::Result;

use crate::util::pagination::Pagination;
use crate::Status;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractStatuses: Sync + Send {
    /// Insert a new status, clearing the owner's expired ones
    ///
    /// Fails with `StatusAlreadyExists` while the owner has an active status.
    async fn insert_status(&self, status: &Status) -> Result<()>;

    /// Fetch a status by its id, expired or not
    async fn fetch_status(&self, id: &str) -> Result<Status>;

    /// Fetch a page of statuses still active at `now`, newest first
    async fn fetch_active_statuses(
        &self,
        now: DateTime<Utc>,
        pagination: Pagination,
    ) -> Result<Vec<Status>>;

    /// Fetch a user's statuses still active at `now`, newest first
    async fn fetch_active_statuses_by_user(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Status>>;

    /// Delete a status
    async fn delete_status(&self, id: &str) -> Result<()>;
}
