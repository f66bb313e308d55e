use chrono::{DateTime, Utc};
use lostfound_result::Result;

use crate::util::pagination::Pagination;
use crate::ReferenceDb;
use crate::Status;

use super::AbstractStatuses;

#[async_trait]
impl AbstractStatuses for ReferenceDb {
    async fn insert_status(&self, status: &Status) -> Result<()> {
        let mut statuses = self.statuses.lock().await;
        if statuses.contains_key(&status.id) {
            return Err(create_database_error!("insert", "statuses"));
        }

        statuses.retain(|_, existing| {
            existing.user_id != status.user_id || existing.is_active(status.created_at)
        });

        if statuses
            .values()
            .any(|existing| existing.user_id == status.user_id)
        {
            return Err(create_error!(StatusAlreadyExists));
        }

        statuses.insert(status.id.to_string(), status.clone());
        Ok(())
    }

    async fn fetch_status(&self, id: &str) -> Result<Status> {
        let statuses = self.statuses.lock().await;
        statuses
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(UnknownStatus))
    }

    async fn fetch_active_statuses(
        &self,
        now: DateTime<Utc>,
        pagination: Pagination,
    ) -> Result<Vec<Status>> {
        let statuses = self.statuses.lock().await;
        let mut list: Vec<Status> = statuses
            .values()
            .filter(|status| status.is_active(now))
            .cloned()
            .collect();

        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(pagination.slice(list))
    }

    async fn fetch_active_statuses_by_user(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Status>> {
        let statuses = self.statuses.lock().await;
        let mut list: Vec<Status> = statuses
            .values()
            .filter(|status| status.user_id == user_id && status.is_active(now))
            .cloned()
            .collect();

        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(list)
    }

    async fn delete_status(&self, id: &str) -> Result<()> {
        let mut statuses = self.statuses.lock().await;
        if statuses.remove(id).is_some() {
            Ok(())
        } else {
            Err(create_error!(UnknownStatus))
        }
    }
}
