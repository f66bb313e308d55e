use ::mongodb::options::FindOptions;
use chrono::{DateTime, Utc};
use lostfound_result::{ErrorType, Result};

use crate::util::pagination::Pagination;
use crate::MongoDb;
use crate::Status;

use super::AbstractStatuses;

static COL: &str = "statuses";

#[async_trait]
impl AbstractStatuses for MongoDb {
    async fn insert_status(&self, status: &Status) -> Result<()> {
        self.delete_many(
            COL,
            doc! {
                "userId": &status.user_id,
                "expiresAt": { "$lte": bson::DateTime::from_chrono(status.created_at) },
            },
        )
        .await?;

        match self.insert_one(COL, status).await {
            Err(err) if matches!(err.error_type, ErrorType::DuplicateEntry { .. }) => {
                Err(create_error!(StatusAlreadyExists))
            }
            result => result,
        }
    }

    async fn fetch_status(&self, id: &str) -> Result<Status> {
        self.find_one_by_id(COL, id)
            .await?
            .ok_or_else(|| create_error!(UnknownStatus))
    }

    async fn fetch_active_statuses(
        &self,
        now: DateTime<Utc>,
        pagination: Pagination,
    ) -> Result<Vec<Status>> {
        self.find_with_options(
            COL,
            doc! { "expiresAt": { "$gt": bson::DateTime::from_chrono(now) } },
            FindOptions::builder()
                .sort(doc! { "createdAt": -1, "_id": -1 })
                .skip(pagination.skip() as u64)
                .limit(pagination.limit)
                .build(),
        )
        .await
    }

    async fn fetch_active_statuses_by_user(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Status>> {
        self.find_with_options(
            COL,
            doc! {
                "userId": user_id,
                "expiresAt": { "$gt": bson::DateTime::from_chrono(now) },
            },
            FindOptions::builder()
                .sort(doc! { "createdAt": -1, "_id": -1 })
                .build(),
        )
        .await
    }

    async fn delete_status(&self, id: &str) -> Result<()> {
        if self.delete_one_by_id(COL, id).await? == 0 {
            Err(create_error!(UnknownStatus))
        } else {
            Ok(())
        }
    }
}
