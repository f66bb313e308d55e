use ::mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use lostfound_result::{ErrorType, Result};

use crate::util::pagination::Pagination;
use crate::MongoDb;
use crate::{Report, ReportEntry};

use super::AbstractReports;

static COL: &str = "reports";

impl MongoDb {
    /// Push the entry unless the user is already listed
    async fn push_report_entry(&self, entry: &ReportEntry) -> Result<Option<Report>> {
        let kind = bson::to_bson(&entry.kind).map_err(|_| create_error!(InternalError))?;

        self.find_one_and_update(
            COL,
            doc! {
                "type": kind,
                "id": &entry.target_id,
                "usersIDS": { "$ne": &entry.user_id },
            },
            doc! {
                "$push": {
                    "usersIDS": &entry.user_id,
                    "reason": &entry.reason,
                    "description": &entry.description,
                }
            },
            FindOneAndUpdateOptions::builder()
                .return_document(ReturnDocument::After)
                .build(),
        )
        .await
    }
}

#[async_trait]
impl AbstractReports for MongoDb {
    async fn submit_report(&self, entry: &ReportEntry, id: String) -> Result<Report> {
        if let Some(report) = self.push_report_entry(entry).await? {
            return Ok(report);
        }

        let kind = bson::to_bson(&entry.kind).map_err(|_| create_error!(InternalError))?;
        if self
            .count_documents(COL, doc! { "type": kind, "id": &entry.target_id })
            .await?
            > 0
        {
            // Another reporter created it since the first push
            return self
                .push_report_entry(entry)
                .await?
                .ok_or_else(|| create_error!(AlreadyReported));
        }

        let report = Report::from_entry(entry, id);
        match self.insert_one(COL, &report).await {
            Ok(()) => Ok(report),
            // Lost the race to create the document, append to the winner's
            Err(err) if matches!(err.error_type, ErrorType::DuplicateEntry { .. }) => self
                .push_report_entry(entry)
                .await?
                .ok_or_else(|| create_error!(AlreadyReported)),
            Err(err) => Err(err),
        }
    }

    async fn fetch_report(&self, id: &str) -> Result<Report> {
        self.find_one_by_id(COL, id)
            .await?
            .ok_or_else(|| create_error!(UnknownReport))
    }

    async fn fetch_reports(&self, pagination: Pagination) -> Result<Vec<Report>> {
        self.find_with_options(
            COL,
            doc! {},
            FindOptions::builder()
                .sort(doc! { "createdAt": -1, "_id": -1 })
                .skip(pagination.skip() as u64)
                .limit(pagination.limit)
                .build(),
        )
        .await
    }
}
