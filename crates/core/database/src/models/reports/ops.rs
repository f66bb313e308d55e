use lostfound_result::Result;

use crate::util::pagination::Pagination;
use crate::{Report, ReportEntry};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractReports: Sync + Send {
    /// Append an entry to the report on its target, creating the report with
    /// `id` if none exists yet
    ///
    /// Fails with `AlreadyReported` if the user already reported the target.
    async fn submit_report(&self, entry: &ReportEntry, id: String) -> Result<Report>;

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report>;

    /// Fetch a page of reports, newest first
    async fn fetch_reports(&self, pagination: Pagination) -> Result<Vec<Report>>;
}
