use lostfound_result::Result;

use crate::util::pagination::Pagination;
use crate::ReferenceDb;
use crate::{Report, ReportEntry};

use super::AbstractReports;

#[async_trait]
impl AbstractReports for ReferenceDb {
    async fn submit_report(&self, entry: &ReportEntry, id: String) -> Result<Report> {
        let mut reports = self.reports.lock().await;

        if let Some(report) = reports
            .values_mut()
            .find(|report| report.kind == entry.kind && report.target_id == entry.target_id)
        {
            if report.users_ids.contains(&entry.user_id) {
                return Err(create_error!(AlreadyReported));
            }

            report.users_ids.push(entry.user_id.to_string());
            report.reason.push(entry.reason.to_string());
            report.description.push(entry.description.to_string());
            return Ok(report.clone());
        }

        let report = Report::from_entry(entry, id);
        reports.insert(report.id.to_string(), report.clone());
        Ok(report)
    }

    async fn fetch_report(&self, id: &str) -> Result<Report> {
        let reports = self.reports.lock().await;
        reports
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(UnknownReport))
    }

    async fn fetch_reports(&self, pagination: Pagination) -> Result<Vec<Report>> {
        let reports = self.reports.lock().await;
        let mut list: Vec<Report> = reports.values().cloned().collect();
        list.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(pagination.slice(list))
    }
}
