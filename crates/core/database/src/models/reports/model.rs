use chrono::{DateTime, Utc};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::{util::id::new_id, Database, User};

auto_derived!(
    /// Every report filed against one piece of content
    pub struct Report {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Kind of content
        #[serde(rename = "type")]
        pub kind: v0::ReportType,
        /// Id of the reported content
        #[serde(rename = "id")]
        pub target_id: String,
        /// Users who filed a report, in filing order
        #[serde(rename = "usersIDS", default)]
        pub users_ids: Vec<String>,
        /// One reason per report
        #[serde(default)]
        pub reason: Vec<String>,
        /// One description per report
        #[serde(default)]
        pub description: Vec<String>,
        /// When the first report was filed
        #[serde(rename = "createdAt", with = "crate::util::iso_bson_chrono")]
        pub created_at: DateTime<Utc>,
    }

    /// One user's report against some content
    pub struct ReportEntry {
        pub kind: v0::ReportType,
        pub target_id: String,
        pub user_id: String,
        pub reason: String,
        pub description: String,
    }
);

impl Report {
    /// File a report, each user may report a target once
    pub async fn submit(
        db: &Database,
        reporter: &User,
        data: v0::DataReportContent,
    ) -> Result<Report> {
        let entry = ReportEntry {
            kind: data.kind,
            target_id: data.target_id.trim().to_string(),
            user_id: reporter.id.to_string(),
            reason: data.reason.trim().to_string(),
            description: data.description.trim().to_string(),
        };

        match entry.kind {
            v0::ReportType::Post => db.fetch_post(&entry.target_id).await.map(|_| ())?,
            v0::ReportType::Comment => db.fetch_comment(&entry.target_id).await.map(|_| ())?,
            v0::ReportType::User => db.fetch_user(&entry.target_id).await.map(|_| ())?,
        }

        db.submit_report(&entry, new_id()).await
    }

    /// Fresh document holding a single entry
    pub fn from_entry(entry: &ReportEntry, id: String) -> Report {
        Report {
            id,
            kind: entry.kind,
            target_id: entry.target_id.to_string(),
            users_ids: vec![entry.user_id.to_string()],
            reason: vec![entry.reason.to_string()],
            description: vec![entry.description.to_string()],
            created_at: Utc::now(),
        }
    }
}

impl From<Report> for v0::Report {
    fn from(value: Report) -> Self {
        v0::Report {
            id: value.id,
            kind: value.kind,
            target_id: value.target_id,
            users_ids: value.users_ids,
            reason: value.reason,
            description: value.description,
            created_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::future::join_all;
    use lostfound_models::v0;
    use lostfound_result::{ErrorKind, ErrorType};

    use crate::util::pagination::Pagination;
    use crate::util::test_fixtures::{create_post, create_user};
    use crate::Report;

    fn report_post(id: &str, reason: &str) -> v0::DataReportContent {
        v0::DataReportContent {
            kind: v0::ReportType::Post,
            target_id: id.to_string(),
            reason: reason.to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn second_report_by_same_user_conflicts() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let reporter = create_user(&db, "reporter").await;
            let post = create_post(&db, &author, "Lost wallet").await;

            let report = Report::submit(&db, &reporter, report_post(&post.id, "spam"))
                .await
                .unwrap();
            assert_eq!(report.users_ids, vec![reporter.id.clone()]);

            let err = Report::submit(&db, &reporter, report_post(&post.id, "spam again"))
                .await
                .unwrap_err();
            assert_eq!(err.error_type.kind(), ErrorKind::Conflict);
            assert!(matches!(err.error_type, ErrorType::AlreadyReported));

            let reports = db
                .fetch_reports(Pagination::new(1, 10).unwrap())
                .await
                .unwrap();
            assert_eq!(reports.len(), 1);
            assert_eq!(reports[0].users_ids, vec![reporter.id.clone()]);
            assert_eq!(reports[0].reason, vec!["spam".to_string()]);
        });
    }

    #[tokio::test]
    async fn reports_accumulate_per_target() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let first = create_user(&db, "first").await;
            let second = create_user(&db, "second").await;
            let post = create_post(&db, &author, "Lost wallet").await;

            let report = Report::submit(&db, &first, report_post(&post.id, "spam"))
                .await
                .unwrap();
            let updated = Report::submit(&db, &second, report_post(&post.id, "scam"))
                .await
                .unwrap();

            assert_eq!(updated.id, report.id);
            assert_eq!(updated.users_ids, vec![first.id.clone(), second.id.clone()]);
            assert_eq!(updated.reason, vec!["spam".to_string(), "scam".to_string()]);
            assert_eq!(db.fetch_report(&report.id).await.unwrap().users_ids.len(), 2);
        });
    }

    #[tokio::test]
    async fn concurrent_duplicate_reports_keep_one_entry() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let reporter = create_user(&db, "reporter").await;
            let post = create_post(&db, &author, "Lost wallet").await;

            let results = join_all(
                (0..6).map(|_| Report::submit(&db, &reporter, report_post(&post.id, "spam"))),
            )
            .await;

            assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
            for err in results.into_iter().filter_map(Result::err) {
                assert_eq!(err.error_type.kind(), ErrorKind::Conflict);
            }

            let reports = db
                .fetch_reports(Pagination::new(1, 10).unwrap())
                .await
                .unwrap();
            assert_eq!(reports.len(), 1);
            assert_eq!(reports[0].users_ids, vec![reporter.id.clone()]);
        });
    }

    #[tokio::test]
    async fn concurrent_first_reports_by_different_users_all_land() {
        database_test!(|db| async move {
            let author = create_user(&db, "author").await;
            let post = create_post(&db, &author, "Lost wallet").await;

            let mut reporters = Vec::new();
            for i in 0..6 {
                reporters.push(create_user(&db, &format!("reporter{i}")).await);
            }

            let results = join_all(
                reporters
                    .iter()
                    .map(|reporter| Report::submit(&db, reporter, report_post(&post.id, "spam"))),
            )
            .await;

            for result in &results {
                assert!(result.is_ok(), "{result:?}");
            }

            let reports = db
                .fetch_reports(Pagination::new(1, 10).unwrap())
                .await
                .unwrap();
            assert_eq!(reports.len(), 1);

            let mut listed = reports[0].users_ids.clone();
            listed.sort();
            let mut expected: Vec<String> = reporters.iter().map(|user| user.id.clone()).collect();
            expected.sort();
            assert_eq!(listed, expected);
        });
    }

    #[tokio::test]
    async fn unknown_target() {
        database_test!(|db| async move {
            let reporter = create_user(&db, "reporter").await;
            let err = Report::submit(
                &db,
                &reporter,
                report_post("01HZZZZZZZZZZZZZZZZZZZZZZZ", "spam"),
            )
            .await
            .unwrap_err();
            assert!(matches!(err.error_type, ErrorType::UnknownPost));

            assert!(matches!(
                db.fetch_report("01HZZZZZZZZZZZZZZZZZZZZZZZ")
                    .await
                    .unwrap_err()
                    .error_type,
                ErrorType::UnknownReport
            ));
        });
    }
}
