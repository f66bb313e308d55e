use axum::extract::State;
use lostfound_config::config;
use lostfound_database::{util::pagination::Pagination, Database, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::{json::Json, query::Query};

/// # Fetch Reports
#[utoipa::path(
    get,
    path = "/reports",
    tag = "Reports",
    operation_id = "fetchReports",
    security(("Bearer Token" = [])),
    params(v0::OptionsPagination),
    responses(
        (status = 200, description = "Page of reports", body = v0::ApiResponse<Vec<v0::Report>>),
    )
)]
pub async fn req(
    _user: User,
    State(db): State<Database>,
    Query(options): Query<v0::OptionsPagination>,
) -> Result<Json<v0::ApiResponse<Vec<v0::Report>>>> {
    let config = config().await;
    let pagination = Pagination::from_options(
        &options,
        config.api.pagination.default_page_size,
        config.api.pagination.max_page_size,
    )?;

    let reports = db
        .fetch_reports(pagination)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(v0::ApiResponse::new(reports)))
}
