use axum::extract::State;
use chrono::Utc;
use lostfound_config::config;
use lostfound_database::{util::pagination::Pagination, Database, Status, User};
use lostfound_models::v0;
use lostfound_result::Result;

use crate::util::{json::Json, query::Query};

/// # Fetch Statuses
///
/// Every active status, newest first.
#[utoipa::path(
    get,
    path = "/statuses",
    tag = "Statuses",
    operation_id = "fetchStatuses",
    security(("Bearer Token" = [])),
    params(v0::OptionsPagination),
    responses(
        (status = 200, description = "Page of statuses", body = v0::ApiResponse<Vec<v0::StatusWithUser>>),
    )
)]
pub async fn req(
    _user: User,
    State(db): State<Database>,
    Query(options): Query<v0::OptionsPagination>,
) -> Result<Json<v0::ApiResponse<Vec<v0::StatusWithUser>>>> {
    let config = config().await;
    let pagination = Pagination::from_options(
        &options,
        config.api.pagination.default_page_size,
        config.api.pagination.max_page_size,
    )?;

    let statuses = db.fetch_active_statuses(Utc::now(), pagination).await?;
    Ok(Json(v0::ApiResponse::new(
        Status::with_users(&db, statuses).await?,
    )))
}
