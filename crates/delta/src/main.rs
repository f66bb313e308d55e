use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use axum::{
    extract::FromRef,
    http::{HeaderValue, Method},
    middleware, Router,
};
use lostfound_config::{config, Settings};
use lostfound_database::{search::SearchService, Database, DatabaseInfo};
use lostfound_ratelimits::axum::{ratelimit_middleware, RatelimitStorage};
use lostfound_result::create_error;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::services::{classifier::Classifier, push::Push};
use crate::util::ratelimits::DeltaRatelimits;

mod routes;
mod services;
mod util;

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub search: SearchService,
    pub classifier: Classifier,
    pub push: Push,
    pub ratelimits: RatelimitStorage,
}

impl AppState {
    pub fn new(database: Database, settings: &Settings) -> AppState {
        AppState {
            search: SearchService::from_config(database.clone(), settings),
            classifier: Classifier::new(&settings.services.classifier),
            push: Push::new(&settings.services.push),
            ratelimits: RatelimitStorage::new(
                DeltaRatelimits::from(&settings.ratelimits),
                Duration::from_secs(settings.ratelimits.window_seconds),
            ),
            database,
        }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.database.clone()
    }
}

impl FromRef<AppState> for SearchService {
    fn from_ref(state: &AppState) -> Self {
        state.search.clone()
    }
}

impl FromRef<AppState> for Classifier {
    fn from_ref(state: &AppState) -> Self {
        state.classifier.clone()
    }
}

impl FromRef<AppState> for Push {
    fn from_ref(state: &AppState) -> Self {
        state.push.clone()
    }
}

impl FromRef<AppState> for RatelimitStorage {
    fn from_ref(state: &AppState) -> Self {
        state.ratelimits.clone()
    }
}

struct TokenAddon;

impl Modify for TokenAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        components.add_security_scheme(
            "Bearer Token",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&TokenAddon),
    paths(
        routes::root::root,
        routes::posts::post_feed::req,
        routes::posts::post_fetch::req,
        routes::posts::post_fetch_by_user::req,
        routes::posts::post_fetch_reposted::req,
        routes::posts::post_search::req,
        routes::posts::post_create::req,
        routes::posts::post_edit::req,
        routes::posts::post_delete::req,
        routes::posts::post_repost::req,
        routes::posts::like_toggle::req,
        routes::posts::like_members::req,
        routes::comments::comment_create::req,
        routes::comments::comment_fetch::req,
        routes::comments::comment_reply::req,
        routes::comments::comment_edit::req,
        routes::comments::comment_delete::req,
        routes::reports::report_create::req,
        routes::reports::report_list::req,
        routes::reports::report_fetch::req,
        routes::users::fetch_user::req,
        routes::users::find_users::req,
        routes::statuses::status_create::req,
        routes::statuses::status_list::req,
        routes::statuses::status_fetch_user::req,
        routes::statuses::status_delete::req,
        routes::messages::message_send::req,
        routes::messages::conversations::req,
        routes::messages::message_thread::req,
        routes::predict::image_predict::req,
        routes::notifications::notification_send::req,
    ),
    tags(
        (name = "Misc", description = "Service information."),
        (name = "Posts", description = "Lost and found item listings."),
        (name = "Likes", description = "Liking posts."),
        (name = "Comments", description = "Comments and replies on posts."),
        (name = "Reports", description = "Reporting content."),
        (name = "Users", description = "Looking up users."),
        (name = "Statuses", description = "Ephemeral image statuses."),
        (name = "Messages", description = "Direct messages between users."),
        (name = "Services", description = "Image classification and push notifications."),
    ),
    components(
        schemas(
            lostfound_result::Error,
            lostfound_result::ErrorType,
            lostfound_result::ValidationDetail,
        )
    ),
)]
struct ApiDoc;

/// Build the router with every route and layer
pub fn app(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .allow_origin(if allowed_origins.iter().any(|origin| origin == "*") {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(
                allowed_origins
                    .iter()
                    .filter_map(|origin| HeaderValue::from_str(origin).ok()),
            )
        });

    Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(routes::router())
        .fallback(|| async { create_error!(NotFound) })
        .layer(middleware::from_fn_with_state(
            state.clone(),
            ratelimit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Configure logging and environment
    lostfound_config::configure!();
    lostfound_config::init().await;

    let config = config().await;
    let database = DatabaseInfo::Auto
        .connect()
        .await
        .expect("Unable to connect to database");

    let app = app(AppState::new(database, &config), &config.api.allowed_origins);

    // Configure TCP listener and bind
    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.api.port));
    tracing::info!("Listening on {address}");
    tracing::info!(
        "Play around with the API: http://localhost:{}/scalar",
        config.api.port
    );

    let listener = TcpListener::bind(&address).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}
