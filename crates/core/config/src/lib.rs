use cached::proc_macro::cached;
use config::{Config, Environment, File, FileFormat};
use futures_locks::RwLock;
use once_cell::sync::Lazy;
use serde::Deserialize;

static CONFIG_BUILDER: Lazy<RwLock<Config>> = Lazy::new(|| {
    RwLock::new({
        let mut builder = Config::builder().add_source(File::from_str(
            include_str!("../LostFound.toml"),
            FileFormat::Toml,
        ));

        if std::path::Path::new("LostFound.toml").exists() {
            builder = builder.add_source(File::new("LostFound.toml", FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("LOSTFOUND")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("api.allowed_origins"),
        );

        builder.build().expect("Invalid LostFound configuration")
    })
});

#[derive(Deserialize, Debug, Clone)]
pub struct Database {
    pub mongodb: String,
    pub database_name: String,
    pub query_timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiPagination {
    pub default_page_size: i64,
    pub max_page_size: i64,
    pub default_comment_page_size: i64,
    pub default_like_page_size: i64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Api {
    pub port: u16,
    pub token_secret: String,
    pub allowed_origins: Vec<String>,
    pub pagination: ApiPagination,
}

/// How repeated reposts by the same user are stored
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepostPolicy {
    /// A user appears at most once in a post's repost list
    #[default]
    Dedup,
    /// Every repost is appended, repeated ones included
    Multiset,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Features {
    pub repost_policy: RepostPolicy,
    pub recent_comments: i64,
    pub status_lifetime_hours: i64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchOptions {
    pub threshold: f64,
    pub distance: usize,
    pub location: usize,
    pub ignore_location: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Search {
    pub posts: SearchOptions,
    pub users: SearchOptions,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServicesClassifier {
    pub endpoint: String,
    pub key: String,
    pub timeout_ms: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServicesPush {
    pub endpoint: String,
    pub app_id: String,
    pub key: String,
    pub timeout_ms: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Services {
    pub classifier: ServicesClassifier,
    pub push: ServicesPush,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Ratelimits {
    pub window_seconds: u64,
    pub posts: u32,
    pub likes: u32,
    pub comments: u32,
    pub reports: u32,
    pub search: u32,
    pub messages: u32,
    pub statuses: u32,
    pub predict: u32,
    pub any: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub database: Database,
    pub api: Api,
    pub features: Features,
    pub search: Search,
    pub services: Services,
    pub ratelimits: Ratelimits,
}

pub async fn init() {
    tracing::info!("LostFound configuration: {:?}", config().await);
}

pub async fn read() -> Config {
    CONFIG_BUILDER.read().await.clone()
}

#[cached(time = 30)]
pub async fn config() -> Settings {
    read()
        .await
        .try_deserialize::<Settings>()
        .expect("LostFound configuration does not match the expected layout")
}

/// Load `.env` and install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the default filter.
pub fn setup_logging(crate_name: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=debug,lostfound_database=info,lostfound_ratelimits=info,tower_http=debug,info",
            crate_name.replace('-', "_")
        ))
    });

    // try_init: tests may configure more than once per process
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Configure logging and environment for a binary
#[macro_export]
macro_rules! configure {
    () => {
        $crate::setup_logging(env!("CARGO_PKG_NAME"));
    };
}

#[cfg(test)]
mod tests {
    use crate::{config, RepostPolicy};

    #[async_std::test]
    async fn embedded_defaults_deserialize() {
        let settings = config().await;

        assert_eq!(settings.features.repost_policy, RepostPolicy::Dedup);
        assert_eq!(settings.features.recent_comments, 2);
        assert_eq!(settings.api.pagination.default_page_size, 5);
        assert!((settings.search.posts.threshold - 0.4).abs() < f64::EPSILON);
        assert!(settings.search.users.ignore_location);
    }
}
