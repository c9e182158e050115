//! Application state wiring the engine to its concrete adapters.
//!
//! The engine is generic over store and transport traits; AppState pins
//! them to the SQLite settings store and the REST transport.

use std::sync::Arc;

use steward_core::interaction::InteractionHub;
use steward_infra::config::{load_config, resolve_data_dir, AppConfig};
use steward_infra::sqlite::guild::SqliteGuildRepository;
use steward_infra::sqlite::pool::DatabasePool;
use steward_infra::sqlite::settings::SqliteSettingsStore;

use crate::transport::RestTransport;

/// Shared application state used by the HTTP handlers and feature
/// command handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub hub: InteractionHub,
    pub transport: Arc<RestTransport>,
    pub settings: Arc<SqliteSettingsStore>,
    pub guilds: Arc<SqliteGuildRepository>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to the
    /// database, wire the adapters.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        let db_url = config.database_url.clone().unwrap_or_else(|| {
            format!("sqlite://{}?mode=rwc", data_dir.join("steward.db").display())
        });
        let db_pool = DatabasePool::new(&db_url).await?;

        let transport = Arc::new(RestTransport::new(&config.api_base_url, &config.bot_token));

        Ok(Self {
            config: Arc::new(config),
            hub: InteractionHub::new(),
            transport,
            settings: Arc::new(SqliteSettingsStore::new(db_pool.clone())),
            guilds: Arc::new(SqliteGuildRepository::new(db_pool.clone())),
            db_pool,
        })
    }
}
