use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::auth::repo::{PgUserRepo, UserRepo};
use crate::config::AppConfig;
use crate::pastes::repo::{PasteRepo, PgPasteRepo};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pastes: Arc<dyn PasteRepo>,
    pub users: Arc<dyn UserRepo>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("run migrations")?;

        let pastes = Arc::new(PgPasteRepo::new(db.clone())) as Arc<dyn PasteRepo>;
        let users = Arc::new(PgUserRepo::new(db)) as Arc<dyn UserRepo>;
        Ok(Self::from_parts(config, pastes, users))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        pastes: Arc<dyn PasteRepo>,
        users: Arc<dyn UserRepo>,
    ) -> Self {
        Self {
            config,
            pastes,
            users,
        }
    }

    /// State backed by empty in-memory stores.
    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::testing::{test_config, MemoryPasteRepo, MemoryUserRepo};

        Self::from_parts(
            Arc::new(test_config()),
            Arc::new(MemoryPasteRepo::default()),
            Arc::new(MemoryUserRepo::default()),
        )
    }
}
