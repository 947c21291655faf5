use crate::config::Config;
use sqlx::SqlitePool;
use std::sync::Arc;
use tpe_db::events::EventBus;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub events: EventBus,
    pub config: Arc<Config>,
}
