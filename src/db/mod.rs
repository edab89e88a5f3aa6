mod schema;
pub mod queries;
pub mod store;

pub use schema::init_db;

use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::describe::DescriptionGenerator;
use crate::views::ViewTracker;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Application state holding the store pool and shared collaborators
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    /// Stale-view tracker shared with the presentation layer
    pub views: Arc<ViewTracker>,
    /// Bearer key guarding the admin surface
    pub admin_api_key: String,
    /// Product description generation capability
    pub describer: Arc<dyn DescriptionGenerator>,
}

pub fn create_pool(database_path: &str) -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::file(database_path);
    Pool::builder().max_size(10).build(manager)
}
