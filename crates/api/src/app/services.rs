//! Service wiring: store selection, route cache, credential provider.

use std::sync::Arc;

use billdesk_auth::{CredentialProvider, StaticCredentialProvider};
use billdesk_infra::{DashboardStore, MemoryStore, PostgresStore, RouteCache};

pub struct AppServices {
    pub store: Arc<dyn DashboardStore>,
    pub cache: Arc<RouteCache>,
    pub auth: Arc<dyn CredentialProvider>,
}

/// Pick the store from the environment: `DATABASE_URL` selects Postgres,
/// otherwise an in-memory store backs a standalone dev server.
pub async fn build_services() -> AppServices {
    let store: Arc<dyn DashboardStore> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = sqlx::PgPool::connect(&url)
                .await
                .expect("failed to connect to DATABASE_URL");
            tracing::info!("using postgres store");
            Arc::new(PostgresStore::new(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    AppServices {
        store,
        cache: Arc::new(RouteCache::new()),
        auth: Arc::new(StaticCredentialProvider::from_env()),
    }
}
