use std::sync::Arc;

use tenderi_store::{
    InMemoryPonudeRepository, InMemoryPostupciRepository, PonudeRepository, PostupciRepository,
};

#[cfg(feature = "postgres")]
use sqlx::PgPool;
#[cfg(feature = "postgres")]
use tenderi_store::postgres::{self, PgPonudeRepository, PgPostupciRepository};

/// Shared repository handles injected into every handler.
#[derive(Clone)]
pub struct AppServices {
    pub ponude: Arc<dyn PonudeRepository>,
    pub postupci: Arc<dyn PostupciRepository>,
}

pub async fn build_services() -> AppServices {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_persistent {
        #[cfg(feature = "postgres")]
        {
            return build_persistent_services().await;
        }
        #[cfg(not(feature = "postgres"))]
        {
            tracing::warn!(
                "USE_PERSISTENT_STORES=true but postgres feature not enabled, falling back to in-memory"
            );
            return build_in_memory_services();
        }
    }

    build_in_memory_services()
}

fn build_in_memory_services() -> AppServices {
    // In-memory stores (dev/test): fresh tables per process.
    AppServices {
        ponude: Arc::new(InMemoryPonudeRepository::new()),
        postupci: Arc::new(InMemoryPostupciRepository::new()),
    }
}

#[cfg(feature = "postgres")]
async fn build_persistent_services() -> AppServices {
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to Postgres");

    postgres::ensure_schema(&pool)
        .await
        .expect("Failed to ensure database schema");

    AppServices {
        ponude: Arc::new(PgPonudeRepository::new(pool.clone())),
        postupci: Arc::new(PgPostupciRepository::new(pool)),
    }
}
