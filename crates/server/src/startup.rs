use std::future::Future;
use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, ServerConfig};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, AppState};
use service::users::{repo::seaorm::SeaOrmUserRepository, repository::UserRepository, UserSettings};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Bind host/port from the server section; host names are resolved.
pub async fn bind_listener(server: &ServerConfig) -> anyhow::Result<TcpListener> {
    Ok(TcpListener::bind((server.host.as_str(), server.port)).await?)
}

/// Wire the database-backed user service into the router.
/// Fails before serving anything if the email pattern does not compile.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    models::db::ensure_schema(&db).await?;

    let settings = UserSettings::from_config(&cfg.users)?;
    info!(min_age = settings.min_age(), "user settings loaded");

    let repo: Arc<dyn UserRepository> = Arc::new(SeaOrmUserRepository::new(db));
    Ok(routes::build_router(AppState::new(repo, settings), build_cors()))
}

/// Resolves on Ctrl+C. A failing signal handler never triggers shutdown.
pub async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, draining connections"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await
        }
    }
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;

    let listener = bind_listener(&cfg.server).await?;
    info!(addr = %listener.local_addr()?, "starting users server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("users server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use configs::{DatabaseConfig, UsersConfig};

    fn sqlite_config(users: UsersConfig) -> AppConfig {
        AppConfig {
            server: ServerConfig { host: "127.0.0.1".into(), port: 0, worker_threads: None },
            database: DatabaseConfig {
                url: "sqlite::memory:".into(),
                max_connections: 1,
                min_connections: 1,
                ..DatabaseConfig::default()
            },
            users,
        }
    }

    #[tokio::test]
    async fn uncompilable_email_pattern_aborts_startup() {
        let cfg = sqlite_config(UsersConfig { email_regex: "([a-z".into(), min_age: 18 });
        assert!(build_app(&cfg).await.is_err());
    }

    #[tokio::test]
    async fn run_returns_once_shutdown_resolves() -> anyhow::Result<()> {
        let cfg = sqlite_config(UsersConfig::default());
        run(cfg, async {}).await
    }
}
