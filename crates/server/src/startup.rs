use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::AppConfig;
use service::runtime;

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    // demo frontends connect from arbitrary localhost ports
    CorsLayer::very_permissive()
}

/// Load configuration, falling back to env vars when config.toml is absent.
/// An invalid fallback (say `SERVER_PORT=0`) fails startup rather than
/// binding somewhere unintended.
fn load_config() -> anyhow::Result<AppConfig> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(_) => {
            let mut cfg = AppConfig::default();
            if let Ok(host) = env::var("SERVER_HOST") {
                cfg.server.host = host;
            }
            if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse().ok()) {
                cfg.server.port = port;
            }
            if let Ok(dir) = env::var("DATA_DIR") {
                cfg.data.dir = dir;
            }
            // normalize fills upload_dir and the weather key from env
            cfg.normalize_and_validate()?;
            Ok(cfg)
        }
    }
}

/// Public entry: build the app and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let cfg = load_config()?;
    runtime::ensure_env(&cfg.data.dir, &cfg.data.upload_dir).await?;

    let state = ServerState::build(&cfg).await?;
    let app: Router = routes::build_router(build_cors(), state, &cfg.data.upload_dir);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting backend suite");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // one test owns both env vars, so no parallel-test interference
    #[test]
    fn invalid_port_in_env_fallback_fails_startup() {
        std::env::set_var("CONFIG_PATH", "/nonexistent/config.toml");
        std::env::set_var("SERVER_PORT", "0");
        assert!(load_config().is_err());

        std::env::remove_var("SERVER_PORT");
        let cfg = load_config().expect("defaults should validate");
        assert_eq!(cfg.server.port, 8080);
        std::env::remove_var("CONFIG_PATH");
    }
}
