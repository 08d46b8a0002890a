use std::process::ExitCode;

use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

/// `LOG_FORMAT=json` switches to structured output; `RUST_LOG` sets the filter.
fn init_logging() {
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => common::utils::logging::init_logging_json(),
        _ => common::utils::logging::init_logging_default(),
    }
}

fn install_panic_hook(instance: Uuid) {
    std::panic::set_hook(Box::new(move |panic| {
        error!(%instance, message = %panic, "panic");
    }));
}

fn main() -> ExitCode {
    dotenv().ok();
    init_logging();

    let instance = Uuid::new_v4();
    install_panic_hook(instance);

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = cfg.server.worker_threads {
        builder.worker_threads(threads);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        %instance,
        version = env!("CARGO_PKG_VERSION"),
        threads = ?cfg.server.worker_threads,
        "users service starting"
    );

    match rt.block_on(server::run(cfg, server::startup::ctrl_c())) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "users service failed");
            ExitCode::FAILURE
        }
    }
}
