use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => common::utils::logging::init_logging_default(),
        LogFormat::Json => common::utils::logging::init_logging_json(),
    }
    info!(service = "transfers-api", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG and MONGODB_* are visible to everything below
    dotenv().ok();

    // config.toml (optional) + environment overrides, validated
    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            // No config yet, so log the failure in the default format
            common::utils::logging::init_logging_default();
            error!(service = "transfers-api", event = "config_invalid", error = %format!("{e:#}"), "error parsing config");
            return std::process::ExitCode::FAILURE;
        }
    };
    init_logging(cfg.logging.format);

    // Process context attached to start/stop/panic events
    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // Panic hook: report panics as structured events
    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "transfers-api",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    // Multi-thread runtime sized by server.worker_threads
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "transfers-api", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    // Startup event
    info!(
        service = "transfers-api",
        event = "start",
        %service_id,
        pid,
        version,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "transfers service starting"
    );

    // Serves until Ctrl+C / SIGTERM; shutdown is graceful inside server::run
    rt.block_on(async move {
        match server::run(cfg).await {
            Ok(()) => {
                info!(service = "transfers-api", event = "stop", %service_id, pid, "server stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "transfers-api", event = "run_failed", error = %e, "server::run returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
