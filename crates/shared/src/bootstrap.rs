use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize dotenvy
pub fn init_env() {
    dotenvy::dotenv().ok();
}

/// Initialize tracing with optional file logging
///
/// Console output goes to stderr so that a binary's stdout stays clean.
/// When `LOG_DIR` is set, a JSON-lines file is also written there; the
/// returned guard must be kept alive for the file to be flushed.
pub fn init_tracing(service_name: &str) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("info,{}=debug,planner_core=info", service_name);

    let (file_layer, guard) = match std::env::var("LOG_DIR") {
        Ok(log_dir) => {
            let now = chrono::Local::now().format("%y-%m-%d-%H-%M-%S").to_string();
            let filename = format!("planner-{}.log.{}.jsonl", service_name, now);

            let file_appender = tracing_appender::rolling::never(&log_dir, filename);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}
