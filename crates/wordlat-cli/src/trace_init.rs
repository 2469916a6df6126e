use std::path::Path;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

static INIT: Once = Once::new();

/// Install the global subscriber: human-readable events on stderr, plus
/// JSON lines in `<log_dir>/wordlat-trace.jsonl` when `log_dir` is given.
///
/// `RUST_LOG` overrides `default_filter`. Later calls are no-ops and return
/// `None`. Hold the returned guard until exit so the file writer flushes.
pub fn init_tracing(default_filter: &str, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let mut file_guard = None;
    INIT.call_once(|| {
        let filter = || {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
        };

        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter());

        let json_layer = log_dir.map(|dir| {
            let file_appender = tracing_appender::rolling::never(dir, "wordlat-trace.jsonl");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            file_guard = Some(guard);
            fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_target(true)
                .with_span_events(fmt::format::FmtSpan::CLOSE)
                .with_filter(filter())
        });

        let _ = tracing_subscriber::registry()
            .with(stderr_layer)
            .with(json_layer)
            .try_init();
    });
    file_guard
}
