pub use tracing::{debug, error, info, warn, trace, instrument};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Installs the global subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise the filter is `debug` for `verbose` and `info` else.
/// Span close events (with their busy/idle times) are only emitted at debug level.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback));
    let span_events = if env_filter.to_string().contains("debug") {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    // Keep whichever subscriber got there first.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
