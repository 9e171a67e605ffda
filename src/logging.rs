//! Logging and tracing infrastructure for memscope.
//!
//! Resolution passes log through `tracing`; hosts choose where the events go
//! by installing a subscriber, usually through one of the initializers here.

use std::sync::Once;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

static INIT: Once = Once::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global tracing subscriber.
///
/// This should be called once at program startup.
/// Subsequent calls are ignored, as is a subscriber already installed by the host.
pub fn init_tracing() {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        if tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt_layer)
            .try_init()
            .is_ok()
        {
            info!("memscope tracing initialized");
        }
    });
}

/// Initialize tracing with JSON output for structured logging.
pub fn init_tracing_json() {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_current_span(true);

        if tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt_layer)
            .try_init()
            .is_ok()
        {
            info!("memscope tracing initialized (JSON mode)");
        }
    });
}

/// Span covering one draw pass over a tree.
#[macro_export]
macro_rules! draw_span {
    ($root:expr) => {
        tracing::debug_span!("draw_pass", root = %$root)
    };
    ($root:expr, $($field:tt)*) => {
        tracing::debug_span!("draw_pass", root = %$root, $($field)*)
    };
}
