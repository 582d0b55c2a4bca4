use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "SNH48LIVE_LOG";

/// Installs the stderr subscriber, filtered by `SNH48LIVE_LOG` (default "info").
///
/// Lines look like `WARN malformed filename 'x.yml'`; with `timestamps`
/// they are prefixed by a timestamp.
pub fn init_tracing(timestamps: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer().with_writer(io::stderr).with_target(false);
    let registry = tracing_subscriber::registry().with(filter);
    if timestamps {
        registry.with(layer).init();
    } else {
        registry.with(layer.without_time()).init();
    }
}
