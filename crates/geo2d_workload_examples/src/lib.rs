#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{render_preview_to_png, RenderConfig};

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber writing to stderr; `RUST_LOG` overrides the
/// default `info` level.
///
/// Stdout stays reserved for data the binaries emit.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
