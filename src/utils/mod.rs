pub mod build_info;
pub mod persistence;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

/// Installs the global tracing subscriber, honouring `RUST_LOG` on top of an
/// info-level default for this crate. Called once through [`crate::init`].
pub fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "cashflow_core=info".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
