pub mod build_info;

use tracing_subscriber::{fmt, EnvFilter};

/// Directive applied when no filter is configured.
pub const DEFAULT_LOG_DIRECTIVE: &str = "execution_report=info";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` is always honoured; `filter` replaces the built-in directive
/// when given. Logs go to stderr so they never mix with shell output.
/// A subscriber that is already installed is left in place; callers go
/// through [`crate::init_with_filter`], which runs this once.
pub fn init_tracing(filter: Option<&str>) {
    let mut env_filter = EnvFilter::from_default_env();
    let directives = filter
        .unwrap_or(DEFAULT_LOG_DIRECTIVE)
        .split(',')
        .map(str::trim)
        .filter(|directive| !directive.is_empty());
    for directive in directives {
        match directive.parse() {
            Ok(parsed) => env_filter = env_filter.add_directive(parsed),
            Err(err) => eprintln!("ignoring log directive `{directive}`: {err}"),
        }
    }

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
