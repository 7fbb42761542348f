use execution_report::{cli::run_cli, init_with_filter};
use report_config::{resolve_home, ConfigManager};

fn main() {
    let log_filter = ConfigManager::with_base_dir(resolve_home())
        .and_then(|manager| manager.load())
        .ok()
        .and_then(|config| config.log_filter);
    init_with_filter(log_filter.as_deref());

    if let Err(err) = run_cli() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
