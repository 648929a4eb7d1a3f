use jtl::commands::Cli;
use jtl::libs::messages::macros::is_debug_mode;
use jtl::msg_error;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let default_level = if is_debug_mode() { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(e) = Cli::menu().await {
        msg_error!(format!("{:#}", e));
        std::process::exit(1);
    }
}
