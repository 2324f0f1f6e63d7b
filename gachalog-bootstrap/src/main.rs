use anyhow::Result;
use clap::Parser;

use gachalog_infrastructure::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "gachalog-server")]
#[command(about = "Gacha history upload and query server", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("GACHALOG_CONFIG", config);
    }

    let config = AppConfig::load().await?;
    let _guard = gachalog_bootstrap::init_tracing(config.log_dir.as_deref());
    config.log_source();

    gachalog_bootstrap::run_standalone(config).await
}
