mod platform;

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use platform::config::{AppConfig, LogTarget};

/// Terminal storefront: browse, filter and page listings, keep a cart, bid.
#[derive(Parser, Debug)]
#[command(name = "marketfront", version)]
struct Cli {
    /// RON config file; missing means defaults.
    #[arg(short, long, default_value = "marketfront.ron")]
    config: PathBuf,

    /// Override the API base URL.
    #[arg(long)]
    api_url: Option<String>,

    /// Location to open on startup, e.g. `/search?nav=new&page=2`.
    #[arg(short, long)]
    location: Option<String>,

    /// Log debug output to the terminal as well.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }
    if let Some(location) = cli.location {
        config.start_location = location;
    }

    let level = if cli.verbose {
        config.log_target = LogTarget::Both;
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    market_logging::initialize(config.log_destination(), level);

    platform::run_app(config)
}
