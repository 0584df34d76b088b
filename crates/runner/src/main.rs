use std::io;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use rex_exchange::{Exchange, SimulatorConfig};
use rex_runner::Session;

/// Command line arguments for the simulator
#[derive(Parser, Debug)]
#[command(author, version, about = "Currency exchange simulator")]
struct Args {
    /// Path to a JSON configuration file (embedded defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Order record dataset to load
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Name of the simulated user
    #[arg(short, long)]
    user: Option<String>,

    /// Matching algorithm (book-order or price-priority)
    #[arg(short, long)]
    matcher: Option<String>,
}

impl Args {
    /// Load the base configuration and apply command line overrides
    fn into_config(self) -> Result<SimulatorConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading configuration from: {}", path.display());
                SimulatorConfig::from_file(path)?
            }
            None => SimulatorConfig::load_default()?,
        };

        if let Some(dataset) = self.dataset {
            config.dataset = dataset;
        }
        if let Some(user) = self.user {
            config.user = user;
        }
        if let Some(matcher) = self.matcher {
            config.matching_algorithm = matcher;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config()?;
    info!("Dataset: {}", config.dataset.display());
    info!("User: {}", config.user);
    info!("Matching algorithm: {}", config.matching_algorithm);

    let exchange = Exchange::from_config(&config)?;

    let stdin = io::stdin();
    let mut session = Session::new(exchange, stdin.lock(), io::stdout());
    session.run()?;

    info!("Exchange simulator stopped");
    Ok(())
}
