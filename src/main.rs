use std::path::PathBuf;

use clap::Parser;
use still_life::{
    config::AppConfig,
    logging::{init_logging, LoggingConfig},
    StillLifeApp,
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Dimensions {
    width: u32,
    height: u32,
}

impl std::str::FromStr for Dimensions {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once('x')
            .ok_or_else(|| anyhow::anyhow!("expected WIDTHxHEIGHT, got '{}'", s))?;
        let width: u32 = width.trim().parse()?;
        let height: u32 = height.trim().parse()?;
        anyhow::ensure!(width > 0 && height > 0, "window size must be non-zero");
        Ok(Dimensions { width, height })
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Fly a camera around a lit still-life scene")]
struct Args {
    #[arg(long, default_value = "textures")]
    /// Directory containing the scene textures
    assets: PathBuf,

    #[arg(short, long, default_value = "1000x800")]
    /// Window size in format `width`x`height`
    size: Dimensions,

    #[arg(long)]
    /// Window title
    title: Option<String>,

    #[arg(long)]
    /// Start with the orthographic projection
    orthographic: bool,

    #[arg(long)]
    /// Log filter in env_logger syntax, overrides RUST_LOG
    log: Option<String>,
}

impl Args {
    fn into_config(self) -> AppConfig {
        let mut config = AppConfig {
            asset_dir: self.assets,
            start_orthographic: self.orthographic,
            ..AppConfig::default()
        };
        config.window.width = self.size.width;
        config.window.height = self.size.height;
        if let Some(title) = self.title {
            config.window.title = title;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    let config = args.into_config();
    log::info!(
        "Starting {}x{} with textures from {}",
        config.window.width,
        config.window.height,
        config.asset_dir.display()
    );

    StillLifeApp::new(config)?.run()
}
