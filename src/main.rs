mod archive;
mod config;
mod data;
mod error;
mod instrument;

use anyhow::{Context, Result};

use config::Config;
use data::loader::Mersi3Rsr;
use instrument::MERSI3_BAND_NAMES;

const PLATFORMS: [&str; 1] = ["FY-3F"];

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().context("loading configuration")?;

    for platform_name in PLATFORMS {
        let path = archive::convert_to_archive::<Mersi3Rsr>(
            platform_name,
            &MERSI3_BAND_NAMES,
            &config,
        )
        .with_context(|| format!("converting MERSI-3 RSR for {platform_name}"))?;
        log::info!("Archive written: {}", path.display());
    }

    Ok(())
}
