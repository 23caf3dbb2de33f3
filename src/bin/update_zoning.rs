//! Merge a CSV zone listing into the JSON zone map
//!
//! The listing has the columns `departement,commune,zone` and an optional
//! `departement_nom`. Divisions present in the listing replace their previous
//! subdivision table; other divisions are kept.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use borrowing_capacity::zoning::{ZoneMap, DEFAULT_ZONING_PATH};

#[derive(Parser, Debug)]
#[command(name = "update_zoning", about = "Merge a CSV zone listing into the JSON zone map")]
struct Cli {
    /// CSV listing to import
    listing: PathBuf,

    #[arg(long, default_value = DEFAULT_ZONING_PATH, help = "Zone map to update")]
    zoning: PathBuf,

    #[arg(long, help = "Report what would change without writing")]
    dry_run: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let incoming = ZoneMap::from_csv_path(&cli.listing)
        .with_context(|| format!("Failed to read zone listing {}", cli.listing.display()))?;
    println!(
        "Read {} subdivisions in {} divisions from {}",
        incoming.len(),
        incoming.divisions().count(),
        cli.listing.display()
    );

    let mut map = if cli.zoning.exists() {
        match ZoneMap::from_json_path(&cli.zoning) {
            Ok(existing) => existing,
            Err(e) => {
                log::warn!("{} is unreadable ({}), it will be overwritten", cli.zoning.display(), e);
                ZoneMap::new()
            }
        }
    } else {
        ZoneMap::new()
    };
    let before = map.len();

    map.merge(incoming);
    println!("Zone map: {} subdivisions before, {} after merge", before, map.len());

    if cli.dry_run {
        println!("Dry run, {} left unchanged", cli.zoning.display());
        return Ok(());
    }

    map.save_json(&cli.zoning)
        .with_context(|| format!("Failed to write zone map {}", cli.zoning.display()))?;
    println!("Updated {}", cli.zoning.display());
    Ok(())
}
