//! Seed command implementation.

use labstore_market::Marketplace;
use std::path::Path;
use tracing::info;

/// Runs the seed command: opens the marketplace once so every collection
/// hydrates and first-run seeds are written through.
pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!("Seeding store at {}", path.display());

    let market = Marketplace::open(path)?;

    println!("Seeded store at {}", path.display());
    println!("  tests:         {}", market.catalog().tests().len());
    println!("  packs:         {}", market.catalog().packs().len());
    println!("  laboratories:  {}", market.laboratories().list().len());
    println!("  users:         {}", market.accounts().list().len());
    println!("  faq:           {}", market.faq().list().len());
    println!("  offers:        {}", market.offers().list().len());

    market.close()?;
    Ok(())
}
