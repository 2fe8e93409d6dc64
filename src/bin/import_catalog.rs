// Dev utility: parse a product sheet (CSV/XLSX) and print the resulting catalog as JSON.
//
// Usage:
//   cargo run --bin import_catalog -- <products.csv|products.xlsx> [--merge]
//
// With --merge the imported products are merged over the configured catalog
// (destinations included), otherwise only the imported products are printed.

use export_pricing::config::ConfigManager;
use export_pricing::importer::CatalogImporter;
use export_pricing::logging;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("usage: import_catalog <file> [--merge]"))?;
    let merge = args.any(|a| a == "--merge");

    let imported = CatalogImporter::new().import_catalog(&path)?;

    let catalog = if merge {
        let mut manager = ConfigManager::load_default()?;
        manager.merge_catalog(imported);
        manager.catalog().clone()
    } else {
        imported
    };

    println!("{}", serde_json::to_string_pretty(&catalog)?);
    Ok(())
}
