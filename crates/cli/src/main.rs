use std::io;

use anyhow::Context;
use stockfile_cli::{Config, Menu};
use stockfile_inventory::InventoryStore;

fn main() -> anyhow::Result<()> {
    stockfile_observability::init();

    let config = Config::from_env_and_args().context("invalid configuration")?;
    tracing::info!(path = %config.inventory_path.display(), "opening inventory");

    let mut store = InventoryStore::open(&config.inventory_path);
    let stdin = io::stdin();
    let mut menu = Menu::new(&mut store, stdin.lock(), io::stdout().lock());
    menu.run().context("terminal IO failed")?;

    Ok(())
}
