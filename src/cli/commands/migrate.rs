//! Migrate command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    // Opening the store applies anything pending.
    let store = Store::new(&config.general.database_path).await?;
    let applied = store.applied_migrations().await?;

    println!("Database: {}", config.general.database_path);
    println!("Applied migrations ({} total)", applied.len());
    println!("{:-<50}", "");
    for name in applied {
        println!("  {name}");
    }

    Ok(())
}
