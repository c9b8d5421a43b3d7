//! Permission template command handlers

use crate::config::Config;
use crate::constants::permissions::SUPERUSER;
use crate::db::Store;

pub async fn cmd_template_list(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let templates = store.list_templates().await?;

    if templates.is_empty() {
        println!("No permission templates defined.");
        return Ok(());
    }

    let admin = config.admin_template();

    println!("Permission Templates ({} total)", templates.len());
    println!("{:-<70}", "");

    for entry in templates {
        let marker = if entry.template.id == admin {
            " [admin]"
        } else if entry.items.iter().any(|i| i == SUPERUSER) {
            " [superuser]"
        } else {
            ""
        };

        println!("{} {}{}", entry.template.id, entry.template.name, marker);
        if !entry.template.descr.is_empty() {
            println!("  {}", entry.template.descr);
        }
        println!("  Items ({}): {}", entry.items.len(), entry.items.join(", "));
    }

    Ok(())
}

pub async fn cmd_template_add(
    config: &Config,
    name: &str,
    descr: &str,
    items: &[String],
) -> anyhow::Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Template name cannot be empty");
    }

    let store = Store::new(&config.general.database_path).await?;

    if store.find_template_by_name(name).await?.is_some() {
        anyhow::bail!("Permission template '{name}' already exists");
    }

    let id = store.create_template(name, descr, items).await?;
    println!("Created permission template '{name}' (ID: {id}) with {} item(s)", items.len());

    Ok(())
}
