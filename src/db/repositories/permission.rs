use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use tracing::info;

use crate::constants::permissions::SUPERUSER;
use crate::domain::TemplateId;
use crate::entities::{perm_items, perm_templ, perm_templ_items, prelude::*};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTemplate {
    pub id: TemplateId,
    pub name: String,
    pub descr: String,
}

impl From<perm_templ::Model> for PermissionTemplate {
    fn from(model: perm_templ::Model) -> Self {
        Self {
            id: TemplateId::new(model.id),
            name: model.name,
            descr: model.descr,
        }
    }
}

/// Template plus the names of the permission items it grants.
#[derive(Debug, Clone)]
pub struct TemplateWithItems {
    pub template: PermissionTemplate,
    pub items: Vec<String>,
}

/// Repository for permission templates and their items
pub struct PermissionRepository {
    conn: DatabaseConnection,
}

impl PermissionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_template_by_name(&self, name: &str) -> Result<Option<PermissionTemplate>> {
        let row = PermTempl::find()
            .filter(perm_templ::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .with_context(|| format!("Failed to look up permission template '{name}'"))?;

        Ok(row.map(PermissionTemplate::from))
    }

    pub async fn get_template(&self, id: TemplateId) -> Result<Option<PermissionTemplate>> {
        let row = PermTempl::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query permission template")?;

        Ok(row.map(PermissionTemplate::from))
    }

    /// Whether the template grants the named permission item.
    pub async fn template_has_item(&self, id: TemplateId, item: &str) -> Result<bool> {
        let Some(item) = PermItems::find()
            .filter(perm_items::Column::Name.eq(item))
            .one(&self.conn)
            .await
            .context("Failed to query permission item")?
        else {
            return Ok(false);
        };

        let link = PermTemplItems::find()
            .filter(perm_templ_items::Column::TemplId.eq(id.value()))
            .filter(perm_templ_items::Column::PermId.eq(item.id))
            .one(&self.conn)
            .await
            .context("Failed to query permission template items")?;

        Ok(link.is_some())
    }

    pub async fn list_templates(&self) -> Result<Vec<TemplateWithItems>> {
        let templates = PermTempl::find()
            .order_by_asc(perm_templ::Column::Id)
            .find_with_related(PermTemplItems)
            .all(&self.conn)
            .await
            .context("Failed to list permission templates")?;

        let item_names: HashMap<i32, String> = PermItems::find()
            .all(&self.conn)
            .await
            .context("Failed to list permission items")?
            .into_iter()
            .map(|item| (item.id, item.name))
            .collect();

        Ok(templates
            .into_iter()
            .map(|(template, links)| TemplateWithItems {
                template: PermissionTemplate::from(template),
                items: links
                    .iter()
                    .filter_map(|link| item_names.get(&link.perm_id).cloned())
                    .collect(),
            })
            .collect())
    }

    /// The non-superuser template granting the fewest permission items.
    ///
    /// Ties go to the lowest id. Templates holding the superuser item are
    /// never candidates.
    pub async fn minimal_privilege_template(&self) -> Result<Option<TemplateId>> {
        let superuser_item = PermItems::find()
            .filter(perm_items::Column::Name.eq(SUPERUSER))
            .one(&self.conn)
            .await
            .context("Failed to query superuser permission item")?
            .map(|item| item.id);

        let links = PermTemplItems::find()
            .all(&self.conn)
            .await
            .context("Failed to load permission template items")?;

        let mut item_counts: HashMap<i32, usize> = HashMap::new();
        let mut superuser_templates: HashSet<i32> = HashSet::new();
        for link in &links {
            *item_counts.entry(link.templ_id).or_default() += 1;
            if Some(link.perm_id) == superuser_item {
                superuser_templates.insert(link.templ_id);
            }
        }

        let templates = PermTempl::find()
            .order_by_asc(perm_templ::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to load permission templates")?;

        Ok(select_minimal(
            templates.iter().map(|t| t.id),
            &item_counts,
            &superuser_templates,
        ))
    }

    /// Create a template granting the named items.
    ///
    /// Unknown item names are rejected before anything is written.
    pub async fn create_template(
        &self,
        name: &str,
        descr: &str,
        items: &[String],
    ) -> Result<TemplateId> {
        let known: HashMap<String, i32> = PermItems::find()
            .all(&self.conn)
            .await
            .context("Failed to list permission items")?
            .into_iter()
            .map(|item| (item.name, item.id))
            .collect();

        let mut perm_ids = Vec::with_capacity(items.len());
        for item in items {
            let id = known
                .get(item)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("Unknown permission item: {item}"))?;
            perm_ids.push(id);
        }

        let txn = self.conn.begin().await?;

        let template = perm_templ::ActiveModel {
            name: Set(name.to_string()),
            descr: Set(descr.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .with_context(|| format!("Failed to create permission template '{name}'"))?;

        for perm_id in perm_ids {
            perm_templ_items::ActiveModel {
                templ_id: Set(template.id),
                perm_id: Set(perm_id),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .context("Failed to link permission item")?;
        }

        txn.commit().await?;

        info!("Created permission template {} ({})", name, template.id);
        Ok(TemplateId::new(template.id))
    }
}

/// Picks the candidate with the fewest items, lowest id first on ties.
fn select_minimal(
    template_ids: impl Iterator<Item = i32>,
    item_counts: &HashMap<i32, usize>,
    superuser_templates: &HashSet<i32>,
) -> Option<TemplateId> {
    template_ids
        .filter(|id| !superuser_templates.contains(id))
        .min_by_key(|id| (item_counts.get(id).copied().unwrap_or(0), *id))
        .map(TemplateId::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_skips_superuser_templates() {
        let counts = HashMap::from([(1, 1), (2, 5), (3, 2)]);
        let superuser = HashSet::from([1]);

        let picked = select_minimal([1, 2, 3].into_iter(), &counts, &superuser);
        assert_eq!(picked, Some(TemplateId::new(3)));
    }

    #[test]
    fn minimal_breaks_ties_by_lowest_id() {
        let counts = HashMap::from([(4, 2), (2, 2)]);
        let picked = select_minimal([2, 4].into_iter(), &counts, &HashSet::new());
        assert_eq!(picked, Some(TemplateId::new(2)));
    }

    #[test]
    fn template_without_items_is_most_minimal() {
        let counts = HashMap::from([(2, 3)]);
        let picked = select_minimal([2, 7].into_iter(), &counts, &HashSet::new());
        assert_eq!(picked, Some(TemplateId::new(7)));
    }

    #[test]
    fn only_superuser_templates_yields_none() {
        let counts = HashMap::from([(1, 1)]);
        let superuser = HashSet::from([1]);
        assert_eq!(select_minimal([1].into_iter(), &counts, &superuser), None);
    }
}
