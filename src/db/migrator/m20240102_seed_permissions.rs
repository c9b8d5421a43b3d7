use crate::constants::permissions::{ITEMS, SUPERUSER};
use crate::entities::prelude::*;
use crate::entities::{perm_items, perm_templ, perm_templ_items, users};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::Query;
use std::collections::HashMap;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Id of the seeded administrator template; matches the config default.
const ADMIN_TEMPLATE_ID: i32 = 1;

/// Non-administrative templates available to new installs as
/// `(id, name, description, items)`.
const PUBLIC_TEMPLATES: &[(i32, &str, &str, &[&str])] = &[
    (
        2,
        "Zone Manager",
        "Manages their own zones.",
        &[
            "zone_master_add",
            "zone_slave_add",
            "zone_content_view_own",
            "zone_content_edit_own",
            "zone_meta_edit_own",
            "search",
            "user_edit_own",
        ],
    ),
    (
        3,
        "Read Only",
        "Views zones without editing them.",
        &["zone_content_view_own", "search"],
    ),
];

const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Hash the bootstrap password using Argon2id
fn hash_default_password() -> Result<String, DbErr> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(b"password", &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DbErr::Custom(format!("Failed to hash default password: {e}")))
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut items = Query::insert()
            .into_table(PermItems)
            .columns([
                perm_items::Column::Id,
                perm_items::Column::Name,
                perm_items::Column::Descr,
            ])
            .to_owned();

        let mut item_ids = HashMap::new();
        let mut id: i32 = 0;
        for (name, descr) in ITEMS {
            id += 1;
            item_ids.insert(*name, id);
            items.values_panic([id.into(), (*name).into(), (*descr).into()]);
        }
        manager.exec_stmt(items).await?;

        let item_id = |name: &str| {
            item_ids
                .get(name)
                .copied()
                .ok_or_else(|| DbErr::Custom(format!("{name} missing from seed items")))
        };

        let mut templates = Query::insert()
            .into_table(PermTempl)
            .columns([
                perm_templ::Column::Id,
                perm_templ::Column::Name,
                perm_templ::Column::Descr,
            ])
            .values_panic([
                ADMIN_TEMPLATE_ID.into(),
                "Administrator".into(),
                "Administrator template with full rights.".into(),
            ])
            .to_owned();

        let mut links = Query::insert()
            .into_table(PermTemplItems)
            .columns([
                perm_templ_items::Column::TemplId,
                perm_templ_items::Column::PermId,
            ])
            .values_panic([ADMIN_TEMPLATE_ID.into(), item_id(SUPERUSER)?.into()])
            .to_owned();

        for (templ_id, name, descr, granted) in PUBLIC_TEMPLATES {
            templates.values_panic([(*templ_id).into(), (*name).into(), (*descr).into()]);
            for item in *granted {
                links.values_panic([(*templ_id).into(), item_id(*item)?.into()]);
            }
        }

        manager.exec_stmt(templates).await?;
        manager.exec_stmt(links).await?;

        // Bootstrap administrator; the password is expected to be changed.
        let admin = Query::insert()
            .into_table(Users)
            .columns([
                users::Column::Username,
                users::Column::Password,
                users::Column::Fullname,
                users::Column::Email,
                users::Column::Description,
                users::Column::PermTempl,
                users::Column::Active,
                users::Column::UseLdap,
            ])
            .values_panic([
                DEFAULT_ADMIN_USERNAME.into(),
                hash_default_password()?.into(),
                "Administrator".into(),
                "admin@example.net".into(),
                "Administrator with full rights.".into(),
                ADMIN_TEMPLATE_ID.into(),
                true.into(),
                false.into(),
            ])
            .to_owned();
        manager.exec_stmt(admin).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(Users).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(PermTemplItems).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(PermTempl).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(PermItems).to_owned())
            .await?;

        Ok(())
    }
}
