use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "perm_templ")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Human-readable role label, e.g. "Administrator"
    #[sea_orm(unique)]
    pub name: String,

    pub descr: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::perm_templ_items::Entity")]
    PermTemplItems,
}

impl Related<super::perm_templ_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PermTemplItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
