use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "perm_templ_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub templ_id: i32,

    pub perm_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::perm_templ::Entity",
        from = "Column::TemplId",
        to = "super::perm_templ::Column::Id",
        on_delete = "Cascade"
    )]
    PermTempl,

    #[sea_orm(
        belongs_to = "super::perm_items::Entity",
        from = "Column::PermId",
        to = "super::perm_items::Column::Id",
        on_delete = "Cascade"
    )]
    PermItems,
}

impl Related<super::perm_templ::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PermTempl.def()
    }
}

impl Related<super::perm_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PermItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
