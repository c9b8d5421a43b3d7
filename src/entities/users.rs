use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    /// Argon2id password hash (empty for LDAP users)
    pub password: String,

    pub fullname: String,

    pub email: String,

    pub description: String,

    /// Assigned permission template
    pub perm_templ: i32,

    pub active: bool,

    pub use_ldap: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::perm_templ::Entity",
        from = "Column::PermTempl",
        to = "super::perm_templ::Column::Id"
    )]
    PermTempl,
}

impl Related<super::perm_templ::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PermTempl.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
