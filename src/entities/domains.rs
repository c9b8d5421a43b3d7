use sea_orm::entity::prelude::*;

/// A DNS zone as stored by PowerDNS.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "domains")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    pub master: Option<String>,

    pub last_check: Option<i32>,

    /// NATIVE, MASTER or SLAVE
    #[sea_orm(column_name = "type")]
    pub zone_type: String,

    pub notified_serial: Option<i64>,

    pub account: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::records::Entity")]
    Records,
}

impl Related<super::records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
