use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "aisles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub depot_id: i32,
    pub name: String,
    pub note: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::depot::Entity",
        from = "Column::DepotId",
        to = "super::depot::Column::Id"
    )]
    Depot,
    #[sea_orm(has_many = "super::rack::Entity")]
    Racks,
}

impl Related<super::depot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Depot.def()
    }
}

impl Related<super::rack::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Racks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
