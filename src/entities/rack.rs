use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::layout::{RackConfig, RackFace};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "racks")]
#[schema(as = Rack)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub aisle_id: i32,
    pub rack_code: String,
    pub face_type: RackFace,
    pub levels: i32,
    pub bays: i32,
    pub bins_per_bay: i32,
    pub note: Option<String>,
    #[schema(value_type = chrono::DateTime<chrono::Utc>)]
    pub created_at: DateTimeUtc,
    #[schema(value_type = chrono::DateTime<chrono::Utc>)]
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// Dimensional configuration backing this rack's slot address space.
    pub fn config(&self) -> RackConfig {
        RackConfig {
            face_type: self.face_type,
            levels: self.levels,
            bays: self.bays,
            bins_per_bay: self.bins_per_bay,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::aisle::Entity",
        from = "Column::AisleId",
        to = "super::aisle::Column::Id"
    )]
    Aisle,
    #[sea_orm(has_many = "super::slot::Entity")]
    Slots,
}

impl Related<super::aisle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Aisle.def()
    }
}

impl Related<super::slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Slots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
