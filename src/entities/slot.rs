use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::layout::{Direction, SlotAddress};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "slots")]
#[schema(as = Slot)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub rack_id: i32,
    pub direction: Direction,
    pub level_no: i32,
    pub bay_no: i32,
    pub bin_no: i32,
    pub coordinate: String,
}

impl Model {
    pub fn address(&self) -> SlotAddress {
        SlotAddress::new(self.direction, self.level_no, self.bay_no, self.bin_no)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rack::Entity",
        from = "Column::RackId",
        to = "super::rack::Column::Id"
    )]
    Rack,
    #[sea_orm(has_one = "super::stock::Entity")]
    Stock,
}

impl Related<super::rack::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rack.def()
    }
}

impl Related<super::stock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stock.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
