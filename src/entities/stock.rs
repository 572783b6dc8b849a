use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Rotation strategy tag carried on a stock record. Not enforced by any
/// picking algorithm; surfaced for the consuming application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "UPPERCASE")]
pub enum StockStrategy {
    #[sea_orm(string_value = "FIFO")]
    Fifo,
    #[sea_orm(string_value = "LIFO")]
    Lifo,
    #[sea_orm(string_value = "JIT")]
    Jit,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum StockProductType {
    #[sea_orm(string_value = "raw")]
    Raw,
    #[sea_orm(string_value = "wip")]
    Wip,
    #[sea_orm(string_value = "to_ship")]
    ToShip,
    #[sea_orm(string_value = "deadstock")]
    Deadstock,
    #[sea_orm(string_value = "discrepancy")]
    Discrepancy,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "stocks")]
#[schema(as = Stock)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    #[sea_orm(unique)]
    pub slot_id: i32,
    pub quantity: i32,
    pub batch_no: Option<String>,
    pub expiry_date: Option<Date>,
    pub strategy: StockStrategy,
    pub product_type: StockProductType,
    pub is_consumable: bool,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub sale_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub cost_price: Option<Decimal>,
    #[schema(value_type = chrono::DateTime<chrono::Utc>)]
    pub created_at: DateTimeUtc,
    #[schema(value_type = chrono::DateTime<chrono::Utc>)]
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::slot::Entity",
        from = "Column::SlotId",
        to = "super::slot::Column::Id"
    )]
    Slot,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Slot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
