use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_locations_table::Migration),
            Box::new(m20240101_000002_create_depots_table::Migration),
            Box::new(m20240101_000003_create_aisles_table::Migration),
            Box::new(m20240101_000004_create_racks_tables::Migration),
            Box::new(m20240101_000005_create_products_table::Migration),
            Box::new(m20240101_000006_create_partners_tables::Migration),
            Box::new(m20240101_000007_create_stocks_table::Migration),
            Box::new(m20240101_000008_create_transactions_table::Migration),
            Box::new(m20240101_000009_create_routines_table::Migration),
            Box::new(m20240101_000010_create_alerts_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_locations_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_locations_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Locations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Locations::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Locations::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Locations::Address).string().null())
                        .col(ColumnDef::new(Locations::Note).string().null())
                        .col(ColumnDef::new(Locations::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Locations::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Locations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Locations {
        Table,
        Id,
        Name,
        Address,
        Note,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000002_create_depots_table {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_locations_table::Locations;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_depots_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Depots::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Depots::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Depots::LocationId).integer().not_null())
                        .col(ColumnDef::new(Depots::Name).string().not_null())
                        .col(ColumnDef::new(Depots::Note).string().null())
                        .col(ColumnDef::new(Depots::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Depots::UpdatedAt).timestamp().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_depots_location_id")
                                .from(Depots::Table, Depots::LocationId)
                                .to(Locations::Table, Locations::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_depots_location_id_name")
                        .table(Depots::Table)
                        .col(Depots::LocationId)
                        .col(Depots::Name)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Depots::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Depots {
        Table,
        Id,
        LocationId,
        Name,
        Note,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_aisles_table {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000002_create_depots_table::Depots;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_aisles_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Aisles::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Aisles::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Aisles::DepotId).integer().not_null())
                        .col(ColumnDef::new(Aisles::Name).string().not_null())
                        .col(ColumnDef::new(Aisles::Note).string().null())
                        .col(ColumnDef::new(Aisles::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Aisles::UpdatedAt).timestamp().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_aisles_depot_id")
                                .from(Aisles::Table, Aisles::DepotId)
                                .to(Depots::Table, Depots::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_aisles_depot_id_name")
                        .table(Aisles::Table)
                        .col(Aisles::DepotId)
                        .col(Aisles::Name)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Aisles::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Aisles {
        Table,
        Id,
        DepotId,
        Name,
        Note,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000004_create_racks_tables {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000003_create_aisles_table::Aisles;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_racks_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Racks::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Racks::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Racks::AisleId).integer().not_null())
                        .col(ColumnDef::new(Racks::RackCode).string().not_null())
                        .col(ColumnDef::new(Racks::FaceType).string_len(10).not_null())
                        .col(ColumnDef::new(Racks::Levels).integer().not_null())
                        .col(ColumnDef::new(Racks::Bays).integer().not_null())
                        .col(ColumnDef::new(Racks::BinsPerBay).integer().not_null())
                        .col(ColumnDef::new(Racks::Note).string().null())
                        .col(ColumnDef::new(Racks::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Racks::UpdatedAt).timestamp().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_racks_aisle_id")
                                .from(Racks::Table, Racks::AisleId)
                                .to(Aisles::Table, Aisles::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_racks_aisle_id")
                        .table(Racks::Table)
                        .col(Racks::AisleId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Slots::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Slots::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Slots::RackId).integer().not_null())
                        .col(ColumnDef::new(Slots::Direction).string_len(1).not_null())
                        .col(ColumnDef::new(Slots::LevelNo).integer().not_null())
                        .col(ColumnDef::new(Slots::BayNo).integer().not_null())
                        .col(ColumnDef::new(Slots::BinNo).integer().not_null())
                        .col(ColumnDef::new(Slots::Coordinate).string().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_slots_rack_id")
                                .from(Slots::Table, Slots::RackId)
                                .to(Racks::Table, Racks::Id),
                        )
                        .to_owned(),
                )
                .await?;

            // The slot address tuple is unique within a rack
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_slots_rack_address")
                        .table(Slots::Table)
                        .col(Slots::RackId)
                        .col(Slots::Direction)
                        .col(Slots::LevelNo)
                        .col(Slots::BayNo)
                        .col(Slots::BinNo)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Slots::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Racks::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Racks {
        Table,
        Id,
        AisleId,
        RackCode,
        FaceType,
        Levels,
        Bays,
        BinsPerBay,
        Note,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum Slots {
        Table,
        Id,
        RackId,
        Direction,
        LevelNo,
        BayNo,
        BinNo,
        Coordinate,
    }
}

mod m20240101_000005_create_products_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Products::Sku)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(ColumnDef::new(Products::Unit).string().null())
                        .col(ColumnDef::new(Products::Description).string().null())
                        .col(
                            ColumnDef::new(Products::SalePrice)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Products::CostPrice)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(ColumnDef::new(Products::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Products::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_name")
                        .table(Products::Table)
                        .col(Products::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Products {
        Table,
        Id,
        Sku,
        Name,
        Unit,
        Description,
        SalePrice,
        CostPrice,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000006_create_partners_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_partners_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sources::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Sources::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Sources::Name).string().not_null())
                        .col(ColumnDef::new(Sources::Contact).string().null())
                        .col(ColumnDef::new(Sources::Email).string().null())
                        .col(ColumnDef::new(Sources::Phone).string().null())
                        .col(ColumnDef::new(Sources::Address).string().null())
                        .col(ColumnDef::new(Sources::Note).string().null())
                        .col(ColumnDef::new(Sources::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Sources::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Clients::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Clients::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Clients::Name).string().not_null())
                        .col(ColumnDef::new(Clients::Contact).string().null())
                        .col(ColumnDef::new(Clients::Email).string().null())
                        .col(ColumnDef::new(Clients::Phone).string().null())
                        .col(ColumnDef::new(Clients::Address).string().null())
                        .col(ColumnDef::new(Clients::Note).string().null())
                        .col(ColumnDef::new(Clients::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Clients::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Clients::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Sources::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Sources {
        Table,
        Id,
        Name,
        Contact,
        Email,
        Phone,
        Address,
        Note,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum Clients {
        Table,
        Id,
        Name,
        Contact,
        Email,
        Phone,
        Address,
        Note,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000007_create_stocks_table {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000004_create_racks_tables::Slots;
    use super::m20240101_000005_create_products_table::Products;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_stocks_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Stocks::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Stocks::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Stocks::ProductId).integer().not_null())
                        .col(ColumnDef::new(Stocks::SlotId).integer().not_null())
                        .col(ColumnDef::new(Stocks::Quantity).integer().not_null())
                        .col(ColumnDef::new(Stocks::BatchNo).string().null())
                        .col(ColumnDef::new(Stocks::ExpiryDate).date().null())
                        .col(ColumnDef::new(Stocks::Strategy).string_len(10).not_null())
                        .col(
                            ColumnDef::new(Stocks::ProductType)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Stocks::IsConsumable)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Stocks::SalePrice).decimal_len(12, 2).null())
                        .col(ColumnDef::new(Stocks::CostPrice).decimal_len(12, 2).null())
                        .col(ColumnDef::new(Stocks::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Stocks::UpdatedAt).timestamp().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_stocks_product_id")
                                .from(Stocks::Table, Stocks::ProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_stocks_slot_id")
                                .from(Stocks::Table, Stocks::SlotId)
                                .to(Slots::Table, Slots::Id),
                        )
                        .to_owned(),
                )
                .await?;

            // At most one stock placement per slot
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stocks_slot_id")
                        .table(Stocks::Table)
                        .col(Stocks::SlotId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stocks_product_id")
                        .table(Stocks::Table)
                        .col(Stocks::ProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Stocks::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Stocks {
        Table,
        Id,
        ProductId,
        SlotId,
        Quantity,
        BatchNo,
        ExpiryDate,
        Strategy,
        ProductType,
        IsConsumable,
        SalePrice,
        CostPrice,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000008_create_transactions_table {

    use sea_orm_migration::prelude::*;

    use super::m20240101_000005_create_products_table::Products;
    use super::m20240101_000006_create_partners_tables::{Clients, Sources};

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000008_create_transactions_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Transactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Transactions::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Transactions::Kind).string_len(20).not_null())
                        .col(ColumnDef::new(Transactions::ProductId).integer().not_null())
                        .col(ColumnDef::new(Transactions::StockId).integer().null())
                        .col(ColumnDef::new(Transactions::Quantity).integer().not_null())
                        .col(ColumnDef::new(Transactions::FromSlot).string().null())
                        .col(ColumnDef::new(Transactions::ToSlot).string().null())
                        .col(ColumnDef::new(Transactions::SourceId).integer().null())
                        .col(ColumnDef::new(Transactions::ClientId).integer().null())
                        .col(ColumnDef::new(Transactions::Note).string().null())
                        .col(
                            ColumnDef::new(Transactions::OccurredAt)
                                .timestamp()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_transactions_product_id")
                                .from(Transactions::Table, Transactions::ProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_transactions_source_id")
                                .from(Transactions::Table, Transactions::SourceId)
                                .to(Sources::Table, Sources::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_transactions_client_id")
                                .from(Transactions::Table, Transactions::ClientId)
                                .to(Clients::Table, Clients::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transactions_kind")
                        .table(Transactions::Table)
                        .col(Transactions::Kind)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transactions_product_id")
                        .table(Transactions::Table)
                        .col(Transactions::ProductId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_transactions_occurred_at")
                        .table(Transactions::Table)
                        .col(Transactions::OccurredAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Transactions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Transactions {
        Table,
        Id,
        Kind,
        ProductId,
        StockId,
        Quantity,
        FromSlot,
        ToSlot,
        SourceId,
        ClientId,
        Note,
        OccurredAt,
    }
}

mod m20240101_000009_create_routines_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000009_create_routines_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Routines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Routines::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Routines::Name).string().not_null())
                        .col(ColumnDef::new(Routines::Description).string().null())
                        .col(ColumnDef::new(Routines::Schedule).string().not_null())
                        .col(
                            ColumnDef::new(Routines::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Routines::LastRunAt).timestamp().null())
                        .col(ColumnDef::new(Routines::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Routines::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Routines::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Routines {
        Table,
        Id,
        Name,
        Description,
        Schedule,
        IsActive,
        LastRunAt,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000010_create_alerts_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000010_create_alerts_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Alerts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Alerts::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Alerts::Kind).string_len(10).not_null())
                        .col(ColumnDef::new(Alerts::Message).string().not_null())
                        .col(
                            ColumnDef::new(Alerts::IsRead)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Alerts::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_alerts_is_read")
                        .table(Alerts::Table)
                        .col(Alerts::IsRead)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Alerts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Alerts {
        Table,
        Id,
        Kind,
        Message,
        IsRead,
        CreatedAt,
    }
}
