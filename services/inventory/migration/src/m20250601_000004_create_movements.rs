use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movements::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Movements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Movements::ProductCode)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Movements::MovementType)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Movements::Quantity)
                            .integer()
                            .not_null()
                            .check(Expr::col(Movements::Quantity).gt(0)),
                    )
                    .col(ColumnDef::new(Movements::StockState).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Movements::Responsible)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Movements::RecordedBy)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Movements::Notes).text())
                    .col(ColumnDef::new(Movements::ProductId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movements_product_id")
                            .from(Movements::Table, Movements::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Movements::Table)
                    .col(Movements::CreatedAt)
                    .name("idx_movements_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Movements::Table)
                    .col(Movements::ProductCode)
                    .name("idx_movements_product_code")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Movements::Table)
                    .col(Movements::ProductId)
                    .name("idx_movements_product_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movements::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Movements {
    Table,
    Id,
    CreatedAt,
    ProductCode,
    MovementType,
    Quantity,
    StockState,
    Responsible,
    RecordedBy,
    Notes,
    ProductId,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
}
