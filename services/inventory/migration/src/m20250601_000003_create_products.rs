use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

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
                        ColumnDef::new(Products::Code)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Products::Description).text())
                    .col(ColumnDef::new(Products::Category).string_len(50))
                    .col(ColumnDef::new(Products::Brand).string_len(50))
                    .col(ColumnDef::new(Products::Model).string_len(50))
                    .col(ColumnDef::new(Products::Location).string_len(50).not_null())
                    .col(quantity(Products::QuantityTotal))
                    .col(quantity(Products::QuantityNew))
                    .col(quantity(Products::QuantityUsed))
                    .col(quantity(Products::QuantityDamaged))
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Products::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(
                        Expr::col(Products::QuantityTotal).eq(Expr::col(Products::QuantityNew)
                            .add(Expr::col(Products::QuantityUsed))
                            .add(Expr::col(Products::QuantityDamaged))),
                    )
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

fn quantity(column: Products) -> ColumnDef {
    ColumnDef::new(column)
        .integer()
        .not_null()
        .default(0)
        .check(Expr::col(column).gte(0))
        .to_owned()
}

#[derive(Iden, Clone, Copy)]
enum Products {
    Table,
    Id,
    Code,
    Name,
    Description,
    Category,
    Brand,
    Model,
    Location,
    QuantityTotal,
    QuantityNew,
    QuantityUsed,
    QuantityDamaged,
    CreatedAt,
    UpdatedAt,
}
