use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccountDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccountDetails::AccountId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AccountDetails::FirstName).string().not_null())
                    .col(ColumnDef::new(AccountDetails::LastName).string().not_null())
                    .col(ColumnDef::new(AccountDetails::BirthDate).date())
                    .col(ColumnDef::new(AccountDetails::Location).string())
                    .col(ColumnDef::new(AccountDetails::Bio).string())
                    .foreign_key(
                        ForeignKey::create()
                            .from(AccountDetails::Table, AccountDetails::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccountDetails::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AccountDetails {
    Table,
    AccountId,
    FirstName,
    LastName,
    BirthDate,
    Location,
    Bio,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
}
