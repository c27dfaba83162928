use sea_orm_migration::prelude::*;

mod m20250601_000001_create_accounts;
mod m20250601_000002_create_account_details;
mod m20250601_000003_create_products;
mod m20250601_000004_create_movements;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_accounts::Migration),
            Box::new(m20250601_000002_create_account_details::Migration),
            Box::new(m20250601_000003_create_products::Migration),
            Box::new(m20250601_000004_create_movements::Migration),
        ]
    }
}
