//! Create the first admin account.
//!
//! Does nothing when the username is already taken, so it is safe to run on every deploy.

use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use sea_orm::Database;
use tracing::info;

use stockroom_core::tracing::init_tracing;
use stockroom_inventory::domain::repository::AccountRepository;
use stockroom_inventory::domain::types::AccountDetails;
use stockroom_inventory::infra::db::DbAccountRepository;
use stockroom_inventory::infra::password::Argon2Hasher;
use stockroom_inventory::usecase::account::{CreateAccountInput, CreateAccountUseCase};

#[derive(Parser, Debug)]
#[command(name = "bootstrap", about = "Create the initial admin account")]
struct Args {
    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long, env = "BOOTSTRAP_USERNAME", default_value = "admin")]
    username: String,

    #[arg(long, env = "BOOTSTRAP_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long, default_value = "Admin")]
    first_name: String,

    #[arg(long, default_value = "User")]
    last_name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let db = Database::connect(&args.database_url)
        .await
        .context("failed to connect to database")?;
    let repo = DbAccountRepository { db: Arc::new(db) };

    if repo
        .find_by_username(&args.username)
        .await
        .context("look up admin account")?
        .is_some()
    {
        info!(username = %args.username, "account already exists, nothing to do");
        return Ok(());
    }

    let usecase = CreateAccountUseCase {
        repo,
        hasher: Argon2Hasher,
    };
    let profile = usecase
        .execute(CreateAccountInput {
            username: args.username,
            password: args.password,
            role: Some("admin".to_owned()),
            details: AccountDetails {
                first_name: args.first_name,
                last_name: args.last_name,
                birth_date: None,
                location: None,
                bio: None,
            },
        })
        .await
        .context("create admin account")?;
    info!(account_id = profile.account.id, "admin account created");
    Ok(())
}
