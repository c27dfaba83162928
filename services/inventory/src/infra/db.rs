use std::sync::Arc;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionError,
    TransactionTrait,
    sea_query::{Expr, OnConflict},
};

use stockroom_core::sea_ext::{StoreFailure, classify};
use stockroom_domain::movement::{MovementType, StockState};
use stockroom_domain::stock::{InsufficientStock, StockLevels};
use stockroom_domain::validation::ValidationError;
use stockroom_inventory_schema::{account_details, accounts, movements, products};

use crate::domain::repository::{AccountRepository, MovementRepository, ProductRepository};
use crate::domain::types::{
    Account, AccountDetails, AccountProfile, Movement, MovementFilter, NewAccount, NewMovement,
    NewProduct, Product, ProductChanges,
};
use crate::error::InventoryServiceError;

fn store_error(err: DbErr, context: &'static str) -> InventoryServiceError {
    anyhow::Error::new(err).context(context).into()
}

fn flatten(err: TransactionError<DbErr>) -> DbErr {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => e,
    }
}

fn transaction_error(
    err: TransactionError<InventoryServiceError>,
    context: &'static str,
) -> InventoryServiceError {
    match err {
        TransactionError::Connection(e) => store_error(e, context),
        TransactionError::Transaction(e) => e,
    }
}

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: Arc<DatabaseConnection>,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, InventoryServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .context("find account by username")?;
        model.map(account_from_model).transpose()
    }

    async fn find_profile(&self, id: i32) -> Result<Option<AccountProfile>, InventoryServiceError> {
        let found = accounts::Entity::find_by_id(id)
            .find_also_related(account_details::Entity)
            .one(self.db.as_ref())
            .await
            .context("find account profile")?;
        found
            .map(|(account, details)| profile_from_models(account, details))
            .transpose()
    }

    async fn list_profiles(&self) -> Result<Vec<AccountProfile>, InventoryServiceError> {
        accounts::Entity::find()
            .find_also_related(account_details::Entity)
            .order_by_asc(accounts::Column::Id)
            .all(self.db.as_ref())
            .await
            .context("list account profiles")?
            .into_iter()
            .map(|(account, details)| profile_from_models(account, details))
            .collect()
    }

    async fn create(&self, account: &NewAccount) -> Result<AccountProfile, InventoryServiceError> {
        let result = self
            .db
            .transaction::<_, (accounts::Model, account_details::Model), DbErr>(|txn| {
                let account = account.clone();
                Box::pin(async move {
                    let created = accounts::ActiveModel {
                        username: Set(account.username),
                        password_hash: Set(account.password_hash),
                        role: Set(account.role.as_str().to_owned()),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    let details = details_active_model(created.id, &account.details)
                        .insert(txn)
                        .await?;
                    Ok((created, details))
                })
            })
            .await;

        match result.map_err(flatten) {
            Ok((created, details)) => profile_from_models(created, Some(details)),
            Err(err) => match classify(&err) {
                StoreFailure::UniqueViolation(_) => {
                    Err(ValidationError::DuplicateUsername(account.username.clone()).into())
                }
                _ => Err(store_error(err, "create account")),
            },
        }
    }

    async fn update_profile(
        &self,
        id: i32,
        details: &AccountDetails,
        password_hash: Option<&str>,
    ) -> Result<bool, InventoryServiceError> {
        self.db
            .transaction::<_, bool, DbErr>(|txn| {
                let details = details.clone();
                let password_hash = password_hash.map(str::to_owned);
                Box::pin(async move {
                    let Some(account) = accounts::Entity::find_by_id(id).one(txn).await? else {
                        return Ok(false);
                    };
                    if let Some(hash) = password_hash {
                        let mut am = account.into_active_model();
                        am.password_hash = Set(hash);
                        am.update(txn).await?;
                    }
                    account_details::Entity::insert(details_active_model(id, &details))
                        .on_conflict(
                            OnConflict::column(account_details::Column::AccountId)
                                .update_columns([
                                    account_details::Column::FirstName,
                                    account_details::Column::LastName,
                                    account_details::Column::BirthDate,
                                    account_details::Column::Location,
                                    account_details::Column::Bio,
                                ])
                                .to_owned(),
                        )
                        .exec_without_returning(txn)
                        .await?;
                    Ok(true)
                })
            })
            .await
            .map_err(flatten)
            .context("update account profile")
            .map_err(Into::into)
    }

    async fn delete(&self, id: i32) -> Result<bool, InventoryServiceError> {
        let deleted = self
            .db
            .transaction::<_, u64, DbErr>(|txn| {
                Box::pin(async move {
                    account_details::Entity::delete_by_id(id).exec(txn).await?;
                    let result = accounts::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected)
                })
            })
            .await
            .map_err(flatten)
            .context("delete account")?;
        Ok(deleted > 0)
    }
}

fn details_active_model(account_id: i32, details: &AccountDetails) -> account_details::ActiveModel {
    account_details::ActiveModel {
        account_id: Set(account_id),
        first_name: Set(details.first_name.clone()),
        last_name: Set(details.last_name.clone()),
        birth_date: Set(details.birth_date),
        location: Set(details.location.clone()),
        bio: Set(details.bio.clone()),
    }
}

fn account_from_model(model: accounts::Model) -> Result<Account, InventoryServiceError> {
    let role = model
        .role
        .parse()
        .with_context(|| format!("account {} has an unknown role", model.id))?;
    Ok(Account {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        role,
        created_at: model.created_at,
    })
}

fn profile_from_models(
    account: accounts::Model,
    details: Option<account_details::Model>,
) -> Result<AccountProfile, InventoryServiceError> {
    Ok(AccountProfile {
        account: account_from_model(account)?,
        details: details.map(|d| AccountDetails {
            first_name: d.first_name,
            last_name: d.last_name,
            birth_date: d.birth_date,
            location: d.location,
            bio: d.bio,
        }),
    })
}

// ── Product repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: Arc<DatabaseConnection>,
}

impl ProductRepository for DbProductRepository {
    async fn list(&self) -> Result<Vec<Product>, InventoryServiceError> {
        products::Entity::find()
            .order_by_asc(products::Column::Id)
            .all(self.db.as_ref())
            .await
            .context("list products")?
            .into_iter()
            .map(product_from_model)
            .collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, InventoryServiceError> {
        let model = products::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .context("find product by id")?;
        model.map(product_from_model).transpose()
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, InventoryServiceError> {
        let model = products::Entity::find()
            .filter(products::Column::Code.eq(code))
            .one(self.db.as_ref())
            .await
            .context("find product by code")?;
        model.map(product_from_model).transpose()
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, InventoryServiceError> {
        let now = Utc::now();
        let result = products::ActiveModel {
            code: Set(product.code.clone()),
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            category: Set(product.category.clone()),
            brand: Set(product.brand.clone()),
            model: Set(product.model.clone()),
            location: Set(product.location.as_str().to_owned()),
            quantity_total: Set(product.stock.total()),
            quantity_new: Set(product.stock.new_count()),
            quantity_used: Set(product.stock.used_count()),
            quantity_damaged: Set(product.stock.damaged_count()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await;
        match result {
            Ok(model) => product_from_model(model),
            Err(err) => Err(duplicate_code_or(err, &product.code, "create product")),
        }
    }

    async fn update(
        &self,
        id: i32,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, InventoryServiceError> {
        self.db
            .transaction::<_, Option<Product>, InventoryServiceError>(|txn| {
                let changes = changes.clone();
                Box::pin(async move {
                    let Some(current) = products::Entity::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await
                        .context("lock product for update")?
                    else {
                        return Ok(None);
                    };
                    let stock = changes.quantities.merge(&stock_from_model(&current)?)?;

                    let mut am = current.into_active_model();
                    if let Some(code) = &changes.code {
                        am.code = Set(code.clone());
                    }
                    if let Some(name) = changes.name {
                        am.name = Set(name);
                    }
                    if let Some(description) = changes.description {
                        am.description = Set(Some(description));
                    }
                    if let Some(category) = changes.category {
                        am.category = Set(Some(category));
                    }
                    if let Some(brand) = changes.brand {
                        am.brand = Set(Some(brand));
                    }
                    if let Some(model) = changes.model {
                        am.model = Set(Some(model));
                    }
                    if let Some(location) = changes.location {
                        am.location = Set(location.as_str().to_owned());
                    }
                    if let Some(stock) = stock {
                        am.quantity_total = Set(stock.total());
                        am.quantity_new = Set(stock.new_count());
                        am.quantity_used = Set(stock.used_count());
                        am.quantity_damaged = Set(stock.damaged_count());
                    }
                    am.updated_at = Set(Utc::now());

                    match am.update(txn).await {
                        Ok(model) => product_from_model(model).map(Some),
                        Err(err) => {
                            let code = changes.code.as_deref().unwrap_or_default();
                            Err(duplicate_code_or(err, code, "update product"))
                        }
                    }
                })
            })
            .await
            .map_err(|e| transaction_error(e, "update product"))
    }

    async fn delete(&self, id: i32) -> Result<bool, InventoryServiceError> {
        match products::Entity::delete_by_id(id).exec(self.db.as_ref()).await {
            Ok(result) => Ok(result.rows_affected > 0),
            Err(err) => match classify(&err) {
                StoreFailure::ForeignKeyViolation(_) => Err(InventoryServiceError::ProductInUse),
                _ => Err(store_error(err, "delete product")),
            },
        }
    }

    async fn has_movements(&self, id: i32) -> Result<bool, InventoryServiceError> {
        let count = movements::Entity::find()
            .filter(movements::Column::ProductId.eq(id))
            .count(self.db.as_ref())
            .await
            .context("count product movements")?;
        Ok(count > 0)
    }

    async fn categories(&self) -> Result<Vec<String>, InventoryServiceError> {
        let categories = products::Entity::find()
            .select_only()
            .column(products::Column::Category)
            .distinct()
            .filter(products::Column::Category.is_not_null())
            .filter(products::Column::Category.ne(""))
            .order_by_asc(products::Column::Category)
            .into_tuple::<String>()
            .all(self.db.as_ref())
            .await
            .context("list product categories")?;
        Ok(categories)
    }
}

fn duplicate_code_or(err: DbErr, code: &str, context: &'static str) -> InventoryServiceError {
    match classify(&err) {
        StoreFailure::UniqueViolation(_) => ValidationError::DuplicateCode(code.to_owned()).into(),
        _ => store_error(err, context),
    }
}

fn stock_from_model(model: &products::Model) -> Result<StockLevels, InventoryServiceError> {
    StockLevels::new(
        model.quantity_total,
        model.quantity_new,
        model.quantity_used,
        model.quantity_damaged,
    )
    .with_context(|| format!("product {} has inconsistent stored quantities", model.id))
    .map_err(Into::into)
}

fn product_from_model(model: products::Model) -> Result<Product, InventoryServiceError> {
    let stock = stock_from_model(&model)?;
    let location = model
        .location
        .parse()
        .with_context(|| format!("product {} has an unknown location", model.id))?;
    Ok(Product {
        id: model.id,
        code: model.code,
        name: model.name,
        description: model.description,
        category: model.category,
        brand: model.brand,
        model: model.model,
        location,
        stock,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Movement repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMovementRepository {
    pub db: Arc<DatabaseConnection>,
}

impl MovementRepository for DbMovementRepository {
    async fn record(&self, movement: &NewMovement) -> Result<Movement, InventoryServiceError> {
        self.db
            .transaction::<_, Movement, InventoryServiceError>(|txn| {
                let movement = movement.clone();
                Box::pin(async move {
                    let product = products::Entity::find()
                        .filter(products::Column::Code.eq(movement.product_code.as_str()))
                        .lock_exclusive()
                        .one(txn)
                        .await
                        .context("lock product for movement")?
                        .ok_or(InventoryServiceError::ProductNotFound)?;

                    let current = stock_from_model(&product)?;
                    current.apply(movement.movement_type, movement.state, movement.quantity)?;

                    // Postgres evaluates every SET expression against the pre-update row.
                    let bucket = state_column(movement.state);
                    let delta = movement.movement_type.delta(movement.quantity);
                    let mut update = products::Entity::update_many()
                        .col_expr(bucket, Expr::col(bucket).add(delta))
                        .col_expr(
                            products::Column::QuantityTotal,
                            Expr::col(products::Column::QuantityNew)
                                .add(Expr::col(products::Column::QuantityUsed))
                                .add(Expr::col(products::Column::QuantityDamaged))
                                .add(delta),
                        )
                        .col_expr(products::Column::UpdatedAt, Expr::value(Utc::now()))
                        .filter(products::Column::Id.eq(product.id));
                    if movement.movement_type == MovementType::Exit {
                        update = update.filter(bucket.gte(movement.quantity));
                    }
                    let applied = update
                        .exec(txn)
                        .await
                        .context("apply movement to product")?;
                    if applied.rows_affected == 0 {
                        return Err(InsufficientStock {
                            state: movement.state,
                            available: current.count(movement.state),
                            requested: movement.quantity,
                        }
                        .into());
                    }

                    let model = movements::ActiveModel {
                        created_at: Set(Utc::now()),
                        product_code: Set(product.code),
                        movement_type: Set(movement.movement_type.as_str().to_owned()),
                        quantity: Set(movement.quantity),
                        stock_state: Set(movement.state.as_str().to_owned()),
                        responsible: Set(movement.responsible),
                        recorded_by: Set(movement.recorded_by),
                        notes: Set(movement.notes),
                        product_id: Set(product.id),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .context("insert movement")?;
                    movement_from_model(model)
                })
            })
            .await
            .map_err(|e| transaction_error(e, "record movement"))
    }

    async fn list(&self, filter: &MovementFilter) -> Result<Vec<Movement>, InventoryServiceError> {
        let mut query = movements::Entity::find();
        if let Some(code) = &filter.product_code {
            query = query.filter(movements::Column::ProductCode.contains(code));
        }
        if let Some(kind) = filter.movement_type {
            query = query.filter(movements::Column::MovementType.eq(kind.as_str()));
        }
        if let Some(responsible) = &filter.responsible {
            query = query.filter(movements::Column::Responsible.contains(responsible));
        }
        if let Some(from) = filter.from {
            query = query.filter(movements::Column::CreatedAt.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(movements::Column::CreatedAt.lte(to));
        }
        query
            .order_by_desc(movements::Column::CreatedAt)
            .order_by_desc(movements::Column::Id)
            .all(self.db.as_ref())
            .await
            .context("list movements")?
            .into_iter()
            .map(movement_from_model)
            .collect()
    }
}

fn state_column(state: StockState) -> products::Column {
    match state {
        StockState::New => products::Column::QuantityNew,
        StockState::Used => products::Column::QuantityUsed,
        StockState::Damaged => products::Column::QuantityDamaged,
    }
}

fn movement_from_model(model: movements::Model) -> Result<Movement, InventoryServiceError> {
    let movement_type = model
        .movement_type
        .parse()
        .with_context(|| format!("movement {} has an unknown type", model.id))?;
    let state = model
        .stock_state
        .parse()
        .with_context(|| format!("movement {} has an unknown state", model.id))?;
    Ok(Movement {
        id: model.id,
        created_at: model.created_at,
        product_code: model.product_code,
        movement_type,
        quantity: model.quantity,
        state,
        responsible: model.responsible,
        recorded_by: model.recorded_by,
        notes: model.notes,
        product_id: model.product_id,
    })
}
