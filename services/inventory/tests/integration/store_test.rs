//! Repository tests against sea-orm's `MockDatabase`: scripted rows in, recorded SQL out.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult, Statement, Value,
};

use stockroom_domain::movement::{MovementType, StockState};
use stockroom_domain::stock::QuantityPatch;
use stockroom_domain::validation::ValidationError;
use stockroom_inventory::domain::repository::{MovementRepository, ProductRepository};
use stockroom_inventory::domain::types::{NewMovement, ProductChanges};
use stockroom_inventory::error::InventoryServiceError;
use stockroom_inventory::infra::db::{DbMovementRepository, DbProductRepository};
use stockroom_inventory_schema::{movements, products};

fn product_row(new: i32, used: i32, damaged: i32) -> products::Model {
    let now = Utc::now();
    products::Model {
        id: 1,
        code: "A1".into(),
        name: "Drill".into(),
        description: None,
        category: None,
        brand: None,
        model: None,
        location: "ALMACÉN 1".into(),
        quantity_total: new + used + damaged,
        quantity_new: new,
        quantity_used: used,
        quantity_damaged: damaged,
        created_at: now,
        updated_at: now,
    }
}

fn movement_row(movement_type: MovementType, quantity: i32, state: StockState) -> movements::Model {
    movements::Model {
        id: 1,
        created_at: Utc::now(),
        product_code: "A1".into(),
        movement_type: movement_type.as_str().into(),
        quantity,
        stock_state: state.as_str().into(),
        responsible: "Luis".into(),
        recorded_by: "clerk".into(),
        notes: None,
        product_id: 1,
    }
}

fn new_movement(movement_type: MovementType, quantity: i32, state: StockState) -> NewMovement {
    NewMovement {
        product_code: "A1".into(),
        movement_type,
        quantity,
        state,
        responsible: "Luis".into(),
        recorded_by: "clerk".into(),
        notes: None,
    }
}

fn rows_affected(rows: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected: rows,
    }
}

/// Every statement the connection saw, in order, BEGIN/COMMIT/ROLLBACK included.
fn statements(db: Arc<DatabaseConnection>) -> Vec<Statement> {
    let Ok(db) = Arc::try_unwrap(db) else {
        panic!("connection still shared");
    };
    db.into_transaction_log()
        .iter()
        .flat_map(|t| t.statements().to_vec())
        .collect()
}

fn find<'a>(stmts: &'a [Statement], prefix: &str) -> Option<&'a Statement> {
    stmts.iter().find(|s| s.sql.starts_with(prefix))
}

fn has_value(stmt: &Statement, value: i32) -> bool {
    stmt.values
        .as_ref()
        .is_some_and(|v| v.0.contains(&Value::Int(Some(value))))
}

// ── DbMovementRepository::record ─────────────────────────────────────────────

#[tokio::test]
async fn should_decrement_bucket_conditionally_on_exit() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product_row(10, 0, 0)]])
        .append_exec_results([rows_affected(1)])
        .append_query_results([vec![movement_row(MovementType::Exit, 5, StockState::New)]])
        .into_connection();
    let repo = DbMovementRepository { db: Arc::new(db) };

    let recorded = repo
        .record(&new_movement(MovementType::Exit, 5, StockState::New))
        .await
        .unwrap();
    assert_eq!(recorded.quantity, 5);

    let stmts = statements(repo.db);
    let select = find(&stmts, "SELECT").unwrap();
    assert!(select.sql.ends_with("FOR UPDATE"), "{}", select.sql);

    let update = find(&stmts, "UPDATE \"products\"").unwrap();
    assert!(
        update.sql.contains(r#""quantity_new" = "quantity_new" + $1"#),
        "{}",
        update.sql
    );
    assert!(update.sql.contains(r#""quantity_total" = "#), "{}", update.sql);
    assert!(update.sql.contains(r#""quantity_new" >= $"#), "{}", update.sql);
    assert!(has_value(update, -5));
    assert!(has_value(update, 5));

    assert!(find(&stmts, "INSERT INTO \"movements\"").is_some());
    assert_eq!(stmts.last().unwrap().sql, "COMMIT");
}

#[tokio::test]
async fn should_increment_bucket_without_guard_on_entry() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product_row(1, 0, 0)]])
        .append_exec_results([rows_affected(1)])
        .append_query_results([vec![movement_row(MovementType::Entry, 4, StockState::Used)]])
        .into_connection();
    let repo = DbMovementRepository { db: Arc::new(db) };

    repo.record(&new_movement(MovementType::Entry, 4, StockState::Used))
        .await
        .unwrap();

    let stmts = statements(repo.db);
    let update = find(&stmts, "UPDATE \"products\"").unwrap();
    assert!(
        update.sql.contains(r#""quantity_used" = "quantity_used" + $1"#),
        "{}",
        update.sql
    );
    assert!(!update.sql.contains(">="), "{}", update.sql);
    assert!(has_value(update, 4));
}

#[tokio::test]
async fn should_refuse_exit_before_touching_the_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product_row(3, 0, 0)]])
        .into_connection();
    let repo = DbMovementRepository { db: Arc::new(db) };

    let err = repo
        .record(&new_movement(MovementType::Exit, 5, StockState::New))
        .await
        .unwrap_err();
    match err {
        InventoryServiceError::InsufficientStock(shortfall) => {
            assert_eq!(shortfall.available, 3);
            assert_eq!(shortfall.requested, 5);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    let stmts = statements(repo.db);
    assert!(find(&stmts, "UPDATE").is_none());
    assert!(find(&stmts, "INSERT").is_none());
    assert_eq!(stmts.last().unwrap().sql, "ROLLBACK");
}

#[tokio::test]
async fn should_map_unmatched_conditional_update_to_insufficient_stock() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product_row(10, 0, 0)]])
        .append_exec_results([rows_affected(0)])
        .into_connection();
    let repo = DbMovementRepository { db: Arc::new(db) };

    let err = repo
        .record(&new_movement(MovementType::Exit, 5, StockState::New))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryServiceError::InsufficientStock(_)));

    let stmts = statements(repo.db);
    assert!(find(&stmts, "UPDATE").is_some());
    assert!(find(&stmts, "INSERT").is_none());
    assert_eq!(stmts.last().unwrap().sql, "ROLLBACK");
}

#[tokio::test]
async fn should_roll_back_stock_change_when_insert_fails() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product_row(10, 0, 0)]])
        .append_exec_results([rows_affected(1)])
        .append_query_errors([DbErr::Custom("insert failed".into())])
        .into_connection();
    let repo = DbMovementRepository { db: Arc::new(db) };

    let err = repo
        .record(&new_movement(MovementType::Exit, 5, StockState::New))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryServiceError::Internal(_)));

    let stmts = statements(repo.db);
    assert!(find(&stmts, "UPDATE").is_some());
    assert!(stmts.iter().all(|s| s.sql != "COMMIT"));
    assert_eq!(stmts.last().unwrap().sql, "ROLLBACK");
}

#[tokio::test]
async fn should_report_unknown_code_as_product_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<products::Model>::new()])
        .into_connection();
    let repo = DbMovementRepository { db: Arc::new(db) };

    let err = repo
        .record(&new_movement(MovementType::Entry, 1, StockState::New))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryServiceError::ProductNotFound));
}

// ── DbProductRepository::update ──────────────────────────────────────────────

fn quantities(total: i32, used: i32) -> ProductChanges {
    ProductChanges {
        quantities: QuantityPatch {
            total: Some(total),
            used: Some(used),
            ..QuantityPatch::default()
        },
        ..ProductChanges::default()
    }
}

#[tokio::test]
async fn should_merge_quantities_over_the_locked_row() {
    // The locked read sees new=5, e.g. after an exit committed since the caller looked.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product_row(5, 0, 0)]])
        .append_query_results([vec![product_row(5, 2, 0)]])
        .into_connection();
    let repo = DbProductRepository { db: Arc::new(db) };

    let updated = repo.update(1, &quantities(7, 2)).await.unwrap().unwrap();
    assert_eq!(updated.stock.total(), 7);

    let stmts = statements(repo.db);
    let select = find(&stmts, "SELECT").unwrap();
    assert!(select.sql.ends_with("FOR UPDATE"), "{}", select.sql);
    let update = find(&stmts, "UPDATE \"products\"").unwrap();
    assert!(has_value(update, 7));
    assert!(has_value(update, 5));
    assert!(has_value(update, 2));
    assert_eq!(stmts.last().unwrap().sql, "COMMIT");
}

#[tokio::test]
async fn should_reject_patch_that_no_longer_balances_against_locked_row() {
    // total=12 with used=2 balances only against a stale new=10.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product_row(5, 0, 0)]])
        .into_connection();
    let repo = DbProductRepository { db: Arc::new(db) };

    let err = repo.update(1, &quantities(12, 2)).await.unwrap_err();
    assert!(matches!(
        err,
        InventoryServiceError::Validation(ValidationError::UnbalancedQuantities { total: 12, sum: 7 })
    ));

    let stmts = statements(repo.db);
    assert!(find(&stmts, "UPDATE").is_none());
    assert_eq!(stmts.last().unwrap().sql, "ROLLBACK");
}

#[tokio::test]
async fn should_leave_counters_alone_without_quantity_patch() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product_row(5, 0, 0)]])
        .append_query_results([vec![product_row(5, 0, 0)]])
        .into_connection();
    let repo = DbProductRepository { db: Arc::new(db) };

    let changes = ProductChanges {
        name: Some("Hammer drill".into()),
        ..ProductChanges::default()
    };
    repo.update(1, &changes).await.unwrap().unwrap();

    let stmts = statements(repo.db);
    let update = find(&stmts, "UPDATE \"products\"").unwrap();
    let set_clause = update.sql.split(" WHERE ").next().unwrap();
    assert!(!set_clause.contains("quantity_"), "{}", update.sql);
}

#[tokio::test]
async fn should_return_none_for_missing_product_on_update() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<products::Model>::new()])
        .into_connection();
    let repo = DbProductRepository { db: Arc::new(db) };

    assert!(repo.update(9, &quantities(1, 1)).await.unwrap().is_none());
}
