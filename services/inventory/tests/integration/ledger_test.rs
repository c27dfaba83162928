use stockroom_domain::movement::{MovementType, StockState};
use stockroom_domain::stock::StockLevels;
use stockroom_domain::validation::ValidationError;
use stockroom_inventory::error::InventoryServiceError;
use stockroom_inventory::usecase::movement::{RecordMovementInput, RecordMovementUseCase};

use crate::helpers::{MockLedger, product};

fn input(code: &str, movement_type: &str, quantity: i32, state: &str) -> RecordMovementInput {
    RecordMovementInput {
        product_code: code.into(),
        movement_type: movement_type.into(),
        quantity,
        state: state.into(),
        responsible: "Luis".into(),
        notes: None,
    }
}

fn ledger_with(new: i32, used: i32, damaged: i32) -> (MockLedger, RecordMovementUseCase<MockLedger>) {
    let ledger = MockLedger::with_products(vec![product(1, "A1", new, used, damaged)]);
    let usecase = RecordMovementUseCase {
        repo: ledger.clone(),
    };
    (ledger, usecase)
}

#[tokio::test]
async fn should_apply_exit_then_refuse_overdraw() {
    let (ledger, usecase) = ledger_with(10, 0, 0);

    let movement = usecase
        .execute("clerk", input("A1", "salida", 5, "nuevo"))
        .await
        .unwrap();
    assert_eq!(movement.movement_type, MovementType::Exit);
    assert_eq!(movement.recorded_by, "clerk");
    assert_eq!(movement.product_id, 1);
    assert_eq!(ledger.product("A1").stock, StockLevels::new(5, 5, 0, 0).unwrap());

    let err = usecase
        .execute("clerk", input("A1", "salida", 6, "nuevo"))
        .await
        .unwrap_err();
    match err {
        InventoryServiceError::InsufficientStock(shortfall) => {
            assert_eq!(shortfall.state, StockState::New);
            assert_eq!(shortfall.available, 5);
            assert_eq!(shortfall.requested, 6);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }
    assert_eq!(ledger.product("A1").stock, StockLevels::new(5, 5, 0, 0).unwrap());
    assert_eq!(ledger.movement_count(), 1);
}

#[tokio::test]
async fn should_add_entry_to_selected_bucket() {
    let (ledger, usecase) = ledger_with(1, 1, 1);

    usecase
        .execute("clerk", input("A1", "entrada", 4, "dañado"))
        .await
        .unwrap();

    let stock = ledger.product("A1").stock;
    assert_eq!(stock.damaged_count(), 5);
    assert_eq!(stock.new_count(), 1);
    assert_eq!(stock.total(), 7);
}

#[tokio::test]
async fn should_only_check_the_selected_bucket_on_exit() {
    let (ledger, usecase) = ledger_with(0, 3, 0);

    let err = usecase
        .execute("clerk", input("A1", "salida", 1, "nuevo"))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryServiceError::InsufficientStock(_)));

    usecase
        .execute("clerk", input("A1", "salida", 3, "usado"))
        .await
        .unwrap();
    assert_eq!(ledger.product("A1").stock, StockLevels::new(0, 0, 0, 0).unwrap());
}

#[tokio::test]
async fn should_keep_total_balanced_across_a_sequence() {
    let (ledger, usecase) = ledger_with(2, 2, 2);
    let steps = [
        ("entrada", 3, "nuevo"),
        ("salida", 4, "nuevo"),
        ("salida", 9, "usado"),
        ("entrada", 1, "usado"),
        ("salida", 2, "dañado"),
        ("salida", 1, "dañado"),
    ];

    for (kind, quantity, state) in steps {
        let _ = usecase
            .execute("clerk", input("A1", kind, quantity, state))
            .await;
        let stock = ledger.product("A1").stock;
        assert_eq!(
            stock.total(),
            stock.new_count() + stock.used_count() + stock.damaged_count()
        );
        for state in StockState::ALL {
            assert!(stock.count(state) >= 0);
        }
    }

    assert_eq!(ledger.product("A1").stock, StockLevels::new(4, 1, 3, 0).unwrap());
    assert_eq!(ledger.movement_count(), 4);
}

#[tokio::test]
async fn should_reject_malformed_movements_before_touching_stock() {
    let (ledger, usecase) = ledger_with(5, 0, 0);

    let err = usecase
        .execute("clerk", input("A1", "salida", 0, "nuevo"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InventoryServiceError::Validation(ValidationError::NonPositiveMovementQuantity)
    ));

    let err = usecase
        .execute("clerk", input("A1", "transfer", 1, "nuevo"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InventoryServiceError::Validation(ValidationError::InvalidMovementType(_))
    ));

    let err = usecase
        .execute("clerk", input("A1", "entrada", 1, "roto"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InventoryServiceError::Validation(ValidationError::InvalidStockState(_))
    ));

    let mut blank = input("A1", "entrada", 1, "nuevo");
    blank.responsible = " ".into();
    let err = usecase.execute("clerk", blank).await.unwrap_err();
    assert!(matches!(
        err,
        InventoryServiceError::Validation(ValidationError::EmptyField("responsible"))
    ));

    assert_eq!(ledger.movement_count(), 0);
    assert_eq!(ledger.product("A1").stock.total(), 5);
}

#[tokio::test]
async fn should_trim_product_code_before_lookup() {
    let (ledger, usecase) = ledger_with(5, 0, 0);

    let recorded = usecase
        .execute("clerk", input(" A1 ", "salida", 2, "nuevo"))
        .await
        .unwrap();

    assert_eq!(recorded.product_code, "A1");
    assert_eq!(ledger.product("A1").stock.new_count(), 3);
}

#[tokio::test]
async fn should_report_unknown_product_code() {
    let (ledger, usecase) = ledger_with(5, 0, 0);

    let err = usecase
        .execute("clerk", input("ZZ", "entrada", 1, "nuevo"))
        .await
        .unwrap_err();

    assert!(matches!(err, InventoryServiceError::ProductNotFound));
    assert_eq!(ledger.movement_count(), 0);
}
