use stockroom_core::datetime::{RangeEdge, parse_range_bound};
use stockroom_domain::movement::{MovementType, StockState};
use stockroom_domain::stock::validate_movement_quantity;
use stockroom_domain::validation::require_non_empty;

use crate::domain::repository::MovementRepository;
use crate::domain::types::{Movement, MovementFilter, NewMovement};
use crate::error::InventoryServiceError;

// ── RecordMovement ───────────────────────────────────────────────────────────

pub struct RecordMovementInput {
    pub product_code: String,
    pub movement_type: String,
    pub quantity: i32,
    pub state: String,
    pub responsible: String,
    pub notes: Option<String>,
}

/// Append a movement to the ledger, stamped with the acting account.
pub struct RecordMovementUseCase<R: MovementRepository> {
    pub repo: R,
}

impl<R: MovementRepository> RecordMovementUseCase<R> {
    pub async fn execute(
        &self,
        actor: &str,
        input: RecordMovementInput,
    ) -> Result<Movement, InventoryServiceError> {
        let movement_type: MovementType = input.movement_type.parse()?;
        let state: StockState = input.state.parse()?;
        validate_movement_quantity(input.quantity)?;
        let product_code = input.product_code.trim().to_owned();
        require_non_empty("product_code", &product_code)?;
        require_non_empty("responsible", &input.responsible)?;

        let result = self
            .repo
            .record(&NewMovement {
                product_code,
                movement_type,
                quantity: input.quantity,
                state,
                responsible: input.responsible,
                recorded_by: actor.to_owned(),
                notes: input.notes,
            })
            .await;

        match &result {
            Ok(movement) => tracing::info!(
                movement_id = movement.id,
                code = %movement.product_code,
                movement_type = %movement.movement_type,
                state = %movement.state,
                quantity = movement.quantity,
                recorded_by = actor,
                "movement recorded"
            ),
            Err(InventoryServiceError::InsufficientStock(shortfall)) => tracing::warn!(
                state = %shortfall.state,
                available = shortfall.available,
                requested = shortfall.requested,
                recorded_by = actor,
                "exit refused"
            ),
            Err(_) => {}
        }
        result
    }
}

// ── ListMovements ────────────────────────────────────────────────────────────

/// Raw query filters. Blank values are ignored.
#[derive(Default)]
pub struct ListMovementsInput {
    pub product_code: Option<String>,
    pub movement_type: Option<String>,
    pub responsible: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

pub struct ListMovementsUseCase<R: MovementRepository> {
    pub repo: R,
}

impl<R: MovementRepository> ListMovementsUseCase<R> {
    pub async fn execute(
        &self,
        input: ListMovementsInput,
    ) -> Result<Vec<Movement>, InventoryServiceError> {
        let filter = MovementFilter {
            product_code: non_blank(input.product_code),
            movement_type: non_blank(input.movement_type)
                .map(|raw| raw.parse::<MovementType>())
                .transpose()?,
            responsible: non_blank(input.responsible),
            from: parse_bound(input.from, RangeEdge::Start)?,
            to: parse_bound(input.to, RangeEdge::End)?,
        };
        self.repo.list(&filter).await
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_bound(
    raw: Option<String>,
    edge: RangeEdge,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, InventoryServiceError> {
    match non_blank(raw) {
        Some(raw) => parse_range_bound(&raw, edge)
            .map(Some)
            .ok_or(InventoryServiceError::InvalidDate(raw)),
        None => Ok(None),
    }
}
