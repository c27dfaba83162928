use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use stockroom_auth_types::identity::SessionIdentity;
use stockroom_domain::movement::{MovementType, StockState};

use crate::domain::types::Movement;
use crate::error::InventoryServiceError;
use crate::state::AppState;
use crate::usecase::movement::{
    ListMovementsInput, ListMovementsUseCase, RecordMovementInput, RecordMovementUseCase,
};

#[derive(Serialize)]
pub struct MovementResponse {
    pub id: i32,
    #[serde(serialize_with = "stockroom_core::datetime::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub product_code: String,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: i32,
    pub state: StockState,
    pub responsible: String,
    pub recorded_by: String,
    pub notes: Option<String>,
    pub product_id: i32,
}

impl From<Movement> for MovementResponse {
    fn from(movement: Movement) -> Self {
        Self {
            id: movement.id,
            created_at: movement.created_at,
            product_code: movement.product_code,
            movement_type: movement.movement_type,
            quantity: movement.quantity,
            state: movement.state,
            responsible: movement.responsible,
            recorded_by: movement.recorded_by,
            notes: movement.notes,
            product_id: movement.product_id,
        }
    }
}

// ── POST /movements ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RecordMovementRequest {
    pub product_code: String,
    #[serde(rename = "type")]
    pub movement_type: String,
    pub quantity: i32,
    pub state: String,
    pub responsible: String,
    pub notes: Option<String>,
}

pub async fn record_movement(
    identity: SessionIdentity,
    State(state): State<AppState>,
    Json(body): Json<RecordMovementRequest>,
) -> Result<(StatusCode, Json<MovementResponse>), InventoryServiceError> {
    let usecase = RecordMovementUseCase {
        repo: state.movement_repo(),
    };
    let movement = usecase
        .execute(
            &identity.username,
            RecordMovementInput {
                product_code: body.product_code,
                movement_type: body.movement_type,
                quantity: body.quantity,
                state: body.state,
                responsible: body.responsible,
                notes: body.notes,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(movement.into())))
}

// ── GET /movements ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct MovementQuery {
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub movement_type: Option<String>,
    pub responsible: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

pub async fn list_movements(
    _identity: SessionIdentity,
    State(state): State<AppState>,
    Query(query): Query<MovementQuery>,
) -> Result<Json<Vec<MovementResponse>>, InventoryServiceError> {
    let usecase = ListMovementsUseCase {
        repo: state.movement_repo(),
    };
    let movements = usecase
        .execute(ListMovementsInput {
            product_code: query.code,
            movement_type: query.movement_type,
            responsible: query.responsible,
            from: query.from,
            to: query.to,
        })
        .await?;
    Ok(Json(movements.into_iter().map(Into::into).collect()))
}
