use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use crate::{
    AppState,
    error::AppError,
    handlers::shared::ApiResponse,
    middleware::RequestIdExt,
    services::TurnListParams,
};

/// Only the assignee is supplied; the date is always computed.
#[derive(Debug, Deserialize)]
pub struct AssignTurnRequest {
    pub person_id: i64,
}

/// GET /teams/{team_id}/turns?date_from=YYYY-MM-DD&date_to=YYYY-MM-DD&limit=10&offset=0
pub async fn get_turns(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<TurnListParams>,
) -> Result<HttpResponse, AppError> {
    let turns = state
        .turns
        .list_turns(path.into_inner(), &query.into_inner())
        .await?;
    Ok(ApiResponse::success(turns))
}

pub async fn get_turn(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (team_id, turn_id) = path.into_inner();
    let turn = state
        .turns
        .get_turn(team_id, turn_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Turn {} not found in team {}", turn_id, team_id)))?;
    Ok(ApiResponse::success(turn))
}

/// POST /teams/{team_id}/turns
///
/// Creates the turn for the team's next duty date, or reassigns it when one
/// already exists for that date.
pub async fn assign_next_turn(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    input: web::Json<AssignTurnRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let team_id = path.into_inner();
    let person_id = input.person_id;

    let turn = state
        .turns
        .assign_next_turn(team_id, person_id)
        .await
        .map_err(|e| {
            log::warn!(
                "Failed to assign next turn for team {} (correlation_id={}): {}",
                team_id,
                req.correlation_id().unwrap_or_default(),
                e
            );
            AppError::from(e)
        })?;

    Ok(ApiResponse::success(turn))
}
