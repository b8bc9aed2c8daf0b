use actix_web::{HttpResponse, web};

use crate::{AppState, database::models::TeamInput, error::AppError, handlers::shared::ApiResponse};

pub async fn get_teams(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let teams = state.teams.list_teams().await?;
    Ok(ApiResponse::success(teams))
}

pub async fn get_team(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let team = state.teams.get_team(path.into_inner()).await?;
    Ok(ApiResponse::success(team))
}

pub async fn create_team(
    state: web::Data<AppState>,
    input: web::Json<TeamInput>,
) -> Result<HttpResponse, AppError> {
    let team = state.teams.create_team(input.into_inner()).await?;
    Ok(ApiResponse::created(team))
}

pub async fn update_team(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    input: web::Json<TeamInput>,
) -> Result<HttpResponse, AppError> {
    let team = state
        .teams
        .rename_team(path.into_inner(), input.into_inner())
        .await?;
    Ok(ApiResponse::success(team))
}

pub async fn delete_team(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    state.teams.delete_team(path.into_inner()).await?;
    Ok(ApiResponse::message("Team deleted"))
}
