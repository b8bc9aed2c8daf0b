use actix_web::{HttpResponse, web};

use crate::{
    AppState,
    database::models::{PersonInput, PersonPatch},
    error::AppError,
    handlers::shared::ApiResponse,
};

pub async fn get_people(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let people = state.people.list_people(path.into_inner()).await?;
    Ok(ApiResponse::success(people))
}

pub async fn get_person(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (team_id, person_id) = path.into_inner();
    let person = state.people.get_person(team_id, person_id).await?;
    Ok(ApiResponse::success(person))
}

pub async fn add_person(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    input: web::Json<PersonInput>,
) -> Result<HttpResponse, AppError> {
    let person = state
        .people
        .add_person(path.into_inner(), input.into_inner())
        .await?;
    Ok(ApiResponse::created(person))
}

pub async fn update_person(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
    input: web::Json<PersonPatch>,
) -> Result<HttpResponse, AppError> {
    let (team_id, person_id) = path.into_inner();
    let person = state
        .people
        .update_person(team_id, person_id, input.into_inner())
        .await?;
    Ok(ApiResponse::success(person))
}

pub async fn delete_person(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (team_id, person_id) = path.into_inner();
    state.people.delete_person(team_id, person_id).await?;
    Ok(ApiResponse::message("Person removed from team"))
}
