use actix_web::{http::StatusCode, test};
use pretty_assertions::assert_eq;
use serde_json::json;

use rota::database::models::{Person, Team, TeamDetail, Turn};
use rota::handlers::shared::ApiResponse;

#[macro_use]
mod common;

use common::TestContext;

#[actix_web::test]
async fn test_team_lifecycle() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/teams")
        .set_json(json!({ "name": "Platform" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: ApiResponse<Team> = test::read_body_json(resp).await;
    let team = created.data.unwrap();
    assert_eq!(team.name, "Platform");

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/teams/{}", team.id))
        .set_json(json!({ "name": "Platform Ops" }))
        .to_request();
    let renamed: ApiResponse<Team> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(renamed.data.unwrap().name, "Platform Ops");

    let req = test::TestRequest::get().uri("/api/v1/teams").to_request();
    let listed: ApiResponse<Vec<Team>> = test::call_and_read_body_json(&app, req).await;
    let names: Vec<String> = listed.data.unwrap().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["Platform Ops".to_string()]);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/teams/{}", team.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/teams/{}", team.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_team_detail_includes_people() {
    let ctx = TestContext::new();
    let team = ctx.seed_team("Platform").await;
    let first = ctx.seed_person(team.id).await;
    let second = ctx.seed_person(team.id).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/teams/{}", team.id))
        .to_request();
    let body: ApiResponse<TeamDetail> = test::call_and_read_body_json(&app, req).await;
    let detail = body.data.unwrap();

    assert_eq!(detail.team, team);
    assert_eq!(detail.people, vec![first, second]);
}

#[actix_web::test]
async fn test_blank_team_name_is_rejected() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/teams")
        .set_json(json!({ "name": "  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_non_numeric_team_id_is_bad_request() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/teams/platform")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_people_crud_within_team() {
    let ctx = TestContext::new();
    let team = ctx.seed_team("Platform").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/teams/{}/people", team.id))
        .set_json(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let added: ApiResponse<Person> = test::read_body_json(resp).await;
    let person = added.data.unwrap();
    assert_eq!(person.team_id, team.id);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/teams/{}/people/{}", team.id, person.id))
        .set_json(json!({ "last_name": "King" }))
        .to_request();
    let updated: ApiResponse<Person> = test::call_and_read_body_json(&app, req).await;
    let updated = updated.data.unwrap();
    assert_eq!(updated.first_name, "Ada");
    assert_eq!(updated.last_name, "King");
    assert_eq!(updated.email, "ada@example.com");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/teams/{}/people", team.id))
        .to_request();
    let listed: ApiResponse<Vec<Person>> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.data.unwrap(), vec![updated]);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/teams/{}/people/{}", team.id, person.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/teams/{}/people/{}", team.id, person.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_person_is_not_visible_through_another_team() {
    let ctx = TestContext::new();
    let team = ctx.seed_team("Platform").await;
    let other = ctx.seed_team("Payments").await;
    let person = ctx.seed_person(team.id).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/teams/{}/people/{}", other.id, person.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/teams/{}/people/{}", other.id, person.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_deleting_team_removes_its_turns() {
    let ctx = TestContext::new();
    let team = ctx.seed_team("Platform").await;
    let person = ctx.seed_person(team.id).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/teams/{}/turns", team.id))
        .set_json(json!({ "person_id": person.id }))
        .to_request();
    let assigned: ApiResponse<Turn> = test::call_and_read_body_json(&app, req).await;
    assert!(assigned.data.is_some());
    assert_eq!(ctx.store.turn_count(team.id).unwrap(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/teams/{}", team.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.store.turn_count(team.id).unwrap(), 0);
}
