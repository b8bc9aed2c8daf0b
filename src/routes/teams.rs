use actix_web::web;

use crate::handlers::{people, teams, turns};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/teams")
            .route("", web::get().to(teams::get_teams))
            .route("", web::post().to(teams::create_team))
            .route("/{team_id}", web::get().to(teams::get_team))
            .route("/{team_id}", web::put().to(teams::update_team))
            .route("/{team_id}", web::delete().to(teams::delete_team))
            // team people
            .route("/{team_id}/people", web::get().to(people::get_people))
            .route("/{team_id}/people", web::post().to(people::add_person))
            .route("/{team_id}/people/{person_id}", web::get().to(people::get_person))
            .route("/{team_id}/people/{person_id}", web::put().to(people::update_person))
            .route(
                "/{team_id}/people/{person_id}",
                web::delete().to(people::delete_person),
            )
            // team turns
            .route("/{team_id}/turns", web::get().to(turns::get_turns))
            .route("/{team_id}/turns", web::post().to(turns::assign_next_turn))
            .route("/{team_id}/turns/{turn_id}", web::get().to(turns::get_turn)),
    );
}
