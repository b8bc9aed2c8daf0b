use actix_web::{HttpRequest, error, web};

use crate::error::AppError;

pub mod teams;

fn bad_request(err: impl std::fmt::Display) -> error::Error {
    AppError::BadRequest(err.to_string()).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req: &HttpRequest| bad_request(err)),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req: &HttpRequest| bad_request(err)),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req: &HttpRequest| bad_request(err)),
    )
    .service(web::scope("/api/v1").configure(teams::configure));
}
