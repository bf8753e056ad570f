//! HTTP inbound adapter exposing the REST endpoints under `/api/v1`.

pub mod auth;
pub mod companies;
pub mod error;
pub mod health;
pub mod identity;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use crate::domain::ApiResult;

/// Register every `/api/v1` route on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use thing_repository::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(auth::sign_up)
        .service(auth::sign_in)
        .service(companies::add_company)
        .service(companies::get_company)
        .service(companies::update_company)
        .service(companies::delete_company)
        .service(users::find_users)
        .service(users::add_user_to_company);
}
