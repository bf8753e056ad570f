//! Invite directory and membership handlers.
//!
//! ```text
//! GET  /api/v1/users/find?filter=ada&limit=20&offset=0
//! POST /api/v1/users/{user_id}/add_to_company?department_id=2
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::DirectoryPage;
use crate::domain::{ApiResult, DepartmentId, Error, User, UserId};

use super::identity::Identity;
use super::state::HttpState;

const DEFAULT_PAGE_SIZE: i64 = 20;

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Query string of `GET /api/v1/users/find`.
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct FindUsersQuery {
    /// Case-insensitive fragment of a name or email.
    #[serde(default)]
    pub filter: String,
    /// Page size, clamped to 1..=100.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Rows to skip.
    #[serde(default)]
    pub offset: i64,
}

/// Query string of `POST /api/v1/users/{user_id}/add_to_company`.
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AddToCompanyQuery {
    /// Department the user joins; its company is implied.
    pub department_id: i64,
}

/// List users without a company who match `filter`.
#[utoipa::path(
    get,
    path = "/api/v1/users/find",
    params(FindUsersQuery),
    responses(
        (status = 200, description = "Matching users", body = [User]),
        (status = 400, description = "Invalid paging", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["users"],
    operation_id = "findUsersForInvite"
)]
#[get("/users/find")]
pub async fn find_users(
    state: web::Data<HttpState>,
    identity: Identity,
    query: web::Query<FindUsersQuery>,
) -> ApiResult<web::Json<Vec<User>>> {
    let FindUsersQuery {
        filter,
        limit,
        offset,
    } = query.into_inner();
    let users = state
        .directory
        .find_users_for_invite(identity.context(), &filter, DirectoryPage { limit, offset })
        .await?;
    Ok(web::Json(users))
}

/// Place a user into a department and its company.
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/add_to_company",
    params(
        ("user_id" = i64, Path, description = "User to place"),
        AddToCompanyQuery
    ),
    responses(
        (status = 204, description = "User placed"),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller cannot manage the department", body = Error),
        (status = 404, description = "No such user or department", body = Error),
        (status = 409, description = "User already has a company", body = Error)
    ),
    tags = ["users"],
    operation_id = "addUserToCompany"
)]
#[post("/users/{user_id}/add_to_company")]
pub async fn add_user_to_company(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<i64>,
    query: web::Query<AddToCompanyQuery>,
) -> ApiResult<HttpResponse> {
    state
        .membership
        .add_user_to_company(
            identity.context(),
            UserId::new(path.into_inner()),
            DepartmentId::new(query.department_id),
        )
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
