//! Company handlers. Every route needs a bearer token.
//!
//! ```text
//! POST   /api/v1/company {"company_name":"Acme","address":"1 Main St"}
//! GET    /api/v1/company/{company_id}
//! PATCH  /api/v1/company/{company_id} {"address":"2 Oak St"}
//! DELETE /api/v1/company/{company_id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApiResult, Company, CompanyDraft, CompanyId, CompanyPatch, Error};

use super::identity::Identity;
use super::state::HttpState;
use super::validation::require_non_blank;

/// Body of `POST /api/v1/company`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCompanyRequest {
    #[schema(example = "Acme")]
    pub company_name: String,
    #[schema(example = "1 Main St")]
    pub address: String,
}

impl TryFrom<CreateCompanyRequest> for CompanyDraft {
    type Error = Error;

    fn try_from(value: CreateCompanyRequest) -> Result<Self, Self::Error> {
        require_non_blank("company_name", &value.company_name)?;
        require_non_blank("address", &value.address)?;
        Ok(Self {
            company_name: value.company_name.trim().to_owned(),
            address: value.address.trim().to_owned(),
        })
    }
}

/// Body of `PATCH /api/v1/company/{company_id}`. Absent fields are kept;
/// present name and address must not be blank.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateCompanyRequest {
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
}

fn present_non_blank(field: &str, value: Option<String>) -> Result<Option<String>, Error> {
    match value {
        Some(text) => {
            require_non_blank(field, &text)?;
            Ok(Some(text.trim().to_owned()))
        }
        None => Ok(None),
    }
}

impl TryFrom<UpdateCompanyRequest> for CompanyPatch {
    type Error = Error;

    fn try_from(value: UpdateCompanyRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            company_name: present_non_blank("company_name", value.company_name)?,
            address: present_non_blank("address", value.address)?,
            image_url: value.image_url,
        })
    }
}

/// Create a company owned by the caller, who becomes its administrator.
#[utoipa::path(
    post,
    path = "/api/v1/company",
    request_body = CreateCompanyRequest,
    responses(
        (status = 200, description = "Company created", body = Company),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 409, description = "Caller already has a company", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["companies"],
    operation_id = "addCompany"
)]
#[post("/company")]
pub async fn add_company(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<CreateCompanyRequest>,
) -> ApiResult<web::Json<Company>> {
    let draft = CompanyDraft::try_from(payload.into_inner())?;
    let company = state
        .companies
        .add_company(identity.context(), draft)
        .await?;
    Ok(web::Json(company))
}

/// Fetch a company the caller belongs to.
#[utoipa::path(
    get,
    path = "/api/v1/company/{company_id}",
    params(("company_id" = i64, Path, description = "Company identifier")),
    responses(
        (status = 200, description = "Company", body = Company),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not a member", body = Error),
        (status = 404, description = "No such company", body = Error)
    ),
    tags = ["companies"],
    operation_id = "getCompany"
)]
#[get("/company/{company_id}")]
pub async fn get_company(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Company>> {
    let company_id = CompanyId::new(path.into_inner());
    let company = state
        .companies_query
        .get_company(identity.context(), company_id)
        .await?;
    Ok(web::Json(company))
}

/// Change company fields. Needs `company_admin`.
#[utoipa::path(
    patch,
    path = "/api/v1/company/{company_id}",
    params(("company_id" = i64, Path, description = "Company identifier")),
    request_body = UpdateCompanyRequest,
    responses(
        (status = 200, description = "Updated company", body = Company),
        (status = 400, description = "Nothing to change or blank field", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not an administrator", body = Error),
        (status = 404, description = "No such company", body = Error)
    ),
    tags = ["companies"],
    operation_id = "updateCompany"
)]
#[patch("/company/{company_id}")]
pub async fn update_company(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<i64>,
    payload: web::Json<UpdateCompanyRequest>,
) -> ApiResult<web::Json<Company>> {
    let company_id = CompanyId::new(path.into_inner());
    let patch = CompanyPatch::try_from(payload.into_inner())?;
    let company = state
        .companies
        .update_company(identity.context(), patch, company_id)
        .await?;
    Ok(web::Json(company))
}

/// Remove a company. Needs `company_admin`.
#[utoipa::path(
    delete,
    path = "/api/v1/company/{company_id}",
    params(("company_id" = i64, Path, description = "Company identifier")),
    responses(
        (status = 204, description = "Company removed"),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not an administrator", body = Error)
    ),
    tags = ["companies"],
    operation_id = "deleteCompany"
)]
#[delete("/company/{company_id}")]
pub async fn delete_company(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let company_id = CompanyId::new(path.into_inner());
    state
        .companies
        .delete_company(identity.context(), company_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "companies_tests.rs"]
mod tests;
