use std::{
    num::{IntErrorKind, ParseIntError},
    str::FromStr,
    sync::Arc,
};

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use customers::domain::{
    customer::{Customer, CustomerId, CustomerRepository},
    Id,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ApiError;

pub type Repository = Arc<dyn CustomerRepository>;

/// 整数として読めないIDは400、範囲外の整数は該当なしとして404
fn parse_id<I>(raw: &str) -> Result<I, ApiError>
where
    I: Id,
    I::Inner: FromStr<Err = ParseIntError>,
{
    raw.parse::<I::Inner>().map(I::from).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ApiError::NotFound(raw.to_owned())
        }
        _ => ApiError::BadRequest(format!("invalid id {:?}: {}", raw, e)),
    })
}

/// Content-Typeに関わらず本文をJSONとして読む
fn decode_customer(body: &Bytes) -> Result<Customer, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

/// GET /customers
pub async fn find_all(
    State(repository): State<Repository>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(repository.find_all().await?))
}

/// GET /customers/:id
pub async fn find_by_id(
    State(repository): State<Repository>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Customer>, ApiError> {
    let Path(raw) = path?;
    let id = parse_id::<CustomerId>(&raw)?;
    repository
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
}

/// POST /customers
pub async fn create(
    State(repository): State<Repository>,
    body: Bytes,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let customer = decode_customer(&body)?;
    let id = repository.create(&customer).await?;
    Ok((StatusCode::CREATED, Json(customer.with_id(id))))
}

/// PUT /customers
pub async fn update(
    State(repository): State<Repository>,
    body: Bytes,
) -> Result<Json<Customer>, ApiError> {
    let customer = decode_customer(&body)?;
    match repository.update(&customer).await? {
        true => Ok(Json(customer)),
        false => Err(ApiError::NotFound(customer.id().to_string())),
    }
}

/// DELETE /customers/:id
///
/// 存在しないIDの削除も成功として扱う
pub async fn delete(
    State(repository): State<Repository>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(raw) = path?;
    match parse_id::<CustomerId>(&raw) {
        Ok(id) => {
            if !repository.delete(id).await? {
                debug!("削除対象の顧客が存在しません id: {}", id);
            }
        }
        Err(ApiError::NotFound(_)) => debug!("削除対象の顧客が存在しません id: {}", raw),
        Err(e) => return Err(e),
    }
    Ok(Json(json!({ "message": "customer deleted" })))
}
