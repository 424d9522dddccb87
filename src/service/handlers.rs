use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;

use super::auth::token_from_headers;
use super::error::ApiError;
use super::ServiceState;
use crate::models::{Budget, BudgetId, BudgetRequest};

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Budget Service (development)",
            "version": version,
            "endpoints": {
                "health": "/health (public)",
                "set": "POST /setBudget (token)",
                "list": "GET /getBudgets (token)",
                "delete": "DELETE /deleteBudget/:id (token)",
            }
        }
    }))
}

pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "status": "ok",
                "timestamp": chrono::Utc::now(),
            }
        })),
    )
}

/// POST /setBudget - create the budget for a category, or replace its amount
pub async fn set_budget(
    State(state): State<ServiceState>,
    headers: HeaderMap,
    payload: Result<Json<BudgetRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let token = token_from_headers(&headers)?;
    state.count_mutation();

    let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    if request.amount <= Decimal::ZERO {
        let mut field_errors = HashMap::new();
        field_errors.insert("amount".to_string(), "must be greater than zero".to_string());
        return Err(ApiError::validation_error("Invalid budget", Some(field_errors)));
    }

    let mut budgets = state.inner.budgets.write().await;
    let owned = budgets.entry(token).or_default();

    let (status, budget) = match owned.iter_mut().find(|b| b.category == request.category) {
        Some(existing) => {
            existing.amount = request.amount;
            (StatusCode::OK, existing.clone())
        }
        None => {
            let budget = Budget {
                id: BudgetId::new(Uuid::new_v4().to_string()),
                category: request.category,
                amount: request.amount,
            };
            owned.push(budget.clone());
            (StatusCode::CREATED, budget)
        }
    };

    tracing::debug!("Budget {} set: {} = {}", budget.id, budget.category, budget.amount);
    Ok((status, Json(json!({ "success": true, "data": budget }))))
}

/// GET /getBudgets - every budget for the calling token, in insertion order
pub async fn get_budgets(
    State(state): State<ServiceState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Budget>>, ApiError> {
    let token = token_from_headers(&headers)?;
    state.count_read();

    Ok(Json(state.budgets_for(&token).await))
}

/// DELETE /deleteBudget/:id
pub async fn delete_budget(
    State(state): State<ServiceState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let token = token_from_headers(&headers)?;
    state.count_mutation();

    let mut budgets = state.inner.budgets.write().await;
    let owned = budgets.entry(token).or_default();
    let before = owned.len();
    owned.retain(|budget| budget.id.as_str() != id);

    if owned.len() == before {
        return Err(ApiError::not_found(format!("Budget '{}' not found", id)));
    }

    tracing::debug!("Budget {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}
