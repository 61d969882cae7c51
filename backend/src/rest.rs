use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{
    CategoryInfo, DeleteExpenseResponse, ExpenseDraft, ExpenseListResponse, ResetResponse,
};
use tracing::info;

use crate::domain::insights_service::DEFAULT_RECENT_LIMIT;
use crate::domain::validation::validate_expense;
use crate::domain::{categories, ExpenseService, InsightsService};
use crate::errors::ExpenseError;
use crate::storage::SqliteExpenseStorage;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService<SqliteExpenseStorage>,
    pub insights_service: InsightsService,
}

impl AppState {
    pub fn new(
        expense_service: ExpenseService<SqliteExpenseStorage>,
        insights_service: InsightsService,
    ) -> Self {
        Self {
            expense_service,
            insights_service,
        }
    }
}

/// Query parameters for the dashboard endpoint
#[derive(Deserialize, Debug)]
pub struct DashboardQuery {
    pub limit: Option<usize>,
}

/// Axum handler function for GET /api/expenses
pub async fn list_expenses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/expenses");

    let expenses = state.expense_service.get_all().await;
    (StatusCode::OK, Json(ExpenseListResponse { expenses }))
}

/// Axum handler function for POST /api/expenses
pub async fn create_expense(
    State(state): State<AppState>,
    Json(draft): Json<ExpenseDraft>,
) -> impl IntoResponse {
    info!("POST /api/expenses - category: {:?}", draft.category);

    let errors = validate_expense(&draft);
    if !errors.is_empty() {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response();
    }

    let expense = state.expense_service.add(draft).await;
    (StatusCode::CREATED, Json(expense)).into_response()
}

/// Axum handler function for PUT /api/expenses/:id
pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<ExpenseDraft>,
) -> impl IntoResponse {
    info!("PUT /api/expenses/{}", id);

    let errors = validate_expense(&draft);
    if !errors.is_empty() {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response();
    }

    match state.expense_service.edit(id, draft).await {
        Ok(expense) => (StatusCode::OK, Json(expense)).into_response(),
        Err(err @ ExpenseError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, err.to_string()).into_response()
        }
        Err(err) => {
            tracing::error!("Error updating expense: {:?}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error updating expense").into_response()
        }
    }
}

/// Axum handler function for DELETE /api/expenses/:id
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/expenses/{}", id);

    match state.expense_service.delete(id).await {
        Ok(expense) => (
            StatusCode::OK,
            Json(DeleteExpenseResponse {
                success_message: format!("Expense {} deleted successfully", expense.id),
            }),
        )
            .into_response(),
        Err(err @ ExpenseError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, err.to_string()).into_response()
        }
        Err(err) => {
            tracing::error!("Error deleting expense: {:?}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting expense").into_response()
        }
    }
}

/// Axum handler function for DELETE /api/expenses (full reset)
pub async fn reset_expenses(State(state): State<AppState>) -> impl IntoResponse {
    info!("DELETE /api/expenses - resetting collection");

    match state.expense_service.reset().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ResetResponse {
                success_message: "All expenses have been reset".to_string(),
            }),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Error resetting expenses: {:?}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error resetting expenses").into_response()
        }
    }
}

/// Axum handler function for GET /api/dashboard
pub async fn dashboard_summary(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    info!("GET /api/dashboard - query: {:?}", query);

    let expenses = state.expense_service.get_all().await;
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let summary = state.insights_service.dashboard_summary(&expenses, limit);
    (StatusCode::OK, Json(summary))
}

/// Axum handler function for GET /api/charts
pub async fn spending_charts(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/charts");

    let expenses = state.expense_service.get_all().await;
    let charts = state.insights_service.spending_charts(&expenses);
    (StatusCode::OK, Json(charts))
}

/// Axum handler function for GET /api/categories
pub async fn list_categories() -> impl IntoResponse {
    info!("GET /api/categories");

    let categories: Vec<CategoryInfo> = categories::CATEGORIES
        .iter()
        .map(|category| CategoryInfo {
            id: category.id.to_string(),
            label: category.label.to_string(),
            icon: categories::icon_for_category(category.id).to_string(),
        })
        .collect();
    (StatusCode::OK, Json(categories))
}
