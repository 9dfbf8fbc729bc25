use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::UserContext,
    db::entities::{events, expenses},
    db::enums::ExpenseCategory,
    error::{AppError, Result},
    state::AppState,
    validate::{optional_text, validate_amount, MAX_NOTE_LEN},
};

#[derive(Deserialize)]
pub struct ListExpensesQuery {
    pub category: Option<String>,
    pub event_id: Option<Uuid>,
}

/// Expenses are row-owned: every query here filters by the requesting
/// user's id.
pub async fn list_expenses(
    State(state): State<AppState>,
    user: UserContext,
    Query(query): Query<ListExpensesQuery>,
) -> Result<Json<Vec<expenses::Model>>> {
    let mut select = expenses::Entity::find()
        .filter(expenses::Column::UserId.eq(user.user_id));

    if let Some(category) = &query.category {
        let category = ExpenseCategory::from_str(category)
            .ok_or_else(|| AppError::Validation(format!("Unknown category '{}'", category)))?;
        select = select.filter(expenses::Column::Category.eq(category.as_str()));
    }
    if let Some(event_id) = query.event_id {
        select = select.filter(expenses::Column::EventId.eq(event_id));
    }

    let rows = select
        .order_by_desc(expenses::Column::Date)
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct CreateExpenseRequest {
    pub amount: f64,
    pub category: ExpenseCategory,
    pub note: Option<String>,
    pub event_id: Option<Uuid>,
    pub date: Option<DateTime<Utc>>,
}

pub async fn create_expense(
    State(state): State<AppState>,
    user: UserContext,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<expenses::Model>)> {
    let amount = validate_amount(payload.amount)?;

    if let Some(event_id) = payload.event_id {
        events::Entity::find_by_id(event_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
    }

    let now = Utc::now();
    let expense = expenses::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        amount: Set(amount),
        category: Set(payload.category.as_str().to_string()),
        note: Set(optional_text(payload.note.as_deref(), MAX_NOTE_LEN)),
        event_id: Set(payload.event_id),
        date: Set(payload.date.unwrap_or(now).into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

#[derive(Deserialize)]
pub struct UpdateExpenseRequest {
    pub amount: Option<f64>,
    pub category: Option<ExpenseCategory>,
    pub note: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

pub async fn update_expense(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateExpenseRequest>,
) -> Result<Json<expenses::Model>> {
    let expense = expenses::Entity::find_by_id(id)
        .filter(expenses::Column::UserId.eq(user.user_id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Expense not found".to_string()))?;

    let mut active: expenses::ActiveModel = expense.into();

    if let Some(amount) = payload.amount {
        active.amount = Set(validate_amount(amount)?);
    }
    if let Some(category) = payload.category {
        active.category = Set(category.as_str().to_string());
    }
    if let Some(note) = payload.note {
        active.note = Set(optional_text(Some(&note), MAX_NOTE_LEN));
    }
    if let Some(date) = payload.date {
        active.date = Set(date.into());
    }
    active.updated_at = Set(Utc::now().into());

    Ok(Json(active.update(&state.db).await?))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let expense = expenses::Entity::find_by_id(id)
        .filter(expenses::Column::UserId.eq(user.user_id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Expense not found".to_string()))?;

    expense.delete(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}
