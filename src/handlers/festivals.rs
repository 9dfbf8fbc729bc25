use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::UserContext,
    db::entities::{events, festival_attendances, festival_events, festivals},
    db::enums::AttendanceStatus,
    error::{AppError, Result},
    services::attendance,
    state::AppState,
    validate::{
        optional_text, sanitize_text, MAX_CITY_LEN, MAX_COUNTRY_LEN, MAX_DAY_LABEL_LEN,
        MAX_NAME_LEN,
    },
};

pub async fn list_festivals(
    State(state): State<AppState>,
    _user: UserContext,
) -> Result<Json<Vec<festivals::Model>>> {
    let rows = festivals::Entity::find()
        .order_by_desc(festivals::Column::StartDate)
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct CreateFestivalRequest {
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub async fn create_festival(
    State(state): State<AppState>,
    _user: UserContext,
    Json(payload): Json<CreateFestivalRequest>,
) -> Result<(StatusCode, Json<festivals::Model>)> {
    let name = sanitize_text(&payload.name, MAX_NAME_LEN);
    if name.is_empty() {
        return Err(AppError::Validation("Festival name is required".to_string()));
    }

    let now = Utc::now();
    let festival = festivals::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        city: Set(optional_text(payload.city.as_deref(), MAX_CITY_LEN)),
        country: Set(optional_text(payload.country.as_deref(), MAX_COUNTRY_LEN)),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(festival)))
}

#[derive(Serialize)]
pub struct FestivalDetailResponse {
    pub festival: festivals::Model,
    pub events: Vec<FestivalEventResponse>,
    pub attendance: Option<festival_attendances::Model>,
}

#[derive(Serialize)]
pub struct FestivalEventResponse {
    pub event: events::Model,
    pub day_label: Option<String>,
}

pub async fn get_festival(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<Json<FestivalDetailResponse>> {
    let festival = festivals::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Festival not found".to_string()))?;

    let links = festival_events::Entity::find()
        .filter(festival_events::Column::FestivalId.eq(id))
        .find_also_related(events::Entity)
        .all(&state.db)
        .await?;

    let mut festival_events_out: Vec<FestivalEventResponse> = links
        .into_iter()
        .filter_map(|(link, event)| {
            event.map(|e| FestivalEventResponse {
                event: e,
                day_label: link.day_label,
            })
        })
        .collect();
    festival_events_out.sort_by_key(|fe| fe.event.date);

    let my_attendance = festival_attendances::Entity::find()
        .filter(festival_attendances::Column::FestivalId.eq(id))
        .filter(festival_attendances::Column::UserId.eq(user.user_id))
        .one(&state.db)
        .await?;

    Ok(Json(FestivalDetailResponse {
        festival,
        events: festival_events_out,
        attendance: my_attendance,
    }))
}

#[derive(Deserialize)]
pub struct UpdateFestivalRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub async fn update_festival(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFestivalRequest>,
) -> Result<Json<festivals::Model>> {
    let festival = festivals::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Festival not found".to_string()))?;

    let mut active: festivals::ActiveModel = festival.into();

    if let Some(name) = payload.name {
        let name = sanitize_text(&name, MAX_NAME_LEN);
        if name.is_empty() {
            return Err(AppError::Validation(
                "Festival name cannot be empty".to_string(),
            ));
        }
        active.name = Set(name);
    }
    if let Some(city) = payload.city {
        active.city = Set(optional_text(Some(&city), MAX_CITY_LEN));
    }
    if let Some(country) = payload.country {
        active.country = Set(optional_text(Some(&country), MAX_COUNTRY_LEN));
    }
    if payload.start_date.is_some() {
        active.start_date = Set(payload.start_date);
    }
    if payload.end_date.is_some() {
        active.end_date = Set(payload.end_date);
    }
    active.updated_at = Set(Utc::now().into());

    Ok(Json(active.update(&state.db).await?))
}

/// Deleting a festival removes its event links and attendances, not the
/// underlying events.
pub async fn delete_festival(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    festivals::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Festival not found".to_string()))?;

    let txn = state.db.begin().await?;

    festival_events::Entity::delete_many()
        .filter(festival_events::Column::FestivalId.eq(id))
        .exec(&txn)
        .await?;

    festival_attendances::Entity::delete_many()
        .filter(festival_attendances::Column::FestivalId.eq(id))
        .exec(&txn)
        .await?;

    festivals::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct AttachEventRequest {
    pub event_id: Uuid,
    pub day_label: Option<String>,
}

pub async fn attach_event(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<AttachEventRequest>,
) -> Result<StatusCode> {
    festivals::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Festival not found".to_string()))?;

    events::Entity::find_by_id(payload.event_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let existing = festival_events::Entity::find()
        .filter(festival_events::Column::FestivalId.eq(id))
        .filter(festival_events::Column::EventId.eq(payload.event_id))
        .one(&state.db)
        .await?;

    if existing.is_none() {
        festival_events::ActiveModel {
            festival_id: Set(id),
            event_id: Set(payload.event_id),
            day_label: Set(optional_text(
                payload.day_label.as_deref(),
                MAX_DAY_LABEL_LEN,
            )),
        }
        .insert(&state.db)
        .await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct SetFestivalAttendanceRequest {
    pub status: Option<AttendanceStatus>,
    pub rating: Option<i32>,
    pub review: Option<String>,
}

pub async fn set_attendance(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetFestivalAttendanceRequest>,
) -> Result<Json<festival_attendances::Model>> {
    let status = payload.status.unwrap_or(AttendanceStatus::Interested);
    let row = attendance::set_festival_status(
        &state.db,
        user,
        id,
        status,
        payload.rating,
        payload.review,
    )
    .await?;

    Ok(Json(row))
}
