use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::UserContext,
    db::entities::{events, venues},
    error::{AppError, Result},
    ingest::resolver::find_or_create_venue,
    state::AppState,
    validate::{
        normalize_name, optional_text, sanitize_text, MAX_ADDRESS_LEN, MAX_CITY_LEN,
        MAX_COUNTRY_LEN, MAX_NAME_LEN,
    },
};

#[derive(Deserialize)]
pub struct ListVenuesQuery {
    pub search: Option<String>,
}

pub async fn list_venues(
    State(state): State<AppState>,
    _user: UserContext,
    Query(query): Query<ListVenuesQuery>,
) -> Result<Json<Vec<venues::Model>>> {
    let mut select = venues::Entity::find();

    if let Some(search) = &query.search {
        if !search.is_empty() {
            select = select.filter(
                venues::Column::NameNormalized.contains(&normalize_name(search)),
            );
        }
    }

    let rows = select
        .order_by_asc(venues::Column::NameNormalized)
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct CreateVenueRequest {
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
}

pub async fn create_venue(
    State(state): State<AppState>,
    _user: UserContext,
    Json(payload): Json<CreateVenueRequest>,
) -> Result<(StatusCode, Json<venues::Model>)> {
    let name = sanitize_text(&payload.name, MAX_NAME_LEN);
    if name.is_empty() {
        return Err(AppError::Validation("Venue name is required".to_string()));
    }

    let venue = find_or_create_venue(
        &state.db,
        &name,
        payload.city.as_deref(),
        payload.country.as_deref(),
    )
    .await?;

    let address = optional_text(payload.address.as_deref(), MAX_ADDRESS_LEN);
    let venue = if venue.address.is_none() && address.is_some() {
        let mut active: venues::ActiveModel = venue.into();
        active.address = Set(address);
        active.updated_at = Set(Utc::now().into());
        active.update(&state.db).await?
    } else {
        venue
    };

    Ok((StatusCode::CREATED, Json(venue)))
}

pub async fn get_venue(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<Json<venues::Model>> {
    let venue = venues::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Venue not found".to_string()))?;

    Ok(Json(venue))
}

#[derive(Deserialize)]
pub struct UpdateVenueRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
}

pub async fn update_venue(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVenueRequest>,
) -> Result<Json<venues::Model>> {
    let venue = venues::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Venue not found".to_string()))?;

    let mut active: venues::ActiveModel = venue.into();

    if let Some(name) = payload.name {
        let name = sanitize_text(&name, MAX_NAME_LEN);
        if name.is_empty() {
            return Err(AppError::Validation("Venue name cannot be empty".to_string()));
        }
        active.name_normalized = Set(normalize_name(&name));
        active.name = Set(name);
    }
    if let Some(city) = payload.city {
        active.city = Set(optional_text(Some(&city), MAX_CITY_LEN));
    }
    if let Some(country) = payload.country {
        active.country = Set(optional_text(Some(&country), MAX_COUNTRY_LEN));
    }
    if let Some(address) = payload.address {
        active.address = Set(optional_text(Some(&address), MAX_ADDRESS_LEN));
    }
    active.updated_at = Set(Utc::now().into());

    Ok(Json(active.update(&state.db).await?))
}

/// Venues still referenced by events cannot be deleted.
pub async fn delete_venue(
    State(state): State<AppState>,
    _user: UserContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    venues::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Venue not found".to_string()))?;

    let referenced = events::Entity::find()
        .filter(events::Column::VenueId.eq(id))
        .count(&state.db)
        .await?;
    if referenced > 0 {
        return Err(AppError::Validation(
            "Venue still has events and cannot be deleted".to_string(),
        ));
    }

    venues::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}
