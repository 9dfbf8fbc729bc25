use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    auth::UserContext,
    db::entities::{artists, wishlist_artists},
    error::{AppError, Result},
    state::AppState,
};

use super::artists::ArtistSummary;

/// Presence-only membership: the wishlist is the set of artists the user
/// wants to see live.
pub async fn list_wishlist(
    State(state): State<AppState>,
    user: UserContext,
) -> Result<Json<Vec<ArtistSummary>>> {
    let rows = wishlist_artists::Entity::find()
        .filter(wishlist_artists::Column::UserId.eq(user.user_id))
        .find_also_related(artists::Entity)
        .all(&state.db)
        .await?;

    Ok(Json(
        rows.into_iter()
            .filter_map(|(_, artist)| artist)
            .map(|a| ArtistSummary {
                id: a.id,
                name: a.name,
                genre: a.genre,
                image_url: a.image_url,
            })
            .collect(),
    ))
}

pub async fn add_to_wishlist(
    State(state): State<AppState>,
    user: UserContext,
    Path(artist_id): Path<Uuid>,
) -> Result<StatusCode> {
    artists::Entity::find_by_id(artist_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Artist not found".to_string()))?;

    let existing = wishlist_artists::Entity::find()
        .filter(wishlist_artists::Column::UserId.eq(user.user_id))
        .filter(wishlist_artists::Column::ArtistId.eq(artist_id))
        .one(&state.db)
        .await?;

    if existing.is_none() {
        wishlist_artists::ActiveModel {
            user_id: Set(user.user_id),
            artist_id: Set(artist_id),
        }
        .insert(&state.db)
        .await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    user: UserContext,
    Path(artist_id): Path<Uuid>,
) -> Result<StatusCode> {
    wishlist_artists::Entity::delete_many()
        .filter(wishlist_artists::Column::UserId.eq(user.user_id))
        .filter(wishlist_artists::Column::ArtistId.eq(artist_id))
        .exec(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
