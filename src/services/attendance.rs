//! Per-user attendance status and memories.
//!
//! At most one attendance row exists per (event, user); the first
//! interaction creates it and later interactions update the status in
//! place. Status transitions are free-form, not a pipeline: a user can
//! jump from any status to any other. A memory attaches one-to-one to an
//! attendance and is created lazily on first save.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::UserContext;
use crate::db::entities::{attendances, events, festival_attendances, festivals, memories};
use crate::db::enums::AttendanceStatus;
use crate::error::{AppError, Result};
use crate::validate::{optional_text, validate_rating, MAX_NOTES_LEN, MAX_REVIEW_LEN};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryInput {
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub notes: Option<String>,
}

/// Upsert-by-lookup of the user's status on an event.
pub async fn set_event_status(
    db: &DatabaseConnection,
    user: UserContext,
    event_id: Uuid,
    status: AttendanceStatus,
) -> Result<attendances::Model> {
    events::Entity::find_by_id(event_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let existing = attendances::Entity::find()
        .filter(attendances::Column::EventId.eq(event_id))
        .filter(attendances::Column::UserId.eq(user.user_id))
        .one(db)
        .await?;

    let attendance = if let Some(row) = existing {
        let mut active: attendances::ActiveModel = row.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now().into());
        active.update(db).await?
    } else {
        attendances::ActiveModel {
            id: Set(Uuid::new_v4()),
            event_id: Set(event_id),
            user_id: Set(user.user_id),
            status: Set(status.as_str().to_string()),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await?
    };

    Ok(attendance)
}

/// Save rating/review/notes for an event. The rating is validated before
/// any write; a rejected rating leaves existing rows untouched. Rating a
/// show without a prior attendance creates one with status `went`.
pub async fn save_memory(
    db: &DatabaseConnection,
    user: UserContext,
    event_id: Uuid,
    input: MemoryInput,
) -> Result<memories::Model> {
    let rating = input.rating.map(validate_rating).transpose()?;
    let review = optional_text(input.review.as_deref(), MAX_REVIEW_LEN);
    let notes = optional_text(input.notes.as_deref(), MAX_NOTES_LEN);

    events::Entity::find_by_id(event_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let attendance = match attendances::Entity::find()
        .filter(attendances::Column::EventId.eq(event_id))
        .filter(attendances::Column::UserId.eq(user.user_id))
        .one(db)
        .await?
    {
        Some(row) => row,
        None => {
            attendances::ActiveModel {
                id: Set(Uuid::new_v4()),
                event_id: Set(event_id),
                user_id: Set(user.user_id),
                status: Set(AttendanceStatus::Went.as_str().to_string()),
                created_at: Set(Utc::now().into()),
                updated_at: Set(Utc::now().into()),
            }
            .insert(db)
            .await?
        }
    };

    let existing_memory = memories::Entity::find()
        .filter(memories::Column::AttendanceId.eq(attendance.id))
        .one(db)
        .await?;

    let memory = if let Some(row) = existing_memory {
        let mut active: memories::ActiveModel = row.into();
        active.rating = Set(rating);
        active.review = Set(review);
        active.notes = Set(notes);
        active.updated_at = Set(Utc::now().into());
        active.update(db).await?
    } else {
        memories::ActiveModel {
            id: Set(Uuid::new_v4()),
            attendance_id: Set(attendance.id),
            rating: Set(rating),
            review: Set(review),
            notes: Set(notes),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await?
    };

    Ok(memory)
}

/// Festival mirror of event attendance: status plus an optional inline
/// rating/review, one row per (festival, user).
pub async fn set_festival_status(
    db: &DatabaseConnection,
    user: UserContext,
    festival_id: Uuid,
    status: AttendanceStatus,
    rating: Option<i32>,
    review: Option<String>,
) -> Result<festival_attendances::Model> {
    let rating = rating.map(validate_rating).transpose()?;
    let review = optional_text(review.as_deref(), MAX_REVIEW_LEN);

    festivals::Entity::find_by_id(festival_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Festival not found".to_string()))?;

    let existing = festival_attendances::Entity::find()
        .filter(festival_attendances::Column::FestivalId.eq(festival_id))
        .filter(festival_attendances::Column::UserId.eq(user.user_id))
        .one(db)
        .await?;

    let attendance = if let Some(row) = existing {
        let mut active: festival_attendances::ActiveModel = row.into();
        active.status = Set(status.as_str().to_string());
        if rating.is_some() {
            active.rating = Set(rating);
        }
        if review.is_some() {
            active.review = Set(review);
        }
        active.updated_at = Set(Utc::now().into());
        active.update(db).await?
    } else {
        festival_attendances::ActiveModel {
            id: Set(Uuid::new_v4()),
            festival_id: Set(festival_id),
            user_id: Set(user.user_id),
            status: Set(status.as_str().to_string()),
            rating: Set(rating),
            review: Set(review),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await?
    };

    Ok(attendance)
}
