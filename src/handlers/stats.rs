use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::UserContext,
    error::Result,
    services::stats::{self, StatsData, WrappedData},
    state::AppState,
};

pub async fn get_stats(
    State(state): State<AppState>,
    user: UserContext,
) -> Result<Json<StatsData>> {
    let data = stats::personal_stats(&state.db, user).await?;
    Ok(Json(data))
}

pub async fn get_wrapped(
    State(state): State<AppState>,
    user: UserContext,
    Path(year): Path<i32>,
) -> Result<Json<WrappedData>> {
    let data = stats::wrapped(&state.db, user, year).await?;
    Ok(Json(data))
}
