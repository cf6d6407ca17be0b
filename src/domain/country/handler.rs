use axum::{
    extract::{Query, State},
    Json,
};

use super::dto::{CountryQuery, CountryResponse};
use super::service::CountryService;
use crate::state::AppState;
use crate::utils::error::AppError;

/// 국가 검색 (익명 허용)
#[utoipa::path(
    get,
    path = "/countries/",
    params(CountryQuery),
    responses(
        (status = 200, description = "조회 성공", body = [CountryResponse])
    ),
    tag = "Country"
)]
pub async fn list_countries(
    State(state): State<AppState>,
    Query(query): Query<CountryQuery>,
) -> Result<Json<Vec<CountryResponse>>, AppError> {
    let countries = CountryService::search(&state, query).await?;
    Ok(Json(countries))
}
