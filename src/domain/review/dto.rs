use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::review;
use crate::domain::user::entity::user;

/// 리뷰 작성 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, max = 200, message = "리뷰는 1자 이상 200자 이하여야 합니다"))]
    pub content: String,
    #[validate(range(min = 0.0, max = 5.0, message = "평점은 0 이상 5 이하여야 합니다"))]
    pub rating: f64,
    pub gather_room_id: i64,
}

/// 리뷰 목록 필터
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewListQuery {
    /// 모임방 ID
    pub gather_room: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewerResponse {
    pub id: i64,
    pub name: String,
    pub profile_img_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i64,
    pub content: String,
    pub rating: f64,
    pub gather_room_id: i64,
    pub user: ReviewerResponse,
    pub created_at: NaiveDateTime,
}

impl ReviewResponse {
    pub fn new(model: &review::Model, author: &user::Model) -> Self {
        Self {
            id: model.id,
            content: model.content.clone(),
            rating: model.rating,
            gather_room_id: model.gather_room_id,
            user: ReviewerResponse {
                id: author.id,
                name: author.name.clone(),
                profile_img_url: author.profile_img_url.clone(),
            },
            created_at: model.created_at,
        }
    }
}
