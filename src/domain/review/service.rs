use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use super::dto::{CreateReviewRequest, ReviewListQuery, ReviewResponse};
use super::entity::review;
use crate::domain::gather_room::entity::gather_room;
use crate::domain::user::entity::user;
use crate::domain::user::UserService;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct ReviewService;

impl ReviewService {
    /// 리뷰 목록. 삭제된 리뷰는 보이지 않습니다.
    pub async fn list(
        state: &AppState,
        query: ReviewListQuery,
    ) -> Result<Vec<ReviewResponse>, AppError> {
        let mut select = review::Entity::find()
            .filter(review::Column::DeletedAt.is_null())
            .order_by_desc(review::Column::Id);
        if let Some(gather_room_id) = query.gather_room {
            select = select.filter(review::Column::GatherRoomId.eq(gather_room_id));
        }

        let reviews = select.all(&state.db).await?;
        if reviews.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: Vec<i64> = reviews.iter().map(|r| r.user_id).collect();
        let authors: HashMap<i64, user::Model> = user::Entity::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(&state.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(reviews
            .iter()
            .filter_map(|r| authors.get(&r.user_id).map(|a| ReviewResponse::new(r, a)))
            .collect())
    }

    /// 리뷰 작성
    pub async fn create(
        state: &AppState,
        user_id: i64,
        req: CreateReviewRequest,
    ) -> Result<ReviewResponse, AppError> {
        let room = gather_room::Entity::find_by_id(req.gather_room_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 모임방입니다."))?;
        let author = UserService::require_active(&state.db, user_id).await?;

        let created = review::ActiveModel {
            content: Set(req.content),
            rating: Set(req.rating),
            user_id: Set(author.id),
            gather_room_id: Set(room.id),
            created_at: Set(Utc::now().naive_utc()),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(review_id = created.id, user_id, gather_room_id = room.id, "review created");
        Ok(ReviewResponse::new(&created, &author))
    }

    /// 리뷰 삭제 (작성자만, 소프트 삭제)
    pub async fn destroy(state: &AppState, user_id: i64, id: i64) -> Result<(), AppError> {
        UserService::require_active(&state.db, user_id).await?;
        let target = review::Entity::find()
            .filter(review::Column::Id.eq(id))
            .filter(review::Column::UserId.eq(user_id))
            .filter(review::Column::DeletedAt.is_null())
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 리뷰입니다."))?;

        let mut active: review::ActiveModel = target.into();
        active.deleted_at = Set(Some(Utc::now().naive_utc()));
        active.update(&state.db).await?;

        info!(review_id = id, user_id, "review deleted");
        Ok(())
    }
}
