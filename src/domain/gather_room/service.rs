use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::dto::{
    CreatorResponse, GatherRoomDetail, GatherRoomImageResponse, GatherRoomListQuery,
    GatherRoomSummary,
};
use super::entity::{gather_room, gather_room_category, gather_room_image};
use super::schema::{GatherRoomForm, RawGatherRoomForm};
use crate::domain::reservation::entity::reservation;
use crate::domain::review::entity::review;
use crate::domain::user::entity::user;
use crate::domain::user::UserService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::multipart::{MultipartForm, UploadFile};
use crate::utils::storage::ObjectStorage;

/// 모임방 이미지 파일 필드명
pub const IMAGE_FIELD: &str = "gather_room_images";

pub struct GatherRoomService;

impl GatherRoomService {
    /// 모임방 목록 (카테고리/개설자 필터)
    pub async fn list(
        state: &AppState,
        query: GatherRoomListQuery,
    ) -> Result<Vec<GatherRoomSummary>, AppError> {
        let mut select = gather_room::Entity::find().order_by_desc(gather_room::Column::Id);
        if let Some(category_id) = query.category {
            select = select.filter(gather_room::Column::GatherRoomCategoryId.eq(category_id));
        }
        if let Some(creator_id) = query.creator {
            select = select.filter(gather_room::Column::CreatorId.eq(creator_id));
        }

        let rooms = select.all(&state.db).await?;
        if rooms.is_empty() {
            return Ok(Vec::new());
        }

        let category_ids: HashSet<i64> = rooms.iter().map(|r| r.gather_room_category_id).collect();
        let categories: HashMap<i64, gather_room_category::Model> =
            gather_room_category::Entity::find()
                .filter(gather_room_category::Column::Id.is_in(category_ids))
                .all(&state.db)
                .await?
                .into_iter()
                .map(|c| (c.id, c))
                .collect();

        let room_ids: Vec<i64> = rooms.iter().map(|r| r.id).collect();
        let mut images: HashMap<i64, Vec<gather_room_image::Model>> = HashMap::new();
        for image in gather_room_image::Entity::find()
            .filter(gather_room_image::Column::GatherRoomId.is_in(room_ids))
            .order_by_asc(gather_room_image::Column::Id)
            .all(&state.db)
            .await?
        {
            images.entry(image.gather_room_id).or_default().push(image);
        }

        Ok(rooms
            .iter()
            .filter_map(|room| {
                let category = categories.get(&room.gather_room_category_id)?;
                let room_images = images.get(&room.id).map(Vec::as_slice).unwrap_or(&[]);
                Some(GatherRoomSummary::new(room, category, room_images))
            })
            .collect())
    }

    /// 모임방 단건 조회 (익명 허용)
    pub async fn retrieve(state: &AppState, id: i64) -> Result<GatherRoomDetail, AppError> {
        let room = gather_room::Entity::find_by_id(id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 모임방입니다."))?;

        Self::load_detail(&state.db, room).await
    }

    /// 모임방 생성
    ///
    /// 검증을 통과한 뒤 이미지를 업로드하고, 업로드 결과와 상관없이 레코드를 저장합니다.
    pub async fn create(
        state: &AppState,
        creator_id: i64,
        form: MultipartForm,
    ) -> Result<GatherRoomDetail, AppError> {
        UserService::require_active(&state.db, creator_id).await?;
        let raw = RawGatherRoomForm::from_fields(&form.fields);
        let validated = GatherRoomForm::from_raw(&raw)?;
        let tag = validated.tag();
        let values = validated.into_values();

        let image_urls = Self::upload_images(state.storage.as_ref(), &form.files_named(IMAGE_FIELD)).await;

        let txn = state.db.begin().await?;
        let category = Self::get_or_create_category(&txn, &values.category).await?;

        let now = Utc::now().naive_utc();
        let room = gather_room::ActiveModel {
            subject: Set(values.subject),
            content: Set(values.content),
            address: Set(values.address),
            is_online: Set(values.is_online),
            user_limit: Set(values.user_limit),
            date_time: Set(values.date_time),
            creator_id: Set(creator_id),
            gather_room_category_id: Set(category.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        Self::insert_images(&txn, room.id, image_urls).await?;
        txn.commit().await?;

        info!(
            gather_room_id = room.id,
            creator_id,
            schema = ?tag,
            "gather room created"
        );

        Self::load_detail(&state.db, room).await
    }

    /// 모임방 부분 수정 (개설자만)
    ///
    /// 요청 값을 저장된 값 위에 덮어쓴 뒤 생성과 같은 규칙으로 스키마를 고르고 검증합니다.
    /// 새 이미지가 있으면 기존 이미지 목록을 교체합니다.
    pub async fn partial_update(
        state: &AppState,
        user_id: i64,
        id: i64,
        form: MultipartForm,
    ) -> Result<GatherRoomDetail, AppError> {
        UserService::require_active(&state.db, user_id).await?;
        let room = Self::find_owned(&state.db, user_id, id).await?;
        let current_category = gather_room_category::Entity::find_by_id(room.gather_room_category_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::internal_error("모임방 카테고리를 찾을 수 없습니다."))?;

        let raw = RawGatherRoomForm::from_fields(&form.fields)
            .merged_over(RawGatherRoomForm::from_model(&room, &current_category.name));
        let values = GatherRoomForm::from_raw(&raw)?.into_values();

        let image_files = form.files_named(IMAGE_FIELD);
        let new_images = if image_files.is_empty() {
            None
        } else {
            Some(Self::upload_images(state.storage.as_ref(), &image_files).await)
        };

        let txn = state.db.begin().await?;
        let category = Self::get_or_create_category(&txn, &values.category).await?;

        let mut active: gather_room::ActiveModel = room.into();
        active.subject = Set(values.subject);
        active.content = Set(values.content);
        active.address = Set(values.address);
        active.is_online = Set(values.is_online);
        active.user_limit = Set(values.user_limit);
        active.date_time = Set(values.date_time);
        active.gather_room_category_id = Set(category.id);
        active.updated_at = Set(Utc::now().naive_utc());
        let room = active.update(&txn).await?;

        if let Some(urls) = new_images {
            gather_room_image::Entity::delete_many()
                .filter(gather_room_image::Column::GatherRoomId.eq(room.id))
                .exec(&txn)
                .await?;
            Self::insert_images(&txn, room.id, urls).await?;
        }

        txn.commit().await?;
        info!(gather_room_id = room.id, user_id, "gather room updated");

        Self::load_detail(&state.db, room).await
    }

    /// 모임방 삭제 (개설자만, 하드 삭제)
    pub async fn destroy(state: &AppState, user_id: i64, id: i64) -> Result<(), AppError> {
        UserService::require_active(&state.db, user_id).await?;
        let room = Self::find_owned(&state.db, user_id, id).await?;

        let txn = state.db.begin().await?;
        gather_room_image::Entity::delete_many()
            .filter(gather_room_image::Column::GatherRoomId.eq(room.id))
            .exec(&txn)
            .await?;
        reservation::Entity::delete_many()
            .filter(reservation::Column::GatherRoomId.eq(room.id))
            .exec(&txn)
            .await?;
        review::Entity::delete_many()
            .filter(review::Column::GatherRoomId.eq(room.id))
            .exec(&txn)
            .await?;
        gather_room::Entity::delete_by_id(room.id).exec(&txn).await?;
        txn.commit().await?;

        info!(gather_room_id = room.id, user_id, "gather room deleted");
        Ok(())
    }

    /// 요청자가 개설한 모임방만 찾습니다. 남의 모임방은 존재하지 않는 것과 같습니다.
    async fn find_owned<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        id: i64,
    ) -> Result<gather_room::Model, AppError> {
        gather_room::Entity::find()
            .filter(gather_room::Column::Id.eq(id))
            .filter(gather_room::Column::CreatorId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 모임방입니다."))
    }

    /// 파일마다 한 번씩 순서대로 업로드합니다. 실패한 파일은 `None`.
    pub async fn upload_images(
        storage: &dyn ObjectStorage,
        files: &[&UploadFile],
    ) -> Vec<Option<String>> {
        let mut urls = Vec::with_capacity(files.len());
        for file in files {
            urls.push(storage.upload(file).await);
        }
        urls
    }

    async fn insert_images<C: ConnectionTrait>(
        db: &C,
        gather_room_id: i64,
        urls: Vec<Option<String>>,
    ) -> Result<(), AppError> {
        if urls.is_empty() {
            return Ok(());
        }

        let models = urls.into_iter().map(|img_url| gather_room_image::ActiveModel {
            gather_room_id: Set(gather_room_id),
            img_url: Set(img_url),
            ..Default::default()
        });
        gather_room_image::Entity::insert_many(models).exec(db).await?;
        Ok(())
    }

    pub async fn get_or_create_category<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<gather_room_category::Model, AppError> {
        if let Some(existing) = gather_room_category::Entity::find()
            .filter(gather_room_category::Column::Name.eq(name))
            .one(db)
            .await?
        {
            return Ok(existing);
        }

        let created = gather_room_category::ActiveModel {
            name: Set(name.to_string()),
            description: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(created)
    }

    async fn load_detail<C: ConnectionTrait>(
        db: &C,
        room: gather_room::Model,
    ) -> Result<GatherRoomDetail, AppError> {
        let category = gather_room_category::Entity::find_by_id(room.gather_room_category_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::internal_error("모임방 카테고리를 찾을 수 없습니다."))?;
        let creator = user::Entity::find_by_id(room.creator_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::internal_error("모임방 개설자를 찾을 수 없습니다."))?;
        let images = gather_room_image::Entity::find()
            .filter(gather_room_image::Column::GatherRoomId.eq(room.id))
            .order_by_asc(gather_room_image::Column::Id)
            .all(db)
            .await?;
        let reservation_count = reservation::Entity::find()
            .filter(reservation::Column::GatherRoomId.eq(room.id))
            .count(db)
            .await?;

        Ok(GatherRoomDetail {
            id: room.id,
            subject: room.subject,
            content: room.content,
            address: room.address,
            is_online: room.is_online,
            user_limit: room.user_limit,
            date_time: room.date_time,
            creator: CreatorResponse::from(&creator),
            gather_room_category: (&category).into(),
            gather_room_images: images.iter().map(GatherRoomImageResponse::from).collect(),
            reservation_count,
            created_at: room.created_at,
            updated_at: room.updated_at,
        })
    }
}
