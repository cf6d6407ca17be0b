use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::info;
use validator::Validate;

use super::dto::{UpdateProfileForm, UserResponse, PROFILE_IMAGE_FIELD};
use super::entity::{country, personality_type, user};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::multipart::MultipartForm;

pub struct UserService;

impl UserService {
    /// 탈퇴하지 않은 사용자 조회
    pub async fn find_active<C: ConnectionTrait>(db: &C, id: i64) -> Result<user::Model, AppError> {
        user::Entity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 사용자입니다."))
    }

    /// 쓰기 요청의 요청자 확인. 토큰이 유효해도 탈퇴한 계정이면 Unauthorized
    pub async fn require_active<C: ConnectionTrait>(db: &C, id: i64) -> Result<user::Model, AppError> {
        match Self::find_active(db, id).await {
            Err(AppError::NotFound(_)) => Err(AppError::unauthorized("탈퇴했거나 존재하지 않는 사용자입니다.")),
            other => other,
        }
    }

    pub async fn retrieve(state: &AppState, id: i64) -> Result<UserResponse, AppError> {
        let model = Self::find_active(&state.db, id).await?;
        Self::to_response(&state.db, model).await
    }

    /// 내 프로필 부분 수정
    ///
    /// 국가와 성격 유형은 이름으로 받아 없으면 만듭니다.
    /// `profile_image` 업로드가 실패하면 사진 URL은 NULL로 저장됩니다.
    pub async fn update_profile(
        state: &AppState,
        user_id: i64,
        form: MultipartForm,
    ) -> Result<UserResponse, AppError> {
        let profile = UpdateProfileForm::from_fields(&form.fields)?;
        profile.validate()?;

        let current = Self::find_active(&state.db, user_id).await?;

        let photo = match form.file(PROFILE_IMAGE_FIELD) {
            Some(file) => Some(state.storage.upload(file).await),
            None => None,
        };

        let txn = state.db.begin().await?;
        let mut active: user::ActiveModel = current.into();

        if let Some(nickname) = profile.nickname {
            active.nickname = Set(Some(nickname));
        }
        if let Some(age) = profile.age {
            active.age = Set(Some(age));
        }
        if let Some(birthday) = profile.birthday {
            active.birthday = Set(Some(birthday));
        }
        if let Some(is_male) = profile.is_male {
            active.is_male = Set(Some(is_male));
        }
        if let Some(location) = profile.location {
            active.location = Set(Some(location));
        }
        if let Some(status) = profile.status {
            active.status = Set(Some(status));
        }
        if let Some(name) = profile.country {
            let country = Self::get_or_create_country(&txn, &name).await?;
            active.country_id = Set(Some(country.id));
        }
        if let Some(name) = profile.personality_type {
            let personality = Self::get_or_create_personality_type(&txn, &name).await?;
            active.personality_type_id = Set(Some(personality.id));
        }
        if let Some(url) = photo {
            active.profile_img_url = Set(url);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(user_id, "user profile updated");
        Self::to_response(&state.db, updated).await
    }

    /// 회원 탈퇴 (소프트 삭제)
    pub async fn withdraw(state: &AppState, user_id: i64) -> Result<(), AppError> {
        let current = Self::find_active(&state.db, user_id).await?;

        let now = Utc::now().naive_utc();
        let mut active: user::ActiveModel = current.into();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(&state.db).await?;

        info!(user_id, "user withdrawn");
        Ok(())
    }

    pub async fn get_or_create_country<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<country::Model, AppError> {
        if let Some(existing) = country::Entity::find()
            .filter(country::Column::Name.eq(name))
            .one(db)
            .await?
        {
            return Ok(existing);
        }

        let created = country::ActiveModel {
            name: Set(name.to_string()),
            description: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(created)
    }

    pub async fn get_or_create_personality_type<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<personality_type::Model, AppError> {
        if let Some(existing) = personality_type::Entity::find()
            .filter(personality_type::Column::Name.eq(name))
            .one(db)
            .await?
        {
            return Ok(existing);
        }

        let created = personality_type::ActiveModel {
            name: Set(name.to_string()),
            description: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(created)
    }

    async fn to_response<C: ConnectionTrait>(
        db: &C,
        model: user::Model,
    ) -> Result<UserResponse, AppError> {
        let country = match model.country_id {
            Some(id) => country::Entity::find_by_id(id).one(db).await?.map(|c| c.name),
            None => None,
        };
        let personality = match model.personality_type_id {
            Some(id) => personality_type::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(|p| p.name),
            None => None,
        };

        Ok(UserResponse::new(model, country, personality))
    }
}
