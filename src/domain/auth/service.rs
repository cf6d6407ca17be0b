use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::credentials::{issue, IssuedCredentials};
use super::dto::{LoginRequest, SignupRequest, TokenRefreshRequest};
use super::kakao::KakaoProfile;
use crate::domain::user::entity::social_account;
use crate::domain::user::entity::user::{self, SocialProvider};
use crate::domain::user::UserService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::decode_refresh_token;
use crate::utils::password::{hash_password, verify_password};

pub struct AuthService;

/// 이메일로 찾은 기존 계정과 카카오 로그인을 맞춰본 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// 처음 보는 이메일: 카카오 계정으로 새로 가입
    CreateAccount,
    /// 이미 카카오로 가입한 사용자: 프로필 사진만 갱신
    RefreshProfile(i64),
}

/// 기존 계정이 있으면 카카오로 가입한 계정인지 확인합니다.
///
/// 비밀번호 계정이나 다른 소셜 계정에 카카오를 몰래 연결하지 않습니다.
/// 탈퇴한 계정의 이메일도 재사용하지 않습니다.
pub fn reconcile(
    existing: Option<&user::Model>,
    social: Option<&social_account::Model>,
) -> Result<Reconciliation, AppError> {
    let Some(user) = existing else {
        return Ok(Reconciliation::CreateAccount);
    };

    if !user.is_active() {
        return Err(AppError::conflict("탈퇴한 계정의 이메일입니다."));
    }

    match social {
        None => Err(AppError::conflict(
            "해당 이메일은 서비스에 존재하지만, SNS 유저가 아닙니다.",
        )),
        Some(account) if account.provider != SocialProvider::Kakao => Err(AppError::conflict(
            format!(
                "해당 이메일은 이미 {:?} SNS 계정으로 회원가입 되어 있습니다.",
                account.provider
            ),
        )),
        Some(_) => Ok(Reconciliation::RefreshProfile(user.id)),
    }
}

impl AuthService {
    /// 이메일 회원가입
    pub async fn signup(state: &AppState, req: SignupRequest) -> Result<IssuedCredentials, AppError> {
        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(&req.email))
            .one(&state.db)
            .await?;
        if existing.is_some() {
            return Err(AppError::conflict("이미 가입된 이메일입니다."));
        }

        let now = Utc::now().naive_utc();
        let created = user::ActiveModel {
            email: Set(req.email),
            password: Set(Some(hash_password(&req.password)?)),
            name: Set(req.name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(user_id = created.id, "user signed up");
        issue(&state.config, &created)
    }

    /// 이메일 로그인
    pub async fn login(state: &AppState, req: LoginRequest) -> Result<IssuedCredentials, AppError> {
        let invalid = || AppError::unauthorized("이메일 또는 비밀번호가 올바르지 않습니다.");

        let found = user::Entity::find()
            .filter(user::Column::Email.eq(&req.email))
            .filter(user::Column::DeletedAt.is_null())
            .one(&state.db)
            .await?
            .ok_or_else(invalid)?;

        // 소셜 전용 계정은 비밀번호가 없습니다.
        let hash = found.password.as_deref().ok_or_else(invalid)?;
        if !verify_password(&req.password, hash) {
            return Err(invalid());
        }

        info!(user_id = found.id, "user logged in");
        issue(&state.config, &found)
    }

    /// refresh token으로 새 토큰 쌍 발급
    pub async fn refresh(
        state: &AppState,
        req: TokenRefreshRequest,
    ) -> Result<IssuedCredentials, AppError> {
        let claims = decode_refresh_token(&req.refresh_token, &state.config.jwt_secret)?;
        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("유효하지 않은 사용자 ID입니다."))?;

        let found = UserService::find_active(&state.db, user_id)
            .await
            .map_err(|_| AppError::unauthorized("존재하지 않는 사용자입니다."))?;

        issue(&state.config, &found)
    }

    /// 카카오 로그인
    ///
    /// 인가 코드 교환, 프로필 조회, 계정 대조를 거쳐 토큰을 발급합니다.
    pub async fn kakao_login(state: &AppState, code: &str) -> Result<IssuedCredentials, AppError> {
        let access_token = state.kakao.exchange_code(code).await?;
        let profile = state.kakao.fetch_profile(&access_token).await?;

        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(&profile.email))
            .one(&state.db)
            .await?;
        let social = match &existing {
            Some(found) => {
                social_account::Entity::find()
                    .filter(social_account::Column::UserId.eq(found.id))
                    .order_by_asc(social_account::Column::Id)
                    .one(&state.db)
                    .await?
            }
            None => None,
        };

        let user = match reconcile(existing.as_ref(), social.as_ref())? {
            Reconciliation::CreateAccount => Self::create_kakao_account(state, &profile).await?,
            Reconciliation::RefreshProfile(user_id) => {
                Self::refresh_profile_photo(state, user_id, existing, &profile).await?
            }
        };

        issue(&state.config, &user)
    }

    /// 카카오 계정으로 가입 (사용자 + 소셜 계정을 한 트랜잭션에서)
    async fn create_kakao_account(
        state: &AppState,
        profile: &KakaoProfile,
    ) -> Result<user::Model, AppError> {
        let name = profile
            .nickname
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| profile.email.split('@').next().unwrap_or_default().to_string());

        let now = Utc::now().naive_utc();
        let txn = state.db.begin().await?;
        let created = user::ActiveModel {
            email: Set(profile.email.clone()),
            password: Set(None),
            name: Set(name),
            sns_type: Set(Some(SocialProvider::Kakao)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        social_account::ActiveModel {
            user_id: Set(created.id),
            provider: Set(SocialProvider::Kakao),
            uid: Set(profile.uid.clone()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        info!(user_id = created.id, "kakao account created");
        Ok(created)
    }

    async fn refresh_profile_photo(
        state: &AppState,
        user_id: i64,
        existing: Option<user::Model>,
        profile: &KakaoProfile,
    ) -> Result<user::Model, AppError> {
        let current = existing
            .filter(|u| u.id == user_id)
            .ok_or_else(|| AppError::internal_error("대조한 사용자를 찾을 수 없습니다."))?;

        let Some(url) = profile.profile_image_url.clone() else {
            return Ok(current);
        };

        let mut active: user::ActiveModel = current.into();
        active.profile_img_url = Set(Some(url));
        active.updated_at = Set(Utc::now().naive_utc());
        let updated = active.update(&state.db).await?;

        info!(user_id, "kakao profile photo refreshed");
        Ok(updated)
    }
}
