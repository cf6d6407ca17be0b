use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::user::{self, SocialProvider};
use crate::domain::gather_room::schema::parse_flag;
use crate::utils::error::AppError;

pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

/// 프로필 사진 파일 필드명
pub const PROFILE_IMAGE_FIELD: &str = "profile_image";

/// 사용자 조회 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub nickname: Option<String>,
    pub sns_type: Option<SocialProvider>,
    pub status: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub age: Option<i32>,
    pub is_male: Option<bool>,
    pub location: Option<String>,
    pub profile_img_url: Option<String>,
    pub country: Option<String>,
    pub personality_type: Option<String>,
    pub created_at: NaiveDateTime,
}

impl UserResponse {
    pub fn new(
        model: user::Model,
        country: Option<String>,
        personality_type: Option<String>,
    ) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            nickname: model.nickname,
            sns_type: model.sns_type,
            status: model.status,
            birthday: model.birthday,
            age: model.age,
            is_male: model.is_male,
            location: model.location,
            profile_img_url: model.profile_img_url,
            country,
            personality_type,
            created_at: model.created_at,
        }
    }
}

/// 프로필 수정 폼 (multipart 텍스트 필드)
///
/// 보내지 않은 필드는 그대로 둡니다.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileForm {
    #[validate(length(min = 1, max = 30, message = "닉네임은 1~30자여야 합니다"))]
    pub nickname: Option<String>,
    #[validate(range(min = 0, max = 150, message = "나이는 0~150 사이여야 합니다"))]
    pub age: Option<i32>,
    /// YYYY-MM-DD
    pub birthday: Option<NaiveDate>,
    pub is_male: Option<bool>,
    #[validate(length(max = 100, message = "지역은 최대 100자입니다"))]
    pub location: Option<String>,
    #[validate(length(max = 200, message = "상태 메시지는 최대 200자입니다"))]
    pub status: Option<String>,
    /// 국가 이름, 없으면 새로 만듭니다.
    #[validate(length(min = 1, max = 50, message = "국가 이름은 1~50자여야 합니다"))]
    pub country: Option<String>,
    /// 성격 유형 이름, 없으면 새로 만듭니다.
    #[validate(length(min = 1, max = 50, message = "성격 유형은 1~50자여야 합니다"))]
    pub personality_type: Option<String>,
}

impl UpdateProfileForm {
    /// 텍스트 필드를 타입에 맞게 파싱합니다. 파싱 실패는 400.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, AppError> {
        let text = |key: &str| fields.get(key).map(|v| v.trim().to_string());

        let age = match text("age") {
            Some(v) => Some(
                v.parse::<i32>()
                    .map_err(|_| AppError::validation_error("age: 숫자여야 합니다"))?,
            ),
            None => None,
        };
        let birthday = match text("birthday") {
            Some(v) => Some(NaiveDate::parse_from_str(&v, BIRTHDAY_FORMAT).map_err(|_| {
                AppError::validation_error("birthday: YYYY-MM-DD 형식이어야 합니다")
            })?),
            None => None,
        };
        let is_male = match text("is_male") {
            Some(v) => Some(
                parse_flag(&v)
                    .ok_or_else(|| AppError::validation_error("is_male: true/false 값이어야 합니다"))?,
            ),
            None => None,
        };

        Ok(Self {
            nickname: text("nickname"),
            age,
            birthday,
            is_male,
            location: text("location"),
            status: text("status"),
            country: text("country"),
            personality_type: text("personality_type"),
        })
    }
}
