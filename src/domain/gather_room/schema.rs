//! 모임방 생성/수정 폼의 스키마 선택과 검증
//!
//! 원시 폼 값만 보고 온라인/오프라인 스키마를 먼저 고른 뒤(`classify`),
//! 고른 스키마로 검증합니다. 생성과 부분 수정이 같은 함수를 거칩니다.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::entity::gather_room;
use crate::utils::error::AppError;

/// 이 카테고리는 항상 오프라인 스키마로 검증됩니다.
pub const HIRING_CATEGORY: &str = "Hiring";

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaTag {
    Offline,
    Online,
}

/// 검증 전 원시 폼 값
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct RawGatherRoomForm {
    pub subject: Option<String>,
    pub content: Option<String>,
    pub address: Option<String>,
    /// "True" / "False"
    pub is_online: Option<String>,
    pub user_limit: Option<String>,
    /// `%Y-%m-%d %H:%M:%S`
    pub date_time: Option<String>,
    pub gather_room_category: Option<String>,
}

impl RawGatherRoomForm {
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let get = |key: &str| fields.get(key).cloned();
        Self {
            subject: get("subject"),
            content: get("content"),
            address: get("address"),
            is_online: get("is_online"),
            user_limit: get("user_limit"),
            date_time: get("date_time"),
            gather_room_category: get("gather_room_category"),
        }
    }

    /// 저장된 레코드를 원시 폼으로 되돌립니다. 부분 수정의 기준값으로 씁니다.
    pub fn from_model(room: &gather_room::Model, category_name: &str) -> Self {
        Self {
            subject: Some(room.subject.clone()),
            content: Some(room.content.clone()),
            address: room.address.clone(),
            is_online: Some(if room.is_online { "True" } else { "False" }.to_string()),
            user_limit: Some(room.user_limit.to_string()),
            date_time: Some(room.date_time.format(DATE_TIME_FORMAT).to_string()),
            gather_room_category: Some(category_name.to_string()),
        }
    }

    /// `self`에 있는 값이 `base`를 덮어씁니다.
    pub fn merged_over(self, base: RawGatherRoomForm) -> Self {
        Self {
            subject: self.subject.or(base.subject),
            content: self.content.or(base.content),
            address: self.address.or(base.address),
            is_online: self.is_online.or(base.is_online),
            user_limit: self.user_limit.or(base.user_limit),
            date_time: self.date_time.or(base.date_time),
            gather_room_category: self.gather_room_category.or(base.gather_room_category),
        }
    }
}

/// "True"/"true"/"1" → true, "False"/"false"/"0" → false, 그 외 None
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// 원시 폼에서 스키마를 고릅니다.
///
/// `Hiring` 카테고리이거나 `is_online`이 참이 아니면 오프라인입니다.
pub fn classify(raw: &RawGatherRoomForm) -> SchemaTag {
    let hiring = raw
        .gather_room_category
        .as_deref()
        .map(|c| c.trim() == HIRING_CATEGORY)
        .unwrap_or(false);
    let online = raw
        .is_online
        .as_deref()
        .and_then(parse_flag)
        .unwrap_or(false);

    if hiring || !online {
        SchemaTag::Offline
    } else {
        SchemaTag::Online
    }
}

#[derive(Debug, Clone, Validate)]
pub struct OfflineGatherRoomForm {
    #[validate(length(min = 1, max = 100, message = "제목은 1~100자여야 합니다"))]
    pub subject: String,
    #[validate(length(min = 1, max = 2000, message = "내용은 1~2000자여야 합니다"))]
    pub content: String,
    #[validate(length(min = 1, max = 200, message = "오프라인 모임은 주소가 필요합니다 (최대 200자)"))]
    pub address: String,
    #[validate(range(min = 1, message = "인원 제한은 1명 이상이어야 합니다"))]
    pub user_limit: i32,
    pub date_time: NaiveDateTime,
    #[validate(length(min = 1, max = 50, message = "카테고리는 1~50자여야 합니다"))]
    pub gather_room_category: String,
}

#[derive(Debug, Clone, Validate)]
pub struct OnlineGatherRoomForm {
    #[validate(length(min = 1, max = 100, message = "제목은 1~100자여야 합니다"))]
    pub subject: String,
    #[validate(length(min = 1, max = 2000, message = "내용은 1~2000자여야 합니다"))]
    pub content: String,
    #[validate(length(max = 200, message = "주소는 최대 200자입니다"))]
    pub address: Option<String>,
    #[validate(range(min = 1, message = "인원 제한은 1명 이상이어야 합니다"))]
    pub user_limit: i32,
    pub date_time: NaiveDateTime,
    #[validate(length(min = 1, max = 50, message = "카테고리는 1~50자여야 합니다"))]
    pub gather_room_category: String,
}

/// 검증을 통과한 폼
#[derive(Debug, Clone)]
pub enum GatherRoomForm {
    Offline(OfflineGatherRoomForm),
    Online(OnlineGatherRoomForm),
}

/// 저장에 필요한 값만 평탄화한 결과
#[derive(Debug, Clone, PartialEq)]
pub struct GatherRoomValues {
    pub subject: String,
    pub content: String,
    pub address: Option<String>,
    pub is_online: bool,
    pub user_limit: i32,
    pub date_time: NaiveDateTime,
    pub category: String,
}

impl GatherRoomForm {
    /// 스키마를 고르고 해당 스키마로 검증합니다.
    pub fn from_raw(raw: &RawGatherRoomForm) -> Result<Self, AppError> {
        let subject = required(&raw.subject, "subject")?;
        let content = required(&raw.content, "content")?;
        let user_limit = parse_user_limit(&raw.user_limit)?;
        let date_time = parse_date_time(&raw.date_time)?;
        let gather_room_category = required(&raw.gather_room_category, "gather_room_category")?
            .trim()
            .to_string();

        let form = match classify(raw) {
            SchemaTag::Offline => {
                let form = OfflineGatherRoomForm {
                    subject,
                    content,
                    address: raw.address.clone().unwrap_or_default().trim().to_string(),
                    user_limit,
                    date_time,
                    gather_room_category,
                };
                form.validate()?;
                GatherRoomForm::Offline(form)
            }
            SchemaTag::Online => {
                let form = OnlineGatherRoomForm {
                    subject,
                    content,
                    address: raw
                        .address
                        .as_deref()
                        .map(str::trim)
                        .filter(|a| !a.is_empty())
                        .map(str::to_string),
                    user_limit,
                    date_time,
                    gather_room_category,
                };
                form.validate()?;
                GatherRoomForm::Online(form)
            }
        };

        Ok(form)
    }

    pub fn tag(&self) -> SchemaTag {
        match self {
            GatherRoomForm::Offline(_) => SchemaTag::Offline,
            GatherRoomForm::Online(_) => SchemaTag::Online,
        }
    }

    pub fn into_values(self) -> GatherRoomValues {
        match self {
            GatherRoomForm::Offline(f) => GatherRoomValues {
                subject: f.subject,
                content: f.content,
                address: Some(f.address),
                is_online: false,
                user_limit: f.user_limit,
                date_time: f.date_time,
                category: f.gather_room_category,
            },
            GatherRoomForm::Online(f) => GatherRoomValues {
                subject: f.subject,
                content: f.content,
                address: f.address,
                is_online: true,
                user_limit: f.user_limit,
                date_time: f.date_time,
                category: f.gather_room_category,
            },
        }
    }
}

fn required(value: &Option<String>, field: &str) -> Result<String, AppError> {
    value
        .clone()
        .ok_or_else(|| AppError::validation_error(format!("{}: 필수 항목입니다", field)))
}

fn parse_user_limit(value: &Option<String>) -> Result<i32, AppError> {
    required(value, "user_limit")?
        .trim()
        .parse()
        .map_err(|_| AppError::validation_error("user_limit: 정수여야 합니다"))
}

fn parse_date_time(value: &Option<String>) -> Result<NaiveDateTime, AppError> {
    let raw = required(value, "date_time")?;
    NaiveDateTime::parse_from_str(raw.trim(), DATE_TIME_FORMAT).map_err(|_| {
        AppError::validation_error("date_time: YYYY-MM-DD HH:MM:SS 형식이어야 합니다")
    })
}
