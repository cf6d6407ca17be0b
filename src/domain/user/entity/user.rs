use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "UPPERCASE")]
pub enum SocialProvider {
    #[sea_orm(string_value = "KAKAO")]
    Kakao,
    #[sea_orm(string_value = "GOOGLE")]
    Google,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC 문자열, 소셜 전용 계정은 NULL
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub name: String,
    pub nickname: Option<String>,
    pub sns_type: Option<SocialProvider>,
    pub status: Option<String>,
    pub birthday: Option<Date>,
    pub age: Option<i32>,
    pub is_male: Option<bool>,
    pub location: Option<String>,
    pub profile_img_url: Option<String>,
    pub country_id: Option<i64>,
    pub personality_type_id: Option<i64>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::country::Entity",
        from = "Column::CountryId",
        to = "super::country::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Country,
    #[sea_orm(
        belongs_to = "super::personality_type::Entity",
        from = "Column::PersonalityTypeId",
        to = "super::personality_type::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    PersonalityType,
    #[sea_orm(has_many = "super::social_account::Entity")]
    SocialAccount,
    #[sea_orm(has_many = "crate::domain::gather_room::entity::gather_room::Entity")]
    GatherRoom,
    #[sea_orm(has_many = "crate::domain::reservation::entity::reservation::Entity")]
    Reservation,
    #[sea_orm(has_many = "crate::domain::review::entity::review::Entity")]
    Review,
}

impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl Related<super::personality_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonalityType.def()
    }
}

impl Related<super::social_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SocialAccount.def()
    }
}

impl Related<crate::domain::gather_room::entity::gather_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GatherRoom.def()
    }
}

impl Related<crate::domain::reservation::entity::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl Related<crate::domain::review::entity::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}
