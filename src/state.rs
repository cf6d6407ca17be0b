use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::auth::kakao::KakaoClient;
use crate::utils::storage::ObjectStorage;
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn ObjectStorage>,
    pub kakao: Arc<dyn KakaoClient>,
}
