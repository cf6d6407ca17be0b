//! 오브젝트 스토리지 어댑터
//!
//! 업로드 실패는 호출자에게 에러로 전파하지 않고 `None`으로 돌려줍니다.
//! 호출자는 `None`을 "저장된 파일 없음"으로 취급해 레코드 저장을 계속합니다.

use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{info, warn};
use uuid::Uuid;

use super::multipart::UploadFile;
use crate::config::StorageConfig;

/// 파일 업로드 인터페이스
///
/// 테스트에서는 Mock 구현으로 대체합니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// 파일을 업로드하고 공개 URL을 반환합니다. 실패하면 `None`.
    async fn upload(&self, file: &UploadFile) -> Option<String>;
}

/// AWS S3 (또는 S3 호환) 구현
pub struct S3Storage {
    client: Client,
    bucket: String,
    region: String,
    endpoint: Option<String>,
    key_prefix: String,
}

impl S3Storage {
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "foreatown-config",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version_latest()
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket_name.clone(),
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
            key_prefix: config.key_prefix.clone(),
        }
    }

    fn public_url(&self, key: &str) -> String {
        public_url(&self.bucket, &self.region, self.endpoint.as_deref(), key)
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn upload(&self, file: &UploadFile) -> Option<String> {
        let key = object_key(&self.key_prefix);

        // 단일 시도, 재시도 없음
        let result = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(&file.content_type)
            .body(ByteStream::from(file.data.clone()))
            .send()
            .await;

        match result {
            Ok(_) => {
                info!(key = %key, size = file.data.len(), "uploaded object");
                Some(self.public_url(&key))
            }
            Err(e) => {
                warn!(
                    key = %key,
                    file_name = ?file.file_name,
                    "S3 upload failed, storing null url: {}",
                    e
                );
                None
            }
        }
    }
}

/// 등급 태그 + 하이픈 없는 UUID
pub fn object_key(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4().simple())
}

pub fn public_url(bucket: &str, region: &str, endpoint: Option<&str>, key: &str) -> String {
    match endpoint {
        Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key),
        None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key),
    }
}
