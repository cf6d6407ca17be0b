use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;

use super::error::AppError;

/// multipart 요청에서 받은 파일 하나
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub field_name: String,
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Bytes,
}

/// 텍스트 필드와 파일을 분리해 담은 multipart 폼
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: Vec<UploadFile>,
}

impl MultipartForm {
    /// 요청 본문 전체를 읽어 폼으로 변환합니다.
    ///
    /// 파일명이 있는 파트는 파일로, 나머지는 텍스트 필드로 취급합니다.
    /// `name[]` 형태의 필드명은 `name`으로 정규화합니다.
    /// 파일을 고르지 않은 파일 입력(빈 파일명, 빈 본문)만 건너뛰고,
    /// 이름이 있는 0바이트 파일은 그대로 담아 업로드 단계로 넘깁니다.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = match field.name() {
                Some(name) => normalize_field_name(name),
                None => continue,
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let data = field.bytes().await?;
                    if is_unselected_file(&file_name, &data) {
                        continue;
                    }
                    form.files.push(UploadFile {
                        field_name: name,
                        file_name: Some(file_name),
                        content_type,
                        data,
                    });
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).cloned()
    }

    /// 해당 필드명으로 올라온 파일들
    pub fn files_named(&self, key: &str) -> Vec<&UploadFile> {
        self.files.iter().filter(|f| f.field_name == key).collect()
    }

    pub fn file(&self, key: &str) -> Option<&UploadFile> {
        self.files.iter().find(|f| f.field_name == key)
    }
}

fn is_unselected_file(file_name: &str, data: &[u8]) -> bool {
    file_name.is_empty() && data.is_empty()
}

fn normalize_field_name(name: &str) -> String {
    name.strip_suffix("[]").unwrap_or(name).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_strip_array_suffix_from_field_name() {
        assert_eq!(normalize_field_name("gather_room_images[]"), "gather_room_images");
        assert_eq!(normalize_field_name("subject"), "subject");
    }

    #[test]
    fn should_skip_only_file_inputs_without_selection() {
        assert!(is_unselected_file("", b""));
        assert!(!is_unselected_file("empty.png", b""));
        assert!(!is_unselected_file("", b"png"));
    }

    #[test]
    fn should_find_files_by_field_name() {
        let file = |name: &str| UploadFile {
            field_name: name.to_string(),
            file_name: Some("a.png".into()),
            content_type: "image/png".into(),
            data: Bytes::from_static(b"png"),
        };
        let form = MultipartForm {
            fields: HashMap::new(),
            files: vec![file("gather_room_images"), file("profile_image"), file("gather_room_images")],
        };

        assert_eq!(form.files_named("gather_room_images").len(), 2);
        assert!(form.file("profile_image").is_some());
        assert!(form.file("missing").is_none());
    }
}
