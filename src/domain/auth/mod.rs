pub mod credentials;
pub mod dto;
pub mod handler;
pub mod kakao;
pub mod service;

pub use credentials::{issue, CredentialResponse};
pub use kakao::{HttpKakaoClient, KakaoClient, KakaoProfile};
pub use service::AuthService;
