pub mod auth;
pub mod cookie;
pub mod error;
pub mod jwt;
pub mod logging;
pub mod multipart;
pub mod password;
pub mod response;
pub mod storage;

pub use response::ErrorResponse;
