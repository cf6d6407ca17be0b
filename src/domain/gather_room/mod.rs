pub mod dto;
pub mod entity;
pub mod handler;
pub mod schema;
pub mod service;

pub use schema::{classify, SchemaTag};
pub use service::GatherRoomService;
