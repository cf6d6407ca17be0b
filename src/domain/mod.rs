pub mod auth;
pub mod country;
pub mod gather_room;
pub mod health;
pub mod reservation;
pub mod review;
pub mod user;
