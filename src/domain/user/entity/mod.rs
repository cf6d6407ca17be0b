pub mod country;
pub mod personality_type;
pub mod social_account;
pub mod user;
