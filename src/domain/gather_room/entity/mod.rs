pub mod gather_room;
pub mod gather_room_category;
pub mod gather_room_image;
