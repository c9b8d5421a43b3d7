pub mod permission;
pub mod user;
pub mod zone;
