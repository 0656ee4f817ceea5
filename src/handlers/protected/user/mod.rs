// handlers/protected/user/mod.rs - account management for the caller
pub mod delete;

pub use delete::delete_user;
