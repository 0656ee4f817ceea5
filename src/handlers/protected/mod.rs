// handlers/protected/mod.rs - Protected handlers (session token required)
//
// Every route here sits behind `jwt_auth_middleware`, which injects the
// caller's `AuthUser`. Handlers only ever touch data owned by that user.
pub mod notes;
pub mod user;
