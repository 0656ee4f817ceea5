// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (session token required)
pub mod public;
pub mod protected;
pub mod system;
pub mod utils;
