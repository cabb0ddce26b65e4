// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (bearer JWT, unless auth is disabled)
pub mod protected;
pub mod public;
