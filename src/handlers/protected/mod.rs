// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Everything under /api/*. The JWT middleware runs first, so a rejected token
// never reaches HubSpot.

pub mod deals;
pub mod notes;
pub mod people;
pub mod stages;
