// handlers/mod.rs - Two tiers: public (no token) and protected (JWT required)

pub mod protected;
pub mod public;
