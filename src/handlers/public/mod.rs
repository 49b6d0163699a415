// handlers/public/mod.rs - Handlers that need no token (login, register)

pub mod auth;
