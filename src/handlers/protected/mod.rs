// handlers/protected/mod.rs - Handlers behind the JWT auth gate
//
// Every handler receives the caller as `Extension<AuthUser>`. Collection
// routes are limited to the caller's own records; single-record routes treat
// another user's record as missing.

pub mod budgets;
pub mod entries;
pub mod goals;
pub mod users;
pub mod utils;
