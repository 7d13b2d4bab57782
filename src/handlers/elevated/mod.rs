// handlers/elevated/mod.rs - Elevated handlers (admin profile required)
//
// Security Level: Verified identity whose `users/{uid}` document has `isAdmin: true`
// Middleware: bearer_auth_middleware, then require_admin_middleware (injects `AdminUser`)

pub mod admin;
pub mod hours;
pub mod notices;

pub use admin::*;
pub use hours::update as hours_update;
pub use notices::create as notices_create;
