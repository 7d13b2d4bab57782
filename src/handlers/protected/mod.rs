// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Security Level: Verified identity
// Middleware: bearer_auth_middleware, which injects `AuthUser`
//
// Handlers act on the caller's own documents only.

pub mod bookings;
pub mod comments;
pub mod profile;

pub use bookings::cancel as bookings_cancel;
pub use bookings::create as bookings_create;
pub use bookings::list as bookings_list;
pub use comments::create as comments_create;
pub use profile::get as profile_get;
pub use profile::upsert as profile_upsert;
