// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Middleware: None (no authentication or authorization)
//
// Everything here is read-only except the contact form.

pub mod bookings;
pub mod comments;
pub mod contact;
pub mod health;
pub mod hours;
pub mod notices;
pub mod root;

pub use bookings::availability as booking_availability;
pub use bookings::catalog as sessions_catalog;
pub use comments::list as comments_list;
pub use contact::submit as contact_submit;
pub use health::health;
pub use hours::get as hours_get;
pub use notices::list as notices_list;
pub use root::root;
