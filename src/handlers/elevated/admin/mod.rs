// /api/admin/* - moderation and oversight views

pub mod bookings;
pub mod comments;
pub mod contacts;

pub use bookings::list as admin_bookings_list;
pub use comments::approve as admin_comments_approve;
pub use comments::list as admin_comments_list;
pub use contacts::list as admin_contacts_list;
