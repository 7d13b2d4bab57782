//! Collection names and the fields the server owns on each document.

pub mod booking;
pub mod hours;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::store::Fields;

pub mod collections {
    pub const USERS: &str = "users";
    pub const BOOKINGS: &str = "bookings";
    pub const CONTACTS: &str = "contacts";
    pub const COMMENTS: &str = "comments";
    pub const NOTICES: &str = "notices";
    pub const SETTINGS: &str = "settings";

    /// Singleton document id under `settings`
    pub const OPERATING_HOURS: &str = "operatingHours";
}

pub mod fields {
    pub const UID: &str = "uid";
    pub const EMAIL: &str = "email";
    pub const IS_ADMIN: &str = "isAdmin";
    pub const USER_ID: &str = "userId";
    pub const USER_EMAIL: &str = "userEmail";
    pub const STATUS: &str = "status";
    pub const CREATED_AT: &str = "createdAt";
    pub const CREATED_BY: &str = "createdBy";
    pub const UPDATED_AT: &str = "updatedAt";
    pub const UPDATED_BY: &str = "updatedBy";
    pub const CANCELLED_AT: &str = "cancelledAt";
    pub const APPROVED: &str = "approved";
    pub const APPROVED_AT: &str = "approvedAt";
    pub const APPROVED_BY: &str = "approvedBy";
    pub const ACTIVE: &str = "active";
    pub const DATE: &str = "date";
    pub const TIME_SLOT: &str = "timeSlot";
}

/// Public testimonials shown on the home page
pub const PUBLIC_COMMENT_LIMIT: usize = 10;
pub const PUBLIC_NOTICE_LIMIT: usize = 5;

pub const CONTACT_STATUS_UNREAD: &str = "unread";

/// UTC RFC 3339 with microseconds, so string order is time order.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Drop fields a client may not set.
pub fn strip(body: &mut Fields, keys: &[&str]) {
    for key in keys {
        body.remove(*key);
    }
}

/// Overwrite server-stamped fields.
pub fn stamp<I, K>(body: &mut Fields, values: I)
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    for (key, value) in values {
        body.insert(key.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn timestamps_sort_chronologically() {
        let a = timestamp();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = timestamp();
        assert!(a < b);
        assert!(a.ends_with('Z'));
    }

    #[test]
    fn stamp_overrides_and_strip_removes() {
        let mut body = json!({"approved": true, "approvedBy": "me", "text": "great gym"})
            .as_object()
            .cloned()
            .unwrap();
        strip(&mut body, &[fields::APPROVED_BY]);
        stamp(&mut body, [(fields::APPROVED, json!(false))]);
        assert_eq!(Value::Object(body), json!({"approved": false, "text": "great gym"}));
    }
}
