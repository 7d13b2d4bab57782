use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// Maximum non-cancelled bookings per date and time slot
pub const SLOT_CAPACITY: usize = 20;

pub static TIME_SLOTS: [&str; 16] = [
    "06:00 AM", "07:00 AM", "08:00 AM", "09:00 AM", "10:00 AM", "11:00 AM",
    "12:00 PM", "01:00 PM", "02:00 PM", "03:00 PM", "04:00 PM", "05:00 PM",
    "06:00 PM", "07:00 PM", "08:00 PM", "09:00 PM",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionType {
    pub id: &'static str,
    pub name: &'static str,
    pub duration_minutes: u32,
    pub price: u32,
}

pub static SESSION_TYPES: [SessionType; 6] = [
    SessionType { id: "gym", name: "Gym Access", duration_minutes: 120, price: 0 },
    SessionType { id: "personal", name: "Personal Training", duration_minutes: 60, price: 50 },
    SessionType { id: "yoga", name: "Yoga Class", duration_minutes: 60, price: 25 },
    SessionType { id: "cardio", name: "Cardio Session", duration_minutes: 45, price: 15 },
    SessionType { id: "crossfit", name: "CrossFit Class", duration_minutes: 60, price: 30 },
    SessionType { id: "boxing", name: "Boxing Training", duration_minutes: 60, price: 35 },
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub session_types: &'static [SessionType],
    pub time_slots: &'static [&'static str],
    pub slot_capacity: usize,
}

pub fn catalog() -> Catalog {
    Catalog {
        session_types: &SESSION_TYPES,
        time_slots: &TIME_SLOTS,
        slot_capacity: SLOT_CAPACITY,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub date: String,
    pub time_slot: String,
    pub booked: usize,
    pub capacity: usize,
    pub available: bool,
}

impl Availability {
    pub fn new(date: String, time_slot: String, booked: usize) -> Self {
        Self {
            date,
            time_slot,
            booked,
            capacity: SLOT_CAPACITY,
            available: booked < SLOT_CAPACITY,
        }
    }
}
