// handlers/public/root.rs - GET / handler

use axum::response::Json;
use serde_json::{json, Value};

/// Service banner with an index of the API routes.
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "MFitness API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Gym management backend",
        "endpoints": {
            "public": [
                "GET /api/health",
                "GET /api/sessions",
                "GET /api/bookings/availability",
                "GET /api/comments",
                "GET /api/notices",
                "GET /api/hours",
                "POST /api/contact"
            ],
            "member": [
                "GET /api/users/profile",
                "POST /api/users/profile",
                "PUT /api/users/profile",
                "GET /api/bookings",
                "POST /api/bookings",
                "DELETE /api/bookings/:id",
                "POST /api/comments"
            ],
            "admin": [
                "POST /api/notices",
                "PUT /api/hours",
                "GET /api/admin/comments",
                "PUT /api/admin/comments/:id/approve",
                "GET /api/admin/bookings",
                "GET /api/admin/contacts"
            ]
        }
    }))
}
