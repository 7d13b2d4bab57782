// handlers/mod.rs - Handlers grouped by access tier
//
// Public (no auth) → Protected (bearer token) → Elevated (bearer token + isAdmin profile)
//
// The tier decides which middleware the router wraps a route in; handlers
// themselves only read the `AuthUser` / `AdminUser` extensions.
pub mod public;    // Tier 1: No authentication required
pub mod protected; // Tier 2: Verified bearer token required
pub mod elevated;  // Tier 3: Verified token and admin profile required
