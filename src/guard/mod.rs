//! Page-level access control driven by the mirrored auth cookie.

pub mod middleware;
pub mod rules;

pub use middleware::route_guard;
pub use rules::{GuardDecision, RouteRules};
