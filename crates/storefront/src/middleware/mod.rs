//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transactions)
//! 2. `TraceLayer` (request spans with a `request_id` field)
//! 3. Request ID (record, tag and echo `x-request-id`)
//! 4. Security headers (CSP, isolation, no-store)
//! 5. Session layer (tower-sessions memory store holding the cart)

pub mod request_id;
pub mod security_headers;
pub mod session;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
