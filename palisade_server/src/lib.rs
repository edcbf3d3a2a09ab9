mod registry;
mod router;
mod session;
pub use registry::*;
pub use router::*;
pub use session::*;

/// Identifies one client connection for the lifetime of the process.
/// Assigned by the transport; the match logic only ever compares it.
pub type ConnectionId = u64;
