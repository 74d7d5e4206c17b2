//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by work area (`pipeline`, `inbox`, `import`, etc.) so
//! individual components can depend on small focused models.

pub mod board;
pub mod filter;
pub mod import;
pub mod inbox;
pub mod pipeline;
pub mod ui;
