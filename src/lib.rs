//! storctl - administer a distributed storage cluster
//!
//! The crate splits into a generic rendering engine ([`format`]) driving
//! table, raw, and JSON output for any resource variant with a column
//! registry, and a lifecycle layer ([`lifecycle`]) running batched node
//! transitions against the cluster API with per-target failure tracking.
//! The remaining modules wrap those in a CLI: [`cli`] for the command
//! surface, [`client`] for the HTTP API, [`context`] for named cluster
//! configs.

pub mod cli;
pub mod client;
pub mod context;
pub mod format;
pub mod lifecycle;
pub mod resources;
