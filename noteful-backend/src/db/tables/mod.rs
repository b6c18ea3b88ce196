//! Store adapters, one module per table.
//!
//! Every operation takes the connection explicitly, so callers decide where it
//! comes from (a pooled connection in the server, a scratch database in tests).

pub mod folders;
pub mod notes;
