//! HTTP handlers, one module per concern. Each function is thin: decode
//! the request, call into `tpe_db`, encode the response. Orchestration
//! lives in `tpe_db`; these just translate to/from the wire.
pub mod entities;
pub mod events;
pub mod fixtures;
pub mod matches;
pub mod qualification;
pub mod standings;
