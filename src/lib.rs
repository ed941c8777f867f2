//! Simulator host that forwards Azure Document Intelligence traffic to a real
//! endpoint.
//!
//! Requests under `/formrecognizer/` are authenticated against the simulator's
//! own key, re-signed with the upstream key and relayed. The response comes
//! back with noisy headers removed and its `operation-location` pointing at
//! the simulator, together with a flag saying whether the exchange is worth
//! recording.

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod forwarder;
pub mod handlers;
pub mod proxy;
pub mod telemetry;
