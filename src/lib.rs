//! LinksProbe: a small relay that asks a threat-intelligence API whether a URL
//! is known to be harmful and answers with a fixed, human-readable verdict.

pub mod app;
pub mod config;
pub mod core;
pub mod keepalive;
pub mod logging;
pub mod routes;
