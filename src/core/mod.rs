// src/core/mod.rs

/// Request, response and verdict types, plus the threat-API wire format.
pub mod models;

/// Error taxonomy shared by the scanner and the HTTP layer.
pub mod error;

/// The relay itself: validates a request and asks the threat API about it.
pub mod scanner;
