/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public TrackIt client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod gateway;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{AuthManager, SessionFile, TokenData, TokenStore};

pub use gateway::TaskGateway;

// Re-export commonly used types from http
pub use http::{ClientConfig, DEFAULT_BASE_URL, Result, TrackitClient, TrackitError};

// Re-export all types
pub use types::*;
