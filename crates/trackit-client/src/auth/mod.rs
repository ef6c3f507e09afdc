/*
[INPUT]:  Email/password credentials and persisted sessions
[OUTPUT]: Bearer tokens, user profiles, and auth errors
[POS]:    Auth layer - handles TrackIt API authentication
[UPDATE]: When auth flow or session storage changes
*/

pub mod jwt;
pub mod manager;
pub mod session_file;

pub use jwt::{TokenData, TokenStore};
pub use manager::AuthManager;
pub use session_file::SessionFile;
