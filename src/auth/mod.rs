pub mod client;
pub mod types;

pub use client::{AuthClient, TOKEN_KEY};
pub use types::{SignInRequest, SignUpRequest};
