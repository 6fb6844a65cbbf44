mod client;
mod types;

pub use client::{OAuthClient, TokenProvider};
pub use types::{AccessToken, TokenResponse};
