//! # Socialite Flow
//!
//! `socialite-flow` strings the provider operations together into the login
//! sequence a web application runs: build the redirect URL with a fresh CSRF
//! state, then on callback verify the state, exchange the code, resolve the
//! user's open id and fetch the profile.
//!
//! Storing the state between the two steps is left to the caller.

#![warn(missing_docs)]

/// Authorization Code flow implementation.
pub mod oauth2;

pub use oauth2::OAuth2Flow;
