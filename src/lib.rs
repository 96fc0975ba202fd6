//! tshirt-studio - animals modelling custom slogan t-shirts
//!
//! A small web application: the user types a short phrase, picks an animal,
//! and the server asks a hosted image-generation model for a studio photo of
//! that animal wearing a white t-shirt printed with the phrase. The client
//! keeps a session-local, capped gallery of past results.

pub mod ai;
pub mod client;
pub mod error;
pub mod models;
pub mod prompts;
pub mod server;

pub use error::{Error, Result};
