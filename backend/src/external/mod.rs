//! External API integrations

pub mod groq;

pub use groq::GroqClient;
