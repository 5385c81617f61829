//! Business logic services.
//!
//! The authentication provider and the content generator are traits with
//! mock implementations that pause for a fixed delay and always succeed.

pub mod assets;
pub mod auth;
pub mod generation;
pub mod latency;

pub use auth::{AuthError, AuthProvider, MockAuthProvider};
pub use generation::{
    ContentGenerator, GenerationError, GenerationForm, GenerationService, MockContentGenerator,
};
pub use latency::MockLatency;
