//! Text-generation provider client for AI-enhanced alert content.
//!
//! [`TextGenerator`] is the seam the alerting crate programs against;
//! [`TextGenClient`] is the HTTP implementation targeting an
//! OpenAI-compatible chat-completions endpoint. Tests substitute their own
//! implementations so no network traffic ever happens in the test suite.

pub mod client;

pub use client::{TextGenClient, TextGenConfig, TextGenError};

use async_trait::async_trait;

/// Contract for an external text-generation provider.
///
/// Implementations must be safe to share behind an `Arc` and to call
/// concurrently. Any network, auth, timeout, or payload failure surfaces as
/// [`TextGenError`]; callers are expected to recover with deterministic
/// fallback content rather than propagate it.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate completion text for the given prompts.
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, TextGenError>;
}
