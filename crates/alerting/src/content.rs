//! Two-tier alert content generation.
//!
//! Deterministic template text is always composed first and is the
//! guaranteed fallback. When a merchant has opted into AI enhancement the
//! provider is asked to rewrite it; any failure on that path is absorbed
//! here and never surfaces to the caller.

use std::sync::Arc;

use stockwatch_core::alerting::{AlertUrgency, LowStockProduct};
use stockwatch_core::content::{compose_basic, parse_generated, strip_citations, ParsedResponse};
use stockwatch_textgen::TextGenerator;

/// Token budget for a single enhancement call.
const MAX_TOKENS: u32 = 300;

/// Sampling temperature for enhancement calls.
const TEMPERATURE: f32 = 0.7;

const SYSTEM_PROMPT: &str = "You write concise, friendly stock alerts for small shop owners. \
    Respond with a JSON object containing exactly two string fields: \
    \"title\" and \"message\". Do not add markdown, citations, or extra fields.";

/// Input to a single content generation.
#[derive(Debug, Clone)]
pub struct ContentRequest<'a> {
    pub products: &'a [LowStockProduct],
    pub shop_name: &'a str,
    pub low_stock_threshold: i32,
    pub critical_stock_threshold: i32,
    pub urgency: AlertUrgency,
    /// Whether the merchant opted into AI enhancement.
    pub ai_enhanced: bool,
}

/// Generated alert content.
#[derive(Debug, Clone)]
pub struct GeneratedContent {
    pub title: String,
    pub body: String,
    pub is_ai_enhanced: bool,
    /// The deterministic text the AI version replaced, kept for audit.
    /// `None` when the body already is the deterministic text.
    pub original_body: Option<String>,
}

/// Produces alert content, enhancing with the provider when available.
#[derive(Clone)]
pub struct ContentGenerator {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl ContentGenerator {
    /// Generator backed by a text-generation provider.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// Generator without a provider; every alert uses deterministic text.
    pub fn disabled() -> Self {
        Self { generator: None }
    }

    /// Compose content for an alert.
    ///
    /// Never fails: provider errors, unusable responses, and empty output
    /// all fall back to the deterministic template.
    pub async fn generate(&self, request: &ContentRequest<'_>) -> GeneratedContent {
        let basic = compose_basic(
            request.products,
            request.critical_stock_threshold,
            request.urgency,
        );

        let generator = match (&self.generator, request.ai_enhanced) {
            (Some(generator), true) => Arc::clone(generator),
            _ => {
                return GeneratedContent {
                    title: basic.title,
                    body: basic.body,
                    is_ai_enhanced: false,
                    original_body: None,
                }
            }
        };

        match try_enhance(generator.as_ref(), request).await {
            Some((title, message)) => GeneratedContent {
                title,
                body: message,
                is_ai_enhanced: true,
                original_body: Some(basic.body),
            },
            None => GeneratedContent {
                title: basic.title,
                body: basic.body,
                is_ai_enhanced: false,
                original_body: None,
            },
        }
    }
}

/// Attempt the AI enhancement path. Returns `None` on any failure.
async fn try_enhance(
    generator: &dyn TextGenerator,
    request: &ContentRequest<'_>,
) -> Option<(String, String)> {
    let user_prompt = build_user_prompt(request);

    let raw = match generator
        .generate(SYSTEM_PROMPT, &user_prompt, MAX_TOKENS, TEMPERATURE)
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(
                error = %e,
                shop = request.shop_name,
                "Text generation failed, using fallback content"
            );
            return None;
        }
    };

    match parse_generated(&raw) {
        ParsedResponse::Structured { title, message } => {
            let title = strip_citations(&title);
            let message = strip_citations(&message);
            if title.is_empty() || message.is_empty() {
                tracing::warn!(
                    shop = request.shop_name,
                    "Generated content empty after normalization, using fallback"
                );
                return None;
            }
            Some((title, message))
        }
        _ => {
            tracing::warn!(
                shop = request.shop_name,
                "Provider response not fully structured, using fallback content"
            );
            None
        }
    }
}

/// Build the user prompt describing the merchant's low-stock situation.
fn build_user_prompt(request: &ContentRequest<'_>) -> String {
    let critical_count = request
        .products
        .iter()
        .filter(|p| p.quantity <= request.critical_stock_threshold)
        .count();

    let mut prompt = format!(
        "Shop: {}\nLow-stock threshold: {}\nCritical items: {}\nProducts:\n",
        request.shop_name, request.low_stock_threshold, critical_count
    );
    for product in request.products {
        prompt.push_str(&format!(
            "- {} (quantity: {}, price: {:.2})\n",
            product.name, product.quantity, product.price
        ));
    }
    prompt.push_str("\nWrite a short alert telling the owner which products need restocking.");
    prompt
}
