//! Alert content composition and provider-response parsing.
//!
//! The deterministic template composed here is the guaranteed fallback for
//! every alert. AI-enhanced text is layered on top by the alerting crate and
//! must pass through [`parse_generated`] and [`strip_citations`] before it
//! is shown to a merchant.

use std::sync::LazyLock;

use regex::Regex;

use crate::alerting::{AlertUrgency, LowStockProduct};

/// Bracketed numeric citations, e.g. `[1]` or `[2, 7]`. Some providers leak
/// these from retrieval-augmented generation; output text must never contain
/// them.
static CITATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+(?:\s*,\s*\d+)*\]").expect("valid regex"));

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""title"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("valid regex"));

static MESSAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""message"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("valid regex"));

/// Deterministic title and body for an alert.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicContent {
    pub title: String,
    pub body: String,
}

/// Outcome of parsing a text-generation provider response.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    /// Both `title` and `message` were recovered with non-empty values.
    Structured { title: String, message: String },
    /// Only one of the two fields was recovered.
    Partial {
        title: Option<String>,
        message: Option<String>,
    },
    /// Nothing usable was found in the response.
    Unparsed,
}

/// Compose the deterministic title and body for a group of low-stock
/// products.
///
/// The title varies by product count and urgency; the body lists every
/// product with a per-item urgency glyph and closes with a rollup sentence.
pub fn compose_basic(
    products: &[LowStockProduct],
    critical_threshold: i32,
    urgency: AlertUrgency,
) -> BasicContent {
    let title = match (products.len(), urgency) {
        (1, AlertUrgency::Critical) => format!("🚨 Critical Stock: {}", products[0].name),
        (1, AlertUrgency::Low) => format!("⚠️ Low Stock: {}", products[0].name),
        (n, AlertUrgency::Critical) => format!("🚨 Critical Stock Alert ({n} items)"),
        (n, AlertUrgency::Low) => format!("⚠️ Low Stock Alert ({n} items)"),
    };

    let mut lines = Vec::with_capacity(products.len() + 1);
    let mut critical_count = 0usize;
    for product in products {
        if product.quantity <= critical_threshold {
            critical_count += 1;
            lines.push(format!("🚨 {}: only {} left", product.name, product.quantity));
        } else {
            lines.push(format!("⚠️ {}: {} left", product.name, product.quantity));
        }
    }
    lines.push(rollup_line(critical_count, products.len() - critical_count));

    BasicContent {
        title,
        body: lines.join("\n"),
    }
}

fn rollup_line(critical_count: usize, low_count: usize) -> String {
    let critical = count_phrase(critical_count);
    let low = count_phrase(low_count);
    match (critical_count, low_count) {
        (0, _) => format!("{low} running low. Restock soon."),
        (_, 0) => format!("{critical} critically low. Restock urgently."),
        _ => format!("{critical} critically low and {low} running low."),
    }
}

fn count_phrase(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}

/// Remove bracketed numeric citation artifacts from provider text.
pub fn strip_citations(text: &str) -> String {
    CITATION_RE.replace_all(text, "").trim().to_string()
}

/// Parse a provider response into a tagged result.
///
/// First tier: strict JSON (code fences tolerated). Second tier: regex
/// recovery of the `title`/`message` fields from malformed JSON. A response
/// is [`ParsedResponse::Structured`] only when both fields come back
/// non-empty; callers fall back to deterministic content for anything else.
pub fn parse_generated(raw: &str) -> ParsedResponse {
    let trimmed = strip_code_fences(raw.trim());

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let title = non_empty(value.get("title"));
        let message = non_empty(value.get("message"));
        match (title, message) {
            (Some(title), Some(message)) => return ParsedResponse::Structured { title, message },
            (None, None) => {}
            (title, message) => return ParsedResponse::Partial { title, message },
        }
    }

    let title = extract_field(&TITLE_RE, trimmed);
    let message = extract_field(&MESSAGE_RE, trimmed);
    match (title, message) {
        (Some(title), Some(message)) => ParsedResponse::Structured { title, message },
        (None, None) => ParsedResponse::Unparsed,
        (title, message) => ParsedResponse::Partial { title, message },
    }
}

/// Strip a leading/trailing markdown code fence if present.
fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the language tag line, then the closing fence.
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    body.trim().strip_suffix("```").unwrap_or(body).trim()
}

fn non_empty(value: Option<&serde_json::Value>) -> Option<String> {
    value
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn extract_field(re: &Regex, text: &str) -> Option<String> {
    let captured = re.captures(text)?.get(1)?.as_str();
    let unescaped = captured.replace("\\\"", "\"").replace("\\n", "\n");
    let trimmed = unescaped.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DbId;

    fn product(id: DbId, name: &str, quantity: i32) -> LowStockProduct {
        LowStockProduct {
            id,
            name: name.to_string(),
            quantity,
            price: 4.50,
        }
    }

    // -----------------------------------------------------------------------
    // Deterministic composition
    // -----------------------------------------------------------------------

    #[test]
    fn single_critical_product_title() {
        let content = compose_basic(&[product(1, "Espresso Beans", 1)], 2, AlertUrgency::Critical);
        assert_eq!(content.title, "🚨 Critical Stock: Espresso Beans");
        assert!(content.body.contains("only 1 left"));
    }

    #[test]
    fn single_regular_product_title() {
        let content = compose_basic(&[product(1, "Filters", 4)], 2, AlertUrgency::Low);
        assert_eq!(content.title, "⚠️ Low Stock: Filters");
        assert!(content.body.contains("Filters: 4 left"));
    }

    #[test]
    fn grouped_title_counts_items() {
        let products = vec![product(1, "A", 3), product(2, "B", 4)];
        let content = compose_basic(&products, 2, AlertUrgency::Low);
        assert_eq!(content.title, "⚠️ Low Stock Alert (2 items)");
    }

    #[test]
    fn body_lists_every_product() {
        let products = vec![product(1, "A", 1), product(2, "B", 4)];
        let content = compose_basic(&products, 2, AlertUrgency::Low);
        assert!(content.body.contains("🚨 A: only 1 left"));
        assert!(content.body.contains("⚠️ B: 4 left"));
    }

    #[test]
    fn rollup_counts_critical_and_low() {
        let products = vec![product(1, "A", 1), product(2, "B", 2), product(3, "C", 4)];
        let content = compose_basic(&products, 2, AlertUrgency::Low);
        assert!(content.body.contains("2 items critically low and 1 item running low."));
    }

    #[test]
    fn rollup_all_critical() {
        let content = compose_basic(&[product(1, "A", 1)], 2, AlertUrgency::Critical);
        assert!(content.body.contains("1 item critically low. Restock urgently."));
    }

    #[test]
    fn rollup_none_critical() {
        let content = compose_basic(&[product(1, "A", 4)], 2, AlertUrgency::Low);
        assert!(content.body.contains("1 item running low. Restock soon."));
    }

    // -----------------------------------------------------------------------
    // Citation stripping
    // -----------------------------------------------------------------------

    #[test]
    fn strips_single_citation() {
        assert_eq!(strip_citations("Restock beans [1] today"), "Restock beans  today");
    }

    #[test]
    fn strips_multi_citation() {
        let cleaned = strip_citations("Low stock [1, 2] alert [34,56]");
        assert!(!cleaned.contains('['));
        assert!(!cleaned.contains(']'));
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(strip_citations("No citations here."), "No citations here.");
    }

    #[test]
    fn leaves_non_numeric_brackets_alone() {
        assert_eq!(strip_citations("[note] keep this"), "[note] keep this");
    }

    // -----------------------------------------------------------------------
    // Response parsing
    // -----------------------------------------------------------------------

    #[test]
    fn parses_strict_json() {
        let parsed = parse_generated(r#"{"title": "Stock alert", "message": "Beans are low"}"#);
        assert_eq!(
            parsed,
            ParsedResponse::Structured {
                title: "Stock alert".to_string(),
                message: "Beans are low".to_string(),
            }
        );
    }

    #[test]
    fn parses_json_inside_code_fence() {
        let raw = "```json\n{\"title\": \"T\", \"message\": \"M\"}\n```";
        assert_eq!(
            parse_generated(raw),
            ParsedResponse::Structured {
                title: "T".to_string(),
                message: "M".to_string(),
            }
        );
    }

    #[test]
    fn recovers_fields_from_malformed_json() {
        // Trailing prose after the object breaks strict parsing.
        let raw = r#"{"title": "T", "message": "M"} hope that helps!"#;
        assert_eq!(
            parse_generated(raw),
            ParsedResponse::Structured {
                title: "T".to_string(),
                message: "M".to_string(),
            }
        );
    }

    #[test]
    fn single_field_is_partial() {
        let raw = r#"here you go: "title": "Only a title""#;
        assert_eq!(
            parse_generated(raw),
            ParsedResponse::Partial {
                title: Some("Only a title".to_string()),
                message: None,
            }
        );
    }

    #[test]
    fn empty_json_fields_are_unparsed() {
        assert_eq!(
            parse_generated(r#"{"title": "", "message": ""}"#),
            ParsedResponse::Unparsed
        );
    }

    #[test]
    fn garbage_is_unparsed() {
        assert_eq!(parse_generated("total nonsense"), ParsedResponse::Unparsed);
    }

    #[test]
    fn unescapes_recovered_fields() {
        let raw = r#"broken { "title": "Say \"hi\"", "message": "Line one\nLine two" trailing"#;
        match parse_generated(raw) {
            ParsedResponse::Structured { title, message } => {
                assert_eq!(title, "Say \"hi\"");
                assert_eq!(message, "Line one\nLine two");
            }
            other => panic!("expected structured, got {other:?}"),
        }
    }
}
