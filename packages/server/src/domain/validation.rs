//! Message screening: bounds-check, sanitize, and normalize raw text
//! before any side effect occurs.

/// Screening policy for inbound message text. Bounds and blocked terms are
/// configuration, injected at construction.
#[derive(Debug, Clone)]
pub struct MessagePolicy {
    min_chars: usize,
    max_chars: usize,
    /// Lowercased terms matched as case-insensitive substrings.
    blocked_terms: Vec<String>,
}

/// Result of screening one raw message. On rejection no partially
/// sanitized text is exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted(String),
    Rejected { message: String },
}

impl Default for MessagePolicy {
    fn default() -> Self {
        Self::new(1, 2000, vec!["spam".to_string(), "scam".to_string()])
    }
}

impl MessagePolicy {
    pub fn new(min_chars: usize, max_chars: usize, blocked_terms: Vec<String>) -> Self {
        Self {
            min_chars,
            max_chars,
            blocked_terms: blocked_terms
                .into_iter()
                .map(|term| term.to_lowercase())
                .collect(),
        }
    }

    /// Screen raw text, in order: empty check, length bounds, character
    /// stripping and whitespace normalization, blocked-term check.
    pub fn screen(&self, raw: &str) -> ValidationOutcome {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ValidationOutcome::Rejected {
                message: "The message is empty".to_string(),
            };
        }

        let length = trimmed.chars().count();
        if length < self.min_chars {
            return ValidationOutcome::Rejected {
                message: format!("The message must be at least {} characters", self.min_chars),
            };
        }
        if length > self.max_chars {
            return ValidationOutcome::Rejected {
                message: format!("The message cannot exceed {} characters", self.max_chars),
            };
        }

        let normalized = sanitize(trimmed);
        if normalized.is_empty() {
            return ValidationOutcome::Rejected {
                message: "The message is empty".to_string(),
            };
        }

        let lowered = normalized.to_lowercase();
        if self.blocked_terms.iter().any(|term| lowered.contains(term)) {
            return ValidationOutcome::Rejected {
                message: "The message contains blocked content".to_string(),
            };
        }

        ValidationOutcome::Accepted(normalized)
    }
}

/// Strip bracket characters used for markup/template injection, collapse
/// whitespace runs to single spaces, and trim.
fn sanitize(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}'))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
