//! Brick trait: verifiable assertions plus deterministic HTML/CSS output.
//!
//! Every widget is a brick. Assertions are checked before rendering and a
//! brick whose verification fails reports `can_render() == false`.

use std::time::{Duration, Instant};

/// Assertion a brick makes about its own state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrickAssertion {
    /// Text content must be non-empty
    TextVisible,
    /// Named custom assertion
    Custom {
        /// Assertion name for error reporting
        name: String,
    },
}

impl BrickAssertion {
    /// Create a custom assertion
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom { name: name.into() }
    }
}

/// Result of verifying brick assertions
#[derive(Debug, Clone, Default)]
pub struct BrickVerification {
    /// All assertions that passed
    pub passed: Vec<BrickAssertion>,
    /// All assertions that failed with reasons
    pub failed: Vec<(BrickAssertion, String)>,
    /// Time taken to verify
    pub verification_time: Duration,
}

impl BrickVerification {
    /// Start collecting results.
    #[must_use]
    pub fn start() -> VerificationBuilder {
        VerificationBuilder {
            started: Instant::now(),
            result: Self::default(),
        }
    }

    /// Check if all assertions passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }

    /// Fraction of assertions that passed (1.0 when there are none).
    #[must_use]
    pub fn score(&self) -> f32 {
        let total = self.passed.len() + self.failed.len();
        if total == 0 {
            1.0
        } else {
            self.passed.len() as f32 / total as f32
        }
    }
}

/// Accumulates pass/fail results and stamps the elapsed time.
#[derive(Debug)]
pub struct VerificationBuilder {
    started: Instant,
    result: BrickVerification,
}

impl VerificationBuilder {
    /// Record an assertion outcome. `failure` is `None` when it holds.
    #[must_use]
    pub fn check(mut self, assertion: BrickAssertion, failure: Option<String>) -> Self {
        match failure {
            None => self.result.passed.push(assertion),
            Some(reason) => self.result.failed.push((assertion, reason)),
        }
        self
    }

    /// Finish and return the verification.
    #[must_use]
    pub fn finish(mut self) -> BrickVerification {
        self.result.verification_time = self.started.elapsed();
        self.result
    }
}

/// Core Brick trait.
pub trait Brick: Send + Sync {
    /// Get the brick's unique type name
    fn brick_name(&self) -> &'static str;

    /// Get all assertions for this brick
    fn assertions(&self) -> &[BrickAssertion];

    /// Verify all assertions against current state
    fn verify(&self) -> BrickVerification;

    /// Generate HTML for this brick.
    ///
    /// Must be deterministic (same state -> same output).
    fn to_html(&self) -> String;

    /// Generate CSS rules for this brick.
    fn to_css(&self) -> String;

    /// Check if this brick can be rendered (all assertions pass)
    fn can_render(&self) -> bool {
        self.verify().is_valid()
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brick_assertion_custom() {
        assert_eq!(
            BrickAssertion::custom("slots"),
            BrickAssertion::Custom {
                name: "slots".into()
            }
        );
    }

    #[test]
    fn test_verification_builder() {
        let v = BrickVerification::start()
            .check(BrickAssertion::TextVisible, None)
            .check(BrickAssertion::custom("slots"), Some("zero count".into()))
            .finish();
        assert!(!v.is_valid());
        assert_eq!(v.passed, vec![BrickAssertion::TextVisible]);
        assert_eq!(v.failed.len(), 1);
        assert!((v.score() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_verification_empty_is_valid() {
        let v = BrickVerification::default();
        assert!(v.is_valid());
        assert!((v.score() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">&</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
    }
}
