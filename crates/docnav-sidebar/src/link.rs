//! Internal vs. external link classification.

use std::sync::LazyLock;

use regex::Regex;

/// URL scheme (`https:`, `mailto:`) or protocol-relative (`//`) prefix.
static PROTOCOL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\w*:|//)").unwrap());

/// Decides whether a link navigates within the site.
pub trait LinkClassifier {
    /// Whether `href` is handled by client-side navigation.
    fn is_internal(&self, href: &str) -> bool;
}

/// Classifier treating every href without a protocol as internal.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultLinkClassifier;

impl LinkClassifier for DefaultLinkClassifier {
    fn is_internal(&self, href: &str) -> bool {
        !has_protocol(href)
    }
}

impl<F> LinkClassifier for F
where
    F: Fn(&str) -> bool,
{
    fn is_internal(&self, href: &str) -> bool {
        self(href)
    }
}

/// Check whether `href` starts with a scheme or `//`.
#[must_use]
pub fn has_protocol(href: &str) -> bool {
    PROTOCOL_RE.is_match(href)
}
