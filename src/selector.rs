//! Element selectors and their compilation to in-page JS queries.
//!
//! All DOM access goes through `Runtime.evaluate`, so both CSS and XPath
//! selectors are compiled to a JS expression that resolves to the matched
//! element or `null`.

use std::fmt;

/// A locator for one DOM element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// A CSS selector, resolved with `document.querySelector`.
    Css(String),
    /// An XPath expression, resolved with `document.evaluate`.
    XPath(String),
}

impl Selector {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }

    /// The raw selector text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) => s,
        }
    }

    /// JS expression evaluating to the first matched element, or `null`.
    pub fn js_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({})", js_string(s)),
            Self::XPath(s) => format!(
                "document.evaluate({}, document, null, \
                 XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
                js_string(s)
            ),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
        }
    }
}

/// Quote `value` as a JS string literal.
fn js_string(value: &str) -> String {
    // serde_json string encoding is valid JS source.
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_owned())
}

/// Quote `value` as an XPath string literal.
///
/// XPath 1.0 has no escape sequences, so values containing both quote kinds
/// must be assembled with `concat()`.
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    if !value.contains('"') {
        return format!("\"{value}\"");
    }
    let parts: Vec<String> = value
        .split('\'')
        .map(|part| format!("'{part}'"))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}
