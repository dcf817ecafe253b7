//! Ordered default resolution: explicit input, then saved value, then literal.

/// Ordered list of optional value sources; the first non-empty one wins.
#[derive(Debug, Clone, Default)]
pub struct FallbackChain<'a> {
    sources: Vec<Option<&'a str>>,
}

impl<'a> FallbackChain<'a> {
    pub fn new() -> Self {
        Self { sources: Vec::new() }
    }

    /// Append a source that may be absent.
    pub fn or(mut self, source: Option<&'a str>) -> Self {
        self.sources.push(source);
        self
    }

    /// Append a source that is always present (typically a hardcoded literal).
    pub fn or_literal(self, literal: &'a str) -> Self {
        self.or(Some(literal))
    }

    /// First non-empty source, if any.
    pub fn first(&self) -> Option<&'a str> {
        self.sources.iter().flatten().copied().find(|value| !value.is_empty())
    }

    /// First non-empty source, or the empty string.
    pub fn resolve(&self) -> String {
        self.first().unwrap_or_default().to_string()
    }
}
