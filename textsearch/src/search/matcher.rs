/// Literal, case-sensitive substring matching.
///
/// An empty term matches every line, since every string contains the empty
/// string.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    term: String,
}

impl TermMatcher {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Returns true if `line` contains the term as a contiguous substring
    #[inline]
    pub fn is_match(&self, line: &str) -> bool {
        line.contains(self.term.as_str())
    }
}
