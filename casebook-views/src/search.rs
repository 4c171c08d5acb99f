//! Case-insensitive substring search.

/// A lowered search needle. An empty query is no query at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// `None` for an absent or empty query.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some(text) if !text.is_empty() => Some(Self {
                needle: text.to_lowercase(),
            }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Whether `haystack` contains the needle, ignoring case.
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }

    /// Whether any of `fields` contains the needle, ignoring case.
    pub fn matches_any<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        fields.into_iter().any(|field| self.matches(field))
    }
}
