//! Resource identifiers

use std::fmt;

/// Identifies one record, or several for a batch delete.
///
/// Rendered as a single path segment: numbers in decimal, text verbatim
/// apart from `?` and `#` (percent-encoded so they stay in the path), lists
/// joined with `,`. A `/` inside text is sent as-is and splits the segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceId {
    Number(i64),
    Text(String),
    Many(Vec<ResourceId>),
}

impl ResourceId {
    /// Parse command-line input. Only canonical integers become numeric, so
    /// the rendered id always equals `input` (`007` and `+5` stay text).
    pub fn parse(input: &str) -> Self {
        match input.parse::<i64>() {
            Ok(n) if n.to_string() == input => Self::Number(n),
            _ => Self::Text(input.to_string()),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(&s.replace('?', "%3F").replace('#', "%23")),
            Self::Many(ids) => {
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", id)?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        Self::Number(id.into())
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl<T: Into<ResourceId>> From<Vec<T>> for ResourceId {
    fn from(ids: Vec<T>) -> Self {
        Self::Many(ids.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ResourceId::from(42).to_string(), "42");
        assert_eq!(ResourceId::from("abc").to_string(), "abc");
        assert_eq!(ResourceId::from(vec![1, 2, 3]).to_string(), "1,2,3");
    }

    #[test]
    fn test_parse_keeps_numbers_numeric() {
        assert_eq!(ResourceId::parse("42"), ResourceId::Number(42));
        assert_eq!(ResourceId::parse("WO-7"), ResourceId::Text("WO-7".to_string()));
        assert_eq!(ResourceId::parse("-12"), ResourceId::Number(-12));
    }

    #[test]
    fn test_parse_keeps_non_canonical_integers_as_text() {
        assert_eq!(ResourceId::parse("007"), ResourceId::Text("007".to_string()));
        assert_eq!(ResourceId::parse("007").to_string(), "007");
        assert_eq!(ResourceId::parse("+5").to_string(), "+5");
    }

    #[test]
    fn test_query_and_fragment_chars_are_escaped() {
        assert_eq!(ResourceId::from("a?x=1").to_string(), "a%3Fx=1");
        assert_eq!(ResourceId::from("lot#4").to_string(), "lot%234");
    }
}
