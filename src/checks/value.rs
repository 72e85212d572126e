//! Three-state, type-preserving check values.
//!
//! A value is either absent (nothing to emit), explicitly empty (emit the
//! name with no body), or present with its original JSON type. Keeping the
//! JSON type is what lets `"1"` and `1` stay distinct across result files.

use std::fmt;

use serde_json::Value as Json;

/// The value carried by a check result.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value; renders as a commented-out `#undef`.
    #[default]
    Absent,
    /// Explicitly empty; renders as `#define NAME /**/`.
    Empty,
    /// A typed JSON value. Never `null` and never the empty string.
    Present(Json),
}

impl Value {
    /// Build a value from parsed JSON.
    ///
    /// `null` becomes [`Value::Absent`] and `""` becomes [`Value::Empty`].
    pub fn from_json(json: Json) -> Self {
        match json {
            Json::Null => Self::Absent,
            Json::String(s) if s.is_empty() => Self::Empty,
            other => Self::Present(other),
        }
    }

    /// Build a value from a literal written in a check description.
    ///
    /// Text that parses as JSON keeps its JSON type, so `1` is a number and
    /// `"\"X\""` is the string `"X"`. Anything else is a plain string.
    pub fn from_literal(text: &str) -> Self {
        if text.is_empty() {
            return Self::Empty;
        }
        match serde_json::from_str::<Json>(text) {
            Ok(json) => Self::from_json(json),
            Err(_) => Self::Present(Json::String(text.to_string())),
        }
    }

    /// Shorthand for a present string value.
    pub fn string(text: impl Into<String>) -> Self {
        Self::from_json(Json::String(text.into()))
    }

    /// Shorthand for a present integer value.
    pub fn integer(n: i64) -> Self {
        Self::Present(Json::from(n))
    }

    /// Convert back to JSON for storage.
    pub fn to_json(&self) -> Json {
        match self {
            Self::Absent => Json::Null,
            Self::Empty => Json::String(String::new()),
            Self::Present(json) => json.clone(),
        }
    }

    /// Canonical JSON encoding of this value.
    pub fn encode(&self) -> String {
        self.to_json().to_string()
    }

    /// Inverse of [`Value::encode`].
    pub fn decode(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text).map(Self::from_json)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// True for [`Value::Empty`] and for a present empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::Empty => true,
            Self::Present(Json::String(s)) => s.is_empty(),
            Self::Present(_) => false,
        }
    }

    /// Present, non-empty, and not encoded as `0`.
    pub fn is_truthy(&self) -> bool {
        self.is_present() && !self.is_empty() && self.encode() != "0"
    }

    /// Text used as the body of a `#define`.
    ///
    /// Strings render as their decoded content with no added quotes.
    pub fn render_define(&self) -> String {
        match self {
            Self::Absent | Self::Empty => String::new(),
            Self::Present(Json::String(s)) => s.clone(),
            Self::Present(json) => json.to_string(),
        }
    }

    /// Text used to replace an `@NAME@` placeholder.
    pub fn render_subst(&self) -> String {
        self.render_define()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_and_number_encode_differently() {
        assert_ne!(Value::string("1").encode(), Value::integer(1).encode());
        assert_eq!(Value::string("1").encode(), "\"1\"");
        assert_eq!(Value::integer(1).encode(), "1");
    }

    #[test]
    fn decode_reverses_encode() {
        for value in [
            Value::Absent,
            Value::Empty,
            Value::string("1"),
            Value::integer(1),
            Value::Present(json!(true)),
            Value::Present(json!(-12.5)),
            Value::string("\"quoted\""),
            Value::string("a \\ b"),
        ] {
            assert_eq!(Value::decode(&value.encode()).unwrap(), value);
        }
    }

    #[test]
    fn absent_and_empty_encodings() {
        assert_eq!(Value::Absent.encode(), "null");
        assert_eq!(Value::Empty.encode(), "\"\"");
    }

    #[test]
    fn from_json_normalizes_null_and_empty_string() {
        assert_eq!(Value::from_json(Json::Null), Value::Absent);
        assert_eq!(Value::from_json(json!("")), Value::Empty);
        assert_eq!(Value::string(""), Value::Empty);
    }

    #[test]
    fn literal_keeps_json_type() {
        assert_eq!(Value::from_literal("1"), Value::integer(1));
        assert_eq!(Value::from_literal("\"X\""), Value::string("X"));
        assert_eq!(Value::from_literal("\"\\\"X\\\"\""), Value::string("\"X\""));
        assert_eq!(Value::from_literal("true"), Value::Present(json!(true)));
    }

    #[test]
    fn literal_falls_back_to_plain_string() {
        assert_eq!(Value::from_literal("unsigned int"), Value::string("unsigned int"));
        assert_eq!(Value::from_literal(""), Value::Empty);
    }

    #[test]
    fn render_define_uses_decoded_text() {
        assert_eq!(Value::string("\"X\"").render_define(), "\"X\"");
        assert_eq!(Value::string("X").render_define(), "X");
        assert_eq!(Value::integer(8).render_define(), "8");
        assert_eq!(Value::Present(json!(false)).render_define(), "false");
        assert_eq!(Value::Empty.render_define(), "");
        assert_eq!(Value::Absent.render_subst(), "");
    }

    #[test]
    fn truthiness() {
        assert!(Value::integer(1).is_truthy());
        assert!(Value::string("yes").is_truthy());
        assert!(!Value::integer(0).is_truthy());
        assert!(!Value::Empty.is_truthy());
        assert!(!Value::Absent.is_truthy());
        // only the encoded literal 0 is falsy
        assert!(Value::string("0").is_truthy());
    }
}
