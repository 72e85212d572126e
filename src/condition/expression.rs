//! Requirement and condition expressions.
//!
//! Grammar: an optional leading `!`, then `NAME`, `NAME==VALUE`,
//! `NAME!=VALUE` or `NAME=VALUE` (`=` is an alias for `==`).

use std::fmt;

use serde_json::Value as Json;

use crate::checks::CheckResult;
use crate::error::{ProbeError, Result};

/// What an expression tests about the named result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// Succeeded with a truthy value.
    Exists,
    Equals(String),
    NotEquals(String),
}

/// A parsed requirement or condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub negated: bool,
    pub name: String,
    pub comparison: Comparison,
}

impl Expression {
    /// Parse an expression.
    ///
    /// The operator is `!=` if present, else `==`, else `=`. Only one
    /// operator may appear.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = |message: &str| ProbeError::InvalidExpression {
            expression: text.to_string(),
            message: message.to_string(),
        };

        let trimmed = text.trim();
        let (negated, body) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        let split = ["!=", "==", "="]
            .iter()
            .find_map(|op| body.find(op).map(|pos| (*op, pos)));

        let (name, comparison) = match split {
            None => (body, Comparison::Exists),
            Some((op, pos)) => {
                let name = body[..pos].trim();
                let literal = body[pos + op.len()..].trim();
                if name.contains('=') || literal.contains('=') {
                    return Err(invalid("more than one comparison operator"));
                }
                let comparison = if op == "!=" {
                    Comparison::NotEquals(literal.to_string())
                } else {
                    Comparison::Equals(literal.to_string())
                };
                (name, comparison)
            }
        };

        if name.is_empty() {
            return Err(invalid("missing name"));
        }
        if name.contains('!') {
            return Err(invalid("misplaced '!'"));
        }

        Ok(Self {
            negated,
            name: name.to_string(),
            comparison,
        })
    }

    /// Evaluate against the result `name` resolved to.
    ///
    /// Every form requires the result to have succeeded; negation applies
    /// to the final outcome.
    pub fn evaluate(&self, result: &CheckResult) -> bool {
        let matched = result.success
            && match &self.comparison {
                Comparison::Exists => result.value.is_truthy(),
                Comparison::Equals(literal) => parse_literal(literal) == result.value.to_json(),
                Comparison::NotEquals(literal) => parse_literal(literal) != result.value.to_json(),
            };
        matched != self.negated
    }
}

/// JSON form of a comparison literal; non-JSON text is a plain string.
fn parse_literal(literal: &str) -> Json {
    serde_json::from_str(literal).unwrap_or_else(|_| Json::String(literal.to_string()))
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        f.write_str(&self.name)?;
        match &self.comparison {
            Comparison::Exists => Ok(()),
            Comparison::Equals(literal) => write!(f, "=={}", literal),
            Comparison::NotEquals(literal) => write!(f, "!={}", literal),
        }
    }
}
