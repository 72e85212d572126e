//! Check kinds.

use std::fmt;
use std::str::FromStr;

use crate::error::ProbeError;

/// What a check probes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckKind {
    Header,
    Function,
    Lib,
    Symbol,
    Type,
    Compile,
    Link,
    /// Literal define, no compilation.
    #[default]
    Define,
    /// Computed for other checks' requirements and `@VAR@` output only.
    SubstOnly,
    Sizeof,
    Alignof,
    ComputeInt,
    Endian,
    Decl,
    Member,
}

impl CheckKind {
    /// All kinds, in declaration order.
    pub const ALL: [CheckKind; 15] = [
        Self::Header,
        Self::Function,
        Self::Lib,
        Self::Symbol,
        Self::Type,
        Self::Compile,
        Self::Link,
        Self::Define,
        Self::SubstOnly,
        Self::Sizeof,
        Self::Alignof,
        Self::ComputeInt,
        Self::Endian,
        Self::Decl,
        Self::Member,
    ];

    /// Name used in check and result files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Function => "function",
            Self::Lib => "lib",
            Self::Symbol => "symbol",
            Self::Type => "type",
            Self::Compile => "compile",
            Self::Link => "link",
            Self::Define => "define",
            Self::SubstOnly => "subst",
            Self::Sizeof => "sizeof",
            Self::Alignof => "alignof",
            Self::ComputeInt => "compute_int",
            Self::Endian => "endian",
            Self::Decl => "decl",
            Self::Member => "member",
        }
    }

    /// Whether checks of this kind need custom `code`.
    pub fn requires_code(&self) -> bool {
        matches!(
            self,
            Self::Sizeof | Self::Alignof | Self::ComputeInt | Self::Endian | Self::Decl | Self::Member
        )
    }

    /// Whether checks of this kind need `code` or `file_path`.
    pub fn requires_source(&self) -> bool {
        matches!(self, Self::Compile | Self::Link)
    }

    /// Whether results of this kind feed the define bucket by default.
    pub fn is_define(&self) -> bool {
        !matches!(self, Self::SubstOnly)
    }

    /// Whether a fallback value alone is enough to emit a `#define`.
    pub fn emits_fallback_value(&self) -> bool {
        matches!(self, Self::Define | Self::Decl)
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m4_variable" => Ok(Self::SubstOnly),
            _ => Self::ALL
                .iter()
                .copied()
                .find(|kind| kind.as_str() == s)
                .ok_or_else(|| ProbeError::UnknownCheckKind {
                    kind: s.to_string(),
                }),
        }
    }
}
