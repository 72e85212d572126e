//! Check results and the result-file interchange format.
//!
//! A result file is a JSON object keyed by result name:
//!
//! ```json
//! {
//!     "ac_cv_header_stdio_h": {
//!         "define": "HAVE_STDIO_H",
//!         "is_define": true,
//!         "is_subst": false,
//!         "success": true,
//!         "type": "header",
//!         "unquote": false,
//!         "value": 1
//!     }
//! }
//! ```
//!
//! Reading also accepts the older field spellings (`has_value`,
//! `define_flag`, `subst_flag`, boolean `define`/`subst`).

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value as Json};

use crate::error::{ProbeError, Result};

use super::{Check, CheckKind, Value};

/// Outcome of running or skipping one check.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckResult {
    pub name: String,
    pub define: Option<String>,
    pub subst: Option<String>,
    pub value: Value,
    /// Whether the probed capability was detected.
    pub success: bool,
    pub is_define: bool,
    pub is_subst: bool,
    pub kind: CheckKind,
    pub unquote: bool,
}

impl CheckResult {
    /// A bare define-kind result.
    pub fn new(name: impl Into<String>, value: Value, success: bool) -> Self {
        Self {
            name: name.into(),
            value,
            success,
            is_define: true,
            ..Default::default()
        }
    }

    /// A result carrying the check's naming and output metadata.
    pub fn for_check(check: &Check, value: Value, success: bool) -> Self {
        Self {
            name: check.name.clone(),
            define: Some(check.define_name().to_string()),
            subst: check.subst.clone(),
            value,
            success,
            is_define: check.is_define(),
            is_subst: check.is_subst(),
            kind: check.kind,
            unquote: check.unquote,
        }
    }

    /// Result for a check whose requirements were not met.
    pub fn skipped(check: &Check) -> Self {
        Self::for_check(check, Value::Absent, false)
    }

    /// Macro name used when rendering this result.
    pub fn define_name(&self) -> &str {
        self.define.as_deref().unwrap_or(&self.name)
    }

    /// Template variable name used when rendering this result.
    pub fn subst_name(&self) -> &str {
        self.subst.as_deref().unwrap_or(&self.name)
    }

    /// Whether this result should turn its `#undef` into a `#define`.
    ///
    /// Define and Decl results emit whenever they succeeded or carry a
    /// value (a fallback for a missing declaration). Every other kind emits
    /// only a successful, non-empty value.
    pub fn should_emit_define(&self) -> bool {
        if self.kind.emits_fallback_value() {
            self.success || self.value.is_present()
        } else {
            self.success && self.value.is_present() && !self.value.is_empty()
        }
    }

    /// Short `success=.. value=..` description used in diagnostics.
    pub fn summary(&self) -> String {
        format!("success={} value={}", self.success, self.value)
    }

    /// Parse one entry of a result file.
    pub fn from_json(name: &str, json: &Json) -> std::result::Result<Self, String> {
        let obj = json
            .as_object()
            .ok_or_else(|| format!("result '{}' is not an object", name))?;
        let success = obj
            .get("success")
            .and_then(Json::as_bool)
            .ok_or_else(|| format!("result '{}' has no boolean 'success'", name))?;

        let has_value = obj.get("has_value").and_then(Json::as_bool);
        let value = match obj.get("value") {
            None => Value::Absent,
            Some(Json::Null) if has_value == Some(true) => Value::Empty,
            Some(Json::Null) => Value::Absent,
            Some(Json::String(s)) if s.is_empty() && has_value == Some(false) => Value::Absent,
            Some(other) => Value::from_json(other.clone()),
        };

        let define = obj.get("define").and_then(Json::as_str).map(str::to_string);
        let subst = obj.get("subst").and_then(Json::as_str).map(str::to_string);
        let kind: CheckKind = obj
            .get("type")
            .and_then(Json::as_str)
            .and_then(|t| t.parse().ok())
            .unwrap_or_default();
        // Without a flag, every kind but subst-only is a define
        let is_define = flag(obj, ["is_define", "define_flag", "define"])
            .unwrap_or(define.is_some() || kind.is_define());
        let is_subst =
            flag(obj, ["is_subst", "subst_flag", "subst"]).unwrap_or(subst.is_some());
        let unquote = obj.get("unquote").and_then(Json::as_bool).unwrap_or(false);

        Ok(Self {
            name: name.to_string(),
            define,
            subst,
            value,
            success,
            is_define,
            is_subst,
            kind,
            unquote,
        })
    }

    /// Serialize to the interchange format (without the outer name key).
    pub fn to_json(&self) -> Json {
        let mut obj = Map::new();
        obj.insert("value".into(), self.value.to_json());
        obj.insert("success".into(), Json::Bool(self.success));
        obj.insert("is_define".into(), Json::Bool(self.is_define));
        obj.insert("is_subst".into(), Json::Bool(self.is_subst));
        obj.insert("type".into(), Json::String(self.kind.as_str().into()));
        obj.insert("unquote".into(), Json::Bool(self.unquote));
        if let Some(define) = &self.define {
            obj.insert("define".into(), Json::String(define.clone()));
        }
        if let Some(subst) = &self.subst {
            obj.insert("subst".into(), Json::String(subst.clone()));
        }
        Json::Object(obj)
    }
}

/// First boolean found among the given keys.
fn flag<const N: usize>(obj: &Map<String, Json>, keys: [&str; N]) -> Option<bool> {
    keys.iter().find_map(|key| obj.get(*key).and_then(Json::as_bool))
}

/// Parse a whole result document.
///
/// `null` or a non-object document holds no results.
pub fn parse_results(json: &Json) -> std::result::Result<Vec<CheckResult>, String> {
    match json.as_object() {
        Some(obj) => obj
            .iter()
            .map(|(name, entry)| CheckResult::from_json(name, entry))
            .collect(),
        None => Ok(Vec::new()),
    }
}

/// Load every result in a result file.
pub fn read_results(path: &Path) -> Result<Vec<CheckResult>> {
    let content = std::fs::read_to_string(path).map_err(|e| ProbeError::ReadFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let json: Json =
        serde_json::from_str(&content).map_err(|e| ProbeError::InvalidResultFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    parse_results(&json).map_err(|message| ProbeError::InvalidResultFile {
        path: path.to_path_buf(),
        message,
    })
}

/// Render results as a result document.
pub fn results_to_json(results: &[CheckResult]) -> Json {
    let obj: Map<String, Json> = results
        .iter()
        .map(|result| (result.name.clone(), result.to_json()))
        .collect();
    Json::Object(obj)
}

/// Write results to a result file, four-space indented.
pub fn write_results(path: &Path, results: &[CheckResult]) -> Result<()> {
    let write_failed = |message: String| ProbeError::WriteFailed {
        path: path.to_path_buf(),
        message,
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    results_to_json(results)
        .serialize(&mut serializer)
        .map_err(|e| write_failed(e.to_string()))?;
    buf.push(b'\n');

    std::fs::write(path, buf).map_err(|e| write_failed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn parse(json: Json) -> CheckResult {
        CheckResult::from_json("ac_cv_probe", &json).unwrap()
    }

    #[test]
    fn success_must_be_boolean() {
        assert!(CheckResult::from_json("x", &json!({"value": 1})).is_err());
        assert!(CheckResult::from_json("x", &json!({"success": "yes"})).is_err());
        assert!(CheckResult::from_json("x", &json!([1])).is_err());
    }

    #[test]
    fn string_and_number_values_stay_distinct() {
        let string = parse(json!({"success": true, "value": "1"}));
        let number = parse(json!({"success": true, "value": 1}));
        assert_eq!(string.value, Value::string("1"));
        assert_eq!(number.value, Value::integer(1));
        assert_ne!(string.value, number.value);
    }

    #[test]
    fn null_is_absent_and_empty_string_is_empty() {
        assert_eq!(parse(json!({"success": true, "value": null})).value, Value::Absent);
        assert_eq!(parse(json!({"success": true, "value": ""})).value, Value::Empty);
        assert_eq!(parse(json!({"success": true})).value, Value::Absent);
    }

    #[test]
    fn legacy_has_value_decides_absent_or_empty() {
        let empty = parse(json!({"success": true, "value": "", "has_value": true}));
        assert_eq!(empty.value, Value::Empty);

        let absent = parse(json!({"success": true, "value": "", "has_value": false}));
        assert_eq!(absent.value, Value::Absent);

        let null_with_value = parse(json!({"success": true, "value": null, "has_value": true}));
        assert_eq!(null_with_value.value, Value::Empty);
    }

    #[test]
    fn legacy_flag_spellings() {
        let result = parse(json!({"success": true, "define_flag": true, "subst_flag": true}));
        assert!(result.is_define);
        assert!(result.is_subst);

        let result = parse(json!({"success": true, "define": false, "subst": true}));
        assert!(!result.is_define);
        assert!(result.is_subst);
        assert_eq!(result.define, None);
    }

    #[test]
    fn string_define_implies_flag_unless_explicit() {
        let implied = parse(json!({"success": true, "define": "HAVE_X"}));
        assert!(implied.is_define);
        assert_eq!(implied.define_name(), "HAVE_X");

        let explicit = parse(json!({"success": true, "define": "HAVE_X", "is_define": false}));
        assert!(!explicit.is_define);
    }

    #[test]
    fn define_flag_defaults_from_kind() {
        assert!(parse(json!({"success": true, "value": 1})).is_define);
        assert!(!parse(json!({"success": true, "type": "subst"})).is_define);
    }

    #[test]
    fn type_defaults_to_define() {
        assert_eq!(parse(json!({"success": true})).kind, CheckKind::Define);
        assert_eq!(parse(json!({"success": true, "type": "decl"})).kind, CheckKind::Decl);
        assert_eq!(parse(json!({"success": true, "type": "???"})).kind, CheckKind::Define);
    }

    #[test]
    fn should_emit_define_for_fallback_kinds() {
        let mut result = CheckResult::new("HAVE_DECL_X", Value::integer(0), false);
        result.kind = CheckKind::Decl;
        assert!(result.should_emit_define());

        result.value = Value::Absent;
        assert!(!result.should_emit_define());
    }

    #[test]
    fn should_emit_define_for_probe_kinds() {
        let mut result = CheckResult::new("HAVE_STDIO_H", Value::integer(1), true);
        result.kind = CheckKind::Header;
        assert!(result.should_emit_define());

        result.success = false;
        assert!(!result.should_emit_define());

        result.success = true;
        result.value = Value::Empty;
        assert!(!result.should_emit_define());
    }

    #[test]
    fn written_file_reads_back_identically() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("results.json");
        let results = vec![
            CheckResult {
                name: "ac_cv_header_stdio_h".into(),
                define: Some("HAVE_STDIO_H".into()),
                value: Value::integer(1),
                success: true,
                is_define: true,
                kind: CheckKind::Header,
                ..Default::default()
            },
            CheckResult {
                name: "VERSION_STR".into(),
                subst: Some("VERSION_STR".into()),
                value: Value::string("1"),
                success: true,
                is_subst: true,
                kind: CheckKind::SubstOnly,
                unquote: true,
                ..Default::default()
            },
            CheckResult::new("EMPTY_DEFINE", Value::Empty, true),
        ];

        write_results(&path, &results).unwrap();
        let mut loaded = read_results(&path).unwrap();
        loaded.sort_by(|a, b| a.name.cmp(&b.name));
        let mut expected = results.clone();
        expected.sort_by(|a, b| a.name.cmp(&b.name));

        // the bare result had no define name; reading infers none either
        assert_eq!(loaded, expected);
    }

    #[test]
    fn written_file_uses_four_space_indent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("results.json");
        write_results(&path, &[CheckResult::new("X", Value::Absent, false)]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n    \"X\": {\n        \"is_define\": true"));
        assert!(content.contains("\"value\": null"));
    }

    #[test]
    fn null_document_has_no_results() {
        assert!(parse_results(&Json::Null).unwrap().is_empty());
        assert!(parse_results(&json!([1, 2])).unwrap().is_empty());
    }

    #[test]
    fn unreadable_result_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = read_results(&temp.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ProbeError::ReadFailed { .. }));
    }
}
