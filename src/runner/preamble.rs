//! `#define` blocks prepended to test sources.

use std::collections::BTreeMap;

use crate::checks::{Check, CheckKind, CheckResult};
use crate::condition::ResultIndex;
use crate::error::{ProbeError, Result};

/// Defines carried over from successful Define-kind results.
///
/// A value of `1` is written as a bare `#define NAME`.
pub fn carried_defines<'a>(results: impl IntoIterator<Item = &'a CheckResult>) -> String {
    let mut defines: BTreeMap<&str, String> = BTreeMap::new();
    for result in results {
        if result.kind != CheckKind::Define
            || !result.is_define
            || !result.success
            || !result.value.is_present()
            || result.value.is_empty()
        {
            continue;
        }
        defines
            .entry(result.define_name())
            .or_insert_with(|| result.value.render_define());
    }

    defines
        .into_iter()
        .map(|(name, value)| {
            if value == "1" {
                format!("#define {}\n", name)
            } else {
                format!("#define {} {}\n", name, value)
            }
        })
        .collect()
}

/// Defines requested through the check's `compile_defines`.
///
/// A name missing from the dependencies is fatal; a dependency without a
/// value is skipped.
pub fn requested_defines(check: &Check, dependencies: &ResultIndex) -> Result<String> {
    let mut block = String::new();
    for name in check.compile_defines.iter().filter(|name| !name.is_empty()) {
        let result = dependencies
            .get(name)
            .ok_or_else(|| ProbeError::MissingCompileDefine {
                check: check.define_name().to_string(),
                name: name.clone(),
            })?;
        if !result.value.is_present() || result.value.is_empty() {
            continue;
        }
        block.push_str(&format!("#define {} {}\n", name, result.value.render_define()));
    }
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Value;

    fn define(name: &str, value: Value, success: bool) -> CheckResult {
        CheckResult::new(name, value, success)
    }

    #[test]
    fn carries_successful_define_results() {
        let results = [
            define("_GNU_SOURCE", Value::integer(1), true),
            define("_FILE_OFFSET_BITS", Value::integer(64), true),
            define("FAILED", Value::integer(1), false),
            define("EMPTY", Value::Empty, true),
            define("ABSENT", Value::Absent, true),
        ];

        assert_eq!(
            carried_defines(&results),
            "#define _FILE_OFFSET_BITS 64\n#define _GNU_SOURCE\n"
        );
    }

    #[test]
    fn skips_other_kinds() {
        let mut header = define("HAVE_STDIO_H", Value::integer(1), true);
        header.kind = CheckKind::Header;
        assert_eq!(carried_defines(&[header]), "");
    }

    #[test]
    fn string_values_render_decoded() {
        let results = [define("PACKAGE", Value::string("\"demo\""), true)];
        assert_eq!(carried_defines(&results), "#define PACKAGE \"demo\"\n");
    }

    #[test]
    fn requested_defines_uses_dependency_values() {
        let deps = ResultIndex::from_results([
            define("SIZEOF_LONG", Value::integer(8), true),
            define("HAVE_BROKEN", Value::integer(0), false),
            define("UNSET", Value::Absent, false),
        ]);
        let check = Check {
            name: "probe".into(),
            compile_defines: vec!["SIZEOF_LONG".into(), "HAVE_BROKEN".into(), "UNSET".into()],
            ..Default::default()
        };

        assert_eq!(
            requested_defines(&check, &deps).unwrap(),
            "#define SIZEOF_LONG 8\n#define HAVE_BROKEN 0\n"
        );
    }

    #[test]
    fn requested_define_missing_from_dependencies_is_fatal() {
        let check = Check {
            name: "probe".into(),
            compile_defines: vec!["NOPE".into()],
            ..Default::default()
        };
        let err = requested_defines(&check, &ResultIndex::new()).unwrap_err();
        assert!(matches!(err, ProbeError::MissingCompileDefine { name, .. } if name == "NOPE"));
    }
}
