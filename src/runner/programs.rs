//! Default test programs.
//!
//! Used when a check supplies no `code` of its own. Function and library
//! probes only need to exercise linkage, so they declare the symbol with a
//! dummy prototype and call it.

/// Program that compiles on any working toolchain.
pub const EMPTY_PROGRAM: &str = "int main(void) { return 0; }\n";

/// Candidates tried, in order, by sizeof/alignof probes.
pub const SIZE_CANDIDATES: [u32; 11] = [1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024];

/// Placeholder replaced by each candidate in sizeof/alignof templates.
pub const CANDIDATE_PLACEHOLDER: &str = "{value}";

/// Function name probed by a function check (`ac_cv_func_NAME` or `NAME`).
pub fn function_name(check_name: &str) -> &str {
    check_name.strip_prefix("ac_cv_func_").unwrap_or(check_name)
}

/// Function name probed by a library check (`ac_cv_lib_LIB_NAME` or `NAME`).
pub fn library_function_name<'a>(check_name: &'a str, library: &str) -> &'a str {
    check_name
        .strip_prefix("ac_cv_lib_")
        .and_then(|rest| rest.strip_prefix(library))
        .and_then(|rest| rest.strip_prefix('_'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(check_name)
}

pub fn header_program(header: &str) -> String {
    format!("#include <{}>\n\n{}", header, EMPTY_PROGRAM)
}

fn call_program(function: &str, msvc_prologue: &str) -> String {
    format!(
        r#"
/* Override any GCC internal prototype to avoid an error.
   Use char because int might match the return type of a GCC
   builtin and then its argument prototype would still apply. */
#ifdef __cplusplus
extern "C"
#endif
#if defined _MSC_VER
{msvc_prologue}int {function} ();
#else
char {function} ();
#endif

int main(void) {{
    return {function} ();
}}
"#
    )
}

/// Declare-and-call program for a function probe.
pub fn function_program(function: &str) -> String {
    // UCRT inlines the stdio family; the legacy library exports them again
    call_program(
        function,
        "#pragma comment(lib, \"legacy_stdio_definitions.lib\")\n",
    )
}

/// Declare-and-call program for a library probe.
pub fn library_program(function: &str) -> String {
    call_program(function, "")
}

/// Program that compiles only if `symbol` is a preprocessor macro or is
/// declared.
pub fn symbol_program(symbol: &str) -> String {
    format!(
        r#"
int main(void) {{
#ifndef {symbol}
    (void) {symbol};
#endif
    return 0;
}}
"#
    )
}

/// Program that compiles only if `type_name` names a complete type.
pub fn type_program(type_name: &str) -> String {
    format!(
        r#"
int main(void) {{
    if (sizeof({type_name}))
        return 0;
    return 1;
}}
"#
    )
}

/// Substitute one candidate into a sizeof/alignof template.
pub fn with_candidate(template: &str, candidate: u32) -> String {
    template.replace(CANDIDATE_PLACEHOLDER, &candidate.to_string())
}
