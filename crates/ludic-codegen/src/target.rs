//! Backend target descriptors.
//!
//! A target supplies the formatting hooks the generator calls while
//! walking the tree: how calls are qualified, how condition flags are
//! declared, how loops open, how support files are included. All
//! backend-specific texture lives here — the tree walk itself never
//! branches on the backend.

/// Formatting hooks for one code-generation backend.
pub trait Target {
    /// Backend id, as used in descriptor bindings (`"js"`, `"cpp"`).
    fn backend_id(&self) -> &str;

    /// Wrap an authoring string as a target string literal.
    fn string_literal(&self, value: &str) -> String;

    /// A numeric literal. Non-finite values have no portable spelling,
    /// so each backend picks its own.
    fn number_literal(&self, value: f64) -> String;

    /// Declare a condition outcome flag, initialized false.
    fn declare_flag(&self, name: &str) -> String;

    /// Declare the hoisted loop count, evaluated once before the loop.
    fn declare_count(&self, name: &str, expr: &str) -> String;

    /// Open the loop construct iterating `index` from 0 to `count`.
    fn loop_open(&self, index: &str, count: &str) -> String;

    /// One support-file inclusion line for the generated prologue.
    fn include_line(&self, file: &str) -> String;

    /// Address a bound symbol under the target's namespace. Symbols that
    /// already carry a qualified path are emitted as-is.
    fn qualify(&self, symbol: &str) -> String;

    fn bool_literal(&self, value: bool) -> String {
        (if value { "true" } else { "false" }).to_string()
    }

    fn call_expr(&self, function: &str, args: &[String]) -> String {
        format!("{}({})", function, args.join(", "))
    }

    fn negate(&self, expr: &str) -> String {
        format!("!({expr})")
    }

    fn assign(&self, name: &str, expr: &str) -> String {
        format!("{name} = {expr};")
    }

    fn statement(&self, expr: &str) -> String {
        format!("{expr};")
    }

    fn if_open(&self, condition: &str) -> String {
        format!("if ({condition}) {{")
    }

    fn else_open(&self) -> String {
        "} else {".to_string()
    }

    fn block_close(&self) -> String {
        "}".to_string()
    }
}

/// Deterministic formatting for finite numbers: integral values print
/// without a fractional part. Shared by both shipped targets.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Escape a string for a double-quoted literal; shared by both shipped
/// targets.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

// ══════════════════════════════════════════════════════════════════════════════
// Script runtime
// ══════════════════════════════════════════════════════════════════════════════

/// The script (JavaScript) runtime target.
#[derive(Debug, Clone, Default)]
pub struct JsTarget {
    /// Prefix applied to unqualified symbols, e.g. `gdjs.evtTools`.
    pub namespace: Option<String>,
}

impl JsTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
        }
    }
}

impl Target for JsTarget {
    fn backend_id(&self) -> &str {
        "js"
    }

    fn string_literal(&self, value: &str) -> String {
        format!("\"{}\"", escape(value))
    }

    fn number_literal(&self, value: f64) -> String {
        if value.is_finite() {
            format_number(value)
        } else if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    }

    fn declare_flag(&self, name: &str) -> String {
        format!("let {name} = false;")
    }

    fn declare_count(&self, name: &str, expr: &str) -> String {
        format!("const {name} = {expr};")
    }

    fn loop_open(&self, index: &str, count: &str) -> String {
        format!("for (let {index} = 0; {index} < {count}; ++{index}) {{")
    }

    fn include_line(&self, file: &str) -> String {
        format!("// include: {file}")
    }

    fn qualify(&self, symbol: &str) -> String {
        match &self.namespace {
            Some(ns) if !symbol.contains('.') => format!("{ns}.{symbol}"),
            _ => symbol.to_string(),
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Native runtime
// ══════════════════════════════════════════════════════════════════════════════

/// The native (C++) runtime target.
#[derive(Debug, Clone, Default)]
pub struct CppTarget {
    /// Namespace applied to unqualified symbols, e.g. `GDpriv`.
    pub namespace: Option<String>,
}

impl CppTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
        }
    }
}

impl Target for CppTarget {
    fn backend_id(&self) -> &str {
        "cpp"
    }

    fn string_literal(&self, value: &str) -> String {
        format!("\"{}\"", escape(value))
    }

    // C++ has no non-finite literals; spell them as IEEE 754 division
    // results, valid in any expression position.
    fn number_literal(&self, value: f64) -> String {
        if value.is_finite() {
            format_number(value)
        } else if value.is_nan() {
            "(0.0 / 0.0)".to_string()
        } else if value > 0.0 {
            "(1.0 / 0.0)".to_string()
        } else {
            "(-1.0 / 0.0)".to_string()
        }
    }

    fn declare_flag(&self, name: &str) -> String {
        format!("bool {name} = false;")
    }

    fn declare_count(&self, name: &str, expr: &str) -> String {
        format!("const auto {name} = {expr};")
    }

    fn loop_open(&self, index: &str, count: &str) -> String {
        format!("for (auto {index} = 0; {index} < {count}; ++{index}) {{")
    }

    fn include_line(&self, file: &str) -> String {
        format!("#include \"{file}\"")
    }

    fn qualify(&self, symbol: &str) -> String {
        match &self.namespace {
            Some(ns) if !symbol.contains("::") => format!("{ns}::{symbol}"),
            _ => symbol.to_string(),
        }
    }
}
