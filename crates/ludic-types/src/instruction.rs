//! Instruction instances and their bound parameter values.
//!
//! An instruction *instance* is a reference to a descriptor in the
//! registry — `(extension_id, name)` — plus the argument list the author
//! bound in the editor. Instances never carry descriptor metadata
//! themselves; resolution happens at generation time.

use serde::{Deserialize, Serialize};
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Kinds
// ══════════════════════════════════════════════════════════════════════════════

/// The three instruction namespaces.
///
/// The same name may denote both a condition and an action within one
/// extension, so every lookup is qualified by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionKind {
    Condition,
    Action,
    Expression,
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Condition => write!(f, "condition"),
            Self::Action => write!(f, "action"),
            Self::Expression => write!(f, "expression"),
        }
    }
}

/// Semantic type of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// A numeric value or a numeric expression.
    Number,
    /// A string value or a string expression.
    String,
    /// A variable or object reference, passed to the runtime by name.
    ObjectRef,
    /// An arbitrary sub-expression tree.
    Expression,
}

impl ParamKind {
    /// Whether a bound value is acceptable for this parameter kind.
    ///
    /// Expressions are accepted wherever a literal is, since a literal is
    /// a degenerate expression; object references are only valid where an
    /// `ObjectRef` is declared.
    pub fn accepts(self, value: &ParamValue) -> bool {
        match self {
            ParamKind::Number => matches!(value, ParamValue::Number(_) | ParamValue::Expr(_)),
            ParamKind::String => matches!(value, ParamValue::Str(_) | ParamValue::Expr(_)),
            ParamKind::ObjectRef => matches!(value, ParamValue::ObjectRef(_)),
            ParamKind::Expression => true,
        }
    }
}

/// A declared parameter: name, kind, and whether it may be omitted.
///
/// Optional parameters may only be omitted from the tail of the argument
/// list — there is no named-argument syntax in event sheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub optional: bool,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: true,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Bound values
// ══════════════════════════════════════════════════════════════════════════════

/// A parameter value bound to an instruction instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    /// `42`, `3.14`
    Number(f64),
    /// `"Player won"`
    Str(String),
    /// A variable or object reference, emitted as an identifier.
    ObjectRef(String),
    /// A sub-expression tree.
    Expr(Expression),
}

/// An expression tree bound as a parameter.
///
/// `Call` nodes resolve against the registry's *expression* namespace at
/// generation time, exactly like conditions and actions resolve against
/// theirs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    NumberLit(f64),
    StringLit(String),
    /// A variable or object reference.
    Reference(String),
    /// `left op right`
    Binary {
        op: BinOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// An expression-instruction call: `Random(6)`, `TimeDelta()`.
    Call {
        extension_id: String,
        name: String,
        args: Vec<Expression>,
    },
}

impl Expression {
    fn detach_operands(&mut self, pending: &mut Vec<Expression>) {
        match self {
            Expression::Binary { left, right, .. } => {
                pending.push(std::mem::replace(left.as_mut(), Expression::NumberLit(0.0)));
                pending.push(std::mem::replace(right.as_mut(), Expression::NumberLit(0.0)));
            }
            Expression::Call { args, .. } => pending.append(args),
            _ => {}
        }
    }
}

/// `Binary` and `Call` nodes nest to arbitrary depth, so the derived
/// recursive drop could exhaust the stack on a hostile tree. Tear the
/// operands down iteratively instead.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_operands(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_operands(&mut pending);
        }
    }
}

/// Binary arithmetic operators available in parameter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// Returns the operator symbol as emitted in generated code.
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Instances
// ══════════════════════════════════════════════════════════════════════════════

/// One condition or action as placed in an event, referencing its
/// descriptor by `(extension_id, name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionInstance {
    pub extension_id: String,
    pub name: String,
    pub params: Vec<ParamValue>,
    /// Invert the outcome of a condition. Meaningless on actions, where
    /// the generator leaves it unread.
    #[serde(default)]
    pub inverted: bool,
}

impl InstructionInstance {
    pub fn new(extension_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            extension_id: extension_id.into(),
            name: name.into(),
            params: Vec::new(),
            inverted: false,
        }
    }

    /// Append a bound parameter value.
    pub fn with_param(mut self, value: ParamValue) -> Self {
        self.params.push(value);
        self
    }

    /// Mark a condition as inverted.
    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_kind_accepts() {
        let num = ParamValue::Number(1.0);
        let s = ParamValue::Str("x".into());
        let obj = ParamValue::ObjectRef("Hero".into());
        let expr = ParamValue::Expr(Expression::NumberLit(2.0));

        assert!(ParamKind::Number.accepts(&num));
        assert!(ParamKind::Number.accepts(&expr));
        assert!(!ParamKind::Number.accepts(&s));
        assert!(!ParamKind::Number.accepts(&obj));

        assert!(ParamKind::String.accepts(&s));
        assert!(ParamKind::String.accepts(&expr));
        assert!(!ParamKind::String.accepts(&num));

        assert!(ParamKind::ObjectRef.accepts(&obj));
        assert!(!ParamKind::ObjectRef.accepts(&num));

        assert!(ParamKind::Expression.accepts(&num));
        assert!(ParamKind::Expression.accepts(&s));
        assert!(ParamKind::Expression.accepts(&obj));
        assert!(ParamKind::Expression.accepts(&expr));
    }

    #[test]
    fn test_deep_expression_chain_drops_without_overflow() {
        let mut expr = Expression::NumberLit(0.0);
        for _ in 0..200_000 {
            expr = Expression::Binary {
                op: BinOp::Add,
                left: Box::new(expr),
                right: Box::new(Expression::NumberLit(1.0)),
            };
        }
        drop(expr);
    }

    #[test]
    fn test_instance_builder() {
        let inst = InstructionInstance::new("BuiltinAdvanced", "Always")
            .with_param(ParamValue::Number(3.0))
            .inverted();
        assert_eq!(inst.extension_id, "BuiltinAdvanced");
        assert_eq!(inst.params.len(), 1);
        assert!(inst.inverted);
    }

    #[test]
    fn test_instance_serde_inverted_defaults_false() {
        let json = r#"{"extension_id":"E","name":"N","params":[]}"#;
        let inst: InstructionInstance = serde_json::from_str(json).unwrap();
        assert!(!inst.inverted);
    }
}
