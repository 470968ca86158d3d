//! Upfront validation of a tree against the registry.
//!
//! Every instruction reference — conditions, actions, and the expression
//! trees inside parameters — is resolved before any text is emitted, so
//! errors surface at generation entry rather than deep inside the
//! recursive walk, and no partial source is ever produced.

use ludic_registry::{InstructionDescriptor, Registry};
use ludic_types::{
    EventKind, EventTree, Expression, InstructionInstance, InstructionKind, ParamKind, TreeLimits,
};

use crate::error::{CodegenError, CodegenResult};

/// Validate the whole tree for the given backend.
pub(crate) fn validate_tree(
    tree: &EventTree,
    registry: &Registry,
    backend: &str,
    limits: &TreeLimits,
) -> CodegenResult<()> {
    check_limits(tree, limits)?;

    for (node, _) in tree.walk() {
        for condition in &node.conditions {
            validate_instance(registry, backend, condition, InstructionKind::Condition, limits)?;
        }
        for action in &node.actions {
            validate_instance(registry, backend, action, InstructionKind::Action, limits)?;
        }
        if let EventKind::Loop { count } = &node.kind {
            validate_expression(registry, backend, count, limits, 1)?;
        }
    }
    Ok(())
}

fn check_limits(tree: &EventTree, limits: &TreeLimits) -> CodegenResult<()> {
    let nodes = tree.node_count();
    if nodes > limits.max_nodes {
        return Err(CodegenError::TreeTooLarge(format!(
            "{nodes} nodes exceeds the limit of {}",
            limits.max_nodes
        )));
    }
    let depth = tree.max_depth();
    if depth > limits.max_depth {
        return Err(CodegenError::TreeTooLarge(format!(
            "depth {depth} exceeds the limit of {}",
            limits.max_depth
        )));
    }
    Ok(())
}

fn validate_instance(
    registry: &Registry,
    backend: &str,
    instance: &InstructionInstance,
    kind: InstructionKind,
    limits: &TreeLimits,
) -> CodegenResult<()> {
    let descriptor = registry.lookup(&instance.extension_id, &instance.name, kind)?;
    require_binding(descriptor, backend, &instance.extension_id, kind)?;

    let found = instance.params.len();
    let required = descriptor.required_params();
    let total = descriptor.params.len();
    if found < required || found > total {
        return Err(mismatch(
            instance,
            kind,
            if required == total {
                format!("expected {required} argument(s), found {found}")
            } else {
                format!("expected {required} to {total} argument(s), found {found}")
            },
        ));
    }

    for (spec, value) in descriptor.params.iter().zip(&instance.params) {
        if !spec.kind.accepts(value) {
            return Err(mismatch(
                instance,
                kind,
                format!("argument '{}' does not accept the bound value", spec.name),
            ));
        }
        if let ludic_types::ParamValue::Expr(expr) = value {
            validate_expression(registry, backend, expr, limits, 1)?;
        }
    }
    Ok(())
}

/// Recursion is bounded by the depth check at entry, so a hostile
/// expression chain errors out instead of exhausting the stack.
fn validate_expression(
    registry: &Registry,
    backend: &str,
    expr: &Expression,
    limits: &TreeLimits,
    depth: usize,
) -> CodegenResult<()> {
    if depth > limits.max_expression_depth {
        return Err(CodegenError::TreeTooLarge(format!(
            "expression nesting exceeds the limit of {}",
            limits.max_expression_depth
        )));
    }
    match expr {
        Expression::NumberLit(_) | Expression::StringLit(_) | Expression::Reference(_) => Ok(()),
        Expression::Binary { left, right, .. } => {
            validate_expression(registry, backend, left, limits, depth + 1)?;
            validate_expression(registry, backend, right, limits, depth + 1)
        }
        Expression::Call {
            extension_id,
            name,
            args,
        } => {
            let kind = InstructionKind::Expression;
            let descriptor = registry.lookup(extension_id, name, kind)?;
            require_binding(descriptor, backend, extension_id, kind)?;

            let found = args.len();
            let required = descriptor.required_params();
            let total = descriptor.params.len();
            if found < required || found > total {
                return Err(CodegenError::ParameterMismatch {
                    extension: extension_id.clone(),
                    name: name.clone(),
                    kind,
                    detail: format!("expected {required} argument(s), found {found}"),
                });
            }
            for (spec, arg) in descriptor.params.iter().zip(args) {
                // Inside an expression tree only references can satisfy an
                // object parameter; everything else is expression-valued.
                if spec.kind == ParamKind::ObjectRef
                    && !matches!(arg, Expression::Reference(_))
                {
                    return Err(CodegenError::ParameterMismatch {
                        extension: extension_id.clone(),
                        name: name.clone(),
                        kind,
                        detail: format!("argument '{}' expects an object reference", spec.name),
                    });
                }
                validate_expression(registry, backend, arg, limits, depth + 1)?;
            }
            Ok(())
        }
    }
}

fn require_binding(
    descriptor: &InstructionDescriptor,
    backend: &str,
    extension: &str,
    kind: InstructionKind,
) -> CodegenResult<()> {
    if descriptor.has_backend(backend) {
        Ok(())
    } else {
        Err(CodegenError::MissingBackendBinding {
            extension: extension.to_string(),
            name: descriptor.name.clone(),
            kind,
            backend: backend.to_string(),
        })
    }
}

fn mismatch(instance: &InstructionInstance, kind: InstructionKind, detail: String) -> CodegenError {
    CodegenError::ParameterMismatch {
        extension: instance.extension_id.clone(),
        name: instance.name.clone(),
        kind,
        detail,
    }
}
