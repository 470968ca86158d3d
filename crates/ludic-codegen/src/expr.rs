//! Parameter and expression emission.
//!
//! Parameters are emitted as target expressions; expression-instruction
//! calls resolve against the registry's expression namespace the same way
//! conditions and actions resolve against theirs, and contribute their
//! support files to the manifest.

use ludic_registry::Binding;
use ludic_types::{Expression, InstructionInstance, InstructionKind, ParamValue};

use crate::error::{CodegenError, CodegenResult};
use crate::generator::GenCtx;

/// Resolve an instruction reference to its binding for the active
/// backend, recording the binding's support files.
pub(crate) fn resolve_binding<'a>(
    ctx: &mut GenCtx<'a>,
    extension: &str,
    name: &str,
    kind: InstructionKind,
) -> CodegenResult<&'a Binding> {
    let descriptor = ctx.registry.lookup(extension, name, kind)?;
    let backend = ctx.target.backend_id();
    let binding = descriptor
        .binding(backend)
        .ok_or_else(|| CodegenError::MissingBackendBinding {
            extension: extension.to_string(),
            name: name.to_string(),
            kind,
            backend: backend.to_string(),
        })?;
    ctx.manifest.add_files(&binding.support_files);
    Ok(binding)
}

/// Emit the call expression for a condition or action instance.
pub(crate) fn emit_instruction_call(
    ctx: &mut GenCtx<'_>,
    instance: &InstructionInstance,
    kind: InstructionKind,
) -> CodegenResult<String> {
    let binding = resolve_binding(ctx, &instance.extension_id, &instance.name, kind)?;
    let function = ctx.target.qualify(&binding.function_name);
    let args = instance
        .params
        .iter()
        .map(|p| emit_param(ctx, p))
        .collect::<CodegenResult<Vec<_>>>()?;
    Ok(ctx.target.call_expr(&function, &args))
}

/// Emit one bound parameter value.
pub(crate) fn emit_param(ctx: &mut GenCtx<'_>, value: &ParamValue) -> CodegenResult<String> {
    match value {
        ParamValue::Number(n) => Ok(ctx.target.number_literal(*n)),
        ParamValue::Str(s) => Ok(ctx.target.string_literal(s)),
        ParamValue::ObjectRef(name) => Ok(name.clone()),
        ParamValue::Expr(expr) => emit_expression(ctx, expr),
    }
}

/// Emit a sub-expression tree.
pub(crate) fn emit_expression(ctx: &mut GenCtx<'_>, expr: &Expression) -> CodegenResult<String> {
    match expr {
        Expression::NumberLit(n) => Ok(ctx.target.number_literal(*n)),
        Expression::StringLit(s) => Ok(ctx.target.string_literal(s)),
        Expression::Reference(name) => Ok(name.clone()),
        Expression::Binary { op, left, right } => {
            let left = emit_expression(ctx, left)?;
            let right = emit_expression(ctx, right)?;
            Ok(format!("({left} {} {right})", op.as_str()))
        }
        Expression::Call {
            extension_id,
            name,
            args,
        } => {
            let binding =
                resolve_binding(ctx, extension_id, name, InstructionKind::Expression)?;
            let function = ctx.target.qualify(&binding.function_name);
            let args = args
                .iter()
                .map(|a| emit_expression(ctx, a))
                .collect::<CodegenResult<Vec<_>>>()?;
            Ok(ctx.target.call_expr(&function, &args))
        }
    }
}
