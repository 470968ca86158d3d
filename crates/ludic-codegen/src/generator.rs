//! The tree walk: event nodes to target source text.
//!
//! Evaluation-order and short-circuit semantics are the correctness
//! contract here. Conditions are evaluated in declaration order and each
//! later condition's evaluation is emitted *inside* the previous
//! condition's guard, so a failed condition leaves no call path to the
//! rest of the list or to the actions. Actions are never short-circuited;
//! failures are the instruction's own business at runtime.

use ludic_registry::Registry;
use ludic_types::{
    EventKind, EventNode, EventTree, InstructionInstance, InstructionKind, TreeLimits,
};
use serde::{Deserialize, Serialize};

use crate::error::CodegenResult;
use crate::expr::{emit_expression, emit_instruction_call};
use crate::manifest::SupportManifest;
use crate::target::Target;
use crate::validate::validate_tree;
use crate::writer::SourceWriter;

/// The output of one generation run: target source text plus the support
/// files the external build step must assemble alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub source: String,
    pub support_files: Vec<String>,
}

/// Generate source for one event tree under default safety limits.
///
/// A pure function of its inputs: the same `(tree, backend)` pair yields
/// byte-identical output, and nothing is mutated.
pub fn generate(
    tree: &EventTree,
    registry: &Registry,
    target: &dyn Target,
) -> CodegenResult<GeneratedCode> {
    generate_with_limits(tree, registry, target, TreeLimits::default())
}

/// Generate with caller-chosen safety limits.
pub fn generate_with_limits(
    tree: &EventTree,
    registry: &Registry,
    target: &dyn Target,
    limits: TreeLimits,
) -> CodegenResult<GeneratedCode> {
    // Resolve every reference before emitting anything, so a malformed
    // instance can never leave partial source behind.
    validate_tree(tree, registry, target.backend_id(), &limits)?;

    let mut generator = Generator::new(registry, target);
    for root in &tree.roots {
        generator.emit_node(root)?;
    }
    Ok(generator.finish())
}

/// Shared state threaded through emission.
pub(crate) struct GenCtx<'a> {
    pub registry: &'a Registry,
    pub target: &'a dyn Target,
    pub manifest: SupportManifest,
}

struct Generator<'a> {
    ctx: GenCtx<'a>,
    out: SourceWriter,
    /// Monotonic event numbering, for unique flag and loop variable names.
    next_event: usize,
}

impl<'a> Generator<'a> {
    fn new(registry: &'a Registry, target: &'a dyn Target) -> Self {
        Self {
            ctx: GenCtx {
                registry,
                target,
                manifest: SupportManifest::new(),
            },
            out: SourceWriter::new(),
            next_event: 0,
        }
    }

    fn emit_node(&mut self, node: &EventNode) -> CodegenResult<()> {
        let event = self.next_event;
        self.next_event += 1;

        match &node.kind {
            EventKind::Standard => {
                let guard = self.emit_conditions(&node.conditions, event)?;
                self.open_guard(&guard);
                self.emit_actions(&node.actions)?;
                self.emit_children(&node.children)?;
                self.close_guard(&guard);
            }
            EventKind::Branch { else_events } => {
                let guard = self.emit_conditions(&node.conditions, event)?;
                // A branch needs a single flag to hang its else on; with
                // no conditions it is always taken.
                let condition = guard.unwrap_or_else(|| self.ctx.target.bool_literal(true));
                let line = self.ctx.target.if_open(&condition);
                self.out.line(&line);
                self.out.indent();
                self.emit_actions(&node.actions)?;
                self.emit_children(&node.children)?;
                if let Some(else_events) = else_events {
                    self.out.dedent();
                    let line = self.ctx.target.else_open();
                    self.out.line(&line);
                    self.out.indent();
                    self.emit_children(else_events)?;
                }
                self.out.dedent();
                let line = self.ctx.target.block_close();
                self.out.line(&line);
            }
            EventKind::Loop { count } => {
                // Hoisted loop-invariant setup: the count expression is
                // evaluated exactly once, before the loop opens.
                let count_var = format!("repeatCount{event}");
                let index_var = format!("repeatIndex{event}");
                let count_expr = emit_expression(&mut self.ctx, count)?;
                let line = self.ctx.target.declare_count(&count_var, &count_expr);
                self.out.line(&line);
                let line = self.ctx.target.loop_open(&index_var, &count_var);
                self.out.line(&line);
                self.out.indent();
                let guard = self.emit_conditions(&node.conditions, event)?;
                self.open_guard(&guard);
                self.emit_actions(&node.actions)?;
                self.emit_children(&node.children)?;
                self.close_guard(&guard);
                self.out.dedent();
                let line = self.ctx.target.block_close();
                self.out.line(&line);
            }
        }
        Ok(())
    }

    /// Emit condition evaluation in declaration order with short-circuit
    /// AND nesting. Returns the flag gating the node's actions, or `None`
    /// when the node has no conditions.
    fn emit_conditions(
        &mut self,
        conditions: &[InstructionInstance],
        event: usize,
    ) -> CodegenResult<Option<String>> {
        if conditions.is_empty() {
            return Ok(None);
        }
        let flags: Vec<String> = (0..conditions.len())
            .map(|i| format!("cond{event}_{i}"))
            .collect();
        for flag in &flags {
            let line = self.ctx.target.declare_flag(flag);
            self.out.line(&line);
        }
        for (i, condition) in conditions.iter().enumerate() {
            if i > 0 {
                let line = self.ctx.target.if_open(&flags[i - 1]);
                self.out.line(&line);
                self.out.indent();
            }
            let call = emit_instruction_call(&mut self.ctx, condition, InstructionKind::Condition)?;
            let value = if condition.inverted {
                self.ctx.target.negate(&call)
            } else {
                call
            };
            let line = self.ctx.target.assign(&flags[i], &value);
            self.out.line(&line);
        }
        for _ in 1..conditions.len() {
            self.out.dedent();
            let line = self.ctx.target.block_close();
            self.out.line(&line);
        }
        Ok(Some(flags.last().unwrap().clone()))
    }

    /// Actions run in declaration order, un-short-circuited.
    fn emit_actions(&mut self, actions: &[InstructionInstance]) -> CodegenResult<()> {
        for action in actions {
            let call = emit_instruction_call(&mut self.ctx, action, InstructionKind::Action)?;
            let line = self.ctx.target.statement(&call);
            self.out.line(&line);
        }
        Ok(())
    }

    fn emit_children(&mut self, children: &[EventNode]) -> CodegenResult<()> {
        for child in children {
            self.emit_node(child)?;
        }
        Ok(())
    }

    fn open_guard(&mut self, guard: &Option<String>) {
        if let Some(flag) = guard {
            let line = self.ctx.target.if_open(flag);
            self.out.line(&line);
            self.out.indent();
        }
    }

    fn close_guard(&mut self, guard: &Option<String>) {
        if guard.is_some() {
            self.out.dedent();
            let line = self.ctx.target.block_close();
            self.out.line(&line);
        }
    }

    fn finish(self) -> GeneratedCode {
        let body = self.out.into_string();
        let support_files = self.ctx.manifest.into_files();
        let mut source = String::new();
        for file in &support_files {
            source.push_str(&self.ctx.target.include_line(file));
            source.push('\n');
        }
        if !support_files.is_empty() && !body.is_empty() {
            source.push('\n');
        }
        source.push_str(&body);
        GeneratedCode {
            source,
            support_files,
        }
    }
}
