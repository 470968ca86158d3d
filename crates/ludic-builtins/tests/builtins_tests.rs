//! Integration tests for the built-in extension catalog.

use ludic_builtins::{advanced_extension, common_extension, register_builtins};
use ludic_codegen::{generate, CppTarget, JsTarget};
use ludic_registry::{Binding, Registry};
use ludic_types::{
    EventNode, EventTree, InstructionInstance, InstructionKind, ParamValue,
};

fn registry() -> Registry {
    let mut reg = Registry::new();
    register_builtins(&mut reg).unwrap();
    reg
}

#[test]
fn registration_is_repeatable() {
    let mut reg = registry();
    // A second plugin-initialization pass must be a no-op.
    register_builtins(&mut reg).unwrap();
    assert_eq!(reg.len(), 2);
}

#[test]
fn every_builtin_is_bound_for_both_backends() {
    let reg = registry();
    for ext in [common_extension(), advanced_extension()] {
        for kind in [
            InstructionKind::Condition,
            InstructionKind::Action,
            InstructionKind::Expression,
        ] {
            for descriptor in ext.namespace(kind).iter() {
                let registered = reg.lookup(&ext.id, &descriptor.name, kind).unwrap();
                assert!(
                    registered.has_backend("js") && registered.has_backend("cpp"),
                    "{}.{} must be bound for js and cpp",
                    ext.id,
                    descriptor.name
                );
            }
        }
    }
}

#[test]
fn always_guarding_wait_generates_the_expected_js() {
    let reg = registry();
    let tree = EventTree::new(vec![EventNode::standard()
        .with_condition(InstructionInstance::new("BuiltinAdvanced", "Always"))
        .with_action(
            InstructionInstance::new("BuiltinCommon", "Wait").with_param(ParamValue::Number(1.0)),
        )]);
    let out = generate(&tree, &reg, &JsTarget::new()).unwrap();

    assert!(out
        .source
        .contains("cond0_0 = gdjs.evtTools.common.returnFalse();"));
    assert!(out.source.contains("gdjs.evtTools.runtime.wait(1);"));
    assert_eq!(out.support_files, vec!["commontools.js", "runtimetools.js"]);
}

#[test]
fn builtins_generate_for_the_native_backend_too() {
    let reg = registry();
    let tree = EventTree::new(vec![EventNode::standard()
        .with_condition(InstructionInstance::new("BuiltinAdvanced", "Always"))
        .with_action(
            InstructionInstance::new("BuiltinCommon", "ChangeScene")
                .with_param(ParamValue::Str("Menu".into())),
        )]);
    let out = generate(&tree, &reg, &CppTarget::new()).unwrap();

    assert!(out.source.contains("cond0_0 = ReturnFalse();"));
    assert!(out.source.contains("ChangeScene(\"Menu\");"));
    assert_eq!(out.support_files, vec!["CommonTools.h", "SceneTools.h"]);
}

#[test]
fn timer_optional_parameter() {
    let reg = registry();
    let one_arg = EventTree::new(vec![EventNode::standard().with_condition(
        InstructionInstance::new("BuiltinCommon", "Timer").with_param(ParamValue::Number(5.0)),
    )]);
    let two_args = EventTree::new(vec![EventNode::standard().with_condition(
        InstructionInstance::new("BuiltinCommon", "Timer")
            .with_param(ParamValue::Number(5.0))
            .with_param(ParamValue::Str("spawn".into())),
    )]);
    assert!(generate(&one_arg, &reg, &JsTarget::new()).is_ok());
    let out = generate(&two_args, &reg, &JsTarget::new()).unwrap();
    assert!(out
        .source
        .contains("gdjs.evtTools.runtime.timerElapsed(5, \"spawn\")"));
}

#[test]
fn next_generation_platform_reuses_builtins_via_clone() {
    let mut reg = registry();
    let clone = reg
        .clone_extension("BuiltinAdvanced", "BuiltinAdvanced2")
        .unwrap();
    clone.condition_mut("Always").unwrap().set_binding(
        "js",
        Binding::new("runtime2.logic.returnFalse").with_support_file("logictools.js"),
    );

    let tree = EventTree::new(vec![EventNode::standard()
        .with_condition(InstructionInstance::new("BuiltinAdvanced2", "Always"))]);
    let out = generate(&tree, &reg, &JsTarget::new()).unwrap();
    assert!(out.source.contains("runtime2.logic.returnFalse()"));
    assert_eq!(out.support_files, vec!["logictools.js"]);
}
