//! Integration tests for the extension registry.
//!
//! Tests validate:
//! - Lookup totality: every registered descriptor resolves by its exact
//!   triple; anything else fails with a structured error
//! - Duplicate registration: idempotent for identical content, fatal
//!   otherwise
//! - Clone fidelity and override-after-clone isolation
//! - Registration-order diagnostics

use ludic_registry::{Binding, Extension, InstructionDescriptor, Registry, RegistryError};
use ludic_types::{InstructionKind, ParamKind};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

/// The BuiltinAdvanced extension as the script-platform loader declares it.
fn advanced() -> Extension {
    Extension::new("BuiltinAdvanced")
        .with_information(
            "Advanced control features",
            "Built-in extension providing advanced control features.",
            "Florian Rival",
            "Freeware",
        )
        .with_condition(
            InstructionDescriptor::new("Always", "Always", "Always triggers.").with_binding(
                "js",
                Binding::new("gdjs.evtTools.common.returnFalse")
                    .with_support_file("commontools.js"),
            ),
        )
}

fn common() -> Extension {
    Extension::new("BuiltinCommon")
        .with_action(
            InstructionDescriptor::new("Wait", "Wait", "Pause the event sheet.")
                .with_param("seconds", ParamKind::Number)
                .with_binding(
                    "js",
                    Binding::new("gdjs.evtTools.runtime.wait").with_support_file("runtimetools.js"),
                ),
        )
        .with_expression(
            InstructionDescriptor::new("Random", "Random value", "")
                .with_param("max", ParamKind::Number)
                .with_binding(
                    "js",
                    Binding::new("gdjs.random").with_support_file("commontools.js"),
                ),
        )
}

// ══════════════════════════════════════════════════════════════════════════════
// Lookup totality
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn registered_descriptor_resolves_by_exact_triple() {
    let mut reg = Registry::new();
    reg.register(advanced()).unwrap();
    reg.register(common()).unwrap();

    let d = reg
        .lookup("BuiltinAdvanced", "Always", InstructionKind::Condition)
        .unwrap();
    assert_eq!(
        d.binding("js").unwrap().function_name,
        "gdjs.evtTools.common.returnFalse"
    );

    let d = reg
        .lookup("BuiltinCommon", "Random", InstructionKind::Expression)
        .unwrap();
    assert_eq!(d.binding("js").unwrap().function_name, "gdjs.random");
}

#[test]
fn lookup_wrong_kind_is_unknown_instruction() {
    let mut reg = Registry::new();
    reg.register(advanced()).unwrap();

    let err = reg
        .lookup("BuiltinAdvanced", "Always", InstructionKind::Action)
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::UnknownInstruction {
            extension: "BuiltinAdvanced".into(),
            name: "Always".into(),
            kind: InstructionKind::Action,
        }
    );
}

#[test]
fn lookup_unknown_extension() {
    let reg = Registry::new();
    let err = reg
        .lookup("Nope", "Always", InstructionKind::Condition)
        .unwrap_err();
    assert_eq!(err, RegistryError::UnknownExtension { id: "Nope".into() });
}

#[test]
fn lookup_unknown_name() {
    let mut reg = Registry::new();
    reg.register(advanced()).unwrap();
    let err = reg
        .lookup("BuiltinAdvanced", "DoesNotExist", InstructionKind::Condition)
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownInstruction { .. }));
}

// ══════════════════════════════════════════════════════════════════════════════
// Duplicate registration
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn identical_reregistration_is_idempotent() {
    let mut reg = Registry::new();
    reg.register(advanced()).unwrap();
    reg.register(advanced()).unwrap();
    assert_eq!(reg.len(), 1);
}

#[test]
fn conflicting_reregistration_fails() {
    let mut reg = Registry::new();
    reg.register(advanced()).unwrap();

    let conflicting = Extension::new("BuiltinAdvanced").with_condition(
        InstructionDescriptor::new("Always", "Always", "Always triggers.")
            .with_binding("js", Binding::new("somethingElse")),
    );
    let err = reg.register(conflicting).unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateExtension {
            id: "BuiltinAdvanced".into()
        }
    );
    // The original content survives.
    let d = reg
        .lookup("BuiltinAdvanced", "Always", InstructionKind::Condition)
        .unwrap();
    assert_eq!(
        d.binding("js").unwrap().function_name,
        "gdjs.evtTools.common.returnFalse"
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Cloning
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn clone_copies_every_descriptor() {
    let mut reg = Registry::new();
    reg.register(common()).unwrap();
    reg.clone_extension("BuiltinCommon", "CommonV2").unwrap();

    for (name, kind) in [
        ("Wait", InstructionKind::Action),
        ("Random", InstructionKind::Expression),
    ] {
        let source = reg.lookup("BuiltinCommon", name, kind).unwrap();
        let clone = reg.lookup("CommonV2", name, kind).unwrap();
        assert_eq!(source.params, clone.params);
        assert_eq!(source.bindings, clone.bindings);
    }
}

#[test]
fn clone_of_unknown_source_fails() {
    let mut reg = Registry::new();
    let err = reg.clone_extension("Missing", "New").unwrap_err();
    assert_eq!(err, RegistryError::UnknownExtension { id: "Missing".into() });
}

#[test]
fn self_clone_is_a_noop() {
    let mut reg = Registry::new();
    reg.register(advanced()).unwrap();
    let before = reg.extension("BuiltinAdvanced").unwrap().clone();

    reg.clone_extension("BuiltinAdvanced", "BuiltinAdvanced")
        .unwrap();
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.extension("BuiltinAdvanced").unwrap(), &before);
}

#[test]
fn clone_onto_existing_id_fails() {
    let mut reg = Registry::new();
    reg.register(advanced()).unwrap();
    reg.register(common()).unwrap();
    let err = reg
        .clone_extension("BuiltinCommon", "BuiltinAdvanced")
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateExtension { .. }));
}

#[test]
fn override_after_clone_does_not_touch_source() {
    let mut reg = Registry::new();
    reg.register(advanced()).unwrap();

    // Generation-2 platform: same semantics, new support files.
    let clone = reg.clone_extension("BuiltinAdvanced", "AdvancedV2").unwrap();
    clone
        .condition_mut("Always")
        .unwrap()
        .set_binding(
            "js",
            Binding::new("runtime.logic.returnFalse").with_support_file("logictools.js"),
        );

    let v2 = reg
        .lookup("AdvancedV2", "Always", InstructionKind::Condition)
        .unwrap();
    assert_eq!(v2.binding("js").unwrap().function_name, "runtime.logic.returnFalse");

    let v1 = reg
        .lookup("BuiltinAdvanced", "Always", InstructionKind::Condition)
        .unwrap();
    assert_eq!(
        v1.binding("js").unwrap().function_name,
        "gdjs.evtTools.common.returnFalse"
    );
}

#[test]
fn later_loader_adds_second_backend() {
    let mut reg = Registry::new();
    reg.register(advanced()).unwrap();

    // The native loader runs after the script loader.
    reg.extension_mut("BuiltinAdvanced")
        .unwrap()
        .condition_mut("Always")
        .unwrap()
        .set_binding("cpp", Binding::new("ReturnFalse").with_support_file("CommonTools.h"));

    let d = reg
        .lookup("BuiltinAdvanced", "Always", InstructionKind::Condition)
        .unwrap();
    assert!(d.has_backend("js"));
    assert!(d.has_backend("cpp"));
}

// ══════════════════════════════════════════════════════════════════════════════
// Diagnostics
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn iteration_follows_registration_order() {
    let mut reg = Registry::new();
    reg.register(common()).unwrap();
    reg.register(advanced()).unwrap();
    reg.clone_extension("BuiltinCommon", "CommonV2").unwrap();

    let ids: Vec<&str> = reg.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["BuiltinCommon", "BuiltinAdvanced", "CommonV2"]);
}

#[test]
fn frozen_registry_is_shareable() {
    let mut reg = Registry::new();
    reg.register(advanced()).unwrap();
    let reg = reg.freeze();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let reg = reg.clone();
            std::thread::spawn(move || {
                reg.lookup("BuiltinAdvanced", "Always", InstructionKind::Condition)
                    .map(|d| d.binding("js").unwrap().function_name.clone())
            })
        })
        .collect();
    for h in handles {
        assert_eq!(
            h.join().unwrap().unwrap(),
            "gdjs.evtTools.common.returnFalse"
        );
    }
}
