//! Built-in extension declarations.
//!
//! Registers the instruction sets every project can rely on, bound for
//! both the script (`js`) and native (`cpp`) backends. Informational
//! strings arrive here already localized; the catalog never sees locale
//! machinery.

use ludic_registry::{Binding, Extension, InstructionDescriptor, Registry, RegistryResult};
use ludic_types::ParamKind;

/// Register every built-in extension.
///
/// Safe to call more than once: re-registration of identical content is
/// idempotent.
pub fn register_builtins(registry: &mut Registry) -> RegistryResult<()> {
    registry.register(common_extension())?;
    registry.register(advanced_extension())?;
    Ok(())
}

// ══════════════════════════════════════════════════════════════════════════════
// BuiltinCommon
// ══════════════════════════════════════════════════════════════════════════════

/// General-purpose instructions: timing, scene control, and the stock
/// expressions.
pub fn common_extension() -> Extension {
    Extension::new("BuiltinCommon")
        .with_information(
            "Common features",
            "Built-in extension providing common features for all projects.",
            "Florian Rival",
            "Freeware",
        )
        .with_condition(
            InstructionDescriptor::new("Timer", "Timer value", "Compare a timer's elapsed time.")
                .with_param("seconds", ParamKind::Number)
                .with_optional_param("timer", ParamKind::String)
                .with_binding(
                    "js",
                    Binding::new("gdjs.evtTools.runtime.timerElapsed")
                        .with_support_file("runtimetools.js"),
                )
                .with_binding(
                    "cpp",
                    Binding::new("TimerElapsed").with_support_file("RuntimeTools.h"),
                ),
        )
        .with_action(
            InstructionDescriptor::new("Wait", "Wait", "Pause the event sheet.")
                .with_param("seconds", ParamKind::Number)
                .with_binding(
                    "js",
                    Binding::new("gdjs.evtTools.runtime.wait").with_support_file("runtimetools.js"),
                )
                .with_binding("cpp", Binding::new("Wait").with_support_file("RuntimeTools.h")),
        )
        .with_action(
            InstructionDescriptor::new("ChangeScene", "Change the scene", "Go to another scene.")
                .with_param("name", ParamKind::String)
                .with_binding(
                    "js",
                    Binding::new("gdjs.evtTools.runtime.changeScene")
                        .with_support_file("runtimetools.js"),
                )
                .with_binding(
                    "cpp",
                    Binding::new("ChangeScene").with_support_file("SceneTools.h"),
                ),
        )
        .with_expression(
            InstructionDescriptor::new("Random", "Random value", "A random integer below max.")
                .with_param("max", ParamKind::Number)
                .with_binding(
                    "js",
                    Binding::new("gdjs.random").with_support_file("commontools.js"),
                )
                .with_binding(
                    "cpp",
                    Binding::new("Random").with_support_file("CommonTools.h"),
                ),
        )
        .with_expression(
            InstructionDescriptor::new("TimeDelta", "Elapsed time", "Seconds since last frame.")
                .with_binding(
                    "js",
                    Binding::new("gdjs.evtTools.runtime.timeDelta")
                        .with_support_file("runtimetools.js"),
                )
                .with_binding(
                    "cpp",
                    Binding::new("GetElapsedTime").with_support_file("RuntimeTools.h"),
                ),
        )
}

// ══════════════════════════════════════════════════════════════════════════════
// BuiltinAdvanced
// ══════════════════════════════════════════════════════════════════════════════

/// Advanced control features.
pub fn advanced_extension() -> Extension {
    Extension::new("BuiltinAdvanced")
        .with_information(
            "Advanced control features",
            "Built-in extension providing advanced control features.",
            "Florian Rival",
            "Freeware",
        )
        .with_condition(
            InstructionDescriptor::new("Always", "Always", "Always triggers.")
                .with_binding(
                    "js",
                    Binding::new("gdjs.evtTools.common.returnFalse")
                        .with_support_file("commontools.js"),
                )
                .with_binding(
                    "cpp",
                    Binding::new("ReturnFalse").with_support_file("CommonTools.h"),
                ),
        )
}
