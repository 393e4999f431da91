//! Emitter options.
//!
//! Names baked into the generated sources. Defaults match the existing
//! `ucxclient_wrapper` native library and its managed consumer.

use serde::{Deserialize, Serialize};

/// Options for the native wrapper sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NativeOptions {
    /// Token every wrapper name starts with (`ucx_<module>_<suffix>`).
    pub wrapper_namespace: String,
    /// Type of the opaque instance every wrapper takes first.
    pub instance_type: String,
    /// Parameter name of the instance.
    pub instance_param: String,
    /// Field of the instance holding the protocol handle.
    pub handle_field: String,
    /// printf-style function used for diagnostics.
    pub diagnostic_fn: String,
    /// Hand-written header declaring the instance type.
    pub wrapper_header: String,
    /// Include path of the vendor umbrella header.
    pub vendor_umbrella_include: String,
    /// Directory prefix for per-module vendor headers.
    pub module_include_dir: String,
}

impl Default for NativeOptions {
    fn default() -> Self {
        Self {
            wrapper_namespace: "ucx".to_string(),
            instance_type: "ucx_instance_t".to_string(),
            instance_param: "inst".to_string(),
            handle_field: "cx_handle".to_string(),
            diagnostic_fn: "ucx_wrapper_printf".to_string(),
            wrapper_header: "ucxclient_wrapper.h".to_string(),
            vendor_umbrella_include: "../ucxclient/ucx_api/u_cx.h".to_string(),
            module_include_dir: "../ucxclient/ucx_api/generated/NORA-W36X".to_string(),
        }
    }
}

/// Options for the managed binding source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManagedOptions {
    pub namespace: String,
    pub class_name: String,
    /// Library name token used by every foreign-call declaration.
    pub library_name: String,
}

impl Default for ManagedOptions {
    fn default() -> Self {
        Self {
            namespace: "UcxAvaloniaApp.Services".to_string(),
            class_name: "UcxNativeGenerated".to_string(),
            library_name: "ucxclient_wrapper".to_string(),
        }
    }
}

/// File names of the three generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputNames {
    pub native_header: String,
    pub native_source: String,
    pub managed_source: String,
}

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            native_header: "ucxclient_wrapper_generated.h".to_string(),
            native_source: "ucxclient_wrapper_generated.c".to_string(),
            managed_source: "UcxNativeGenerated.cs".to_string(),
        }
    }
}

/// All emitter options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOptions {
    pub native: NativeOptions,
    pub managed: ManagedOptions,
    pub output: OutputNames,
}

/// Include-guard macro for a header file name (`ucx_gen.h` → `UCX_GEN_H`).
pub fn include_guard(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_from_default_header() {
        let names = OutputNames::default();
        assert_eq!(include_guard(&names.native_header), "UCXCLIENT_WRAPPER_GENERATED_H");
        assert_eq!(include_guard("my-gen.h"), "MY_GEN_H");
    }
}
