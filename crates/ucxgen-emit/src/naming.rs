//! Wrapper naming shared by the native and managed emitters.
//!
//! Both sides of the binding must agree on every name, so neither emitter
//! builds names on its own.

use std::collections::HashMap;

use ucxgen_parse::{ApiModel, Function};

use crate::error::{EmitError, Result};

/// Name of the wrapper for `func`: `<namespace>_<module>_<suffix>`.
///
/// The suffix is the function name without the vendor prefix and, when it
/// follows, without the module name in its capitalized spelling (compared
/// case-insensitively, so `WiFi` and `Wifi` both strip module `wifi`).
pub fn wrapper_name(func: &Function, vendor_prefix: &str, namespace: &str) -> String {
    let name = func.name.strip_prefix(vendor_prefix).unwrap_or(&func.name);
    let module_caps = func.module.capitalized();
    let suffix = match name.get(..module_caps.len()) {
        Some(head) if head.eq_ignore_ascii_case(&module_caps) && name.len() > module_caps.len() => {
            &name[module_caps.len()..]
        }
        _ => name,
    };
    format!("{namespace}_{}_{suffix}", func.module)
}

/// Check that no two functions of `model` share a wrapper name.
pub fn check_unique(model: &ApiModel, vendor_prefix: &str, namespace: &str) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for func in &model.functions {
        let wrapper = wrapper_name(func, vendor_prefix, namespace);
        if let Some(first) = seen.get(&wrapper) {
            return Err(EmitError::WrapperNameCollision {
                wrapper,
                first: first.to_string(),
                second: func.name.clone(),
            });
        }
        seen.insert(wrapper, &func.name);
    }
    Ok(())
}
