//! Array-length linking.

use crate::model::{FunctionParam, ParamRole};

/// Link every byte array to the first later parameter named `<array><suffix>`.
///
/// Only by-value parameters qualify as a companion, so handles and pointers
/// are never linked, and a parameter already claimed by an earlier array is
/// not linked twice.
pub fn link_array_lengths(params: &mut [FunctionParam], suffix: &str) {
    for i in 0..params.len() {
        if params[i].role != ParamRole::ByteArray {
            continue;
        }
        let wanted = format!("{}{suffix}", params[i].name);
        let companion = (i + 1..params.len()).find(|&j| {
            params[j].name == wanted
                && params[j].role == ParamRole::Value
                && !params[j].is_handle
                && !params.iter().any(|p| p.array_length_companion == Some(j))
        });
        params[i].array_length_companion = companion;
    }
}
