//! Parameter role classification.

use crate::conventions::ApiConventions;
use crate::csig::ParamShape;
use crate::model::{FunctionParam, ParamRole};

/// Assign a role to a parsed parameter shape. First matching rule wins:
///
/// 1. handle type or handle name → handle, treated as an opaque input
/// 2. `const` pointer → [`ParamRole::InputPointer`]
/// 3. non-const single pointer to the byte type → [`ParamRole::ByteArray`]
/// 4. any other pointer → [`ParamRole::OutputPointer`]
/// 5. otherwise → [`ParamRole::Value`]
pub fn classify(shape: &ParamShape, conv: &ApiConventions) -> FunctionParam {
    let is_pointer = shape.indirection > 0;
    let is_handle = conv.is_handle_type(&shape.base_type) || shape.name == conv.handle_param;

    let role = if is_handle {
        ParamRole::InputPointer
    } else if shape.is_const && is_pointer {
        ParamRole::InputPointer
    } else if shape.indirection == 1 && shape.base_type == conv.byte_type {
        ParamRole::ByteArray
    } else if is_pointer {
        ParamRole::OutputPointer
    } else {
        ParamRole::Value
    };

    FunctionParam {
        name: shape.name.clone(),
        declared_type: shape.declared_type.clone(),
        base_type: shape.base_type.clone(),
        indirection: shape.indirection,
        is_const: shape.is_const,
        role,
        is_handle,
        array_length_companion: None,
    }
}

/// Whether an input pointer is a C string rather than an opaque read-only address.
pub fn is_string_input(param: &FunctionParam, conv: &ApiConventions) -> bool {
    param.role == ParamRole::InputPointer && !param.is_handle && conv.is_string_char(&param.base_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csig::parse_param;

    fn role_of(fragment: &str) -> FunctionParam {
        classify(&parse_param(fragment).unwrap(), &ApiConventions::default())
    }

    #[test]
    fn handle_by_type_and_by_name() {
        let p = role_of("uCxHandle_t * puCxHandle");
        assert!(p.is_handle);
        assert_eq!(p.role, ParamRole::InputPointer);

        let p = role_of("void * puCxHandle");
        assert!(p.is_handle);

        let p = role_of("uCxHandle_t * pOther");
        assert!(p.is_handle);
    }

    #[test]
    fn const_pointers_are_inputs() {
        let p = role_of("const char * pSsid");
        assert_eq!(p.role, ParamRole::InputPointer);
        assert!(is_string_input(&p, &ApiConventions::default()));

        let p = role_of("const uSockIpAddress_t * pAddr");
        assert_eq!(p.role, ParamRole::InputPointer);
        assert!(!is_string_input(&p, &ApiConventions::default()));
    }

    #[test]
    fn const_byte_pointer_is_input_not_array() {
        let p = role_of("const uint8_t * data");
        assert_eq!(p.role, ParamRole::InputPointer);
        assert!(!p.is_handle);
    }

    #[test]
    fn mutable_byte_pointer_is_array_not_output() {
        let p = role_of("uint8_t * buf");
        assert_eq!(p.role, ParamRole::ByteArray);
    }

    #[test]
    fn other_pointers_are_outputs() {
        assert_eq!(role_of("int32_t * pRssi").role, ParamRole::OutputPointer);
        assert_eq!(role_of("char * pName").role, ParamRole::OutputPointer);
        assert_eq!(role_of("uint8_t ** ppData").role, ParamRole::OutputPointer);
    }

    #[test]
    fn scalars_are_values() {
        assert_eq!(role_of("int32_t timeout").role, ParamRole::Value);
        assert_eq!(role_of("bool enable").role, ParamRole::Value);
        assert_eq!(role_of("uWifiSecurity_t security").role, ParamRole::Value);
        assert_eq!(role_of("uint8_t channel").role, ParamRole::Value);
    }

    #[test]
    fn handle_never_byte_array() {
        let conv = ApiConventions {
            handle_type: "uint8_t".to_string(),
            ..Default::default()
        };
        let p = classify(&parse_param("uint8_t * h").unwrap(), &conv);
        assert!(p.is_handle);
        assert_ne!(p.role, ParamRole::ByteArray);
    }
}
