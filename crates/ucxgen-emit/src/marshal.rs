//! Managed-side type mapping and per-parameter marshaling.

use ucxgen_parse::classify::is_string_input;
use ucxgen_parse::{ApiConventions, Function, ParamRole};

/// A managed type produced from a native base type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedType {
    pub name: String,
    /// False when the native name was passed through unmapped.
    pub mapped: bool,
}

impl ManagedType {
    pub fn is_bool(&self) -> bool {
        self.mapped && self.name == "bool"
    }
}

/// How one native parameter crosses into the managed declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarshalStrategy {
    /// Not declared: the protocol handle.
    Omitted,
    /// Length of a linked byte array. Hidden from the public method and
    /// filled from the array's own length.
    ArrayLength { array: String, ty: ManagedType },
    /// Null-terminated narrow string.
    NarrowString,
    /// Opaque address, no structure layout projection.
    OpaquePointer,
    /// Explicit out-parameter of a scalar type.
    Out(ManagedType),
    /// Managed byte buffer.
    ByteBuffer,
    /// Scalar passed by value.
    Direct(ManagedType),
}

/// Map a native base type through the fixed scalar table.
///
/// Anything outside the table passes through by name with `mapped == false`.
pub fn managed_type(base_type: &str) -> ManagedType {
    let mapped = match base_type.trim() {
        "int32_t" => Some("int"),
        "uint32_t" => Some("uint"),
        "int16_t" => Some("short"),
        "uint16_t" => Some("ushort"),
        "int8_t" => Some("sbyte"),
        "uint8_t" => Some("byte"),
        "bool" => Some("bool"),
        "char" => Some("byte"),
        "void" => Some("void"),
        _ => None,
    };
    match mapped {
        Some(name) => ManagedType {
            name: name.to_string(),
            mapped: true,
        },
        None => ManagedType {
            name: base_type.trim().to_string(),
            mapped: false,
        },
    }
}

/// Select the marshaling strategy for the parameter at `index` of `func`.
pub fn select_strategy(func: &Function, index: usize, conv: &ApiConventions) -> MarshalStrategy {
    let param = &func.params[index];
    if param.is_handle {
        return MarshalStrategy::Omitted;
    }
    match param.role {
        ParamRole::InputPointer if is_string_input(param, conv) => MarshalStrategy::NarrowString,
        ParamRole::InputPointer => MarshalStrategy::OpaquePointer,
        ParamRole::OutputPointer => MarshalStrategy::Out(managed_type(&param.base_type)),
        ParamRole::ByteArray => MarshalStrategy::ByteBuffer,
        ParamRole::Value => match func.array_for_companion(index) {
            Some(array) => MarshalStrategy::ArrayLength {
                array: array.name.clone(),
                ty: managed_type(&param.base_type),
            },
            None => MarshalStrategy::Direct(managed_type(&param.base_type)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucxgen_parse::{Module, ModelBuilder};

    fn parse_one(proto: &str) -> Function {
        let mut builder = ModelBuilder::new(&ApiConventions::default()).unwrap();
        builder
            .add_header_text(proto, "u_cx_test.h", &Module::new("test"))
            .unwrap();
        builder.finish().functions.remove(0)
    }

    fn strategies(proto: &str) -> Vec<MarshalStrategy> {
        let func = parse_one(proto);
        let conv = ApiConventions::default();
        (0..func.params.len())
            .map(|i| select_strategy(&func, i, &conv))
            .collect()
    }

    #[test]
    fn scalar_table() {
        assert_eq!(managed_type("int32_t").name, "int");
        assert_eq!(managed_type("uint16_t").name, "ushort");
        assert_eq!(managed_type("int8_t").name, "sbyte");
        assert_eq!(managed_type("char").name, "byte");
        assert!(managed_type("bool").is_bool());
    }

    #[test]
    fn unknown_types_pass_through() {
        let ty = managed_type("uWifiSecurity_t");
        assert_eq!(ty.name, "uWifiSecurity_t");
        assert!(!ty.mapped);
    }

    #[test]
    fn strategies_by_role() {
        let got = strategies(
            "int32_t uCxTestAll(uCxHandle_t * puCxHandle, const char * pName, const uAddr_t * pAddr, int32_t * pOut, int32_t value);",
        );
        assert_eq!(
            got,
            vec![
                MarshalStrategy::Omitted,
                MarshalStrategy::NarrowString,
                MarshalStrategy::OpaquePointer,
                MarshalStrategy::Out(managed_type("int32_t")),
                MarshalStrategy::Direct(managed_type("int32_t")),
            ]
        );
    }

    #[test]
    fn linked_length_filled_from_array() {
        let got = strategies(
            "int32_t uCxTestWrite(uCxHandle_t * puCxHandle, uint8_t * buf, int32_t buf_len, int32_t flags);",
        );
        assert_eq!(got[1], MarshalStrategy::ByteBuffer);
        assert_eq!(
            got[2],
            MarshalStrategy::ArrayLength {
                array: "buf".to_string(),
                ty: managed_type("int32_t"),
            }
        );
        assert_eq!(got[3], MarshalStrategy::Direct(managed_type("int32_t")));
    }

    #[test]
    fn pointer_length_stays_an_out_parameter() {
        let got = strategies("int32_t uCxTestRead(uCxHandle_t * puCxHandle, uint8_t * buf, int32_t * buf_len);");
        assert_eq!(got[1], MarshalStrategy::ByteBuffer);
        assert_eq!(got[2], MarshalStrategy::Out(managed_type("int32_t")));
    }

    #[test]
    fn const_byte_pointer_is_opaque_input() {
        let got = strategies("int32_t uCxTestSend(uCxHandle_t * puCxHandle, const uint8_t * data, int32_t data_len);");
        assert_eq!(got[1], MarshalStrategy::OpaquePointer);
        assert_eq!(got[2], MarshalStrategy::Direct(managed_type("int32_t")));
    }
}
