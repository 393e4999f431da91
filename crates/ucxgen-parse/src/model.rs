//! The parsed API model.
//!
//! Every entity is built once by the parser and only read afterwards; the
//! emitters receive an [`ApiModel`] by shared reference.

use serde::Serialize;

/// Logical grouping derived from a header's file name (`u_cx_wifi.h` → `wifi`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Module(String);

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Title-cased spelling with underscores removed (`socket_tcp` → `SocketTcp`),
    /// the way module names appear inside function names.
    pub fn capitalized(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut prev_alpha = false;
        for c in self.0.chars() {
            if c.is_alphabetic() {
                if prev_alpha {
                    out.extend(c.to_lowercase());
                } else {
                    out.extend(c.to_uppercase());
                }
                prev_alpha = true;
            } else {
                if c != '_' {
                    out.push(c);
                }
                prev_alpha = false;
            }
        }
        out
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Return type of a prototype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnType {
    Void,
    Bool,
    Int32,
    /// Any other accepted return type, kept verbatim.
    Other(String),
}

impl ReturnType {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "void" => Self::Void,
            "bool" => Self::Bool,
            "int32_t" => Self::Int32,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Value a wrapper returns when it refuses to call through.
    /// `None` for `void`.
    pub fn failure_sentinel(&self) -> Option<&'static str> {
        match self {
            Self::Void => None,
            Self::Bool => Some("false"),
            Self::Int32 => Some("-1"),
            Self::Other(_) => Some("0"),
        }
    }
}

impl std::fmt::Display for ReturnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Bool => write!(f, "bool"),
            Self::Int32 => write!(f, "int32_t"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Semantic role of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamRole {
    /// Passed by value: integers, booleans, enumerations.
    Value,
    /// Pointer the callee writes a result through.
    OutputPointer,
    /// Read-only pointer: C strings and const structures.
    InputPointer,
    /// Writable byte buffer, usually followed by a `<name>_len` companion.
    ByteArray,
}

impl std::fmt::Display for ParamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value => write!(f, "value"),
            Self::OutputPointer => write!(f, "output-pointer"),
            Self::InputPointer => write!(f, "input-pointer"),
            Self::ByteArray => write!(f, "byte-array"),
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionParam {
    pub name: String,
    /// Type text as declared, with the identifier removed (`const char *`).
    pub declared_type: String,
    /// Declared type without `const` and `*` (`char`).
    pub base_type: String,
    /// Number of `*` in the declared type.
    pub indirection: usize,
    pub is_const: bool,
    pub role: ParamRole,
    /// Whether this parameter carries the shared protocol handle.
    pub is_handle: bool,
    /// Index, within the same parameter list, of the parameter holding this
    /// array's length.
    pub array_length_companion: Option<usize>,
}

impl FunctionParam {
    pub fn is_pointer(&self) -> bool {
        self.indirection > 0
    }
}

/// One parsed prototype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: String,
    pub return_type: ReturnType,
    /// Parameters in declaration order.
    pub params: Vec<FunctionParam>,
    pub module: Module,
    /// File name of the header the prototype was found in.
    pub header: String,
    pub is_begin: bool,
    pub is_get_next: bool,
}

impl Function {
    /// Whether the parameter at `index` is the length companion of some array.
    pub fn is_length_companion(&self, index: usize) -> bool {
        self.params
            .iter()
            .any(|p| p.array_length_companion == Some(index))
    }

    /// The array parameter whose length lives at `index`, if any.
    pub fn array_for_companion(&self, index: usize) -> Option<&FunctionParam> {
        self.params
            .iter()
            .find(|p| p.array_length_companion == Some(index))
    }

    /// Parameters other than the protocol handle, in declaration order.
    pub fn non_handle_params(&self) -> impl Iterator<Item = (usize, &FunctionParam)> {
        self.params.iter().enumerate().filter(|(_, p)| !p.is_handle)
    }

    pub fn has_handle_param(&self) -> bool {
        self.params.iter().any(|p| p.is_handle)
    }
}

/// One callback-registration prototype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrcCallback {
    pub register_function: String,
    /// Registration name with the vendor prefix and the register marker removed.
    pub event_name: String,
    pub module: Module,
    /// Type text of the callback argument, not parsed further.
    pub callback_type: String,
}

/// Everything parsed from one header directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiModel {
    /// Functions, grouped by module in sorted module order, then in
    /// declaration order.
    pub functions: Vec<Function>,
    pub callbacks: Vec<UrcCallback>,
}

impl ApiModel {
    /// Modules that contributed at least one function, sorted.
    pub fn modules(&self) -> Vec<&Module> {
        let mut modules: Vec<&Module> = self.functions.iter().map(|f| &f.module).collect();
        modules.sort();
        modules.dedup();
        modules
    }

    /// Functions of one module in declaration order.
    pub fn functions_in<'a>(&'a self, module: &'a Module) -> impl Iterator<Item = &'a Function> {
        self.functions.iter().filter(move |f| &f.module == module)
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Header file name of a module, taken from its first function.
    pub fn header_of(&self, module: &Module) -> Option<&str> {
        self.functions
            .iter()
            .find(|f| &f.module == module)
            .map(|f| f.header.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalized_module_names() {
        assert_eq!(Module::new("wifi").capitalized(), "Wifi");
        assert_eq!(Module::new("socket_tcp").capitalized(), "SocketTcp");
        assert_eq!(Module::new("bluetooth").capitalized(), "Bluetooth");
        assert_eq!(Module::new("gatt_client").capitalized(), "GattClient");
    }

    #[test]
    fn return_type_sentinels() {
        assert_eq!(ReturnType::parse("void").failure_sentinel(), None);
        assert_eq!(ReturnType::parse("bool").failure_sentinel(), Some("false"));
        assert_eq!(ReturnType::parse("int32_t").failure_sentinel(), Some("-1"));
        assert_eq!(ReturnType::parse("uint16_t").failure_sentinel(), Some("0"));
        assert_eq!(ReturnType::parse("uint16_t").to_string(), "uint16_t");
    }

    #[test]
    fn modules_sorted_and_deduplicated() {
        let func = |name: &str, module: &str| Function {
            name: name.to_string(),
            return_type: ReturnType::Void,
            params: Vec::new(),
            module: Module::new(module),
            header: format!("u_cx_{module}.h"),
            is_begin: false,
            is_get_next: false,
        };
        let model = ApiModel {
            functions: vec![func("uCxWifiA", "wifi"), func("uCxSystemB", "system"), func("uCxWifiC", "wifi")],
            callbacks: Vec::new(),
        };
        let modules: Vec<&str> = model.modules().iter().map(|m| m.as_str()).collect();
        assert_eq!(modules, ["system", "wifi"]);
        let wifi = Module::new("wifi");
        let names: Vec<&str> = model.functions_in(&wifi).map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["uCxWifiA", "uCxWifiC"]);
        assert_eq!(model.header_of(&wifi), Some("u_cx_wifi.h"));
    }
}
