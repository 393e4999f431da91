//! Naming conventions of the wrapped C API.
//!
//! Every convention the scanner, parser and classifier rely on lives here so a
//! manifest can override it. Defaults describe the u-connectXpress headers.

use serde::{Deserialize, Serialize};

/// Conventions used to recognize headers, prototypes and parameter roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConventions {
    /// Leading token every wrapped function name starts with.
    pub vendor_prefix: String,
    /// File name prefix of per-module headers (`u_cx_<module>.h`).
    pub header_prefix: String,
    /// Header file names skipped even though they match the prefix.
    pub excluded_headers: Vec<String>,
    /// Return types a prototype may declare to be picked up.
    pub return_types: Vec<String>,
    /// Type name of the shared protocol handle.
    pub handle_type: String,
    /// Conventional parameter name of the handle.
    pub handle_param: String,
    /// Substring marking a callback-registration function.
    pub register_marker: String,
    /// Suffix linking a length parameter to its byte array (`buf` / `buf_len`).
    pub length_suffix: String,
    /// Base type of byte buffers.
    pub byte_type: String,
    /// Base types that make a const pointer a C string.
    pub string_char_types: Vec<String>,
    /// Substring marking the start of a Begin/GetNext enumeration.
    pub begin_marker: String,
    /// Substring marking the fetch step of a Begin/GetNext enumeration.
    pub get_next_marker: String,
}

impl Default for ApiConventions {
    fn default() -> Self {
        Self {
            vendor_prefix: "uCx".to_string(),
            header_prefix: "u_cx_".to_string(),
            excluded_headers: vec![
                "u_cx_types.h".to_string(),
                "u_cx_version.h".to_string(),
                "u_cx_urc.h".to_string(),
            ],
            return_types: vec![
                "int32_t".to_string(),
                "bool".to_string(),
                "void".to_string(),
            ],
            handle_type: "uCxHandle_t".to_string(),
            handle_param: "puCxHandle".to_string(),
            register_marker: "Register".to_string(),
            length_suffix: "_len".to_string(),
            byte_type: "uint8_t".to_string(),
            string_char_types: vec!["char".to_string()],
            begin_marker: "Begin".to_string(),
            get_next_marker: "GetNext".to_string(),
        }
    }
}

impl ApiConventions {
    /// Whether a header file name is excluded from scanning.
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.excluded_headers.iter().any(|h| h == file_name)
    }

    /// Whether a base type (const and `*` already removed) names a string character type.
    pub fn is_string_char(&self, base_type: &str) -> bool {
        base_type
            .split_whitespace()
            .any(|tok| self.string_char_types.iter().any(|c| c == tok))
    }

    /// Whether a base type names the shared protocol handle.
    pub fn is_handle_type(&self, base_type: &str) -> bool {
        base_type
            .split_whitespace()
            .any(|tok| tok == self.handle_type)
    }
}
