//! Pattern-based C prototype extraction.
//!
//! Recognizes exactly two shapes of declaration in header text: function
//! prototypes with one of the accepted return types, and callback
//! registrations taking the shared handle plus a callback. It does NOT
//! expand preprocessor directives or macros, and it does NOT handle nested
//! parentheses in parameter lists (function-pointer parameters, attributes):
//! a parameter list is split on every comma. Text that does not match is
//! skipped.

use regex::Regex;
use tracing::debug;

use crate::conventions::ApiConventions;
use crate::error::Result;

/// Raw text fragments of a matched function prototype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPrototype {
    pub return_type: String,
    pub name: String,
    /// Everything between the parentheses, possibly spanning lines.
    pub params_text: String,
}

/// Raw text fragments of a matched callback registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRegistration {
    pub register_function: String,
    pub callback_type: String,
}

/// Declared shape of one parameter fragment, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamShape {
    pub name: String,
    /// Type text with the identifier removed and whitespace normalized.
    pub declared_type: String,
    /// Type text without `const` and `*`.
    pub base_type: String,
    pub indirection: usize,
    pub is_const: bool,
}

/// Compiled prototype patterns for one set of conventions.
#[derive(Debug, Clone)]
pub struct PrototypeScanner {
    prototype: Regex,
    registration: Regex,
    vendor_prefix: String,
}

impl PrototypeScanner {
    pub fn new(conv: &ApiConventions) -> Result<Self> {
        let return_types = conv
            .return_types
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let prototype = Regex::new(&format!(
            r"(?ms)^\s*({return_types})\s+([A-Za-z0-9_]+)\s*\((.*?)\)\s*;"
        ))?;
        let registration = Regex::new(&format!(
            r"void\s+({prefix}\w+{marker}\w+)\s*\(\s*{handle}\s*\*\s*\w+\s*,\s*([^)]+)\)",
            prefix = regex::escape(&conv.vendor_prefix),
            marker = regex::escape(&conv.register_marker),
            handle = regex::escape(&conv.handle_type),
        ))?;
        Ok(Self {
            prototype,
            registration,
            vendor_prefix: conv.vendor_prefix.clone(),
        })
    }

    /// Prototypes in `text` whose name carries the vendor prefix, in source order.
    pub fn prototypes(&self, text: &str) -> Vec<RawPrototype> {
        let mut found = Vec::new();
        for caps in self.prototype.captures_iter(text) {
            let name = caps[2].trim();
            if !name.starts_with(self.vendor_prefix.as_str()) {
                debug!(name, "skipping prototype without vendor prefix");
                continue;
            }
            found.push(RawPrototype {
                return_type: caps[1].trim().to_string(),
                name: name.to_string(),
                params_text: caps[3].trim().to_string(),
            });
        }
        found
    }

    /// Callback registrations in `text`, in source order.
    pub fn registrations(&self, text: &str) -> Vec<RawRegistration> {
        self.registration
            .captures_iter(text)
            .map(|caps| RawRegistration {
                register_function: caps[1].trim().to_string(),
                callback_type: normalize_ws(&caps[2]),
            })
            .collect()
    }
}

/// Split a parameter list on commas. An empty list or `void` yields nothing.
pub fn split_params(params_text: &str) -> Vec<&str> {
    let text = params_text.trim();
    if text.is_empty() || text == "void" {
        return Vec::new();
    }
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Parse one parameter fragment such as `const char * pSsid`.
///
/// The trailing identifier is the name and everything before it the type.
/// Returns `None` if the fragment does not end in an identifier (array
/// declarators such as `data[]`) or carries a `const` after a `*` (const
/// pointers such as `char * const p`), neither of which the declared-type
/// text can represent.
pub fn parse_param(fragment: &str) -> Option<ParamShape> {
    let fragment = fragment.trim();
    let name_start = fragment
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric() || *c == '_')
        .last()
        .map(|(i, _)| i)?;
    let name = &fragment[name_start..];
    let type_text = &fragment[..name_start];

    if let Some(star) = type_text.find('*') {
        if type_text[star..]
            .replace('*', " ")
            .split_whitespace()
            .any(|t| t == "const")
        {
            return None;
        }
    }

    let indirection = type_text.matches('*').count();
    let without_stars = type_text.replace('*', " ");
    let tokens: Vec<&str> = without_stars.split_whitespace().collect();
    let is_const = tokens.contains(&"const");

    let mut declared_type = tokens.join(" ");
    for _ in 0..indirection {
        declared_type.push_str(" *");
    }
    let base_type = tokens
        .iter()
        .filter(|t| **t != "const")
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    Some(ParamShape {
        name: name.to_string(),
        declared_type,
        base_type,
        indirection,
        is_const,
    })
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
