//! Header scanner.
//!
//! Enumerates the per-module headers of a directory in a deterministic order.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::conventions::ApiConventions;
use crate::error::{ParseError, Result};
use crate::model::Module;

/// A header eligible for parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFile {
    pub path: PathBuf,
    pub module: Module,
}

impl HeaderFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Derive the module from a header file name, or `None` if the file does not
/// follow the `<prefix><module>.h` convention.
pub fn module_for(file_name: &str, conv: &ApiConventions) -> Option<Module> {
    let stem = file_name.strip_suffix(".h")?;
    let module = stem.strip_prefix(conv.header_prefix.as_str())?;
    if module.is_empty() {
        return None;
    }
    Some(Module::new(module))
}

/// List eligible headers in `dir`, sorted by file name.
///
/// Fails with [`ParseError::DirectoryNotFound`] when `dir` is missing; nothing
/// is parsed in that case.
pub fn scan_headers(dir: &Path, conv: &ApiConventions) -> Result<Vec<HeaderFile>> {
    if !dir.is_dir() {
        return Err(ParseError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut headers = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if conv.is_excluded(&file_name) {
            debug!(header = %file_name, "skipping excluded header");
            continue;
        }
        if let Some(module) = module_for(&file_name, conv) {
            headers.push(HeaderFile {
                path: entry.path(),
                module,
            });
        }
    }

    headers.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(headers)
}
