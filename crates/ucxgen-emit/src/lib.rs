//! Native wrapper and managed binding emitters for ucxgen.
//!
//! Both emitters read the same immutable [`ApiModel`] and share one naming
//! function, so a native wrapper and its managed declaration always agree.
//!
//! ## Modules
//!
//! - [`naming`] — Wrapper names and their uniqueness check
//! - [`marshal`] — Managed scalar table and per-parameter marshaling
//! - [`native`] — Native declarations and implementation files
//! - [`managed`] — Managed foreign-call declarations
//! - [`options`] — Names baked into the generated sources

pub mod error;
pub mod managed;
pub mod marshal;
pub mod naming;
pub mod native;
pub mod options;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::info;
use ucxgen_parse::{ApiConventions, ApiModel};

pub use error::EmitError;
pub use managed::ManagedEmitter;
pub use marshal::MarshalStrategy;
pub use native::NativeEmitter;
pub use options::{EmitOptions, ManagedOptions, NativeOptions, OutputNames};

use crate::error::Result;

/// The three generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub native_header: String,
    pub native_source: String,
    pub managed_source: String,
    /// Native types the managed side passed through unmapped.
    pub unmapped_types: BTreeSet<String>,
}

/// Render every artifact for `model`.
///
/// Fails if two functions would share a wrapper name.
pub fn generate(model: &ApiModel, conv: &ApiConventions, options: &EmitOptions) -> Result<Artifacts> {
    naming::check_unique(model, &conv.vendor_prefix, &options.native.wrapper_namespace)?;

    let native = NativeEmitter::new(model, conv, options);
    let managed = ManagedEmitter::new(model, conv, options).source();
    Ok(Artifacts {
        native_header: native.header(),
        native_source: native.implementation(),
        managed_source: managed.text,
        unmapped_types: managed.unmapped,
    })
}

impl Artifacts {
    /// Write the native files into `native_dir` and the managed file into
    /// `managed_dir`, creating the directories. Returns the written paths.
    pub fn write(&self, names: &OutputNames, native_dir: &Path, managed_dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(native_dir)?;
        std::fs::create_dir_all(managed_dir)?;
        let files = [
            (native_dir.join(&names.native_header), &self.native_header),
            (native_dir.join(&names.native_source), &self.native_source),
            (managed_dir.join(&names.managed_source), &self.managed_source),
        ];
        let mut written = Vec::with_capacity(files.len());
        for (path, contents) in files {
            std::fs::write(&path, contents)?;
            info!(path = %path.display(), bytes = contents.len(), "wrote artifact");
            written.push(path);
        }
        Ok(written)
    }
}
