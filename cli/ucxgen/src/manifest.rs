//! `ucxgen.toml` manifest parsing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use ucxgen_emit::{EmitOptions, ManagedOptions, NativeOptions, OutputNames};
use ucxgen_parse::ApiConventions;

/// File name looked up in the working directory when `--config` is absent.
pub const MANIFEST_FILE: &str = "ucxgen.toml";

/// The top-level manifest. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorManifest {
    /// Conventions of the wrapped C API.
    pub conventions: ApiConventions,
    /// Native wrapper options.
    pub native: NativeOptions,
    /// Managed binding options.
    pub managed: ManagedOptions,
    /// Artifact file names.
    pub output: OutputNames,
}

impl GeneratorManifest {
    /// Parse a manifest from a TOML string.
    pub fn parse(input: &str) -> Result<Self> {
        toml::from_str(input).context("parsing ucxgen manifest")
    }

    /// Parse a manifest from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            native: self.native.clone(),
            managed: self.managed.clone(),
            output: self.output.clone(),
        }
    }
}

/// Resolve the manifest: an explicit path must exist; otherwise
/// `<cwd>/ucxgen.toml` is used if present, else defaults.
pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<(GeneratorManifest, Option<PathBuf>)> {
    if let Some(path) = explicit {
        return Ok((GeneratorManifest::load(path)?, Some(path.to_path_buf())));
    }
    let candidate = cwd.join(MANIFEST_FILE);
    if candidate.is_file() {
        return Ok((GeneratorManifest::load(&candidate)?, Some(candidate)));
    }
    Ok((GeneratorManifest::default(), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_manifest_uses_defaults() {
        let manifest = GeneratorManifest::parse("").unwrap();
        assert_eq!(manifest, GeneratorManifest::default());
        assert_eq!(manifest.conventions.vendor_prefix, "uCx");
        assert_eq!(manifest.output.managed_source, "UcxNativeGenerated.cs");
    }

    #[test]
    fn partial_sections_override() {
        let manifest = GeneratorManifest::parse(
            r#"
[conventions]
vendor_prefix = "uAb"
excluded_headers = ["u_ab_types.h"]

[native]
wrapper_namespace = "ab"

[managed]
library_name = "ab_wrapper"
"#,
        )
        .unwrap();
        assert_eq!(manifest.conventions.vendor_prefix, "uAb");
        assert_eq!(manifest.conventions.handle_type, "uCxHandle_t");
        assert_eq!(manifest.conventions.excluded_headers, ["u_ab_types.h"]);
        let options = manifest.emit_options();
        assert_eq!(options.native.wrapper_namespace, "ab");
        assert_eq!(options.native.instance_type, "ucx_instance_t");
        assert_eq!(options.managed.library_name, "ab_wrapper");
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(GeneratorManifest::parse("[conventions]\nvendor_prefx = \"x\"\n").is_err());
        assert!(GeneratorManifest::parse("[extra]\n").is_err());
    }

    #[test]
    fn resolve_prefers_working_directory_file() {
        let dir = tempfile::tempdir().unwrap();
        let (manifest, path) = resolve(None, dir.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(manifest, GeneratorManifest::default());

        std::fs::write(dir.path().join(MANIFEST_FILE), "[managed]\nclass_name = \"Gen\"\n").unwrap();
        let (manifest, path) = resolve(None, dir.path()).unwrap();
        assert!(path.is_some());
        assert_eq!(manifest.managed.class_name, "Gen");
    }

    #[test]
    fn explicit_missing_manifest_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve(Some(&dir.path().join("missing.toml")), dir.path()).is_err());
    }
}
