//! `ucxgen generate` — the full header-to-bindings pipeline.

use std::path::Path;

use anyhow::{Context, Result};

use crate::manifest::GeneratorManifest;

/// Where `generate` reads from and writes to.
pub struct GenerateArgs<'a> {
    pub headers: &'a Path,
    pub out_dir: &'a Path,
    /// Directory for the managed source; `out_dir` when absent.
    pub managed_dir: Option<&'a Path>,
    /// Optional JSON dump of the parsed model.
    pub model_json: Option<&'a Path>,
}

/// Parse every header, then write the native header, native implementation
/// and managed source.
pub fn run(args: &GenerateArgs<'_>, manifest: &GeneratorManifest) -> Result<()> {
    let model = ucxgen_parse::load_model(args.headers, &manifest.conventions)
        .with_context(|| format!("parsing headers in {}", args.headers.display()))?;

    let options = manifest.emit_options();
    let artifacts = ucxgen_emit::generate(&model, &manifest.conventions, &options)?;

    let managed_dir = args.managed_dir.unwrap_or(args.out_dir);
    let written = artifacts
        .write(&options.output, args.out_dir, managed_dir)
        .context("writing generated sources")?;

    if let Some(path) = args.model_json {
        let json = serde_json::to_string_pretty(&model).context("serializing model")?;
        std::fs::write(path, json + "\n")
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Model → {}", path.display());
    }

    println!(
        "Generated {} wrappers ({} modules, {} URC callbacks)",
        model.functions.len(),
        model.modules().len(),
        model.callbacks.len()
    );
    for path in &written {
        println!("  {}", path.display());
    }
    if !artifacts.unmapped_types.is_empty() {
        println!(
            "{} native type(s) passed through unmapped; see REVIEW comments in {}",
            artifacts.unmapped_types.len(),
            options.output.managed_source
        );
    }

    Ok(())
}
