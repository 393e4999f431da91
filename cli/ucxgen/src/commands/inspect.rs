//! `ucxgen inspect` — print the parsed model without generating anything.

use std::fmt::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use ucxgen_parse::{ApiModel, FunctionParam};

use crate::manifest::GeneratorManifest;

pub fn run(headers: &Path, format: Option<&str>, manifest: &GeneratorManifest) -> Result<()> {
    let model = ucxgen_parse::load_model(headers, &manifest.conventions)
        .with_context(|| format!("parsing headers in {}", headers.display()))?;

    match format.unwrap_or("text") {
        "text" => print!("{}", render_text(&model)),
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&model).context("serializing model")?
        ),
        other => bail!("unknown format '{other}' (expected text or json)"),
    }
    Ok(())
}

/// Human-readable listing: per module, functions with parameter roles, then
/// URC registrations.
pub fn render_text(model: &ApiModel) -> String {
    let mut out = String::new();
    for module in model.modules() {
        let _ = writeln!(out, "[{module}]");
        for func in model.functions_in(module) {
            let mut flags = Vec::new();
            if func.is_begin {
                flags.push("begin");
            }
            if func.is_get_next {
                flags.push("get-next");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            };
            let _ = writeln!(out, "  {} {}{flags}", func.return_type, func.name);
            for param in &func.params {
                let _ = writeln!(out, "    {}", describe_param(func.params.as_slice(), param));
            }
        }
    }

    if !model.callbacks.is_empty() {
        out.push_str("[urc]\n");
        for urc in &model.callbacks {
            let _ = writeln!(
                out,
                "  {} ({}) <- {} [{}]",
                urc.event_name, urc.module, urc.register_function, urc.callback_type
            );
        }
    }

    let _ = writeln!(
        out,
        "{} functions, {} callbacks",
        model.functions.len(),
        model.callbacks.len()
    );
    out
}

fn describe_param(params: &[FunctionParam], param: &FunctionParam) -> String {
    let mut line = format!("{}: {} ({})", param.name, param.declared_type, param.role);
    if param.is_handle {
        line.push_str(" handle");
    }
    if let Some(len) = param.array_length_companion.and_then(|i| params.get(i)) {
        let _ = write!(line, " length={}", len.name);
    }
    line
}
