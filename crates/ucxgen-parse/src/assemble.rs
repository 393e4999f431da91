//! Model assembly: scanner → parser → classifier/linker.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::classify::classify;
use crate::conventions::ApiConventions;
use crate::csig::{parse_param, split_params, PrototypeScanner};
use crate::error::{ParseError, Result};
use crate::link::link_array_lengths;
use crate::model::{ApiModel, Function, Module, ReturnType, UrcCallback};
use crate::scan::{scan_headers, HeaderFile};

/// Accumulates functions and callbacks header by header.
///
/// Rejects a second declaration of an already-seen function name.
pub struct ModelBuilder {
    conv: ApiConventions,
    scanner: PrototypeScanner,
    model: ApiModel,
    seen: HashMap<String, String>,
}

impl ModelBuilder {
    pub fn new(conv: &ApiConventions) -> Result<Self> {
        Ok(Self {
            conv: conv.clone(),
            scanner: PrototypeScanner::new(conv)?,
            model: ApiModel::default(),
            seen: HashMap::new(),
        })
    }

    /// Parse the full text of one header belonging to `module`.
    pub fn add_header_text(&mut self, text: &str, header: &str, module: &Module) -> Result<()> {
        let before = (self.model.functions.len(), self.model.callbacks.len());

        for raw in self.scanner.prototypes(text) {
            let fragments = split_params(&raw.params_text);
            let shapes: Vec<_> = fragments.iter().filter_map(|f| parse_param(f)).collect();
            if shapes.len() != fragments.len() {
                debug!(name = %raw.name, "skipping prototype with unsupported parameter syntax");
                continue;
            }

            if let Some(first) = self.seen.get(&raw.name) {
                return Err(ParseError::DuplicateFunction {
                    name: raw.name,
                    first: first.clone(),
                    second: header.to_string(),
                });
            }
            self.seen.insert(raw.name.clone(), header.to_string());

            let mut params: Vec<_> = shapes
                .iter()
                .map(|shape| classify(shape, &self.conv))
                .collect();
            link_array_lengths(&mut params, &self.conv.length_suffix);

            self.model.functions.push(Function {
                is_begin: raw.name.contains(self.conv.begin_marker.as_str()),
                is_get_next: raw.name.contains(self.conv.get_next_marker.as_str()),
                return_type: ReturnType::parse(&raw.return_type),
                name: raw.name,
                params,
                module: module.clone(),
                header: header.to_string(),
            });
        }

        for raw in self.scanner.registrations(text) {
            let event_name = self.event_name(&raw.register_function);
            self.model.callbacks.push(UrcCallback {
                register_function: raw.register_function,
                event_name,
                module: module.clone(),
                callback_type: raw.callback_type,
            });
        }

        debug!(
            header,
            functions = self.model.functions.len() - before.0,
            callbacks = self.model.callbacks.len() - before.1,
            "parsed header"
        );
        Ok(())
    }

    /// Read and parse one scanned header file.
    pub fn add_header(&mut self, header: &HeaderFile) -> Result<()> {
        let text = std::fs::read_to_string(&header.path)?;
        self.add_header_text(&text, &header.file_name(), &header.module)
    }

    pub fn finish(self) -> ApiModel {
        self.model
    }

    fn event_name(&self, register_function: &str) -> String {
        register_function
            .strip_prefix(self.conv.vendor_prefix.as_str())
            .unwrap_or(register_function)
            .replacen(self.conv.register_marker.as_str(), "", 1)
    }
}

/// Scan `dir` and parse every eligible header into one model.
pub fn load_model(dir: &Path, conv: &ApiConventions) -> Result<ApiModel> {
    let headers = scan_headers(dir, conv)?;
    let mut builder = ModelBuilder::new(conv)?;
    for header in &headers {
        builder.add_header(header)?;
    }
    let model = builder.finish();
    info!(
        headers = headers.len(),
        functions = model.functions.len(),
        callbacks = model.callbacks.len(),
        "parsed header directory"
    );
    Ok(model)
}
