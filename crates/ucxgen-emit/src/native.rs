//! Native wrapper emission.
//!
//! Every wrapper takes the opaque instance first, refuses to call through when
//! the instance is NULL, and forwards to the vendor function with the
//! instance's own protocol handle in place of the omitted handle argument.
//!
//! Byte arrays keep their length companion in the signature, so the wrapper
//! has the same arity as the managed extern that calls it. Before forwarding,
//! a wrapper rejects a NULL array paired with a non-zero length; the length
//! is otherwise forwarded unchanged in its original position.

use std::fmt::Write;

use ucxgen_parse::{ApiConventions, ApiModel, Function, ParamRole};

use crate::naming::wrapper_name;
use crate::options::{include_guard, EmitOptions};

/// Emits the native declarations and implementation files.
pub struct NativeEmitter<'a> {
    model: &'a ApiModel,
    conv: &'a ApiConventions,
    options: &'a EmitOptions,
}

impl<'a> NativeEmitter<'a> {
    pub fn new(model: &'a ApiModel, conv: &'a ApiConventions, options: &'a EmitOptions) -> Self {
        Self {
            model,
            conv,
            options,
        }
    }

    /// The declarations file. Structural boilerplate only; the wrappers are
    /// declared where they are defined so consumers never see vendor types.
    pub fn header(&self) -> String {
        let output = &self.options.output;
        let guard = include_guard(&output.native_header);
        let mut out = String::new();
        out.push_str("/* Auto-generated u-connectXpress wrapper header */\n");
        out.push_str("/* DO NOT EDIT - Generated by ucxgen */\n");
        let _ = writeln!(
            out,
            "/* NOTE: Include {} instead of this file directly */\n",
            self.options.native.wrapper_header
        );
        let _ = writeln!(out, "#ifndef {guard}");
        let _ = writeln!(out, "#define {guard}\n");
        out.push_str("#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");
        let _ = writeln!(
            out,
            "/* Wrapper definitions live in {} */\n",
            output.native_source
        );
        out.push_str("#ifdef __cplusplus\n}\n#endif\n\n");
        let _ = writeln!(out, "#endif /* {guard} */");
        out
    }

    /// The implementation file: includes, then one section per module in
    /// sorted order, wrappers in declaration order.
    pub fn implementation(&self) -> String {
        let native = &self.options.native;
        let modules = self.model.modules();
        let mut out = String::new();
        out.push_str("/* Auto-generated u-connectXpress wrapper implementation */\n");
        out.push_str("/* DO NOT EDIT - Generated by ucxgen */\n\n");
        let _ = writeln!(out, "#include \"{}\"", self.options.output.native_header);
        let _ = writeln!(out, "#include \"{}\"", native.wrapper_header);
        let _ = writeln!(out, "#include \"{}\"", native.vendor_umbrella_include);
        for module in &modules {
            if let Some(header) = self.model.header_of(module) {
                let _ = writeln!(out, "#include \"{}/{header}\"", native.module_include_dir);
            }
        }

        for module in &modules {
            let _ = writeln!(
                out,
                "\n/* ========== {} FUNCTIONS ========== */\n",
                module.as_str().to_uppercase()
            );
            for func in self.model.functions_in(module) {
                out.push_str(&self.wrapper(func));
                out.push('\n');
            }
        }
        out
    }

    /// Parameter list of the wrapper: the instance, then every non-handle
    /// parameter with its declared type.
    pub fn param_list(&self, func: &Function) -> String {
        let native = &self.options.native;
        let mut params = vec![format!("{} *{}", native.instance_type, native.instance_param)];
        params.extend(
            func.non_handle_params()
                .map(|(_, p)| format!("{} {}", p.declared_type, p.name)),
        );
        params.join(", ")
    }

    /// Arguments of the forwarding call, in original order.
    pub fn call_args(&self, func: &Function) -> String {
        let native = &self.options.native;
        func.params
            .iter()
            .map(|p| {
                if p.is_handle {
                    format!("&{}->{}", native.instance_param, native.handle_field)
                } else {
                    p.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Prototype line of the wrapper, without body.
    pub fn declaration(&self, func: &Function) -> String {
        format!(
            "{} {}({});",
            func.return_type,
            wrapper_name(func, &self.conv.vendor_prefix, &self.options.native.wrapper_namespace),
            self.param_list(func)
        )
    }

    /// Full definition of the wrapper.
    pub fn wrapper(&self, func: &Function) -> String {
        let native = &self.options.native;
        let name = wrapper_name(func, &self.conv.vendor_prefix, &native.wrapper_namespace);
        let fail = match func.return_type.failure_sentinel() {
            Some(value) => format!("return {value};"),
            None => "return;".to_string(),
        };

        let mut out = String::new();
        let _ = writeln!(out, "{} {name}({})", func.return_type, self.param_list(func));
        out.push_str("{\n");
        let _ = writeln!(out, "    if (!{}) {{", native.instance_param);
        let _ = writeln!(
            out,
            "        {}(\"[ERROR] NULL instance in %s\\n\", __func__);",
            native.diagnostic_fn
        );
        let _ = writeln!(out, "        {fail}");
        out.push_str("    }\n\n");

        for array in func.params.iter().filter(|p| p.role == ParamRole::ByteArray) {
            let Some(len) = array.array_length_companion.map(|i| &func.params[i]) else {
                continue;
            };
            let _ = writeln!(out, "    if (!{} && {} != 0) {{", array.name, len.name);
            let _ = writeln!(
                out,
                "        {}(\"[ERROR] NULL {} with non-zero {} in %s\\n\", __func__);",
                native.diagnostic_fn, array.name, len.name
            );
            let _ = writeln!(out, "        {fail}");
            out.push_str("    }\n\n");
        }

        let call = format!("{}({})", func.name, self.call_args(func));
        if func.return_type.is_void() {
            let _ = writeln!(out, "    {call};");
            out.push_str("    return;\n");
        } else {
            let _ = writeln!(out, "    {} result = {call};", func.return_type);
            out.push_str("    return result;\n");
        }
        out.push_str("}\n");
        out
    }
}
