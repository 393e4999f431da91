//! Managed binding emission.
//!
//! One foreign-call declaration per function, named exactly like its native
//! wrapper. A function taking a linked byte array is declared as a private
//! extern with the full native arity, fronted by a public method of the
//! wrapper's name that omits the length and passes `buf.Length` instead.
//! Types outside the scalar table pass through by name and the declaration
//! is preceded by a `// REVIEW:` line.

use std::collections::BTreeSet;
use std::fmt::Write;

use tracing::warn;
use ucxgen_parse::{ApiConventions, ApiModel, Function, ReturnType};

use crate::marshal::{managed_type, select_strategy, ManagedType, MarshalStrategy};
use crate::naming::wrapper_name;
use crate::options::EmitOptions;

const INDENT: &str = "        ";

/// A rendered declaration and the native types it could not map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedDeclaration {
    pub text: String,
    pub unmapped: BTreeSet<String>,
}

/// The rendered managed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedSource {
    pub text: String,
    pub unmapped: BTreeSet<String>,
}

/// Emits the managed foreign-call declarations.
pub struct ManagedEmitter<'a> {
    model: &'a ApiModel,
    conv: &'a ApiConventions,
    options: &'a EmitOptions,
}

impl<'a> ManagedEmitter<'a> {
    pub fn new(model: &'a ApiModel, conv: &'a ApiConventions, options: &'a EmitOptions) -> Self {
        Self {
            model,
            conv,
            options,
        }
    }

    /// The whole source file, one region per module in sorted order.
    pub fn source(&self) -> ManagedSource {
        let managed = &self.options.managed;
        let mut unmapped = BTreeSet::new();
        let mut out = String::new();
        out.push_str("// Auto-generated u-connectXpress wrapper P/Invoke declarations\n");
        out.push_str("// DO NOT EDIT - Generated by ucxgen\n\n");
        out.push_str("using System;\n");
        out.push_str("using System.Runtime.InteropServices;\n");
        out.push_str("using System.Text;\n\n");
        let _ = writeln!(out, "namespace {}", managed.namespace);
        out.push_str("{\n");
        let _ = writeln!(out, "    public static partial class {}", managed.class_name);
        out.push_str("    {\n");
        let _ = writeln!(
            out,
            "        private const string DllName = \"{}\";\n",
            managed.library_name
        );

        for module in self.model.modules() {
            let _ = writeln!(out, "        #region {} Functions\n", module.as_str().to_uppercase());
            for func in self.model.functions_in(module) {
                let decl = self.declaration(func);
                if !decl.unmapped.is_empty() {
                    warn!(
                        function = %func.name,
                        types = ?decl.unmapped,
                        "unmapped native types passed through to managed declaration"
                    );
                }
                out.push_str(&decl.text);
                out.push('\n');
                unmapped.extend(decl.unmapped);
            }
            out.push_str("        #endregion\n\n");
        }

        out.push_str("    }\n");
        out.push_str("}\n");
        ManagedSource {
            text: out,
            unmapped,
        }
    }

    /// Managed parameters of `func`, instance first. `foreign` selects the
    /// extern form, which carries marshaling attributes and linked array
    /// lengths; the public form hides the lengths.
    pub fn params(
        &self,
        func: &Function,
        foreign: bool,
        unmapped: &mut BTreeSet<String>,
    ) -> Vec<String> {
        let attr = |ty: &ManagedType| if foreign { bool_attr(ty) } else { "" };
        let mut params = vec!["IntPtr instance".to_string()];
        for (index, param) in func.params.iter().enumerate() {
            let name = &param.name;
            let rendered = match select_strategy(func, index, self.conv) {
                MarshalStrategy::Omitted => continue,
                MarshalStrategy::ArrayLength { .. } if !foreign => continue,
                MarshalStrategy::ArrayLength { ty, .. } => format!("{} {name}", track(ty, unmapped)),
                MarshalStrategy::NarrowString if foreign => {
                    format!("[MarshalAs(UnmanagedType.LPStr)] string {name}")
                }
                MarshalStrategy::NarrowString => format!("string {name}"),
                MarshalStrategy::OpaquePointer => format!("IntPtr {name}"),
                MarshalStrategy::ByteBuffer => format!("byte[] {name}"),
                MarshalStrategy::Out(ty) => {
                    format!("{}out {} {name}", attr(&ty), track(ty, unmapped))
                }
                MarshalStrategy::Direct(ty) => {
                    format!("{}{} {name}", attr(&ty), track(ty, unmapped))
                }
            };
            params.push(rendered);
        }
        params
    }

    /// Arguments the public method hands to its extern. Array lengths come
    /// from the array itself.
    fn forwarded_args(&self, func: &Function) -> Vec<String> {
        let mut args = vec!["instance".to_string()];
        for (index, param) in func.params.iter().enumerate() {
            let name = &param.name;
            let arg = match select_strategy(func, index, self.conv) {
                MarshalStrategy::Omitted => continue,
                MarshalStrategy::ArrayLength { array, ty } => {
                    format!("({})({array}?.Length ?? 0)", ty.name)
                }
                MarshalStrategy::Out(_) => format!("out {name}"),
                _ => name.clone(),
            };
            args.push(arg);
        }
        args
    }

    /// One `[DllImport]` declaration. A function with linked array lengths
    /// gets a private extern plus a public method that fills the lengths.
    pub fn declaration(&self, func: &Function) -> ManagedDeclaration {
        let mut unmapped = BTreeSet::new();
        let name = wrapper_name(
            func,
            &self.conv.vendor_prefix,
            &self.options.native.wrapper_namespace,
        );
        let ret = return_type(&func.return_type);
        let is_bool = ret.is_bool();
        let ret_name = track(ret, &mut unmapped);
        let extern_params = self.params(func, true, &mut unmapped).join(", ");
        let has_lengths = (0..func.params.len()).any(|i| func.is_length_companion(i));

        let mut text = String::new();
        if !unmapped.is_empty() {
            let list = unmapped.iter().cloned().collect::<Vec<_>>().join(", ");
            let _ = writeln!(text, "{INDENT}// REVIEW: unmapped native type(s): {list}");
        }
        if has_lengths {
            let _ = writeln!(
                text,
                "{INDENT}[DllImport(DllName, EntryPoint = \"{name}\", CallingConvention = CallingConvention.Cdecl)]"
            );
        } else {
            let _ = writeln!(
                text,
                "{INDENT}[DllImport(DllName, CallingConvention = CallingConvention.Cdecl)]"
            );
        }
        if is_bool {
            let _ = writeln!(text, "{INDENT}[return: MarshalAs(UnmanagedType.I1)]");
        }
        if !has_lengths {
            let _ = writeln!(
                text,
                "{INDENT}public static extern {ret_name} {name}({extern_params});"
            );
            return ManagedDeclaration { text, unmapped };
        }

        let _ = writeln!(
            text,
            "{INDENT}private static extern {ret_name} {name}_native({extern_params});"
        );
        let method_params = self.params(func, false, &mut unmapped).join(", ");
        let args = self.forwarded_args(func).join(", ");
        let _ = writeln!(
            text,
            "{INDENT}public static {ret_name} {name}({method_params}) => {name}_native({args});"
        );
        ManagedDeclaration { text, unmapped }
    }
}

fn return_type(ty: &ReturnType) -> ManagedType {
    managed_type(&ty.to_string())
}

fn bool_attr(ty: &ManagedType) -> &'static str {
    if ty.is_bool() {
        "[MarshalAs(UnmanagedType.I1)] "
    } else {
        ""
    }
}

fn track(ty: ManagedType, unmapped: &mut BTreeSet<String>) -> String {
    if !ty.mapped {
        unmapped.insert(ty.name.clone());
    }
    ty.name
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucxgen_parse::{Module, ModelBuilder};

    fn model(text: &str, module: &str) -> ApiModel {
        let mut builder = ModelBuilder::new(&ApiConventions::default()).unwrap();
        builder
            .add_header_text(text, &format!("u_cx_{module}.h"), &Module::new(module))
            .unwrap();
        builder.finish()
    }

    fn declare(text: &str, module: &str) -> ManagedDeclaration {
        let model = model(text, module);
        let conv = ApiConventions::default();
        let options = EmitOptions::default();
        ManagedEmitter::new(&model, &conv, &options).declaration(&model.functions[0])
    }

    #[test]
    fn station_connect_declaration() {
        let decl = declare(
            "int32_t uCxWifiStationConnect(uCxHandle_t * puCxHandle, const char * pSsid);",
            "wifi",
        );
        assert_eq!(
            decl.text,
            "        [DllImport(DllName, CallingConvention = CallingConvention.Cdecl)]\n        public static extern int ucx_wifi_StationConnect(IntPtr instance, [MarshalAs(UnmanagedType.LPStr)] string pSsid);\n"
        );
        assert!(decl.unmapped.is_empty());
    }

    #[test]
    fn array_length_filled_from_buffer() {
        let decl = declare(
            "int32_t uCxSocketWrite(uCxHandle_t * puCxHandle, int32_t socket, uint8_t * buf, int32_t buf_len);",
            "socket",
        );
        assert_eq!(
            decl.text,
            "        [DllImport(DllName, EntryPoint = \"ucx_socket_Write\", CallingConvention = CallingConvention.Cdecl)]\n        private static extern int ucx_socket_Write_native(IntPtr instance, int socket, byte[] buf, int buf_len);\n        public static int ucx_socket_Write(IntPtr instance, int socket, byte[] buf) => ucx_socket_Write_native(instance, socket, buf, (int)(buf?.Length ?? 0));\n"
        );
        assert!(!decl.text.contains("puCxHandle"));
        assert!(decl.unmapped.is_empty());
    }

    #[test]
    fn array_length_with_bool_and_out_parameters() {
        let decl = declare(
            "bool uCxSocketRead(uCxHandle_t * puCxHandle, uint8_t * buf, int32_t buf_len, int32_t * pRead);",
            "socket",
        );
        assert!(decl.text.contains("[return: MarshalAs(UnmanagedType.I1)]\n"));
        assert!(decl.text.contains(
            "private static extern bool ucx_socket_Read_native(IntPtr instance, byte[] buf, int buf_len, out int pRead);"
        ));
        assert!(decl.text.contains(
            "public static bool ucx_socket_Read(IntPtr instance, byte[] buf, out int pRead) => ucx_socket_Read_native(instance, buf, (int)(buf?.Length ?? 0), out pRead);"
        ));
    }

    #[test]
    fn pointer_length_declared_as_out() {
        let decl = declare(
            "int32_t uCxSocketPeek(uCxHandle_t * puCxHandle, uint8_t * buf, int32_t * buf_len);",
            "socket",
        );
        assert!(decl.text.contains(
            "public static extern int ucx_socket_Peek(IntPtr instance, byte[] buf, out int buf_len);"
        ));
        assert!(!decl.text.contains("_native"));
    }

    #[test]
    fn out_and_opaque_parameters() {
        let decl = declare(
            "int32_t uCxWifiStationGetRssi(uCxHandle_t * puCxHandle, const uSockAddr_t * pAddr, int32_t * pRssi);",
            "wifi",
        );
        assert!(decl
            .text
            .contains("ucx_wifi_StationGetRssi(IntPtr instance, IntPtr pAddr, out int pRssi);"));
    }

    #[test]
    fn bool_marshaled_as_one_byte() {
        let decl = declare(
            "bool uCxWifiStationIsConnected(uCxHandle_t * puCxHandle, bool refresh, bool * pUp);",
            "wifi",
        );
        assert!(decl.text.contains("[return: MarshalAs(UnmanagedType.I1)]\n"));
        assert!(decl.text.contains(
            "public static extern bool ucx_wifi_StationIsConnected(IntPtr instance, [MarshalAs(UnmanagedType.I1)] bool refresh, [MarshalAs(UnmanagedType.I1)] out bool pUp);"
        ));
    }

    #[test]
    fn unmapped_types_flagged_for_review() {
        let decl = declare(
            "int32_t uCxWifiStationSetSecurity(uCxHandle_t * puCxHandle, uWifiSecurity_t security, uWifiMode_t * pMode);",
            "wifi",
        );
        assert!(decl
            .text
            .starts_with("        // REVIEW: unmapped native type(s): uWifiMode_t, uWifiSecurity_t\n"));
        assert!(decl.text.contains("uWifiSecurity_t security, out uWifiMode_t pMode"));
        assert_eq!(decl.unmapped.len(), 2);
    }

    #[test]
    fn source_has_regions_and_library_token() {
        let model = model(
            "int32_t uCxWifiStationConnect(uCxHandle_t * puCxHandle, const char * pSsid);\nvoid uCxWifiReset(uCxHandle_t * puCxHandle);\n",
            "wifi",
        );
        let conv = ApiConventions::default();
        let options = EmitOptions::default();
        let src = ManagedEmitter::new(&model, &conv, &options).source();
        assert!(src.text.contains("namespace UcxAvaloniaApp.Services\n"));
        assert!(src.text.contains("private const string DllName = \"ucxclient_wrapper\";"));
        assert!(src.text.contains("#region WIFI Functions"));
        assert_eq!(src.text.matches("[DllImport(DllName").count(), 2);
        assert!(src.text.contains("public static extern void ucx_wifi_Reset(IntPtr instance);"));
        assert!(src.unmapped.is_empty());
    }
}
