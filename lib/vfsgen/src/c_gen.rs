//! Emission of the generated C artifacts.
//!
//! Every mode walks the operation table in definition order and appends to a
//! plain string; the caller decides where the text goes. Emission is a pure
//! function of the table and the configuration, so identical inputs always
//! render identical bytes. Validation happened at parse time; nothing here
//! can reject a table.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::optable::{ArgCategory, DispatchKind, OpTable};

/// Function prefix applied when none is configured.
pub const DEFAULT_PREFIX: &str = "wasi_vfs_";
/// Storage qualifier applied to table initializers when none is configured.
pub const DEFAULT_QUALIFIER: &str = "static const";

/// The dispatch trampolines keep this prefix whatever the configuration
/// says: [`EmitConfig::prefix`] renames the per-backend implementations, but
/// the trampolines are the entry points the rest of the filesystem layer
/// links against.
const DISPATCH_PREFIX: &str = "wasi_vfs_";

/// The artifact [`emit`] renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmitMode {
    /// The `struct wasi_vfs_ops` declaration, one function pointer member
    /// per operation.
    StructDeclaration,
    /// One prefixed prototype per operation.
    PrototypeList,
    /// A `struct wasi_vfs_ops` initializer binding every member to its
    /// prefixed implementation.
    StructInitializer,
    /// The dispatch trampolines routing every operation to the table of the
    /// backend owning its path or descriptor.
    DispatchBodies,
}

/// Settings of one emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitConfig {
    /// The artifact to render.
    pub mode: EmitMode,
    /// Prefix of the generated function and table names.
    pub prefix: String,
    /// Storage qualifier of table initializers.
    pub qualifier: String,
}

impl EmitConfig {
    /// A configuration for `mode` with the default prefix and qualifier.
    pub fn new(mode: EmitMode) -> Self {
        EmitConfig {
            mode,
            prefix: DEFAULT_PREFIX.to_owned(),
            qualifier: DEFAULT_QUALIFIER.to_owned(),
        }
    }
}

/// Renders the artifact selected by `config` to a string.
///
/// The artifact is self-contained: it starts with a comment marking it as
/// generated and an include of the hand-written type definitions.
pub fn emit_to_string(table: &OpTable, config: &EmitConfig) -> String {
    let mut out = String::new();
    out.push_str("/* this file is generated by wasi-vfsgen */\n");
    out.push_str("#include \"wasi_vfs_types.h\"\n");
    match config.mode {
        EmitMode::StructDeclaration => struct_declaration(table, &mut out),
        EmitMode::PrototypeList => prototype_list(table, config, &mut out),
        EmitMode::StructInitializer => struct_initializer(table, config, &mut out),
        EmitMode::DispatchBodies => dispatch_bodies(table, &mut out),
    }
    out
}

/// Renders the artifact selected by `config` into `out`.
pub fn emit<W: Write>(table: &OpTable, config: &EmitConfig, out: &mut W) -> io::Result<()> {
    out.write_all(emit_to_string(table, config).as_bytes())
}

fn struct_declaration(table: &OpTable, out: &mut String) {
    out.push_str("struct wasi_vfs_ops {\n");
    for sig in table {
        out.push_str(&format!("\tint (*{})({});\n", sig.name, sig.decl_list()));
    }
    out.push_str("};\n");
}

fn prototype_list(table: &OpTable, config: &EmitConfig, out: &mut String) {
    for sig in table {
        out.push_str(&format!("int {}{}({});\n", config.prefix, sig.name, sig.decl_list()));
    }
}

fn struct_initializer(table: &OpTable, config: &EmitConfig, out: &mut String) {
    out.push_str(&format!(
        "{} struct wasi_vfs_ops {}ops = {{\n",
        config.qualifier, config.prefix
    ));
    for sig in table {
        out.push_str(&format!("\t.{} = {}{},\n", sig.name, config.prefix, sig.name));
    }
    out.push_str("};\n");
}

fn dispatch_bodies(table: &OpTable, out: &mut String) {
    for sig in table {
        out.push_str(&format!("int\n{}{}({})\n", DISPATCH_PREFIX, sig.name, sig.decl_list()));
        out.push_str("{\n");
        match sig.dispatch {
            DispatchKind::Path { reference } => {
                let reference_ident = &sig.args[reference].ident;
                for arg in sig
                    .args
                    .iter()
                    .skip(reference + 1)
                    .filter(|arg| arg.category == ArgCategory::PathInfo)
                {
                    out.push_str(&format!(
                        "\tif (check_xdev({}, {})) {{\n",
                        reference_ident, arg.ident
                    ));
                    out.push_str("\t\treturn EXDEV;\n");
                    out.push_str("\t}\n");
                }
                out.push_str(&format!(
                    "\tconst struct wasi_vfs_ops *ops = path_vfs_ops({});\n",
                    reference_ident
                ));
            }
            DispatchKind::Descriptor { context } => {
                out.push_str(&format!(
                    "\tconst struct wasi_vfs_ops *ops = fdinfo_vfs_ops({});\n",
                    sig.args[context].ident
                ));
            }
        }
        out.push_str(&format!("\treturn ops->{}({});\n", sig.name, sig.ident_list()));
        out.push_str("}\n");
    }
}
