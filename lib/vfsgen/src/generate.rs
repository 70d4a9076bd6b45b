//! The standard generation run: one definition file in, three headers out.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::c_gen::{EmitConfig, EmitMode, emit_to_string};
use crate::error::GenError;
use crate::parser::parse_def;

/// Conventional name of the definition file.
pub const DEF_FILE: &str = "wasi_vfs.def";
/// Header receiving the `struct wasi_vfs_ops` declaration.
pub const OPS_HEADER: &str = "wasi_vfs_ops.h";
/// Header receiving the dispatch prototypes.
pub const PROTOTYPES_HEADER: &str = "wasi_vfs.h";
/// Header receiving the dispatch trampolines.
pub const DISPATCH_HEADER: &str = "wasi_vfs_dispatch.h";

/// Parses `def_path` and writes the three standard headers into `out_dir`.
///
/// Output is all-or-nothing: every artifact is rendered and staged as a
/// temporary file in `out_dir` before the first one is moved to its final
/// name. A failing run leaves existing headers untouched and removes its
/// temporaries. Re-running on unchanged input rewrites identical bytes.
pub fn generate(def_path: &Path, out_dir: &Path) -> Result<(), GenError> {
    let content = fs::read_to_string(def_path).map_err(|source| GenError::ReadInput {
        path: def_path.to_owned(),
        source,
    })?;
    let table = parse_def(&content)?;

    let artifacts = [
        (OPS_HEADER, EmitMode::StructDeclaration),
        (PROTOTYPES_HEADER, EmitMode::PrototypeList),
        (DISPATCH_HEADER, EmitMode::DispatchBodies),
    ];

    let mut staged = Vec::with_capacity(artifacts.len());
    for (name, mode) in artifacts {
        let rendered = emit_to_string(&table, &EmitConfig::new(mode));
        let path = out_dir.join(name);
        let mut tmp = NamedTempFile::new_in(out_dir).map_err(|source| GenError::Stage {
            path: path.clone(),
            source,
        })?;
        tmp.write_all(rendered.as_bytes())
            .map_err(|source| GenError::Stage {
                path: path.clone(),
                source,
            })?;
        staged.push((tmp, path));
    }
    for (tmp, path) in staged {
        debug!(path = %path.display(), "writing generated header");
        tmp.persist(&path).map_err(|err| GenError::WriteOutput {
            path: path.clone(),
            source: err.error,
        })?;
    }
    Ok(())
}
