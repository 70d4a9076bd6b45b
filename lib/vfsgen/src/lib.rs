//! The `wasi-vfsgen` crate generates the C glue a WASI virtual filesystem
//! layer is built from.
//!
//! The input is a definition file, conventionally `wasi_vfs.def`: a flat list
//! of `name(arg, ...)` statements describing the operations a VFS backend
//! implements. From one parsed [`OpTable`] the crate emits the
//! `struct wasi_vfs_ops` declaration, prefixed prototypes, table
//! initializers, and the dispatch trampolines that route every call to the
//! backend owning its file descriptor or path, guarding cross-device path
//! operations with `EXDEV`.

#![deny(missing_docs, trivial_numeric_casts, unused_extern_crates)]
#![warn(unused_import_braces)]

mod c_gen;
mod error;
mod generate;
mod optable;
mod parser;

pub use crate::c_gen::{
    DEFAULT_PREFIX, DEFAULT_QUALIFIER, EmitConfig, EmitMode, emit, emit_to_string,
};
pub use crate::error::{DefError, GenError};
pub use crate::generate::{DEF_FILE, DISPATCH_HEADER, OPS_HEADER, PROTOTYPES_HEADER, generate};
pub use crate::optable::{ArgCategory, Argument, DispatchKind, OpTable, Signature};
pub use crate::parser::parse_def;
