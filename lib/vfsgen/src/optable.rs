//! The parsed form of a VFS operation table.

use serde::{Deserialize, Serialize};

/// How a generated trampoline locates the `wasi_vfs_ops` table for a call.
///
/// The route is resolved while parsing, so emission never has to inspect
/// argument types again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchKind {
    /// Route through `path_vfs_ops`, keyed on the path argument at
    /// `reference`. Every later path argument is guarded with `check_xdev`
    /// against the reference before the call is forwarded.
    Path {
        /// Index of the reference path argument.
        reference: usize,
    },
    /// Route through `fdinfo_vfs_ops`, keyed on the descriptor argument at
    /// `context`.
    Descriptor {
        /// Index of the descriptor context argument.
        context: usize,
    },
}

/// The type marker recognized in an argument declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgCategory {
    /// The declaration ends in `struct path_info *<ident>`.
    PathInfo,
    /// The declaration ends in `struct wasi_fdinfo *<ident>`.
    Fdinfo,
    /// Anything else.
    Plain,
}

/// One argument of an operation, kept verbatim from the definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// The declaration exactly as written, e.g. `const char *path`, with
    /// surrounding whitespace trimmed.
    pub text: String,
    /// The trailing identifier of the declaration, e.g. `path`.
    pub ident: String,
    /// The recognized type marker.
    pub category: ArgCategory,
}

/// One operation of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// The operation name, e.g. `path_open`.
    pub name: String,
    /// The arguments, in declaration order.
    pub args: Vec<Argument>,
    /// The dispatch route resolved for this operation.
    pub dispatch: DispatchKind,
}

impl Signature {
    /// The argument declarations joined for a C parameter list.
    pub fn decl_list(&self) -> String {
        self.args
            .iter()
            .map(|arg| arg.text.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The argument identifiers joined for a forwarded call.
    pub fn ident_list(&self) -> String {
        self.args
            .iter()
            .map(|arg| arg.ident.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// An operation table parsed from a definition file.
///
/// Operations keep the order of the definition file and are emitted in that
/// order. Names are unique; the parser rejects duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpTable {
    /// The operations, in definition order.
    pub ops: Vec<Signature>,
}

impl OpTable {
    /// Number of operations in the table.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the table holds no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over the operations in definition order.
    pub fn iter(&self) -> std::slice::Iter<'_, Signature> {
        self.ops.iter()
    }
}

impl<'a> IntoIterator for &'a OpTable {
    type Item = &'a Signature;
    type IntoIter = std::slice::Iter<'a, Signature>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod test {
    use crate::parser::parse_def;

    #[test]
    fn join_helpers() {
        let table =
            parse_def("fd_seek(struct wasi_fdinfo *fdinfo, wasi_off_t offset, uint32_t whence);")
                .unwrap();
        let sig = &table.ops[0];
        assert_eq!(
            sig.decl_list(),
            "struct wasi_fdinfo *fdinfo, wasi_off_t offset, uint32_t whence"
        );
        assert_eq!(sig.ident_list(), "fdinfo, offset, whence");
    }
}
