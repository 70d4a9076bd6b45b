//! The errors the generator can raise.
//!
//! Every error is fatal. The generator never recovers, skips a statement, or
//! writes a partial artifact; callers report the error and leave the output
//! directory untouched.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// An error found while parsing a definition file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefError {
    /// A statement does not have the `name(args)` shape: a missing
    /// parenthesis, or more than one of either kind.
    #[error("malformed statement `{statement}`")]
    MalformedStatement {
        /// The offending statement, with line breaks already stripped.
        statement: String,
    },

    /// An operation name is not a lowercase C identifier.
    #[error("invalid operation name `{name}`")]
    InvalidName {
        /// The text found in name position.
        name: String,
    },

    /// The same operation name appeared twice.
    #[error("duplicate operation `{name}`")]
    DuplicateOperation {
        /// The duplicated name.
        name: String,
    },

    /// An argument declaration does not end in an identifier.
    #[error("argument `{argument}` of `{name}` has no trailing identifier")]
    UnnamedArgument {
        /// The operation the argument belongs to.
        name: String,
        /// The offending declaration fragment.
        argument: String,
    },

    /// A `path_`-named operation has no `struct path_info *` argument to
    /// dispatch on.
    #[error("path operation `{name}` has no path_info argument")]
    MissingPathInfo {
        /// The operation name.
        name: String,
    },

    /// A descriptor operation has neither a `struct wasi_fdinfo *` argument
    /// nor one named `fdinfo` to dispatch on.
    #[error("operation `{name}` has no descriptor argument")]
    MissingDescriptor {
        /// The operation name.
        name: String,
    },
}

/// An error raised by the full generation run.
#[derive(Debug, Error)]
pub enum GenError {
    /// The definition file could not be read.
    #[error("failed to read definition file `{}`", path.display())]
    ReadInput {
        /// Path of the definition file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The definition file did not parse.
    #[error(transparent)]
    Def(#[from] DefError),

    /// A rendered artifact could not be staged next to its final location.
    #[error("failed to stage output for `{}`", path.display())]
    Stage {
        /// Final path of the artifact being staged.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A staged artifact could not be moved to its final location.
    #[error("failed to write output file `{}`", path.display())]
    WriteOutput {
        /// Final path of the artifact.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}
