//! Parser for `wasi_vfs.def` operation definitions.
//!
//! The grammar of the definition format is:
//!
//! ```text
//! definition = statement*
//! statement  = name "(" arg ("," arg)* ")" ";"
//! name       = [a-z][_a-z0-9]*
//! arg        = a C parameter declaration ending in an identifier
//! ```
//!
//! Line breaks are insignificant and may fall anywhere, including inside an
//! argument list. There are no comments and no escaping. Text between the
//! closing parenthesis and the `;` is ignored.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::error::DefError;
use crate::optable::{ArgCategory, Argument, DispatchKind, OpTable, Signature};

static OP_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z][_a-z0-9]*$").unwrap());
static TRAILING_IDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z][_a-z0-9]*$").unwrap());
static PATH_INFO_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"struct path_info \*([a-z][_a-z0-9]*)$").unwrap());
static FDINFO_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"struct wasi_fdinfo \*([a-z][_a-z0-9]*)$").unwrap());

/// Name prefix of the operations that dispatch on a path argument.
const PATH_OP_PREFIX: &str = "path_";
/// Conventional identifier of the descriptor argument, accepted when no
/// argument carries the `struct wasi_fdinfo *` marker.
const DESCRIPTOR_IDENT: &str = "fdinfo";

/// Parses the contents of a definition file into an operation table.
///
/// Statement order is preserved. Any malformed statement, unnamed argument,
/// duplicate operation, or operation without a dispatch route fails the
/// whole parse.
pub fn parse_def(content: &str) -> Result<OpTable, DefError> {
    let flat = content.replace(['\n', '\r'], "");
    let mut table = OpTable::default();
    for statement in flat.split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        let (name, args) = split_statement(statement)?;
        if table.iter().any(|sig| sig.name == name) {
            return Err(DefError::DuplicateOperation {
                name: name.to_owned(),
            });
        }
        let args = parse_args(name, args)?;
        let dispatch = resolve_dispatch(name, &args)?;
        trace!(op = name, args = args.len(), "parsed operation");
        table.ops.push(Signature {
            name: name.to_owned(),
            args,
            dispatch,
        });
    }
    debug!(ops = table.len(), "parsed definition");
    Ok(table)
}

/// Splits `name(args)` into its name and argument block, validating the
/// statement shape and the name.
fn split_statement(statement: &str) -> Result<(&str, &str), DefError> {
    let malformed = || DefError::MalformedStatement {
        statement: statement.to_owned(),
    };
    // Exactly one closing parenthesis; anything behind it is ignored.
    let (head, ignored) = statement.split_once(')').ok_or_else(malformed)?;
    if ignored.contains(')') {
        return Err(malformed());
    }
    // Exactly one opening parenthesis in front of it.
    let (name, args) = head.split_once('(').ok_or_else(malformed)?;
    if args.contains('(') {
        return Err(malformed());
    }
    let name = name.trim();
    if !OP_NAME.is_match(name) {
        return Err(DefError::InvalidName {
            name: name.to_owned(),
        });
    }
    Ok((name, args))
}

fn parse_args(name: &str, args: &str) -> Result<Vec<Argument>, DefError> {
    args.split(',')
        .map(|fragment| parse_arg(name, fragment))
        .collect()
}

/// Classifies one argument declaration and resolves its trailing identifier.
///
/// The marker patterns are searched, not anchored, so qualified declarations
/// like `const struct path_info *pi` are still recognized.
fn parse_arg(name: &str, fragment: &str) -> Result<Argument, DefError> {
    let text = fragment.trim();
    let (category, ident) = if let Some(m) = PATH_INFO_ARG.captures(text).and_then(|c| c.get(1)) {
        (ArgCategory::PathInfo, m.as_str())
    } else if let Some(m) = FDINFO_ARG.captures(text).and_then(|c| c.get(1)) {
        (ArgCategory::Fdinfo, m.as_str())
    } else if let Some(m) = TRAILING_IDENT.find(text) {
        (ArgCategory::Plain, m.as_str())
    } else {
        return Err(DefError::UnnamedArgument {
            name: name.to_owned(),
            argument: text.to_owned(),
        });
    };
    Ok(Argument {
        text: text.to_owned(),
        ident: ident.to_owned(),
        category,
    })
}

/// Resolves how the trampoline for `name` finds its operation table.
///
/// `path_` operations key on their first path argument. Everything else
/// keys on a descriptor: the first `struct wasi_fdinfo *` argument, or
/// failing that the first argument named `fdinfo`.
fn resolve_dispatch(name: &str, args: &[Argument]) -> Result<DispatchKind, DefError> {
    if name.starts_with(PATH_OP_PREFIX) {
        let reference = args
            .iter()
            .position(|arg| arg.category == ArgCategory::PathInfo)
            .ok_or_else(|| DefError::MissingPathInfo {
                name: name.to_owned(),
            })?;
        return Ok(DispatchKind::Path { reference });
    }
    let context = args
        .iter()
        .position(|arg| arg.category == ArgCategory::Fdinfo)
        .or_else(|| args.iter().position(|arg| arg.ident == DESCRIPTOR_IDENT))
        .ok_or_else(|| DefError::MissingDescriptor {
            name: name.to_owned(),
        })?;
    Ok(DispatchKind::Descriptor { context })
}
