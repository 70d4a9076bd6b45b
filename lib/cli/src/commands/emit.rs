use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::NamedTempFile;
use wasi_vfsgen::{
    DEF_FILE, DEFAULT_PREFIX, DEFAULT_QUALIFIER, EmitConfig, EmitMode, emit, parse_def,
};

/// Emit a single artifact of the operation table with explicit settings.
///
/// This reaches the variants the standard run leaves out, like prototypes
/// and table initializers for a host implementation:
///
/// ```text
/// $ wasi-vfsgen emit -m struct-init --prefix wasi_host_
/// ```
#[derive(clap::Parser, Debug)]
pub struct Emit {
    /// The artifact to emit.
    #[clap(short = 'm', long, value_enum)]
    mode: ModeArg,

    /// Path of the definition file.
    #[clap(short = 'i', long, default_value = DEF_FILE)]
    input: PathBuf,

    /// Prefix of the generated function and table names.
    #[clap(long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Storage qualifier of table initializers.
    #[clap(long, default_value = DEFAULT_QUALIFIER)]
    qualifier: String,

    /// Output file; standard output when omitted.
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,
}

/// Artifact selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ModeArg {
    /// The `struct wasi_vfs_ops` declaration.
    StructDecl,
    /// Prefixed prototypes.
    Prototypes,
    /// A table initializer.
    StructInit,
    /// Dispatch trampolines.
    Dispatch,
}

impl From<ModeArg> for EmitMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::StructDecl => EmitMode::StructDeclaration,
            ModeArg::Prototypes => EmitMode::PrototypeList,
            ModeArg::StructInit => EmitMode::StructInitializer,
            ModeArg::Dispatch => EmitMode::DispatchBodies,
        }
    }
}

impl Emit {
    /// Runs the `emit` subcommand.
    pub fn execute(&self) -> Result<(), anyhow::Error> {
        let content = std::fs::read_to_string(&self.input).with_context(|| {
            format!("failed to read definition file `{}`", self.input.display())
        })?;
        let table = parse_def(&content)
            .with_context(|| format!("failed to parse `{}`", self.input.display()))?;
        let config = EmitConfig {
            mode: self.mode.into(),
            prefix: self.prefix.clone(),
            qualifier: self.qualifier.clone(),
        };
        match &self.output {
            Some(path) => {
                // Stage next to the final location so a failed emission
                // cannot leave a truncated file behind.
                let dir = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent,
                    _ => Path::new("."),
                };
                let mut tmp = NamedTempFile::new_in(dir)
                    .with_context(|| format!("failed to stage output for `{}`", path.display()))?;
                emit(&table, &config, &mut tmp)
                    .with_context(|| format!("failed to render `{}`", path.display()))?;
                tmp.persist(path)
                    .with_context(|| format!("failed to write `{}`", path.display()))?;
            }
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                emit(&table, &config, &mut handle).context("failed to write to stdout")?;
                handle.flush().context("failed to write to stdout")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn emits_a_host_initializer_to_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let def_path = dir.path().join("table.def");
        std::fs::write(&def_path, "fd_close(struct wasi_fdinfo *fdinfo);\n").unwrap();
        let out_path = dir.path().join("wasi_vfs_impl_host.h");

        let cmd = Emit {
            mode: ModeArg::StructInit,
            input: def_path,
            prefix: "wasi_host_".to_owned(),
            qualifier: DEFAULT_QUALIFIER.to_owned(),
            output: Some(out_path.clone()),
        };
        cmd.execute().unwrap();

        let out = std::fs::read_to_string(&out_path).unwrap();
        assert_eq!(
            out,
            "/* this file is generated by wasi-vfsgen */\n\
             #include \"wasi_vfs_types.h\"\n\
             static const struct wasi_vfs_ops wasi_host_ops = {\n\
             \t.fd_close = wasi_host_fd_close,\n\
             };\n"
        );
    }

    #[test]
    fn parse_failure_leaves_no_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let def_path = dir.path().join("table.def");
        std::fs::write(&def_path, "bad_stmt_no_parens;\n").unwrap();
        let out_path = dir.path().join("out.h");

        let cmd = Emit {
            mode: ModeArg::Prototypes,
            input: def_path,
            prefix: DEFAULT_PREFIX.to_owned(),
            qualifier: DEFAULT_QUALIFIER.to_owned(),
            output: Some(out_path.clone()),
        };
        assert!(cmd.execute().is_err());
        assert!(!out_path.exists());
    }
}
