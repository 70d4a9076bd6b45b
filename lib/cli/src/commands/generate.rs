use std::path::PathBuf;

use anyhow::Context;
use wasi_vfsgen::{DEF_FILE, generate};

/// Regenerate the standard VFS headers from a definition file.
///
/// Reads `wasi_vfs.def` and writes `wasi_vfs_ops.h`, `wasi_vfs.h` and
/// `wasi_vfs_dispatch.h` next to it. Nothing is written when the definition
/// does not parse.
#[derive(clap::Parser, Debug)]
pub struct Generate {
    /// Path of the definition file.
    #[clap(short = 'i', long, default_value = DEF_FILE)]
    input: PathBuf,

    /// Directory receiving the generated headers.
    #[clap(short = 'o', long, default_value = ".")]
    out_dir: PathBuf,
}

impl Default for Generate {
    fn default() -> Self {
        Generate {
            input: PathBuf::from(DEF_FILE),
            out_dir: PathBuf::from("."),
        }
    }
}

impl Generate {
    /// Runs the `generate` subcommand.
    pub fn execute(&self) -> Result<(), anyhow::Error> {
        generate(&self.input, &self.out_dir).with_context(|| {
            format!(
                "failed to generate VFS headers from `{}`",
                self.input.display()
            )
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn generates_into_an_explicit_directory() {
        let dir = tempfile::tempdir().unwrap();
        let def_path = dir.path().join("table.def");
        std::fs::write(&def_path, "fd_close(struct wasi_fdinfo *fdinfo);\n").unwrap();

        let cmd = Generate {
            input: def_path,
            out_dir: dir.path().to_owned(),
        };
        cmd.execute().unwrap();

        assert!(dir.path().join("wasi_vfs_ops.h").is_file());
        assert!(dir.path().join("wasi_vfs.h").is_file());
        assert!(dir.path().join("wasi_vfs_dispatch.h").is_file());
    }

    #[test]
    fn reports_the_definition_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = Generate {
            input: dir.path().join("missing.def"),
            out_dir: dir.path().to_owned(),
        };
        let err = cmd.execute().unwrap_err();
        assert!(format!("{err:#}").contains("missing.def"));
    }
}
