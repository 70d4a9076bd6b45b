//! The commands available in the wasi-vfsgen binary.

mod emit;
mod generate;

pub use self::{emit::*, generate::*};

use clap::Parser;

use crate::error::PrettyError;

/// Command-line arguments for the wasi-vfsgen CLI.
#[derive(clap::Parser, Debug)]
#[clap(name = "wasi-vfsgen", version)]
#[clap(about = concat!("wasi-vfsgen ", env!("CARGO_PKG_VERSION")))]
pub struct VfsgenCmd {
    #[clap(subcommand)]
    cmd: Option<Cmd>,
}

impl VfsgenCmd {
    fn execute(self) -> Result<(), anyhow::Error> {
        crate::logging::set_up_logging();

        match self.cmd {
            Some(Cmd::Generate(cmd)) => cmd.execute(),
            Some(Cmd::Emit(cmd)) => cmd.execute(),
            // A bare invocation regenerates the standard headers in the
            // current directory.
            None => Generate::default().execute(),
        }
    }

    /// The main function for the wasi-vfsgen CLI.
    pub fn run() {
        PrettyError::report(Self::run_inner())
    }

    fn run_inner() -> Result<(), anyhow::Error> {
        match VfsgenCmd::try_parse() {
            Ok(cmd) => cmd.execute(),
            Err(e) => e.exit(),
        }
    }
}

/// The options for the wasi-vfsgen Command Line Interface.
#[derive(clap::Parser, Debug)]
enum Cmd {
    /// Regenerate the standard VFS headers from a definition file.
    #[clap(alias = "gen")]
    Generate(Generate),

    /// Emit a single artifact with explicit settings.
    Emit(Emit),
}
