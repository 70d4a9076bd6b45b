//! Pretty error reporting for the CLI.

use std::fmt;

use anyhow::Error;

/// A wrapper type that prints an `anyhow::Error` chain nicely.
pub struct PrettyError {
    error: Error,
}

impl PrettyError {
    /// Process a `Result`, reporting any error chain to stderr and exiting
    /// the process after.
    pub fn report<T>(result: Result<T, Error>) -> ! {
        std::process::exit(match result {
            Ok(_) => 0,
            Err(error) => {
                eprintln!("{:?}", PrettyError { error });
                1
            }
        });
    }
}

impl fmt::Debug for PrettyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.error)?;
        for cause in self.error.chain().skip(1) {
            write!(f, "\ncaused by: {cause}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use anyhow::Context;

    use super::*;

    #[test]
    fn debug_output_includes_the_whole_chain() {
        let error = std::io::Error::other("disk on fire");
        let result: Result<(), _> = Err(error).context("failed to write `wasi_vfs.h`");
        let rendered = format!("{:?}", PrettyError {
            error: result.unwrap_err(),
        });
        assert_eq!(
            rendered,
            "error: failed to write `wasi_vfs.h`\ncaused by: disk on fire"
        );
    }
}
