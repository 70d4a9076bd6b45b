//! End-to-end tests of the `emit` subcommand.

use std::fs;
use std::process::Command;

use anyhow::{Result, bail};
use pretty_assertions::assert_eq;

const BIN: &str = env!("CARGO_BIN_EXE_wasi-vfsgen");

#[test]
fn emit_host_initializer_to_stdout() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("wasi_vfs.def"),
        "fd_close(struct wasi_fdinfo *fdinfo);\npath_unlink(const struct path_info *pi);\n",
    )?;

    let output = Command::new(BIN)
        .args(["emit", "-m", "struct-init", "--prefix", "wasi_host_"])
        .current_dir(dir.path())
        .output()?;
    if !output.status.success() {
        bail!(
            "wasi-vfsgen emit failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(
        stdout,
        "/* this file is generated by wasi-vfsgen */\n\
         #include \"wasi_vfs_types.h\"\n\
         static const struct wasi_vfs_ops wasi_host_ops = {\n\
         \t.fd_close = wasi_host_fd_close,\n\
         \t.path_unlink = wasi_host_path_unlink,\n\
         };\n"
    );
    Ok(())
}

#[test]
fn emit_prototypes_to_a_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("wasi_vfs.def"),
        "fd_close(struct wasi_fdinfo *fdinfo);\n",
    )?;
    let out_path = dir.path().join("wasi_vfs_impl_host.h");

    let output = Command::new(BIN)
        .args(["emit", "-m", "prototypes", "--prefix", "wasi_host_", "-o"])
        .arg(&out_path)
        .current_dir(dir.path())
        .output()?;
    if !output.status.success() {
        bail!(
            "wasi-vfsgen emit failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let contents = fs::read_to_string(&out_path)?;
    assert!(contents.contains("int wasi_host_fd_close(struct wasi_fdinfo *fdinfo);\n"));
    Ok(())
}

#[test]
fn emit_dispatch_matches_the_standard_header() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("wasi_vfs.def"),
        "path_link(struct path_info *old, struct path_info *new);\n",
    )?;

    // standard run
    let output = Command::new(BIN).current_dir(dir.path()).output()?;
    if !output.status.success() {
        bail!(
            "wasi-vfsgen failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    // single-mode emission of the same artifact
    let output = Command::new(BIN)
        .args(["emit", "-m", "dispatch"])
        .current_dir(dir.path())
        .output()?;
    if !output.status.success() {
        bail!(
            "wasi-vfsgen emit failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let stdout = String::from_utf8(output.stdout)?;
    let header = fs::read_to_string(dir.path().join("wasi_vfs_dispatch.h"))?;
    assert_eq!(stdout, header);
    Ok(())
}
