use wasi_vfsgen_cli::commands::VfsgenCmd;

fn main() {
    VfsgenCmd::run();
}
