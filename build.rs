// in build.rs
use clap_complete::{generate_to, Shell};
use std::env;
use std::io;

include!("src/cli.rs");

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=src/cli.rs");
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut app = make_cli_app();
    for shell in [Shell::Bash, Shell::Zsh] {
        generate_to(shell, &mut app, "avgtracks", &outdir)?;
    }
    Ok(())
}
