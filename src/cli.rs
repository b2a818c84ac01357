use clap::IntoApp;
use clap::{AppSettings, Parser};
use std::path::PathBuf;

/// Average the value columns (4th onward) of every bed file in a directory,
/// writing one bedGraph per input with the coordinates and the row mean.
///
/// Run without options to read `input/*.bed` and write `output/<name>Graph`.
#[derive(Parser, Debug)]
#[clap(author, version, help_expected = true)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
pub struct Cli {
    /// Directory holding the bed files.
    #[clap(short, long, default_value = "input")]
    pub input: PathBuf,

    /// Directory for the bedGraph files, it must already exist.
    #[clap(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Glob of input file names. Inputs ending in `.gz` are decompressed.
    #[clap(short, long, default_value = "*.bed")]
    pub pattern: String,

    /// Appended to each output file name. End it with `.gz` to compress.
    #[clap(short, long, default_value = "Graph")]
    pub suffix: String,

    /// Number of leading characters removed from the discovered input path
    /// (e.g. `input/chr1.bed`) to form the output file name.
    #[clap(long, default_value_t = 6)]
    pub strip: usize,

    /// Header lines to discard from the top of each input.
    #[clap(long, default_value_t = 1)]
    pub skip: usize,

    /// Process every file and report all failures instead of stopping at the first.
    #[clap(short, long)]
    pub keep_going: bool,

    /// Logging level [-v: Info, -vv: Debug, -vvv: Trace].
    #[clap(short, long, parse(from_occurrences), help_heading = "DEBUG")]
    pub verbose: usize,
}

pub fn make_cli_parse() -> Cli {
    Cli::parse()
}

pub fn make_cli_app() -> clap::Command<'static> {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        make_cli_app().debug_assert();
    }

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["avgtracks"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("input"));
        assert_eq!(cli.output, PathBuf::from("output"));
        assert_eq!(cli.pattern, "*.bed");
        assert_eq!(cli.suffix, "Graph");
        assert_eq!(cli.strip, 6);
        assert_eq!(cli.skip, 1);
        assert!(!cli.keep_going);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "avgtracks", "-i", "tracks", "-o", "out", "-p", "*.bed.gz", "-s", ".bg", "--strip",
            "7", "--skip", "2", "-k", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.input, PathBuf::from("tracks"));
        assert_eq!(cli.pattern, "*.bed.gz");
        assert_eq!(cli.suffix, ".bg");
        assert_eq!(cli.strip, 7);
        assert_eq!(cli.skip, 2);
        assert!(cli.keep_going);
        assert_eq!(cli.verbose, 2);
    }
}
