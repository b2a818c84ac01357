use anyhow::Context;
use avgtracks::average::{self, RunOptions};
use avgtracks::cli;
use colored::Colorize;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    parse_cli()
}

pub fn parse_cli() -> anyhow::Result<()> {
    let pg_start = Instant::now();
    let args = cli::make_cli_parse();

    // set the logging level
    let min_log_level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .target(Target::Stderr)
        .filter(None, min_log_level)
        .init();

    log::debug!("DEBUG logging enabled");
    log::trace!("TRACE logging enabled");

    let opts = RunOptions::from(&args);
    log::debug!("{:?}", opts);
    let outputs = average::run(&opts).with_context(|| {
        format!(
            "failed to average {} files in {}",
            opts.pattern,
            opts.input_dir.display()
        )
    })?;

    let duration = pg_start.elapsed();
    log::info!(
        "{} {} files done! Time elapsed: {}",
        "avgtracks".bright_green().bold(),
        outputs.len(),
        format!("{:.2?}", duration).bright_yellow().bold()
    );
    Ok(())
}
