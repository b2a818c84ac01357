use super::bed::{AveragedRecord, Record, N_COORD};
use super::cli::Cli;
use super::error::{AvgError, MeanError, Result};
use super::myio;
use glob::{glob_with, MatchOptions, Pattern};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Where to find the inputs, where to put the outputs, and how to name them.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Glob matched against file names in `input_dir`.
    pub pattern: String,
    /// Appended to every output file name.
    pub suffix: String,
    /// Leading characters dropped from the discovered input path
    /// (`input/chr1.bed` -> `chr1.bed` for the default of 6).
    pub strip: usize,
    /// Lines discarded from the top of every input.
    pub skip: usize,
    /// Attempt every file instead of stopping at the first failure.
    pub keep_going: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            pattern: "*.bed".to_string(),
            suffix: "Graph".to_string(),
            strip: 6,
            skip: 1,
            keep_going: false,
        }
    }
}

impl From<&Cli> for RunOptions {
    fn from(cli: &Cli) -> Self {
        RunOptions {
            input_dir: cli.input.clone(),
            output_dir: cli.output.clone(),
            pattern: cli.pattern.clone(),
            suffix: cli.suffix.clone(),
            strip: cli.strip,
            skip: cli.skip,
            keep_going: cli.keep_going,
        }
    }
}

impl RunOptions {
    /// Output file for an input path as returned by [`discover_inputs`].
    /// # Example
    /// ```
    /// use avgtracks::average::RunOptions;
    /// use std::path::Path;
    /// let opts = RunOptions::default();
    /// assert_eq!(
    ///     opts.output_path(Path::new("input/chr1.bed")),
    ///     Path::new("output/chr1.bedGraph")
    /// );
    /// ```
    pub fn output_path(&self, input: &Path) -> PathBuf {
        self.output_dir
            .join(output_name(input, self.strip, &self.suffix))
    }
}

/// The input path with `strip` leading characters removed and `suffix` appended.
/// Stripping past the end leaves only the suffix.
pub fn output_name(input: &Path, strip: usize, suffix: &str) -> String {
    let mut name: String = input.to_string_lossy().chars().skip(strip).collect();
    name.push_str(suffix);
    name
}

/// The result of averaging a single input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<PathBuf>,
}

/// List the files in `input_dir` that match `pattern`, in natural order.
/// Hidden files are only matched by patterns that start with a dot.
pub fn discover_inputs(input_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    // a missing input directory is an error rather than an empty match
    if !input_dir.is_dir() {
        return Err(AvgError::io(
            input_dir,
            io::Error::new(io::ErrorKind::NotFound, "no such input directory"),
        ));
    }

    let dir = input_dir.to_string_lossy();
    let full = format!(
        "{}/{}",
        Pattern::escape(dir.trim_end_matches('/')),
        pattern
    );
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let mut paths = Vec::new();
    for entry in glob_with(&full, options)? {
        let path = entry.map_err(|e| {
            let source = io::Error::new(e.error().kind(), e.error().to_string());
            AvgError::io(e.path(), source)
        })?;
        if path.is_file() {
            paths.push(path);
        } else {
            log::debug!("skipping non-file match {}", path.display());
        }
    }
    paths.sort_by(|a, b| natord::compare(&a.to_string_lossy(), &b.to_string_lossy()));
    log::debug!("{} files match {}", paths.len(), full);
    Ok(paths)
}

fn average_record<'a>(rec: &Record<'a>, path: &Path, line: usize) -> Result<AveragedRecord<'a>> {
    if rec.len() < N_COORD {
        return Err(AvgError::Malformed {
            path: path.to_path_buf(),
            line,
            fields: rec.len(),
        });
    }
    rec.average().map_err(|e| match e {
        MeanError::Empty => AvgError::EmptyTail {
            path: path.to_path_buf(),
            line,
        },
        MeanError::Parse {
            index,
            value,
            source,
        } => AvgError::Parse {
            path: path.to_path_buf(),
            line,
            column: N_COORD + index + 1,
            value,
            source,
        },
    })
}

/// Average one input file into its bedGraph output, returning the output path.
///
/// The header lines are discarded, then every remaining line becomes
/// `chrom\tstart\tend\tmean`. The output is only created once the header
/// has been read; a failure part way through leaves the partial output behind.
pub fn process_file(input: &Path, opts: &RunOptions) -> Result<PathBuf> {
    let output = opts.output_path(input);
    let mut lines = myio::reader(input)
        .map_err(|e| AvgError::io(input, e))?
        .lines();

    for _ in 0..opts.skip {
        match lines.next() {
            Some(line) => {
                line.map_err(|e| AvgError::io(input, e))?;
            }
            None => {
                return Err(AvgError::MissingHeader {
                    path: input.to_path_buf(),
                })
            }
        }
    }

    let mut out = myio::writer(&output).map_err(|e| AvgError::io(&output, e))?;
    let mut n_recs = 0_usize;
    for (idx, line) in lines.enumerate() {
        let line_no = opts.skip + idx + 1;
        let line = line.map_err(|e| AvgError::io(input, e))?;
        let avg = average_record(&Record::parse(&line), input, line_no)?;
        log::trace!("{}:{} {}", input.display(), line_no, avg);
        writeln!(out, "{}", avg).map_err(|e| AvgError::io(&output, e))?;
        n_recs += 1;
    }
    out.finish().map_err(|e| AvgError::io(&output, e))?;

    log::info!(
        "{} -> {} ({} records)",
        input.display(),
        output.display(),
        n_recs
    );
    Ok(output)
}

/// Attempt every input, collecting a per file outcome.
pub fn process_all(inputs: &[PathBuf], opts: &RunOptions) -> Vec<FileOutcome> {
    inputs
        .iter()
        .map(|path| FileOutcome {
            path: path.clone(),
            result: process_file(path, opts),
        })
        .collect()
}

/// Discover the inputs and average each of them in turn.
///
/// Stops at the first failure unless `opts.keep_going` is set, in which case
/// every file is attempted, each failure is logged, and the run fails with
/// [`AvgError::Failed`] if any file did.
pub fn run(opts: &RunOptions) -> Result<Vec<PathBuf>> {
    let inputs = discover_inputs(&opts.input_dir, &opts.pattern)?;
    if inputs.is_empty() {
        log::warn!(
            "no files match {} in {}",
            opts.pattern,
            opts.input_dir.display()
        );
    }

    if !opts.keep_going {
        return inputs.iter().map(|p| process_file(p, opts)).collect();
    }

    let total = inputs.len();
    let mut outputs = Vec::with_capacity(total);
    let mut failed = 0;
    for outcome in process_all(&inputs, opts) {
        match outcome.result {
            Ok(output) => outputs.push(output),
            Err(e) => {
                log::error!("{}", e);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        return Err(AvgError::Failed { failed, total });
    }
    Ok(outputs)
}
