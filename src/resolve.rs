use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Result, VizError};

// ---------------------------------------------------------------------------
// Input path resolution
// ---------------------------------------------------------------------------

/// Directory where the clustering binaries drop their results files.
pub const OUTPUT_DIR: &str = "data/output";

/// Suffix of a results file written by the clustering binaries.
pub const RESULTS_SUFFIX: &str = "_results.csv";

/// Legacy single-output file name kept for compatibility.
pub const LEGACY_NAME: &str = "resultados.csv";

/// Suffix of a raw input file, mapped to its results counterpart.
pub const DATA_SUFFIX: &str = "_data.csv";

const CSV_EXT: &str = ".csv";

/// Resolves the one CSV file a plotting run should read.
///
/// With no argument the resolver walks an ordered list of fallback rules
/// over the output directory; with an argument it interprets the path as a
/// directory to search, a raw input file to map, or a results file to use
/// as-is.
#[derive(Debug, Clone)]
pub struct PathResolver {
    out_dir: PathBuf,
    /// Where the legacy root-level `resultados.csv` is looked up
    /// (the working directory in normal operation).
    legacy_dir: PathBuf,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(OUTPUT_DIR, ".")
    }
}

impl PathResolver {
    pub fn new(out_dir: impl Into<PathBuf>, legacy_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            legacy_dir: legacy_dir.into(),
        }
    }

    /// Resolve the input file, or fail with a user-facing error.
    pub fn resolve(&self, arg: Option<&Path>) -> Result<PathBuf> {
        let Some(arg) = arg else {
            return self.default_candidate().ok_or_else(|| {
                VizError::NotFound(format!(
                    "no CSV found under {}; generate results first",
                    self.out_dir.display()
                ))
            });
        };

        // A directory: newest CSV inside it.
        if arg.is_dir() {
            return newest_matching(arg, |name| name.ends_with(CSV_EXT)).ok_or_else(|| {
                VizError::NotFound(format!("no CSV files in {}", arg.display()))
            });
        }

        // A raw `{base}_data.csv` input: map to the results file the
        // clustering binary would have written for it.
        if let Some(mapped) = self.map_raw_input(arg) {
            if mapped.exists() {
                return Ok(mapped);
            }
            return Err(VizError::NotFound(format!(
                "{} does not exist; run the clustering binary to generate results first",
                mapped.display()
            )));
        }

        // Any existing CSV: use as-is.
        if arg.is_file() {
            return Ok(arg.to_path_buf());
        }

        Err(VizError::InvalidPath(arg.to_path_buf()))
    }

    /// The no-argument fallback chain, in priority order. Each rule yields
    /// a candidate or nothing; the first hit wins.
    fn default_candidate(&self) -> Option<PathBuf> {
        let rules: [fn(&Self) -> Option<PathBuf>; 4] = [
            Self::newest_results_in_output,
            Self::legacy_in_output,
            Self::legacy_in_workdir,
            Self::newest_csv_in_output,
        ];
        let found = rules.iter().find_map(|rule| rule(self));
        if let Some(path) = &found {
            debug!("default candidate: {}", path.display());
        }
        found
    }

    /// Rule 1: newest `*_results.csv` in the output directory.
    fn newest_results_in_output(&self) -> Option<PathBuf> {
        newest_matching(&self.out_dir, |name| name.ends_with(RESULTS_SUFFIX))
    }

    /// Rule 2: legacy `resultados.csv` in the output directory.
    fn legacy_in_output(&self) -> Option<PathBuf> {
        let path = self.out_dir.join(LEGACY_NAME);
        path.is_file().then_some(path)
    }

    /// Rule 3: legacy `resultados.csv` in the working directory.
    fn legacy_in_workdir(&self) -> Option<PathBuf> {
        let path = self.legacy_dir.join(LEGACY_NAME);
        path.is_file().then_some(path)
    }

    /// Rule 4: newest CSV of any name in the output directory.
    fn newest_csv_in_output(&self) -> Option<PathBuf> {
        newest_matching(&self.out_dir, |name| name.ends_with(CSV_EXT))
    }

    /// Map `{base}_data.csv` (any directory) to `<out_dir>/{base}_results.csv`.
    fn map_raw_input(&self, arg: &Path) -> Option<PathBuf> {
        let name = arg.file_name()?.to_str()?;
        let base = name.strip_suffix(DATA_SUFFIX)?;
        Some(self.out_dir.join(format!("{base}{RESULTS_SUFFIX}")))
    }
}

/// Most recently modified file in `dir` whose lowercased name satisfies
/// `pred`. Mtime ties are broken by directory iteration order.
fn newest_matching(dir: &Path, pred: impl Fn(&str) -> bool) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pred(&name.to_ascii_lowercase()))
        })
        .max_by_key(|path| fs::metadata(path).and_then(|meta| meta.modified()).ok())
}
