use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_FILE: &str = "project_source_code.txt";
pub const DEFAULT_INCLUDE_DIRS: &[&str] =
    &["app", "components", "hooks", "lib", "data", "types", "styles"];
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["node_modules", ".next", "out", ".git"];
pub const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".css"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

impl OutputTarget {
    /// `-` selects stdout, anything else is a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::File(path) => write!(f, "{}", path.display()),
            OutputTarget::Stdout => write!(f, "<stdout>"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub root: PathBuf,
    pub include_dirs: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub extensions: Vec<String>,
    pub output: OutputTarget,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            include_dirs: to_owned_list(DEFAULT_INCLUDE_DIRS),
            exclude_dirs: to_owned_list(DEFAULT_EXCLUDE_DIRS),
            extensions: to_owned_list(DEFAULT_EXTENSIONS),
            output: OutputTarget::File(PathBuf::from(DEFAULT_OUTPUT_FILE)),
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|&s| s.to_string()).collect()
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CollectSummary {
    pub files_written: usize,
    pub files_failed: usize,
    pub files_skipped: usize,
    pub dirs_pruned: usize,
    pub bytes_written: usize,
}
