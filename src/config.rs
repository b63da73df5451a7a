//! Configuration handling for csvmatrix

use std::path::PathBuf;

/// Maximum number of columns a matrix accepts by default
pub const DEFAULT_MAX_COLUMNS: usize = 155;

/// Slots reserved per column when its type is bound
pub const DEFAULT_INITIAL_CAPACITY: usize = 256;

/// Longest accepted line, in bytes, excluding the terminator
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

/// What to do with a data row that has the wrong arity or an unparsable field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowPolicy {
    /// Abort ingestion on the first malformed row
    #[default]
    Strict,
    /// Record the row in the report and skip it
    Lenient,
}

impl std::str::FromStr for RowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(RowPolicy::Strict),
            "lenient" => Ok(RowPolicy::Lenient),
            _ => Err(format!("Unknown row policy: {}", s)),
        }
    }
}

impl std::fmt::Display for RowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowPolicy::Strict => write!(f, "strict"),
            RowPolicy::Lenient => write!(f, "lenient"),
        }
    }
}

/// How much of a field the float parser must consume
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FloatPolicy {
    /// The whole trimmed field must be a float literal
    #[default]
    Strict,
    /// A leading float literal is enough; the rest of the field is ignored
    Prefix,
}

impl std::str::FromStr for FloatPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(FloatPolicy::Strict),
            "prefix" => Ok(FloatPolicy::Prefix),
            _ => Err(format!("Unknown float policy: {}", s)),
        }
    }
}

impl std::fmt::Display for FloatPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FloatPolicy::Strict => write!(f, "strict"),
            FloatPolicy::Prefix => write!(f, "prefix"),
        }
    }
}

/// Output format for the ingested matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Summary,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "summary" => Ok(OutputFormat::Summary),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration for ingestion and output
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the delimited text file
    pub input: PathBuf,
    /// Field delimiter
    pub delimiter: char,
    /// Upper bound on the number of columns
    pub max_columns: usize,
    /// Slots reserved per column at type-binding time
    pub initial_capacity: usize,
    /// Longest accepted line in bytes
    pub max_line_length: usize,
    /// Handling of malformed data rows
    pub row_policy: RowPolicy,
    /// Float parsing strictness
    pub float_policy: FloatPolicy,
    /// Output format
    pub output_format: OutputFormat,
    /// Only print this column
    pub column: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            delimiter: ',',
            max_columns: DEFAULT_MAX_COLUMNS,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            row_policy: RowPolicy::default(),
            float_policy: FloatPolicy::default(),
            output_format: OutputFormat::default(),
            column: None,
        }
    }
}

impl Config {
    /// Create a new Config for an input file
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.row_policy = policy;
        self
    }

    pub fn with_float_policy(mut self, policy: FloatPolicy) -> Self {
        self.float_policy = policy;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Restrict output to a single column
    pub fn with_column(mut self, column: String) -> Self {
        self.column = Some(column);
        self
    }
}
