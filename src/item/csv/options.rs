use csv::Terminator;
use serde::{Deserialize, Serialize};

/// Line terminator written after the header and every row.
///
/// Configured as `platform`, `lf` or `crlf`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
    /// `\r\n` on Windows, `\n` elsewhere.
    #[default]
    Platform,
    Lf,
    CrLf,
}

impl LineTerminator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineTerminator::Platform if cfg!(windows) => "\r\n",
            LineTerminator::Platform => "\n",
            LineTerminator::Lf => "\n",
            LineTerminator::CrLf => "\r\n",
        }
    }

    /// The terminator handed to the `csv` writer.
    pub fn terminator(&self) -> Terminator {
        match self {
            LineTerminator::Platform if cfg!(windows) => Terminator::CRLF,
            LineTerminator::Platform | LineTerminator::Lf => Terminator::Any(b'\n'),
            LineTerminator::CrLf => Terminator::CRLF,
        }
    }
}

/// What happens when a single cell cannot be converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionPolicy {
    /// Report the error, skip the cell and go on with the next one.
    #[default]
    BestEffort,
    /// Fail the whole call on the first error.
    Strict,
}

/// Codec configuration.
///
/// ```
/// use csv_serializer::item::csv::options::{ConversionPolicy, CsvOptions, LineTerminator};
///
/// let options = CsvOptions::default();
/// assert_eq!(options.line_terminator, LineTerminator::Platform);
/// assert_eq!(options.policy, ConversionPolicy::BestEffort);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub line_terminator: LineTerminator,
    pub policy: ConversionPolicy,
}
