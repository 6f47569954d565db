//! Interpreter generation detection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Major version family of the PHP interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhpVersion {
    /// The version output contained no line starting with `PHP`
    Unknown,
    Php4,
    Php5,
    Php6,
    /// A `PHP` line was found but its major digit is not a mapped generation
    Unrecognized,
}

impl PhpVersion {
    /// Parse the first line of `php -v` output.
    ///
    /// Assumes the exact shape `PHP <digit>.x.y ...`: the major digit is read
    /// from byte offset 4 and nothing else is inspected. `PHP 7.0.1` and
    /// `PHP 10.1` therefore both come out as `Unrecognized`.
    #[must_use]
    pub fn from_version_line(line: &str) -> Self {
        match line.get(4..5) {
            Some("4") => PhpVersion::Php4,
            Some("5") => PhpVersion::Php5,
            Some("6") => PhpVersion::Php6,
            _ => PhpVersion::Unrecognized,
        }
    }

    /// Upper-case name as reported in logs
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PhpVersion::Unknown => "UNKNOWN",
            PhpVersion::Php4 => "PHP4",
            PhpVersion::Php5 => "PHP5",
            PhpVersion::Php6 => "PHP6",
            PhpVersion::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for PhpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
