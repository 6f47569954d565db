//! Include-path flag formatting

use phpexec_core::PHP_FLAG_INCLUDES;

/// Platform path-list separator (`:` on unix, `;` on windows)
#[cfg(windows)]
pub const PATH_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const PATH_SEPARATOR: char = ':';

/// Build the `-d include_path="..."` flag for the given search paths.
///
/// Every entry is preceded by the platform separator, the first one included,
/// so `["/a", "/b"]` becomes `-d include_path=":/a:/b"` on unix. An empty
/// list yields `-d include_path=""`.
pub fn include_path_parameter<I, S>(paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    include_path_parameter_with_separator(paths, PATH_SEPARATOR)
}

/// [`include_path_parameter`] with an explicit separator
pub fn include_path_parameter_with_separator<I, S>(paths: I, separator: char) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parameter = format!("{PHP_FLAG_INCLUDES}=\"");
    for path in paths {
        parameter.push(separator);
        parameter.push_str(path.as_ref());
    }
    parameter.push('"');
    parameter
}
