//! Command-related types for safe command execution

use crate::errors::{Error, Result};
use crate::types::EnvironmentVariables;
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

/// Type-safe wrapper for command arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArguments(Vec<String>);

impl CommandArguments {
    /// Create new empty arguments
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Split an argument string into discrete arguments.
    ///
    /// Words are separated by whitespace and grouped by `"` or `'`; the quotes
    /// are removed and everything else, backslashes included, is kept
    /// literally. `-f "C:\my dir\a.php"` yields two arguments. An empty quoted
    /// word is kept as an empty argument. Unbalanced quoting is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut args = Vec::new();
        let mut current = String::new();
        let mut quoted = false;
        let mut open_quote = None;

        for c in raw.chars() {
            match open_quote {
                Some(quote) if c == quote => open_quote = None,
                Some(_) => current.push(c),
                None if c == '"' || c == '\'' => {
                    open_quote = Some(c);
                    quoted = true;
                }
                None if c.is_whitespace() => {
                    if quoted || !current.is_empty() {
                        args.push(std::mem::take(&mut current));
                        quoted = false;
                    }
                }
                None => current.push(c),
            }
        }

        if open_quote.is_some() {
            return Err(Error::launch(raw, "unbalanced quoting in argument string"));
        }
        if quoted || !current.is_empty() {
            args.push(current);
        }
        Ok(Self(args))
    }

    /// Join the arguments back into a string that [`parse`](Self::parse) splits
    /// into the same words
    #[must_use]
    pub fn join(&self) -> String {
        self.0
            .iter()
            .map(|word| quote_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Add an argument
    pub fn push(&mut self, arg: impl Into<String>) {
        self.0.push(arg.into());
    }

    /// Add multiple arguments
    pub fn extend<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(args.into_iter().map(Into::into));
    }

    /// Get a slice of the arguments
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Deref for CommandArguments {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for CommandArguments {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A fully composed invocation: program, argument vector and extra environment.
///
/// Arguments are never re-joined into a shell string for execution; `Display`
/// renders a POSIX shell form for logs and error messages only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: CommandArguments,
    pub env: EnvironmentVariables,
}

impl CommandLine {
    /// Create a command line for `program` with no arguments
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: CommandArguments::new(),
            env: EnvironmentVariables::new(),
        }
    }

    /// Append a single argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg);
        self
    }

    /// Append the words of a shell-style argument string
    pub fn args_from_str(mut self, raw: &str) -> Result<Self> {
        self.args.extend(CommandArguments::parse(raw)?);
        Ok(self)
    }

    /// Replace the extra environment
    #[must_use]
    pub fn env(mut self, env: EnvironmentVariables) -> Self {
        self.env = env;
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in self.args.iter() {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote_word(word: &str) -> Cow<'_, str> {
    if word.is_empty() {
        return Cow::Borrowed("\"\"");
    }
    if !word.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
        return Cow::Borrowed(word);
    }

    // Double quotes themselves can only be written inside single quotes
    let mut quoted = String::with_capacity(word.len() + 2);
    let mut in_double = false;
    for c in word.chars() {
        if c == '"' {
            if in_double {
                quoted.push('"');
                in_double = false;
            }
            quoted.push_str("'\"'");
        } else {
            if !in_double {
                quoted.push('"');
                in_double = true;
            }
            quoted.push(c);
        }
    }
    if in_double {
        quoted.push('"');
    }
    Cow::Owned(quoted)
}

fn quote(word: &str) -> Cow<'_, str> {
    shlex::try_quote(word).unwrap_or(Cow::Borrowed(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_whitespace() {
        let args = CommandArguments::parse("-d  display_errors=1 -f index.php").unwrap();
        assert_eq!(
            args.as_slice(),
            &["-d", "display_errors=1", "-f", "index.php"]
        );
    }

    #[test]
    fn test_parse_keeps_quoted_words_together() {
        let args = CommandArguments::parse(r#"-n "/tmp/my dir/snippet.php" --flag"#).unwrap();
        assert_eq!(
            args.as_slice(),
            &["-n", "/tmp/my dir/snippet.php", "--flag"]
        );
    }

    #[test]
    fn test_parse_keeps_windows_backslashes() {
        let args =
            CommandArguments::parse(r"-f C:\proj\index.php -d include_path=.;C:\lib").unwrap();
        assert_eq!(
            args.as_slice(),
            &["-f", r"C:\proj\index.php", "-d", r"include_path=.;C:\lib"]
        );
    }

    #[test]
    fn test_parse_keeps_quoted_unc_path() {
        let args = CommandArguments::parse(r#""\\server\share\x.php" arg"#).unwrap();
        assert_eq!(args.as_slice(), &[r"\\server\share\x.php", "arg"]);
    }

    #[test]
    fn test_parse_single_quotes_and_empty_words() {
        let args = CommandArguments::parse(r#"-r 'echo "hi";' "" x"#).unwrap();
        assert_eq!(args.as_slice(), &["-r", r#"echo "hi";"#, "", "x"]);
    }

    #[test]
    fn test_parse_quotes_join_adjacent_text() {
        let args = CommandArguments::parse(r#"-d include_path=".:/usr/my lib""#).unwrap();
        assert_eq!(args.as_slice(), &["-d", "include_path=.:/usr/my lib"]);
    }

    #[test]
    fn test_join_is_read_back_by_parse() {
        let mut args = CommandArguments::new();
        args.extend(["-f", "a b.php", "", r#"say "hi""#, "it's", r"C:\lib\x.php"]);
        let joined = args.join();
        assert_eq!(CommandArguments::parse(&joined).unwrap(), args);
        assert!(joined.starts_with(r#"-f "a b.php" """#));
    }

    #[test]
    fn test_parse_empty() {
        assert!(CommandArguments::parse("").unwrap().is_empty());
        assert!(CommandArguments::parse("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_unbalanced_quotes() {
        let err = CommandArguments::parse(r#"-r "echo 1;"#).unwrap_err();
        assert!(matches!(err, Error::Launch { .. }));
    }

    #[test]
    fn test_command_line_display_quotes_spaces() {
        let line = CommandLine::new("php")
            .arg("-f")
            .arg("/tmp/a b.php");
        let rendered = line.to_string();
        assert!(rendered.starts_with("php -f "));
        assert_eq!(
            shlex::split(&rendered).unwrap(),
            vec!["php", "-f", "/tmp/a b.php"]
        );
    }

    #[test]
    fn test_args_from_str_appends() {
        let line = CommandLine::new("php")
            .args_from_str("-n")
            .unwrap()
            .args_from_str("-v")
            .unwrap();
        assert_eq!(line.args.as_slice(), &["-n", "-v"]);
    }
}
