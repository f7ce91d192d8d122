//! Prefix and suffix word lists.
//!
//! A list comes from exactly one source: an inline comma-separated argument
//! or a file with one token per line. Tokens are trimmed and lowercased;
//! blank entries and `#` comment lines are skipped. Nothing else is
//! validated here, malformed tokens surface later as `invalid` candidates.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, SweepError};

/// Which list a source feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordRole {
    Prefixes,
    Suffixes,
}

impl WordRole {
    fn inline_flag(&self) -> &'static str {
        match self {
            WordRole::Prefixes => "--prefixes",
            WordRole::Suffixes => "--suffixes",
        }
    }

    fn file_flag(&self) -> &'static str {
        match self {
            WordRole::Prefixes => "--prefix-file",
            WordRole::Suffixes => "--suffix-file",
        }
    }
}

impl fmt::Display for WordRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordRole::Prefixes => write!(f, "prefixes"),
            WordRole::Suffixes => write!(f, "suffixes"),
        }
    }
}

/// Where a word list is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSource {
    /// Comma-separated tokens, e.g. `quick,smart`
    Inline(String),
    /// One token per line
    File(PathBuf),
}

impl WordSource {
    /// Pick the single source for a role.
    ///
    /// Supplying both or neither is a usage error.
    pub fn resolve(inline: Option<String>, file: Option<PathBuf>, role: WordRole) -> Result<Self> {
        match (inline, file) {
            (Some(list), None) => Ok(WordSource::Inline(list)),
            (None, Some(path)) => Ok(WordSource::File(path)),
            (Some(_), Some(_)) => Err(crate::usage_error!(
                "{} and {} are mutually exclusive; supply only one source of {}",
                role.inline_flag(),
                role.file_flag(),
                role
            )),
            (None, None) => Err(crate::usage_error!(
                "no {} provided; use {} or {}",
                role,
                role.inline_flag(),
                role.file_flag()
            )),
        }
    }

    /// Read and normalize the tokens of this source.
    pub fn load(&self, role: WordRole) -> Result<WordList> {
        let tokens = match self {
            WordSource::Inline(list) => parse_inline(list),
            WordSource::File(path) => read_file(path)?,
        };

        if tokens.is_empty() {
            return Err(crate::config_error!("no {} provided", role));
        }

        tracing::debug!(role = %role, count = tokens.len(), source = ?self, "Loaded word list");
        Ok(WordList { role, tokens })
    }
}

/// Ordered, normalized, non-empty list of tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    role: WordRole,
    tokens: Vec<String>,
}

impl WordList {
    /// Build a list from already-split tokens, applying the same normalization
    /// as the loaders.
    pub fn new<I, S>(role: WordRole, tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = tokens
            .into_iter()
            .filter_map(|t| normalize_token(t.as_ref()))
            .collect();

        if tokens.is_empty() {
            return Err(crate::config_error!("no {} provided", role));
        }
        Ok(Self { role, tokens })
    }

    /// Drop repeated tokens, keeping the first occurrence.
    pub fn dedupe(self) -> Self {
        let mut seen = HashSet::new();
        let before = self.tokens.len();
        let tokens: Vec<String> = self
            .tokens
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect();

        if tokens.len() != before {
            tracing::debug!(role = %self.role, removed = before - tokens.len(), "Removed duplicate tokens");
        }
        Self {
            role: self.role,
            tokens,
        }
    }

    pub fn role(&self) -> WordRole {
        self.role
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false for a constructed list; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }
}

fn normalize_token(raw: &str) -> Option<String> {
    let token = raw.trim().to_lowercase();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn parse_inline(list: &str) -> Vec<String> {
    list.split(',').filter_map(normalize_token).collect()
}

fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(normalize_token)
        .collect()
}

fn read_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SweepError::io(
            format!("cannot read word list: {}", e),
            Some(path.to_string_lossy().to_string()),
        )
    })?;
    Ok(parse_lines(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_inline_normalization() {
        let list = WordSource::Inline(" Quick, SMART ,,pay ".into())
            .load(WordRole::Prefixes)
            .unwrap();
        assert_eq!(list.tokens(), &["quick", "smart", "pay"]);
    }

    #[test]
    fn test_file_parsing_skips_blanks_and_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# suffixes for fintech").unwrap();
        writeln!(file, "  Pay  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "bank").unwrap();
        writeln!(file, "   # indented comment").unwrap();
        writeln!(file, "\tHub").unwrap();

        let list = WordSource::File(file.path().to_path_buf())
            .load(WordRole::Suffixes)
            .unwrap();
        assert_eq!(list.tokens(), &["pay", "bank", "hub"]);
        assert_eq!(list.role(), WordRole::Suffixes);
    }

    #[test]
    fn test_duplicates_kept_unless_deduped() {
        let list = WordList::new(WordRole::Prefixes, ["go", "Go", "get", "go"]).unwrap();
        assert_eq!(list.len(), 4);
        let list = list.dedupe();
        assert_eq!(list.tokens(), &["go", "get"]);
    }

    #[test]
    fn test_both_or_neither_source_is_usage_error() {
        let both = WordSource::resolve(
            Some("a,b".into()),
            Some(PathBuf::from("p.txt")),
            WordRole::Prefixes,
        );
        assert!(matches!(both, Err(SweepError::Usage { .. })));

        let neither = WordSource::resolve(None, None, WordRole::Suffixes);
        let err = neither.unwrap_err();
        assert!(err.to_string().contains("--suffix-file"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_resolve_single_source() {
        let source = WordSource::resolve(Some("a".into()), None, WordRole::Prefixes).unwrap();
        assert_eq!(source, WordSource::Inline("a".into()));
        let source =
            WordSource::resolve(None, Some(PathBuf::from("s.txt")), WordRole::Suffixes).unwrap();
        assert_eq!(source, WordSource::File(PathBuf::from("s.txt")));
    }

    #[test]
    fn test_empty_list_is_config_error() {
        let err = WordSource::Inline(" , ,".into())
            .load(WordRole::Prefixes)
            .unwrap_err();
        assert!(matches!(err, SweepError::Config { .. }));
        assert!(WordList::new(WordRole::Suffixes, Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error_with_path() {
        let err = WordSource::File(PathBuf::from("/definitely/not/here.txt"))
            .load(WordRole::Prefixes)
            .unwrap_err();
        match err {
            SweepError::Io { path, .. } => assert_eq!(path.as_deref(), Some("/definitely/not/here.txt")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
