//! Classpath resolution
//!
//! Resolves the library classpath for a compilation in priority order:
//! 1. `-classpath` / `--cp` command line argument (highest priority)
//! 2. `CLASSPATH` environment variable, when non-empty
//! 3. No classpath at all
//!
//! Entries are split on the platform path separator (`:` on Unix, `;` on Windows).

use std::env;
use std::path::PathBuf;

use crate::common::consts::CLASSPATH_ENV_VAR;

/// Classpath resolver
pub struct ClasspathResolver;

impl ClasspathResolver {
    /// Resolve the classpath string, `None` when nothing was configured
    pub fn resolve_classpath(classpath_arg: Option<&str>) -> Option<String> {
        if let Some(classpath) = classpath_arg {
            tracing::debug!(classpath, source = "argument", "resolved classpath");
            return Some(classpath.to_string());
        }

        if let Ok(classpath_env) = env::var(CLASSPATH_ENV_VAR) {
            if !classpath_env.trim().is_empty() {
                tracing::debug!(classpath = %classpath_env, source = "environment", "resolved classpath");
                return Some(classpath_env);
            }
        }

        tracing::debug!("no classpath configured");
        None
    }

    /// Resolve and split into path entries
    pub fn resolve_entries(classpath_arg: Option<&str>) -> Vec<PathBuf> {
        Self::resolve_classpath(classpath_arg)
            .map(|classpath| {
                Self::parse_classpath_entries(&classpath)
                    .into_iter()
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Parse classpath string into individual entries
    pub fn parse_classpath_entries(classpath: &str) -> Vec<String> {
        if classpath.is_empty() {
            return vec![];
        }

        classpath
            .split(Self::separator())
            .map(|entry| entry.trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect()
    }

    /// Check if classpath contains a specific entry
    pub fn contains_entry(classpath: &str, target_entry: &str) -> bool {
        Self::parse_classpath_entries(classpath)
            .iter()
            .any(|entry| entry == target_entry)
    }

    /// Combine multiple classpath strings with proper separator
    pub fn combine_classpaths(classpaths: &[&str]) -> String {
        let separator = Self::separator().to_string();
        classpaths
            .iter()
            .filter(|cp| !cp.is_empty())
            .map(|cp| cp.to_string())
            .collect::<Vec<_>>()
            .join(separator.as_str())
    }

    fn separator() -> char {
        if cfg!(windows) {
            ';'
        } else {
            ':'
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_wins() {
        let result = ClasspathResolver::resolve_classpath(Some("/path/cp"));
        assert_eq!(result.as_deref(), Some("/path/cp"));
    }

    #[test]
    fn test_parse_classpath_entries() {
        let separator = if cfg!(windows) { ";" } else { ":" };
        let classpath = ["/path1", " /path2 ", "", "/path3"].join(separator);
        let entries = ClasspathResolver::parse_classpath_entries(&classpath);
        assert_eq!(entries, vec!["/path1", "/path2", "/path3"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(ClasspathResolver::parse_classpath_entries("").is_empty());
    }

    #[test]
    fn test_contains_entry() {
        let classpath = ClasspathResolver::combine_classpaths(&["/path1", "/path2"]);
        assert!(ClasspathResolver::contains_entry(&classpath, "/path1"));
        assert!(!ClasspathResolver::contains_entry(&classpath, "/path3"));
    }

    #[test]
    fn test_combine_classpaths() {
        let combined = ClasspathResolver::combine_classpaths(&["/path1", "/path2", ""]);
        let separator = if cfg!(windows) { ";" } else { ":" };
        assert_eq!(combined, format!("/path1{}/path2", separator));
    }
}
