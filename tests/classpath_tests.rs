//! Classpath resolution tests
//!
//! Priority order: explicit argument, then the CLASSPATH environment variable,
//! then nothing. Everything touching CLASSPATH lives in one test so parallel
//! test threads never observe each other's environment changes.

use std::env;
use std::path::PathBuf;

use classenv::common::classpath::ClasspathResolver;

#[cfg(test)]
mod classpath_priority_tests {
    use super::*;

    #[test]
    fn test_complete_priority_chain() {
        // Save original environment
        let original_classpath = env::var("CLASSPATH").ok();

        // Argument wins over CLASSPATH
        env::set_var("CLASSPATH", "/env/path");
        assert_eq!(
            ClasspathResolver::resolve_classpath(Some("/cmd/classpath")).as_deref(),
            Some("/cmd/classpath")
        );

        // CLASSPATH used when no argument
        assert_eq!(
            ClasspathResolver::resolve_classpath(None).as_deref(),
            Some("/env/path")
        );
        assert_eq!(
            ClasspathResolver::resolve_entries(None),
            vec![PathBuf::from("/env/path")]
        );

        // Blank CLASSPATH counts as unset
        env::set_var("CLASSPATH", "  ");
        assert_eq!(ClasspathResolver::resolve_classpath(None), None);

        // Nothing configured
        env::remove_var("CLASSPATH");
        assert_eq!(ClasspathResolver::resolve_classpath(None), None);
        assert!(ClasspathResolver::resolve_entries(None).is_empty());

        // Clean up environment
        match original_classpath {
            Some(cp) => env::set_var("CLASSPATH", cp),
            None => env::remove_var("CLASSPATH"),
        }
    }

    #[test]
    fn test_empty_argument_is_still_an_argument() {
        assert_eq!(ClasspathResolver::resolve_classpath(Some("")).as_deref(), Some(""));
        assert!(ClasspathResolver::resolve_entries(Some("")).is_empty());
    }
}

#[cfg(all(test, unix))]
mod classpath_parsing_tests {
    use super::*;

    #[test]
    fn test_parse_unix_classpath_entries() {
        let entries = ClasspathResolver::parse_classpath_entries("/path1:/path2:/path3");
        assert_eq!(entries, vec!["/path1", "/path2", "/path3"]);
    }

    #[test]
    fn test_parse_single_entry() {
        let entries = ClasspathResolver::parse_classpath_entries("/single/path");
        assert_eq!(entries, vec!["/single/path"]);
    }

    #[test]
    fn test_parse_with_empty_entries() {
        let entries = ClasspathResolver::parse_classpath_entries("/path1::/path2:");
        assert_eq!(entries, vec!["/path1", "/path2"]);
    }

    #[test]
    fn test_parse_with_whitespace() {
        let entries = ClasspathResolver::parse_classpath_entries(" /path1 : /path2 : /path3 ");
        assert_eq!(entries, vec!["/path1", "/path2", "/path3"]);
    }

    #[test]
    fn test_entries_become_paths() {
        let entries = ClasspathResolver::resolve_entries(Some("/lib/a:/lib/b"));
        assert_eq!(entries, vec![PathBuf::from("/lib/a"), PathBuf::from("/lib/b")]);
    }
}
