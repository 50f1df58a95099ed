// File extensions that make a file a package member

// Source members, in lookup priority order
pub const SOURCE_EXTENSIONS: &[&str] = &["kt", "java"];
// Compiled members
pub const BINARY_EXTENSIONS: &[&str] = &["class"];

// The unnamed package
pub const DEFAULT_PACKAGE: &str = "";

// Module name used when -module-name is not given
pub const DEFAULT_MODULE_NAME: &str = "main";

// Environment variable consulted when no classpath argument is present
pub const CLASSPATH_ENV_VAR: &str = "CLASSPATH";

/// True when `extension` marks a package member (source or compiled)
pub fn is_member_extension(extension: &str) -> bool {
    SOURCE_EXTENSIONS.contains(&extension) || BINARY_EXTENSIONS.contains(&extension)
}

/// True when `segment` can be one component of a package name
pub fn is_package_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
