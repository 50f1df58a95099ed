//! JVM compiler arguments
//!
//! Every flag is described once in [`FLAGS`]. The table is turned into a
//! `clap::Command` by [`CompilerArguments::command`] and the parsed matches are
//! applied back onto [`CompilerArguments`] by walking the same table, so adding
//! a flag means adding a table row and one arm in the matching `apply_*` method.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::common::classpath::ClasspathResolver;
use crate::common::error::{Error, Result};

/// Value shape of a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Bool,
    Str,
    /// Comma separated, may be repeated
    StrList,
}

/// Default applied when a flag is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagDefault {
    None,
    Bool(bool),
    Str(&'static str),
}

/// One row of the flag table
#[derive(Debug, Clone, Copy)]
pub struct FlagSpec {
    pub name: &'static str,
    pub alias: Option<&'static str>,
    pub kind: FlagKind,
    pub default: FlagDefault,
    pub value_name: Option<&'static str>,
    pub description: &'static str,
}

const fn flag(
    name: &'static str,
    kind: FlagKind,
    default: FlagDefault,
    value_name: Option<&'static str>,
    description: &'static str,
) -> FlagSpec {
    FlagSpec {
        name,
        alias: None,
        kind,
        default,
        value_name,
        description,
    }
}

const fn switch(name: &'static str, description: &'static str) -> FlagSpec {
    flag(name, FlagKind::Bool, FlagDefault::Bool(false), None, description)
}

/// Positional arguments that are not flags
pub const FREE_ARGS: &str = "sources";

pub const FLAGS: &[FlagSpec] = &[
    flag("d", FlagKind::Str, FlagDefault::None, Some("<directory|jar>"), "Destination for generated class files"),
    FlagSpec {
        name: "classpath",
        alias: Some("cp"),
        kind: FlagKind::Str,
        default: FlagDefault::None,
        value_name: Some("<path>"),
        description: "Paths where to find user class files",
    },
    switch("include-runtime", "Include Kotlin runtime in to resulting .jar"),
    flag("jdk-home", FlagKind::Str, FlagDefault::None, Some("<path>"), "Path to JDK home directory to include into classpath, if differs from default JAVA_HOME"),
    switch("no-jdk", "Don't include Java runtime into classpath"),
    switch("no-stdlib", "Don't include Kotlin runtime into classpath"),
    switch("no-reflect", "Don't include Kotlin reflection implementation into classpath"),
    flag("module", FlagKind::Str, FlagDefault::None, Some("<path>"), "Path to the module file to compile"),
    switch("script", "Evaluate the script file"),
    flag("script-templates", FlagKind::StrList, FlagDefault::None, Some("<fully qualified class name[,]>"), "Script definition template classes"),
    flag("kotlin-home", FlagKind::Str, FlagDefault::None, Some("<path>"), "Path to Kotlin compiler home directory, used for runtime libraries discovery"),
    flag("module-name", FlagKind::Str, FlagDefault::None, None, "Module name"),
    flag("jvm-target", FlagKind::Str, FlagDefault::Str(JvmTarget::DEFAULT.description()), Some("<version>"), "Target version of the generated JVM bytecode (1.6 or 1.8), default is 1.6"),
    switch("java-parameters", "Generate metadata for Java 1.8 reflection on method parameters"),
    // Advanced options
    switch("Xno-call-assertions", "Don't generate not-null assertion after each invocation of method returning not-null"),
    switch("Xno-param-assertions", "Don't generate not-null assertions on parameters of methods accessible from Java"),
    switch("Xno-optimize", "Disable optimizations"),
    switch("Xreport-perf", "Report detailed performance statistics"),
    switch("Xmultifile-parts-inherit", "Compile multifile classes as a hierarchy of parts and facade"),
    switch("Xskip-runtime-version-check", "Allow Kotlin runtime libraries of incompatible versions in the classpath"),
    flag("Xdump-declarations-to", FlagKind::Str, FlagDefault::None, Some("<path>"), "Path to JSON file to dump Java to Kotlin declaration mappings"),
    switch("Xsingle-module", "Combine modules for source files and binary dependencies into a single module"),
    switch("Xadd-compiler-builtins", "Add definitions of built-in declarations to the compilation classpath (useful with -no-stdlib)"),
    switch("Xload-builtins-from-dependencies", "Load definitions of built-in declarations from module dependencies, instead of from the compiler"),
    flag("Xscript-resolver-environment", FlagKind::StrList, FlagDefault::None, Some("<key=value[,]>"), "Script resolver environment in key-value pairs (the value could be quoted and escaped)"),
    flag("Xfriend-paths", FlagKind::StrList, FlagDefault::None, Some("<path[,]>"), "Paths to output directories for friend modules"),
];

/// Target bytecode version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JvmTarget {
    Jvm1_6,
    Jvm1_8,
}

impl JvmTarget {
    pub const DEFAULT: JvmTarget = JvmTarget::Jvm1_6;

    pub const fn description(self) -> &'static str {
        match self {
            JvmTarget::Jvm1_6 => "1.6",
            JvmTarget::Jvm1_8 => "1.8",
        }
    }

    /// Class file major version emitted for this target
    pub const fn major_version(self) -> u16 {
        match self {
            JvmTarget::Jvm1_6 => 50,
            JvmTarget::Jvm1_8 => 52,
        }
    }
}

impl FromStr for JvmTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1.6" => Ok(JvmTarget::Jvm1_6),
            "1.8" => Ok(JvmTarget::Jvm1_8),
            other => Err(Error::InvalidJvmTarget { version: other.to_string() }),
        }
    }
}

impl fmt::Display for JvmTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Flat record of compiler invocation flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerArguments {
    pub destination: Option<String>,
    pub classpath: Option<String>,
    pub include_runtime: bool,
    pub jdk_home: Option<String>,
    pub no_jdk: bool,
    pub no_stdlib: bool,
    pub no_reflect: bool,
    pub module: Option<String>,
    pub script: bool,
    pub script_templates: Vec<String>,
    pub kotlin_home: Option<String>,
    pub module_name: Option<String>,
    pub jvm_target: String,
    pub java_parameters: bool,
    pub no_call_assertions: bool,
    pub no_param_assertions: bool,
    pub no_optimize: bool,
    pub report_perf: bool,
    pub inherit_multifile_parts: bool,
    pub skip_runtime_version_check: bool,
    pub declarations_output_path: Option<String>,
    pub single_module: bool,
    pub add_compiler_builtins: bool,
    pub load_builtins_from_dependencies: bool,
    pub script_resolver_environment: Vec<String>,
    pub friend_paths: Vec<String>,
    pub free_args: Vec<String>,
}

impl Default for CompilerArguments {
    fn default() -> Self {
        let mut args = Self::empty();
        for spec in FLAGS {
            let applied = args.apply_default(spec);
            debug_assert!(applied.is_ok(), "flag `{}` has no argument field", spec.name);
        }
        args
    }
}

impl CompilerArguments {
    fn empty() -> Self {
        Self {
            destination: None,
            classpath: None,
            include_runtime: false,
            jdk_home: None,
            no_jdk: false,
            no_stdlib: false,
            no_reflect: false,
            module: None,
            script: false,
            script_templates: Vec::new(),
            kotlin_home: None,
            module_name: None,
            jvm_target: String::new(),
            java_parameters: false,
            no_call_assertions: false,
            no_param_assertions: false,
            no_optimize: false,
            report_perf: false,
            inherit_multifile_parts: false,
            skip_runtime_version_check: false,
            declarations_output_path: None,
            single_module: false,
            add_compiler_builtins: false,
            load_builtins_from_dependencies: false,
            script_resolver_environment: Vec::new(),
            friend_paths: Vec::new(),
            free_args: Vec::new(),
        }
    }

    /// Build the clap command described by [`FLAGS`]
    pub fn command() -> Command {
        let mut command = Command::new("classenv")
            .about("Bootstrap a compilation environment and index its classpath")
            .version(env!("CARGO_PKG_VERSION"));

        for spec in FLAGS {
            command = command.arg(Self::arg_for(spec));
        }

        command.arg(
            Arg::new(FREE_ARGS)
                .value_name("SOURCES")
                .help("Source directories to compile")
                .num_args(1..)
                .action(ArgAction::Append),
        )
    }

    fn arg_for(spec: &FlagSpec) -> Arg {
        let mut arg = Arg::new(spec.name).help(spec.description);

        arg = match single_char(spec.name) {
            Some(short) => arg.short(short),
            None => arg.long(spec.name),
        };

        if let Some(alias) = spec.alias {
            arg = match single_char(alias) {
                Some(short) => arg.visible_short_alias(short),
                None => arg.visible_alias(alias),
            };
        }

        if let Some(value_name) = spec.value_name {
            arg = arg.value_name(value_name);
        }

        match (spec.kind, spec.default) {
            (FlagKind::Bool, _) => arg.action(ArgAction::SetTrue),
            (FlagKind::Str, FlagDefault::Str(default)) => {
                arg.action(ArgAction::Set).default_value(default)
            }
            (FlagKind::Str, _) => arg.action(ArgAction::Set),
            (FlagKind::StrList, _) => arg.action(ArgAction::Append).value_delimiter(','),
        }
    }

    /// Parse a full command line, program name included
    pub fn parse_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command()
            .try_get_matches_from(args)
            .map_err(|e| Error::config_error(e.to_string()))?;
        Self::from_matches(&matches)
    }

    /// Interpret matches produced by [`CompilerArguments::command`]
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let mut args = Self::empty();

        for spec in FLAGS {
            match spec.kind {
                FlagKind::Bool => args.apply_bool(spec.name, matches.get_flag(spec.name))?,
                FlagKind::Str => {
                    let value = matches.get_one::<String>(spec.name).cloned();
                    args.apply_str(spec.name, value)?
                }
                FlagKind::StrList => {
                    let values = matches
                        .get_many::<String>(spec.name)
                        .map(|values| values.cloned().collect())
                        .unwrap_or_default();
                    args.apply_list(spec.name, values)?
                }
            }
        }

        args.free_args = matches
            .get_many::<String>(FREE_ARGS)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        Ok(args)
    }

    fn apply_default(&mut self, spec: &FlagSpec) -> Result<()> {
        match (spec.kind, spec.default) {
            (FlagKind::Bool, FlagDefault::Bool(value)) => self.apply_bool(spec.name, value),
            (FlagKind::Bool, _) => self.apply_bool(spec.name, false),
            (FlagKind::Str, FlagDefault::Str(value)) => {
                self.apply_str(spec.name, Some(value.to_string()))
            }
            (FlagKind::Str, _) => self.apply_str(spec.name, None),
            (FlagKind::StrList, _) => self.apply_list(spec.name, Vec::new()),
        }
    }

    fn apply_bool(&mut self, name: &str, value: bool) -> Result<()> {
        let field = match name {
            "include-runtime" => &mut self.include_runtime,
            "no-jdk" => &mut self.no_jdk,
            "no-stdlib" => &mut self.no_stdlib,
            "no-reflect" => &mut self.no_reflect,
            "script" => &mut self.script,
            "java-parameters" => &mut self.java_parameters,
            "Xno-call-assertions" => &mut self.no_call_assertions,
            "Xno-param-assertions" => &mut self.no_param_assertions,
            "Xno-optimize" => &mut self.no_optimize,
            "Xreport-perf" => &mut self.report_perf,
            "Xmultifile-parts-inherit" => &mut self.inherit_multifile_parts,
            "Xskip-runtime-version-check" => &mut self.skip_runtime_version_check,
            "Xsingle-module" => &mut self.single_module,
            "Xadd-compiler-builtins" => &mut self.add_compiler_builtins,
            "Xload-builtins-from-dependencies" => &mut self.load_builtins_from_dependencies,
            _ => return Err(unmapped(name)),
        };
        *field = value;
        Ok(())
    }

    fn apply_str(&mut self, name: &str, value: Option<String>) -> Result<()> {
        if name == "jvm-target" {
            self.jvm_target = value.unwrap_or_default();
            return Ok(());
        }
        let field = match name {
            "d" => &mut self.destination,
            "classpath" => &mut self.classpath,
            "jdk-home" => &mut self.jdk_home,
            "module" => &mut self.module,
            "kotlin-home" => &mut self.kotlin_home,
            "module-name" => &mut self.module_name,
            "Xdump-declarations-to" => &mut self.declarations_output_path,
            _ => return Err(unmapped(name)),
        };
        *field = value;
        Ok(())
    }

    fn apply_list(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        let field = match name {
            "script-templates" => &mut self.script_templates,
            "Xscript-resolver-environment" => &mut self.script_resolver_environment,
            "Xfriend-paths" => &mut self.friend_paths,
            _ => return Err(unmapped(name)),
        };
        *field = values;
        Ok(())
    }

    /// Validated bytecode target
    pub fn jvm_target(&self) -> Result<JvmTarget> {
        self.jvm_target.parse()
    }

    /// Classpath entries after argument / environment resolution
    pub fn classpath_entries(&self) -> Vec<PathBuf> {
        ClasspathResolver::resolve_entries(self.classpath.as_deref())
    }

    pub fn friend_path_entries(&self) -> Vec<PathBuf> {
        self.friend_paths.iter().map(PathBuf::from).collect()
    }

    pub fn source_entries(&self) -> Vec<PathBuf> {
        self.free_args.iter().map(PathBuf::from).collect()
    }
}

fn single_char(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn unmapped(name: &str) -> Error {
    Error::config_error(format!("flag `{}` has no argument field", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_flag_maps_to_a_field() {
        let mut args = CompilerArguments::empty();
        for spec in FLAGS {
            args.apply_default(spec)
                .unwrap_or_else(|e| panic!("{}: {}", spec.name, e));
        }
    }

    #[test]
    fn test_flag_names_are_unique() {
        let mut names: Vec<&str> = FLAGS
            .iter()
            .flat_map(|spec| std::iter::once(spec.name).chain(spec.alias))
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_command_is_well_formed() {
        CompilerArguments::command().debug_assert();
    }

    #[test]
    fn test_default_jvm_target() {
        let args = CompilerArguments::default();
        assert_eq!(args.jvm_target, "1.6");
        assert_eq!(args.jvm_target().unwrap(), JvmTarget::Jvm1_6);
    }

    #[test]
    fn test_jvm_target_parsing() {
        assert_eq!("1.8".parse::<JvmTarget>().unwrap().major_version(), 52);
        assert!(matches!(
            "11".parse::<JvmTarget>(),
            Err(Error::InvalidJvmTarget { .. })
        ));
    }

    #[test]
    fn test_unknown_field_is_reported() {
        let mut args = CompilerArguments::empty();
        assert!(matches!(args.apply_bool("nope", true), Err(Error::Config { .. })));
    }
}
