use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, FromArgMatches};
use classenv::logging::{self, Profile};
use classenv::{CompilerArguments, Environment, ParentScope};

/// Queries answered after the environment is ready
#[derive(Args, Debug)]
struct Queries {
    /// Print every known package with its contributing roots
    #[arg(long)]
    list_packages: bool,

    /// Report whether FILE belongs to a source root, a library root, or neither
    #[arg(long, value_name = "FILE")]
    classify: Vec<PathBuf>,

    /// Locate a class by fully qualified name
    #[arg(long, value_name = "FQN")]
    find_class: Vec<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let matches = Queries::augment_args(CompilerArguments::command()).get_matches();
    let queries = Queries::from_arg_matches(&matches)?;

    logging::init(if queries.verbose { Profile::Development } else { Profile::Quiet });

    let args = CompilerArguments::from_matches(&matches)?;
    let scope = ParentScope::new("classenv");
    let mut env = Environment::create(&scope, args).context("failed to bootstrap environment")?;

    let added = env.add_configured_roots().context("failed to register roots")?;
    if queries.verbose {
        println!("Registered {} roots", added);
    }

    if queries.list_packages {
        list_packages(&env)?;
    }

    for file in &queries.classify {
        println!("{}: {}", file.display(), env.classify(file)?);
    }

    for fqn in &queries.find_class {
        match env.find_class(fqn)? {
            Some(location) => println!(
                "{}: {} ({})",
                fqn,
                location.path.display(),
                location.origin
            ),
            None => println!("{}: not found", fqn),
        }
    }

    env.dispose();
    Ok(())
}

fn list_packages(env: &Environment) -> Result<()> {
    let index = env.package_index()?;
    for package in index.packages() {
        let name = if package.is_empty() { "<default>" } else { package };
        let roots: Vec<String> = index
            .lookup_package(package)
            .iter()
            .map(|root| root.to_string())
            .collect();
        println!("{}: {}", name, roots.join(", "));
    }
    Ok(())
}
