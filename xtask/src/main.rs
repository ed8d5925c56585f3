use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "xtask", about = "Task runner for the prime relay workspace")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tests of one package, or of the whole workspace
    Test {
        #[arg(value_enum)]
        package: Option<Package>,
    },
    /// Formatting, clippy and workspace tests
    Ci,
    /// Build the `prime_worker` Lambda binary in release mode
    LambdaBuild {
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Package {
    Core,
    Lambda,
}

impl Package {
    fn crate_name(self) -> &'static str {
        match self {
            Self::Core => "prime_relay_core",
            Self::Lambda => "prime_relay_lambda",
        }
    }
}

/// Runs one cargo invocation and exits with its code when it fails.
fn cargo(args: &[&str]) {
    eprintln!("+ cargo {}", args.join(" "));
    match Command::new("cargo").args(args).status() {
        Ok(status) if status.success() => {}
        Ok(status) => exit(status.code().unwrap_or(1)),
        Err(error) => {
            eprintln!("could not start cargo: {error}");
            exit(1);
        }
    }
}

fn main() {
    match Cli::parse().command {
        Commands::Test { package: Some(package) } => cargo(&["test", "-p", package.crate_name()]),
        Commands::Test { package: None } => cargo(&["test", "--workspace"]),
        Commands::Ci => {
            cargo(&["fmt", "--all", "--", "--check"]);
            cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]);
            cargo(&["test", "--workspace"]);
        }
        Commands::LambdaBuild { target } => cargo(&[
            "build",
            "--release",
            "-p",
            "prime_relay_lambda",
            "--bin",
            "prime_worker",
            "--target",
            &target,
        ]),
    }
}
