//! @ai:module:intent CLI entry point for the apiDoc annotation validator
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on linter, validator, output, config

use apidoc_check::{
    linter, lookup, output, validate_dialect, Config, Dialect, OutputFormat,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "apidoc-check")]
#[command(author, version, about = "Validate apiDoc annotation blocks in source comments")]
struct Cli {
    /// Path to a config file (defaults to ./apidoc-check.toml when present)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single annotation file, or stdin with `-`
    Check {
        /// Path to the file, `-` reads from stdin
        path: PathBuf,

        /// Dialect id or language alias, overrides detection
        #[arg(long, short)]
        dialect: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Validate every annotation file below a directory
    Lint {
        /// Directory to walk
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Dialect id or language alias applied to every annotation file found
        #[arg(long, short)]
        dialect: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Print the starter annotation block for a dialect
    Template {
        /// Dialect id or language alias
        dialect: String,
    },

    /// List supported dialects
    Dialects,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("apidoc_check=warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match Config::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Commands::Check {
            path,
            dialect,
            format,
        } => {
            let config = config.with_dialect(dialect);

            if path.as_os_str() == "-" {
                check_stdin(&config, format.into())
            } else {
                match linter::check_file(&path, &config) {
                    Ok(report) => {
                        println!("{}", output::format_file_report(&report, format.into()));
                        exit_for(report.is_valid())
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        ExitCode::from(2)
                    }
                }
            }
        }

        Commands::Lint {
            path,
            dialect,
            format,
        } => match linter::lint_directory(&path, &config.with_dialect(dialect)) {
            Ok(result) => {
                println!("{}", output::format_lint_result(&result, format.into()));
                exit_for(result.passed())
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        },

        Commands::Template { dialect } => match lookup(&dialect) {
            Ok(dialect) => {
                print!("{}", dialect.template());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        },

        Commands::Dialects => {
            for dialect in Dialect::ALL {
                let envelope = dialect.envelope();
                println!(
                    "{:<13} {:<11} {:<7} {:<7} {}",
                    dialect.id(),
                    dialect.alias(),
                    envelope.start,
                    envelope.end,
                    envelope.line_prefix.unwrap_or("-")
                );
            }
            ExitCode::SUCCESS
        }
    }
}

fn check_stdin(config: &Config, format: OutputFormat) -> ExitCode {
    let Some(id) = config.dialect.as_deref() else {
        eprintln!("Error: reading from stdin requires --dialect");
        return ExitCode::from(2);
    };

    let dialect = match lookup(id) {
        Ok(dialect) => dialect,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let mut text = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut text) {
        eprintln!("Error: {}", e);
        return ExitCode::from(2);
    }

    let diagnostics = validate_dialect(&text, dialect);
    println!("{}", output::format_diagnostics("<stdin>", &diagnostics, format));
    exit_for(diagnostics.is_empty())
}

fn exit_for(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
