#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use castnet_core::error::CastnetError;
use output::{CliError, OutputMode, render_error};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "castnet: person-name co-occurrence network analysis",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-error logging.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Run the co-occurrence pipeline",
        long_about = "Load the labeled CSV, extract person names, build and filter the \
                      co-occurrence graph, render the visualization, and export the \
                      centrality table.",
        after_help = "EXAMPLES:\n    # Defaults: data/fake_or_real_news.csv, threshold 10\n    cn analyze\n\n    # Another corpus and a lower threshold\n    cn analyze -f articles.csv -e 3\n\n    # Machine-readable run summary, reproducible layout\n    cn analyze --json --seed 7"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    cn completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("CASTNET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if quiet {
            "castnet=error,error"
        } else if verbose || env::var("DEBUG").is_ok() {
            "castnet=debug,info"
        } else {
            "castnet=info,warn"
        })
    });

    let format = env::var("CASTNET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let mode = cli.output_mode();
    let root = match env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            let _ = render_error(mode, &CliError::new(format!("cannot resolve cwd: {err}")));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Analyze(ref args) => cmd::analyze::run_analyze(args, mode, &root),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    };

    if let Err(err) = result {
        let cli_error = err
            .downcast_ref::<CastnetError>()
            .map_or_else(|| CliError::new(format!("{err:#}")), CliError::from);
        let _ = render_error(mode, &cli_error);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["cn", "--json", "analyze"]);
        assert!(cli.json);
        assert!(cli.output_mode().is_json());
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["cn", "analyze", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn short_flags_map_to_file_and_edges() {
        let cli = Cli::parse_from(["cn", "analyze", "-f", "news.csv", "-e", "3"]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.file.as_deref(), Some("news.csv"));
        assert_eq!(args.edges, Some(3));
    }

    #[test]
    fn analyze_defaults_are_unset() {
        let cli = Cli::parse_from(["cn", "analyze"]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert!(args.file.is_none());
        assert!(args.edges.is_none());
        assert!(!args.no_viz);
    }
}
