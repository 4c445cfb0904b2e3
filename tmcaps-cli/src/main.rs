use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tmcaps::{report, Summary, TmCapsError, DEFAULT_GRAMMAR_DIR};

/// tmcaps — check that TextMate grammar capture keys are group indices or metadata
#[derive(Parser)]
#[command(name = "tmcaps", version, about)]
struct Cli {
    /// Directory holding the grammar .json files
    #[arg(long, default_value = DEFAULT_GRAMMAR_DIR)]
    grammar_dir: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(summary) => process::exit(summary.exit_code()),
        Err(e) => {
            match cli.format {
                OutputFormat::Text => println!("❌ {}", fatal_message(e.as_ref())),
                OutputFormat::Json | OutputFormat::Yaml => eprintln!("ERROR:{e}"),
            }
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<Summary, Box<dyn std::error::Error>> {
    log::info!("Scanning grammars in {}", cli.grammar_dir.display());

    match cli.format {
        OutputFormat::Text => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let summary = tmcaps::verify_directory(&cli.grammar_dir, &mut out)?;
            report::write_summary(&mut out, &summary)?;
            out.flush()?;
            Ok(summary)
        }
        OutputFormat::Json => {
            let summary = tmcaps::verify_directory(&cli.grammar_dir, &mut io::sink())?;
            println!("{}", report::to_json(&cli.grammar_dir, &summary)?);
            Ok(summary)
        }
        OutputFormat::Yaml => {
            let summary = tmcaps::verify_directory(&cli.grammar_dir, &mut io::sink())?;
            print!("{}", report::to_yaml(&cli.grammar_dir, &summary)?);
            Ok(summary)
        }
    }
}

fn fatal_message(e: &(dyn std::error::Error + 'static)) -> String {
    match e.downcast_ref::<TmCapsError>() {
        Some(TmCapsError::NoGrammarFiles(_)) => "No .json grammar files found!".to_string(),
        _ => e.to_string(),
    }
}
