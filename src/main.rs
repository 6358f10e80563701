// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use wordsearch::utils::logging::{format_case, format_error, format_info, format_success, format_warning};
use wordsearch::{CertificateWriter, Config, SearchOrchestrator};

#[derive(Parser)]
#[command(name = "wordsearch")]
#[command(version)]
#[command(about = "Exact-word search over HTML/XML documents with certified results", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the corpus for one or more words and write a certificate
    Search {
        /// Words to search for; the first one names the certificate directory
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,

        #[arg(long, value_name = "DIR")]
        corpus: Option<PathBuf>,

        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[arg(long, value_name = "NUM")]
        workers: Option<usize>,

        #[arg(long)]
        no_progress: bool,

        /// Print the certificate as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Recompute and check the hash of a persisted certificate
    Verify {
        certificate: PathBuf,
    },

    /// List the documents a search would scan
    Files {
        #[arg(long, value_name = "DIR")]
        corpus: Option<PathBuf>,
    },

    /// Run the matcher self-test without touching the corpus
    SelfTest,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    wordsearch::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).context("Failed to load configuration")?
    };

    match cli.command {
        Commands::Search {
            words,
            corpus,
            output,
            workers,
            no_progress,
            json,
        } => {
            let mut config = config;
            if let Some(corpus) = corpus {
                config.corpus.directory = corpus;
            }
            if let Some(output) = output {
                config.output.directory = output;
            }
            if let Some(workers) = workers {
                config.pipeline.parallel_workers = workers;
            }
            cmd_search(config, &words, !no_progress && !json, json).await?;
        }
        Commands::Verify { certificate } => {
            cmd_verify(&certificate)?;
        }
        Commands::Files { corpus } => {
            let mut config = config;
            if let Some(corpus) = corpus {
                config.corpus.directory = corpus;
            }
            cmd_files(config)?;
        }
        Commands::SelfTest => {
            cmd_self_test(config)?;
        }
    }

    Ok(())
}

async fn cmd_search(config: Config, words: &[String], show_progress: bool, json: bool) -> Result<()> {
    let orchestrator = SearchOrchestrator::new(config)
        .context("Invalid configuration")?
        .with_progress(show_progress);

    let outcome = orchestrator.search(words).await.context("Search failed")?;
    let certificate = &outcome.certificate;

    if json {
        println!("{}", serde_json::to_string_pretty(certificate)?);
        return Ok(());
    }

    println!();
    println!("{}", format_info(&format!("Search ID: {}", certificate.search_id)));
    println!("{}", format_info(&format!("Timestamp: {}", certificate.timestamp)));
    println!(
        "{}",
        format_info(&format!(
            "Documents scanned: {}",
            certificate.total_documents_scanned
        ))
    );

    for skipped in &certificate.skipped_documents {
        println!(
            "{}",
            format_warning(&format!("Skipped {}: {}", skipped.relative_path, skipped.reason))
        );
    }

    for word in &certificate.requested_words {
        let Some(result) = certificate.results.get(word) else {
            continue;
        };
        println!();
        println!(
            "  \"{}\": {} hit(s) in {} document(s)",
            word,
            result.total_hits(),
            result.documents_with_hits()
        );
        for document in result.per_document.iter().filter(|d| d.hit_count > 0) {
            println!("    {} ({})", document.relative_path, document.hit_count);
        }
    }

    println!();
    if certificate.positive_control.all_passed {
        println!("{}", format_success("Positive control passed"));
    } else {
        let warning = certificate
            .positive_control
            .warning
            .as_deref()
            .unwrap_or("Positive control failed");
        println!("{}", format_error(warning));
    }

    println!(
        "{}",
        format_success(&format!(
            "Certificate written to {}",
            outcome.certificate_path.display()
        ))
    );
    println!("  hash: {}", certificate.certificate_hash);
    println!(
        "  {} highlighted file(s) in {} ms",
        outcome.highlighted_files.len(),
        outcome.stats.duration_ms
    );

    Ok(())
}

fn cmd_verify(path: &Path) -> Result<()> {
    let certificate = CertificateWriter::read(path)
        .with_context(|| format!("Failed to read certificate {}", path.display()))?;

    if certificate.verify()? {
        println!(
            "{}",
            format_success(&format!(
                "Certificate {} is intact ({})",
                certificate.search_id, certificate.certificate_hash
            ))
        );
        Ok(())
    } else {
        println!(
            "{}",
            format_error(&format!(
                "Certificate {} does not match its recorded hash",
                certificate.search_id
            ))
        );
        Err(anyhow::anyhow!("Certificate hash mismatch"))
    }
}

fn cmd_files(config: Config) -> Result<()> {
    let directory = config.corpus.directory.clone();
    let orchestrator = SearchOrchestrator::new(config).context("Invalid configuration")?;
    let files = orchestrator
        .list_files()
        .with_context(|| format!("Failed to scan {}", directory.display()))?;

    for file in &files {
        println!(
            "{:>10}  {}  {}",
            file.size,
            file.modified.as_deref().unwrap_or("-"),
            file.relative_path
        );
    }
    println!();
    println!("{}", format_info(&format!("{} file(s)", files.len())));

    Ok(())
}

fn cmd_self_test(config: Config) -> Result<()> {
    let orchestrator = SearchOrchestrator::new(config).context("Invalid configuration")?;
    let result = orchestrator.run_positive_control();

    for case in &result.test_cases {
        println!(
            "{}",
            format_case(&case.name, case.expected_hit, case.actual_hit, case.passed)
        );
    }

    if result.all_passed {
        println!("{}", format_success("All self-test cases passed"));
        Ok(())
    } else {
        println!("{}", format_error("Self-test failed"));
        Err(anyhow::anyhow!("Matcher self-test failed"))
    }
}
