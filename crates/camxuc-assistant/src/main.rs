//! camxuc
//!
//! Command-line Vietnamese sentiment assistant. Validates and normalizes
//! input, classifies it, keeps a history of results and shows the most
//! recent ones.

use anyhow::Result;
use camxuc_assistant::{
    AppConfig, Cli, Commands, Presenter, RequestOutcome, RequestPipeline, TerminalPresenter,
};
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = AppConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded from {}", cli.config);
    info!("Classifier backend: {:?}", config.classifier.backend);
    info!("History: {:?}", config.history.path);

    let pipeline = RequestPipeline::from_config(&config)?;

    match &cli.command {
        Commands::Classify { text, json } => {
            let mut presenter = TerminalPresenter::stdout(*json);
            let outcome = pipeline.handle(&text.join(" "), &mut presenter).await;

            match outcome {
                RequestOutcome::Rejected(_) => std::process::exit(2),
                RequestOutcome::Failed { .. } => std::process::exit(1),
                RequestOutcome::Classified { .. } => {}
            }
        }

        Commands::History { limit, json } => {
            let mut presenter = TerminalPresenter::stdout(*json);
            let pipeline = match limit {
                Some(limit) => pipeline.with_history_limit(*limit),
                None => pipeline,
            };
            let records = pipeline.recent_history()?;
            presenter.show_history(&records)?;
        }

        Commands::Interactive => run_interactive(&pipeline).await?,
    }

    Ok(())
}

/// One request per stdin line until EOF or `:quit`
async fn run_interactive(pipeline: &RequestPipeline) -> Result<()> {
    let mut presenter = TerminalPresenter::stdout(false);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Trợ lý phân loại cảm xúc tiếng Việt");
    println!("Nhập câu tiếng Việt (ví dụ: Hôm nay tôi rất vui). :stats, :quit");
    pipeline.present_history(&mut presenter);

    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            ":quit" | ":q" => break,
            ":stats" => {
                let stats = pipeline.metrics().snapshot();
                println!(
                    "requests={} classified={} rejected={} failed={} \
                     positive={} neutral={} negative={} avg_classifier_latency_us={}",
                    stats.total_requests,
                    stats.classified,
                    stats.rejected,
                    stats.failed,
                    stats.positive,
                    stats.neutral,
                    stats.negative,
                    stats.avg_classifier_latency_us()
                );
            }
            "" => pipeline.present_history(&mut presenter),
            _ => {
                pipeline.handle(&line, &mut presenter).await;
            }
        }
    }

    Ok(())
}

/// Initialize tracing/logging on stderr
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("camxuc=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("camxuc=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
