mod cli;
mod presenter;

use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Source};
use presenter::TerminalPresenter;
use services::{Clock, OpenTriviaProvider, QuestionProvider, QuizLoopService, StaticProvider};

fn init_logging(verbose: u8) {
    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    // stdout belongs to the quiz itself.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_provider(cli: &Cli) -> Result<Arc<dyn QuestionProvider>, Box<dyn std::error::Error>> {
    let provider: Arc<dyn QuestionProvider> = match (cli.source, &cli.questions_file) {
        (Source::Remote, _) => Arc::new(OpenTriviaProvider::new(cli.open_trivia_config())?),
        (Source::Static, Some(path)) => Arc::new(StaticProvider::from_json_file(path)?),
        (Source::Static, None) => Arc::new(StaticProvider::builtin()),
    };
    Ok(provider)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let provider = build_provider(&cli)?;
    info!(source = provider.name(), "starting quiz");

    let service = QuizLoopService::new(Clock::default(), provider);
    let input = BufReader::new(tokio::io::stdin());
    let mut presenter = TerminalPresenter::new(service, cli.pacing(), input, std::io::stdout());

    if let Some(summary) = presenter.run().await? {
        info!(
            score = summary.final_score,
            total = summary.total,
            percentage = summary.percentage,
            "last quiz finished"
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
