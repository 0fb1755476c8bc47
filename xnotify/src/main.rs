use anyhow::Result;
use clap::Parser;
use console::style;
use drawable::{Config, Event, Summary};
use std::path::PathBuf;
use task::TaskRunner;

mod task;

/// Creates high contrast android notification icons from the app icon.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Source image
    #[clap(short, long, default_value = drawable::DEFAULT_ICON)]
    icon: PathBuf,
    /// Android resource directory receiving the `drawable-*` folders
    #[clap(short, long, default_value = drawable::DEFAULT_RES)]
    res: PathBuf,
    /// Keep a line per density instead of rewriting it in place
    #[clap(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config::new(&self.icon, &self.res)
    }
}

fn main() -> Result<()> {
    use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};
    tracing_log::LogTracer::init().ok();
    let env = std::env::var("XNOTIFY_LOG").unwrap_or_else(|_| "error".into());
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_span_events(FmtSpan::ACTIVE | FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
    log_panics::init();
    let args = Args::parse();
    run(&args.config(), args.verbose)
}

fn run(config: &Config, verbose: bool) -> Result<()> {
    println!(
        "{} {}",
        style("Creating notification icons from").bold(),
        config.input.display()
    );
    let mut runner = TaskRunner::new(config.targets.len() as u32, verbose);
    let summary = drawable::generate_all_with(config, |event| match event {
        Event::Start(target) => runner.start_task(target.to_string()),
        Event::Finish(outcome) if outcome.is_ok() => runner.end_task(),
        Event::Finish(_) => runner.fail_task(),
    })?;
    tracing::info!("{summary}");
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &Summary) {
    println!();
    if summary.is_success() {
        println!(
            "{} all {} notification icons were created",
            style("[DONE]").green(),
            summary.len()
        );
        println!("icons are optimized with:");
        for feature in [
            "high contrast for better visibility",
            "increased brightness",
            "preserved transparency",
            "compressed png output",
        ] {
            println!("  - {feature}");
        }
        return;
    }
    println!(
        "{} {}/{} notification icons were created",
        style("[ERROR]").red(),
        summary.num_written(),
        summary.len()
    );
    for failure in summary.failures() {
        if let Some(err) = failure.error() {
            println!("  {}: {:#}", failure.path().display(), err);
        }
    }
}
