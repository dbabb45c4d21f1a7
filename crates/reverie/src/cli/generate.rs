//! The `reverie generate` command: one prompt, N images, optional slideshow.

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use reverie_core::{
    ArtifactKind, ArtifactStore, Config, GenerationRun, HfProvider, Job, RunOutcome,
    SlideshowAssembler,
};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Text prompt describing the image to generate
    #[arg(required = true)]
    pub prompt: String,

    /// Number of images to generate
    #[arg(short = 'n', long, default_value = "5",
          value_parser = clap::value_parser!(u8).range(1..=10))]
    pub count: u8,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Inference endpoint URL (overrides config)
    #[arg(long, env = "REVERIE_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Skip slideshow assembly even when multiple images are generated
    #[arg(long)]
    pub no_slideshow: bool,
}

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(dir) = &args.output {
        config.output.dir = dir.to_string_lossy().into_owned();
    }
    if let Some(endpoint) = &args.endpoint {
        config.inference.endpoint = endpoint.clone();
    }
    if args.no_slideshow {
        config.slideshow.enabled = false;
    }

    // Fails fast here when the API token is unset, before any run starts
    let provider = HfProvider::from_config(&config.inference)?;
    let store = ArtifactStore::new(config.output_dir())?;
    let assembler = SlideshowAssembler::new(config.slideshow.clone());

    let job = Job::new(&args.prompt, args.count as usize);
    let run = GenerationRun::new(Box::new(provider), store, assembler);

    let spinner = create_spinner(job.count);
    let outcome = run.run(&job).await;
    spinner.finish_and_clear();

    report(&outcome)
}

fn create_spinner(count: usize) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!(
        "Generating {count} image{}... this can take a while",
        if count == 1 { "" } else { "s" }
    ));
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Print artifacts and the outcome; pick exit behavior per error class.
fn report(outcome: &RunOutcome) -> anyhow::Result<()> {
    for artifact in outcome.artifacts() {
        let tag = match artifact.kind {
            ArtifactKind::Image => "image",
            ArtifactKind::Video => "video",
        };
        println!(
            "{} {} ({tag})",
            style("✔").green(),
            artifact.path.display()
        );
    }

    match outcome {
        RunOutcome::Done { artifacts } => {
            println!(
                "{} {} artifact{} written",
                style("Done:").green().bold(),
                artifacts.len(),
                if artifacts.len() == 1 { "" } else { "s" }
            );
            Ok(())
        }
        RunOutcome::Failed { error, artifacts } => {
            if error.is_warning() {
                // User-correctable (empty prompt), not a process failure
                eprintln!("{} {error}", style("Warning:").yellow().bold());
                Ok(())
            } else {
                if !artifacts.is_empty() {
                    eprintln!(
                        "{} kept {} artifact{} generated before the failure",
                        style("Note:").dim(),
                        artifacts.len(),
                        if artifacts.len() == 1 { "" } else { "s" }
                    );
                }
                anyhow::bail!("{error}")
            }
        }
    }
}
