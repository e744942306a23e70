// ABOUTME: Main entry point for the lesson-slides program.
// ABOUTME: Provides CLI interface to serve, render and inspect lesson slide decks.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use lesson_slides::{Config, DeckRequest, DiskAssets};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the landing page and generated decks over HTTP
    Serve(ServeArgs),

    /// Render one deck to a PDF file
    Render(RenderArgs),

    /// Print the text of every page of a deck
    Outline(OutlineArgs),

    /// List the available lessons
    Lessons,
}

#[derive(Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Number of worker threads
    #[arg(long)]
    workers: Option<usize>,

    /// Directory holding static/index.html
    #[arg(long)]
    static_dir: Option<PathBuf>,

    #[command(flatten)]
    assets: AssetArgs,
}

#[derive(Args)]
struct AssetArgs {
    /// Directory of code snippets shown on code slides
    #[arg(long)]
    snippets_dir: Option<PathBuf>,

    /// Directory of images shown on image slides
    #[arg(long)]
    media_dir: Option<PathBuf>,
}

#[derive(Args)]
struct DeckArgs {
    /// Name of the attendee the deck is generated for
    #[arg(short, long)]
    name: Option<String>,

    /// Background color, e.g. '#23967F'
    #[arg(short, long)]
    color: Option<String>,

    /// Lesson week
    #[arg(short, long, default_value_t = lesson_slides::deck::DEFAULT_WEEK)]
    week: u32,
}

#[derive(Args)]
struct RenderArgs {
    #[command(flatten)]
    deck: DeckArgs,

    #[command(flatten)]
    assets: AssetArgs,

    /// Path to output PDF file
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct OutlineArgs {
    #[command(flatten)]
    deck: DeckArgs,

    #[command(flatten)]
    assets: AssetArgs,
}

impl AssetArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.snippets_dir {
            config.snippets_dir = dir.clone();
        }
        if let Some(dir) = &self.media_dir {
            config.media_dir = dir.clone();
        }
    }
}

impl DeckArgs {
    fn request(&self, config: &Config) -> DeckRequest {
        DeckRequest::new(
            self.name.as_deref().unwrap_or(&config.default_name),
            self.color.as_deref().unwrap_or(&config.default_color),
            self.week,
        )
    }
}

fn serve(args: &ServeArgs) -> anyhow::Result<()> {
    let mut config = Config::from_env();
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(workers) = args.workers {
        config.workers = workers.max(1);
    }
    if let Some(dir) = &args.static_dir {
        config.static_dir = dir.clone();
    }
    args.assets.apply(&mut config);

    lesson_slides::serve(config).context("HTTP server stopped")
}

fn render(args: &RenderArgs) -> anyhow::Result<()> {
    let mut config = Config::from_env();
    args.assets.apply(&mut config);

    let (deck, bytes) = lesson_slides::build_pdf(args.deck.request(&config), &config)
        .context("Failed to build deck")?;
    fs::write(&args.output, &bytes)
        .with_context(|| format!("Failed to write output file {:?}", args.output))?;

    println!(
        "Wrote {} pages of week {} to {:?}",
        deck.slides.len(),
        deck.lesson.week,
        args.output
    );
    Ok(())
}

fn outline(args: &OutlineArgs) -> anyhow::Result<()> {
    let mut config = Config::from_env();
    args.assets.apply(&mut config);

    let mut assets = DiskAssets::from_config(&config);
    let deck = lesson_slides::prepare(args.deck.request(&config), &mut assets)
        .context("Failed to build deck")?;
    let pages = deck.outline()?;

    for (number, (slide, page)) in deck.slides.iter().zip(&pages).enumerate() {
        println!("--- page {} ({}) ---", number + 1, slide.kind());
        for line in page.text_lines() {
            println!("{}", line);
        }
        for image in &page.images {
            println!("[image {} {}x{}]", image.name, image.width, image.height);
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Serve(args)) => serve(args),
        Some(Commands::Render(args)) => render(args),
        Some(Commands::Outline(args)) => outline(args),
        Some(Commands::Lessons) => {
            for lesson in lesson_slides::LESSONS {
                println!("{}\t{}", lesson.week, lesson.title);
            }
            Ok(())
        }
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
