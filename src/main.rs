// ABOUTME: Main entry point for the big-apple program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
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
    /// Generate slide images and the BASIC listing from markdown
    Build(BuildArgs),

    /// Print an outline of the slides found in a markdown file
    Outline(OutlineArgs),
}

#[derive(Args, Default)]
struct BuildArgs {
    /// Path to the markdown file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for slide images
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to the BASIC listing file
    #[arg(short, long)]
    listing: Option<PathBuf>,

    /// TrueType font to draw with instead of the built-in bitmap font
    #[arg(long)]
    font: Option<PathBuf>,

    /// File name prefix for slide images
    #[arg(long)]
    base_name: Option<String>,
}

#[derive(Args)]
struct OutlineArgs {
    /// Path to the markdown file
    #[arg(short, long)]
    input: Option<PathBuf>,
}

fn build(config: &big_apple::Config, args: BuildArgs) -> anyhow::Result<()> {
    let input = args.input.unwrap_or_else(|| config.input_path.clone());
    let render_config =
        config.get_render_config(args.output_dir, args.listing, args.font, args.base_name)?;

    let output = big_apple::generate_slides(&input, &render_config)
        .with_context(|| format!("Failed to build slides from {:?}", input))?;

    println!(
        "Generated {} slides in {:?} and listing {:?}",
        output.slide_count, render_config.output_dir, output.listing
    );
    Ok(())
}

fn outline(config: &big_apple::Config, args: OutlineArgs) -> anyhow::Result<()> {
    let input = args.input.unwrap_or_else(|| config.input_path.clone());
    let markdown = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read input file {:?}", input))?;

    let slides = big_apple::build_deck(&markdown);
    print!("{}", big_apple::outline(&slides));
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let cli = Cli::parse();
    let config = big_apple::Config::from_env();

    let result = match cli.command {
        Some(Commands::Build(args)) => build(&config, args),
        Some(Commands::Outline(args)) => outline(&config, args),
        None => build(&config, BuildArgs::default()),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
