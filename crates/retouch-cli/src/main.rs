use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use retouch_core::effects::DEFAULT_BLOCK_SIZE;
use retouch_core::encode::DEFAULT_EXPORT_NAME;
use retouch_core::{ConvolutionEngine, EditSession, FilterSettings, KernelPreset, Look};
use tracing::info;

mod recipe;

use recipe::{Effect, Recipe};

#[derive(Parser, Debug)]
#[command(name = "retouch", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply filters, geometry, looks and effects to an image and save it as PNG.
    Edit(EditArgs),
    /// List the convolution kernel presets.
    Kernels,
}

#[derive(Parser, Debug)]
struct EditArgs {
    /// Input image (PNG or JPEG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long, default_value = DEFAULT_EXPORT_NAME)]
    out: PathBuf,

    /// Edit recipe JSON. Command-line options are applied on top of it.
    #[arg(long)]
    recipe: Option<PathBuf>,

    #[command(flatten)]
    filters: FilterArgs,

    /// One-click look, applied before the filters.
    #[arg(long)]
    look: Option<Look>,

    /// Rotate 90° clockwise this many times.
    #[arg(long, default_value_t = 0)]
    rotate_right: u32,

    /// Rotate 90° counter-clockwise this many times.
    #[arg(long, default_value_t = 0)]
    rotate_left: u32,

    /// Mirror left-to-right.
    #[arg(long)]
    flip_horizontal: bool,

    /// Mirror top-to-bottom.
    #[arg(long)]
    flip_vertical: bool,

    /// Destructive effect, in order. Repeat to stack effects.
    #[arg(long = "effect", value_enum)]
    effects: Vec<Effect>,

    /// Block size for the pixelate effect.
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: u32,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Brightness offset (-100 to 100).
    #[arg(long, allow_hyphen_values = true)]
    brightness: Option<f32>,
    /// Contrast offset (-100 to 100).
    #[arg(long, allow_hyphen_values = true)]
    contrast: Option<f32>,
    /// Grayscale amount (0 to 100).
    #[arg(long)]
    grayscale: Option<f32>,
    /// Blur radius in pixels (0 to 10).
    #[arg(long)]
    blur: Option<f32>,
    /// Saturation (0 to 200).
    #[arg(long)]
    saturate: Option<f32>,
    /// Hue rotation in degrees (0 to 360).
    #[arg(long)]
    hue_rotate: Option<f32>,
    /// Invert amount (0 to 100).
    #[arg(long)]
    invert: Option<f32>,
    /// Sepia amount (0 to 100).
    #[arg(long)]
    sepia: Option<f32>,
    /// Opacity (0 to 100).
    #[arg(long)]
    opacity: Option<f32>,
}

impl FilterArgs {
    /// Overwrite the recipe's sliders with every option that was given.
    fn apply_to(&self, recipe: &mut Recipe) {
        let mut set = |value: Option<f32>, field: fn(&mut FilterSettings, f32)| {
            if let Some(value) = value {
                field(recipe.filters_mut(), value);
            }
        };
        set(self.brightness, |f, v| f.brightness = v);
        set(self.contrast, |f, v| f.contrast = v);
        set(self.grayscale, |f, v| f.grayscale = v);
        set(self.blur, |f, v| f.blur = v);
        set(self.saturate, |f, v| f.saturate = v);
        set(self.hue_rotate, |f, v| f.hue_rotate = v);
        set(self.invert, |f, v| f.invert = v);
        set(self.sepia, |f, v| f.sepia = v);
        set(self.opacity, |f, v| f.opacity = v);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Edit(args) => cmd_edit(args).await,
        Command::Kernels => cmd_kernels(),
    }
}

fn read_recipe(path: &Path) -> anyhow::Result<Recipe> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read recipe '{}'", path.display()))?;
    Recipe::from_json(&text).with_context(|| format!("parse recipe '{}'", path.display()))
}

/// Fold command-line options into the recipe loaded from disk.
fn build_recipe(args: &EditArgs) -> anyhow::Result<Recipe> {
    let mut recipe = match &args.recipe {
        Some(path) => read_recipe(path)?,
        None => Recipe::default(),
    };

    if let Some(look) = args.look {
        recipe.look = Some(look);
        recipe.filters = None;
    }

    args.filters.apply_to(&mut recipe);

    if args.flip_horizontal {
        recipe.geometry.toggle_flip_horizontal();
    }
    if args.flip_vertical {
        recipe.geometry.toggle_flip_vertical();
    }
    for _ in 0..args.rotate_right % 4 {
        recipe.geometry.rotate_right();
    }
    for _ in 0..args.rotate_left % 4 {
        recipe.geometry.rotate_left();
    }

    recipe.effects.extend(args.effects.iter().copied());
    Ok(recipe)
}

async fn cmd_edit(args: EditArgs) -> anyhow::Result<()> {
    let recipe = build_recipe(&args)?;

    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let mut session = EditSession::from_encoded(&bytes)
        .with_context(|| format!("decode image '{}'", args.in_path.display()))?;

    let engine = ConvolutionEngine::spawn()?;
    recipe
        .apply(&mut session, &engine, args.block_size)
        .await
        .context("apply edits")?;
    engine.shutdown();

    info!(filter = %session.css_filter(), "rendering");
    let png = session.export_png()?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_kernels() -> anyhow::Result<()> {
    for preset in KernelPreset::ALL {
        println!("{preset}");
        for row in preset.weights().chunks(3) {
            let row: Vec<String> = row.iter().map(|w| format!("{w:>3}")).collect();
            println!("  {}", row.join(" "));
        }
    }
    Ok(())
}
