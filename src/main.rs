use clap::{Parser, Subcommand};
use simple_masonry::config::{self, MasonryConfig};
use simple_masonry::packer::{self, Layout};
use simple_masonry::types::{self, Item};
use simple_masonry::{output, preload, render};
use std::path::{Path, PathBuf};

/// Shared flags for commands that compute a layout.
#[derive(clap::Args, Clone)]
struct LayoutArgs {
    /// Items file ([[items]] tables with id, img, url, height)
    #[arg(long, default_value = "items.toml")]
    items: PathBuf,

    /// Container width in pixels
    #[arg(long)]
    width: f64,

    /// Viewport width used to pick the column count (defaults to --width)
    #[arg(long)]
    viewport: Option<f64>,
}

/// `--version` text: the crate version on a release tag, `dev@<hash>`
/// for any other build.
fn version_string() -> &'static str {
    if env!("MASONRY_ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("MASONRY_GIT_HASH") {
        "" => "dev@unknown",
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "simple-masonry")]
#[command(about = "Responsive masonry layout engine")]
#[command(long_about = "\
Responsive masonry layout engine

Packs an ordered list of fixed-height items into columns: each item goes to
the currently shortest column. The column count comes from a breakpoint
ladder on the viewport width.

Items file:

  [[items]]
  id = \"1\"
  img = \"images/dawn.jpg\"
  url = \"https://example.com/dawn\"
  height = 400

Run 'simple-masonry gen-config' to generate a documented masonry.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (missing file means stock defaults)
    #[arg(long, default_value = "masonry.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute and print the placement of every item
    Layout {
        #[command(flatten)]
        args: LayoutArgs,

        /// Print the layout as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a static HTML snapshot of the layout
    Render {
        #[command(flatten)]
        args: LayoutArgs,

        /// Output HTML file
        #[arg(long, default_value = "masonry.html")]
        output: PathBuf,

        /// Page title
        #[arg(long, default_value = "Masonry")]
        title: String,
    },
    /// Validate config and items, and probe local images
    Check {
        /// Items file
        #[arg(long, default_value = "items.toml")]
        items: PathBuf,
    },
    /// Show the breakpoint ladder, optionally resolving one viewport width
    Breakpoints {
        /// Viewport width in pixels
        #[arg(long)]
        viewport: Option<f64>,
    },
    /// Print a stock masonry.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Layout { args, json } => {
            let config = config::load_config(&cli.config)?;
            let items = types::load_items(&args.items)?;
            let layout = compute_layout(&config, &items, &args)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&layout)?);
            } else {
                output::print_layout(&layout);
            }
        }
        Command::Render {
            args,
            output: out,
            title,
        } => {
            let config = config::load_config(&cli.config)?;
            let items = types::load_items(&args.items)?;
            let layout = compute_layout(&config, &items, &args)?;
            let html = render::render_page(&layout, &config, &title);
            std::fs::write(&out, html)?;
            output::print_layout(&layout);
            println!("==> Wrote {}", out.display());
        }
        Command::Check { items } => {
            config::load_config(&cli.config)?;
            println!("==> Config {} is valid", cli.config.display());
            let list = types::load_items(&items)?;
            let probes = preload::probe_local_assets(&list, items_base(&items));
            output::print_check(&probes);
            let failed = probes
                .iter()
                .filter(|p| p.outcome() == preload::AssetOutcome::Failed)
                .count();
            if failed > 0 {
                println!("==> {failed} images will render as blank tiles");
            } else {
                println!("==> Items are valid");
            }
        }
        Command::Breakpoints { viewport } => {
            let config = config::load_config(&cli.config)?;
            let resolved = match viewport {
                Some(width) => Some((width, config.breakpoints.resolve(width)?)),
                None => None,
            };
            output::print_breakpoints(&config.breakpoints, resolved);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Resolve the column count from the viewport and pack the items.
fn compute_layout(
    config: &MasonryConfig,
    items: &[Item],
    args: &LayoutArgs,
) -> Result<Layout, Box<dyn std::error::Error>> {
    let viewport = args.viewport.unwrap_or(args.width);
    let columns = config.breakpoints.resolve(viewport)?;
    log::info!("viewport {viewport}px → {columns} columns");

    if !args.width.is_finite() || args.width <= 0.0 {
        return Ok(Layout::empty());
    }
    let layout = packer::pack(columns, args.width, config.layout.gap, items)?;
    if layout.is_degenerate() {
        log::warn!(
            "container {}px is too narrow for {columns} columns",
            args.width
        );
    }
    Ok(layout)
}

/// Relative image paths resolve against the items file's directory.
fn items_base(items: &Path) -> &Path {
    items.parent().unwrap_or_else(|| Path::new("."))
}
