use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "reelpage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the page as a static site.
    Export(ExportArgs),
    /// Render the page at one scroll position and time.
    Frame(FrameArgs),
    /// Scroll through the page and print session counters as JSON lines.
    Simulate(SimulateArgs),
    /// Check that every referenced asset exists and decodes.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input page JSON (defaults to the built-in portfolio).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Export options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the asset URL prefix.
    #[arg(long)]
    asset_prefix: Option<String>,

    /// Fixed cache-bust token instead of the process start time.
    #[arg(long)]
    cache_bust: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FrameFormat {
    Html,
    Json,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input page JSON (defaults to the built-in portfolio).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Scroll position in pixels.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Elapsed session time in milliseconds.
    #[arg(long, default_value_t = 0)]
    time_ms: u64,

    /// Conveyor lanes to hold hovered.
    #[arg(long)]
    hover: Vec<usize>,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 1080.0)]
    viewport_height: f64,

    /// Output file.
    #[arg(long)]
    out: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FrameFormat::Html)]
    format: FrameFormat,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input page JSON (defaults to the built-in portfolio).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Pixels scrolled per step.
    #[arg(long, default_value_t = 120.0)]
    scroll_step: f64,

    /// Milliseconds elapsed per step.
    #[arg(long, default_value_t = 16)]
    step_ms: u64,

    /// Number of steps (defaults to one pass down the page).
    #[arg(long)]
    steps: Option<usize>,

    /// Scroll back up after reaching the bottom.
    #[arg(long, default_value_t = false)]
    round_trip: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input page JSON (defaults to the built-in portfolio).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Asset root holding `videos/`, `gifs/` and `images/`.
    #[arg(long)]
    root: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn load_page(path: Option<&Path>) -> anyhow::Result<reelpage::Page> {
    let page = match path {
        Some(p) => reelpage::Page::from_path(p)
            .with_context(|| format!("load page '{}'", p.display()))?,
        None => reelpage::Page::portfolio()?,
    };
    page.validate()?;
    Ok(page)
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let page = load_page(args.in_path.as_deref())?;
    let mut opts = match &args.config {
        Some(p) => reelpage::ExportOpts::from_path(p)?,
        None => reelpage::ExportOpts::default(),
    };
    if let Some(prefix) = args.asset_prefix {
        opts.asset_prefix = prefix;
    }
    if let Some(token) = args.cache_bust {
        opts.cache_bust = reelpage::CacheBustMode::Fixed(token);
    }

    let report = reelpage::export_site(page, &args.out, &opts)?;
    eprintln!("wrote {} ({} bytes)", report.index.display(), report.html_bytes);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let page = load_page(args.in_path.as_deref())?;
    let opts = reelpage::SessionOpts {
        viewport_width: f64::from(page.canvas.width),
        viewport_height: args.viewport_height,
        scroll_y: 0.0,
        cache_bust: reelpage::CacheBustMode::default(),
    };
    let mut sess = reelpage::PageSession::new(page, opts)?;
    sess.scroll_to(args.scroll)?;
    for lane in &args.hover {
        sess.set_hover(*lane, true)?;
    }
    sess.advance(Duration::from_millis(args.time_ms));

    let snapshot = sess.snapshot();
    let body = match args.format {
        FrameFormat::Html => {
            reelpage::render_document(&snapshot, &reelpage::HtmlOpts::default())
        }
        FrameFormat::Json => serde_json::to_string_pretty(&snapshot)
            .with_context(|| "serialize snapshot JSON")?,
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, body).with_context(|| format!("write '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !args.scroll_step.is_finite() || args.scroll_step <= 0.0 {
        anyhow::bail!("--scroll-step must be finite and > 0");
    }
    let page = load_page(args.in_path.as_deref())?;
    let mut sess = reelpage::PageSession::new(page, reelpage::SessionOpts::default())?;

    let max = sess.max_scroll();
    let pass = (max / args.scroll_step).ceil() as usize;
    let steps = args
        .steps
        .unwrap_or(if args.round_trip { pass * 2 } else { pass });
    let dt = Duration::from_millis(args.step_ms);

    let mut y = 0.0_f64;
    let mut down = true;
    for step in 0..=steps {
        let stats = sess.stats();
        let line = serde_json::json!({
            "step": step,
            "scroll_y": sess.viewport().scroll_y,
            "stats": stats,
        });
        println!("{line}");

        if down {
            y += args.scroll_step;
            if y >= max && args.round_trip {
                down = false;
            }
        } else {
            y -= args.scroll_step;
        }
        sess.scroll_to(y.clamp(0.0, max))?;
        sess.advance(dt);
    }

    sess.teardown();
    let end = sess.stats();
    eprintln!(
        "simulated {steps} steps, peak {} live media, {} acquired",
        end.peak_media, end.acquired_total
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let page = load_page(args.in_path.as_deref())?;
    let report = reelpage::check_assets(&page, &args.root);
    for probe in report.problems() {
        eprintln!(
            "{}: {}",
            probe.path,
            probe.problem.as_deref().unwrap_or_default()
        );
    }
    if !report.is_ok() {
        anyhow::bail!(
            "{} of {} assets are unusable",
            report.problems().count(),
            report.probes.len()
        );
    }
    eprintln!("all {} assets ok", report.probes.len());
    Ok(())
}
