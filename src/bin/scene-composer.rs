use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scene_composer::{Canvas, CompositionRecord, Element, VideoFormat, Workspace, WorkspaceOpts};

#[derive(Parser, Debug)]
#[command(name = "scene-composer", version)]
struct Cli {
    /// Log engine events to stderr (`-v` debug, `-vv` trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the format, canvas and paint-ordered layers of a composition.
    Inspect(InspectArgs),
    /// Print the stage size for an output format.
    Canvas(CanvasArgs),
    /// List the layers shown at a point in time.
    Visible(VisibleArgs),
    /// Print one timeline bar per layer.
    Bars(RecordArgs),
}

#[derive(Parser, Debug)]
struct RecordArgs {
    /// Input composition record JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Workspace options JSON.
    #[arg(long)]
    opts: Option<PathBuf>,

    /// Emit JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    record: RecordArgs,

    /// Also print the persisted transform map.
    #[arg(long, default_value_t = false)]
    transforms: bool,
}

#[derive(Parser, Debug)]
struct CanvasArgs {
    /// Format preset id.
    #[arg(long, default_value = scene_composer::DEFAULT_FORMAT_ID)]
    format: String,

    /// Custom output width; requires `--height`.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Custom output height; requires `--width`.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Display zoom.
    #[arg(long, default_value_t = 1.0)]
    zoom: f64,
}

#[derive(Parser, Debug)]
struct VisibleArgs {
    #[command(flatten)]
    record: RecordArgs,

    /// Playhead time in seconds.
    #[arg(long)]
    at: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Canvas(args) => cmd_canvas(args),
        Command::Visible(args) => cmd_visible(args),
        Command::Bars(args) => cmd_bars(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open(args: &RecordArgs) -> anyhow::Result<Workspace> {
    let record = CompositionRecord::from_path(&args.in_path)
        .with_context(|| format!("load composition '{}'", args.in_path.display()))?;
    let opts = match &args.opts {
        Some(p) => WorkspaceOpts::from_path(p)
            .with_context(|| format!("load workspace options '{}'", p.display()))?,
        None => WorkspaceOpts::default(),
    };
    Ok(Workspace::from_record(record, opts))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{s}");
    Ok(())
}

fn window_label(e: &Element) -> String {
    match (e.window.start, e.window.end) {
        (None, None) => "always".to_owned(),
        _ => format!("[{:.2}, {:.2})", e.window.start_secs(), e.window.end_secs()),
    }
}

fn print_layers(elements: &[Element]) {
    for e in elements {
        let b = e.bounds.rounded();
        println!(
            "{:>4}  {:<28} {:<12} {:>5},{:<5} {:>5}x{:<5} {}{}",
            e.z_index,
            e.id.as_str(),
            e.role.as_str(),
            b.x,
            b.y,
            b.width,
            b.height,
            window_label(e),
            if e.visible { "" } else { " hidden" },
        );
    }
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let ws = open(&args.record)?;
    let canvas = ws.canvas();
    let elements = ws.elements();

    if args.record.json {
        let mut out = serde_json::json!({
            "format": ws.format(),
            "canvas": canvas,
            "duration": ws.playback().duration,
            "elements": elements,
        });
        if args.transforms {
            out["layer_transforms"] = serde_json::to_value(ws.store())?;
        }
        return print_json(&out);
    }

    let f = ws.format();
    println!("format   {} ({}x{})", f.name, f.width, f.height);
    println!("canvas   {}x{}", canvas.width, canvas.height);
    println!("duration {:.2}s", ws.playback().duration);
    println!("layers   {}", elements.len());
    print_layers(&elements);
    if args.transforms {
        println!("{}", ws.transforms_json()?);
    }
    Ok(())
}

fn cmd_canvas(args: CanvasArgs) -> anyhow::Result<()> {
    let format = match (args.width, args.height) {
        (Some(w), Some(h)) => VideoFormat::custom(w, h)?,
        _ => VideoFormat::preset(&args.format)
            .with_context(|| format!("unknown format '{}'", args.format))?,
    };
    let canvas = Canvas::for_format(&format);
    let (dw, dh) = canvas.display_size(args.zoom);
    println!("format   {} ({}x{})", format.name, format.width, format.height);
    println!("canvas   {}x{}", canvas.width, canvas.height);
    println!("display  {dw}x{dh}");
    Ok(())
}

fn cmd_visible(args: VisibleArgs) -> anyhow::Result<()> {
    let ws = open(&args.record)?;
    let visible = ws.visible_at(args.at);
    if args.record.json {
        return print_json(&visible);
    }
    println!("t={:.3}s  {} visible", args.at, visible.len());
    print_layers(&visible);
    Ok(())
}

fn cmd_bars(args: RecordArgs) -> anyhow::Result<()> {
    let ws = open(&args)?;
    let bars = ws.timeline_bars();
    if args.json {
        return print_json(&bars);
    }
    for bar in &bars {
        println!(
            "track {:>2}  {:<28} {:>8.2} .. {:>8.2}{}",
            bar.track,
            bar.id.as_str(),
            bar.start,
            bar.end,
            if bar.open_ended { " (open)" } else { "" },
        );
    }
    Ok(())
}
