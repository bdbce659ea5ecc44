use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use realtime_blur::{
    Argb, BlurBackendKind, BlurOverlay, Content, DisplayMetrics, Host, OverlayConfig, Rect,
    SurfaceId, Vec2,
};

#[derive(Parser, Debug)]
#[command(name = "realtime-blur", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scrolling list under a blurred bar as a PNG sequence.
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Output directory for frame_NNNN.png files.
    #[arg(long)]
    out: PathBuf,

    /// Number of frames to render.
    #[arg(long, default_value_t = 8)]
    frames: u32,

    /// Overlay configuration JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Blur radius in density-independent units (0 disables blurring).
    #[arg(long)]
    radius: Option<u32>,

    /// Downsample factor (> 0).
    #[arg(long)]
    factor: Option<f32>,

    /// Tint as #RRGGBB or #AARRGGBB.
    #[arg(long)]
    color: Option<Argb>,

    /// Blur backend.
    #[arg(long, value_enum)]
    backend: Option<BackendChoice>,

    /// Also open a popup owned by the main window with its own blurred overlay.
    #[arg(long)]
    popup: bool,

    /// Screen width in pixels.
    #[arg(long, default_value_t = 360)]
    width: u32,

    /// Screen height in pixels.
    #[arg(long, default_value_t = 640)]
    height: u32,

    /// Display density (device pixels per density-independent unit).
    #[arg(long, default_value_t = 1.0)]
    density: f32,

    /// Log level for diagnostics written to stderr.
    #[arg(long, default_value_t = tracing::Level::WARN)]
    log_level: tracing::Level,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Gaussian,
    Disabled,
}

impl From<BackendChoice> for BlurBackendKind {
    fn from(choice: BackendChoice) -> Self {
        match choice {
            BackendChoice::Gaussian => Self::Gaussian,
            BackendChoice::Disabled => Self::Disabled,
        }
    }
}

const ROW_HEIGHT: f64 = 48.0;
const ROWS: u32 = 40;
const BAR_HEIGHT: f64 = 72.0;
const SCROLL_STEP: f64 = 18.0;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo(args) => cmd_demo(args),
    }
}

fn read_config(path: &Path) -> anyhow::Result<OverlayConfig> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open overlay config '{}'", path.display()))?;
    let cfg = OverlayConfig::from_json_str(&s)
        .with_context(|| format!("parse overlay config '{}'", path.display()))?;
    Ok(cfg)
}

fn overlay_config(args: &DemoArgs) -> anyhow::Result<OverlayConfig> {
    let mut cfg = match &args.config {
        Some(path) => read_config(path)?,
        None => OverlayConfig::default(),
    };
    if let Some(r) = args.radius {
        cfg.blur_radius = r;
    }
    if let Some(f) = args.factor {
        cfg.downsample_factor = f;
    }
    if let Some(c) = args.color {
        cfg.overlay_color = c;
    }
    if let Some(b) = args.backend {
        cfg.backend = b.into();
    }
    cfg.validate()?;
    Ok(cfg)
}

struct Scene {
    host: Host,
    list: SurfaceId,
    max_scroll: f64,
}

fn build_scene(
    args: &DemoArgs,
    cfg: &OverlayConfig,
    metrics: DisplayMetrics,
) -> anyhow::Result<Scene> {
    let w = f64::from(args.width);
    let h = f64::from(args.height);
    let mut host = Host::new();

    let main = host
        .tree_mut()
        .add_top_level(Rect::new(0.0, 0.0, w, h), None, true);
    if let Some(n) = host.tree_mut().node_mut(main) {
        n.background = Some(Argb(0xFF12_141C));
    }

    let list = host
        .tree_mut()
        .add_child(main, Rect::new(0.0, 0.0, w, h), Content::Empty)?;
    if let Some(n) = host.tree_mut().node_mut(list) {
        n.clip_children = true;
    }
    for i in 0..ROWS {
        let y = f64::from(i) * ROW_HEIGHT;
        let content = row_content(i);
        host.tree_mut()
            .add_child(list, Rect::new(0.0, y, w, y + ROW_HEIGHT), content)?;
    }

    let bar = BlurOverlay::new(cfg, metrics)?;
    host.attach_overlay(main, Rect::new(0.0, 0.0, w, BAR_HEIGHT), bar)
        .context("attach bar overlay")?;

    if args.popup {
        let frame = Rect::new(w * 0.1, h * 0.35, w * 0.9, h * 0.65);
        let popup = host.tree_mut().add_top_level(frame, Some(main), false);
        let inner = Rect::new(0.0, 0.0, frame.width(), frame.height());
        let sheet = BlurOverlay::new(cfg, metrics)?;
        let (_, id) = host
            .attach_overlay(popup, inner, sheet)
            .context("attach popup overlay")?;
        let different_root = host
            .overlay(id)
            .and_then(BlurOverlay::binding)
            .is_some_and(|b| b.different_root);
        tracing::info!(different_root, "popup overlay attached");
    }

    let content_height = f64::from(ROWS) * ROW_HEIGHT;
    Ok(Scene {
        host,
        list,
        max_scroll: (content_height - h).max(0.0),
    })
}

fn row_content(i: u32) -> Content {
    const PALETTE: [Argb; 5] = [
        Argb(0xFFE6_4A19),
        Argb(0xFFF9_A825),
        Argb(0xFF43_A047),
        Argb(0xFF1E_88E5),
        Argb(0xFF8E_24AA),
    ];
    let color = PALETTE[i as usize % PALETTE.len()];
    if i % 3 == 2 {
        Content::Checker {
            cell: 12.0,
            a: color,
            b: Argb::WHITE,
        }
    } else {
        Content::Solid(color)
    }
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let cfg = overlay_config(&args)?;
    let metrics = DisplayMetrics::new(args.density)?;
    let mut scene = build_scene(&args, &cfg, metrics)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    for frame in 0..args.frames {
        let scroll = (f64::from(frame) * SCROLL_STEP).min(scene.max_scroll);
        scene
            .host
            .tree_mut()
            .set_scroll(scene.list, Vec2::new(0.0, scroll));

        let stats = scene.host.run_frame();
        tracing::debug!(frame, ?stats, "frame done");

        let screen = scene
            .host
            .compose_screen(args.width, args.height)
            .context("compose screen")?;
        let path = args.out.join(format!("frame_{frame:04}.png"));
        screen
            .save_png(&path)
            .with_context(|| format!("write png '{}'", path.display()))?;
    }

    eprintln!("wrote {} frames to {}", args.frames, args.out.display());
    Ok(())
}
