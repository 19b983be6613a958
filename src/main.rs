use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use multibrush::features::FeatureSet;
use multibrush::fragment::{FragmentStore, Selection};
use multibrush::layout::{layout_panels, PanelLayout};
use multibrush::render::SceneAdapter;
use multibrush::{BrushEngine, EngineConfig, Gesture, LinearScale};

#[derive(Parser, Debug)]
#[command(name = "multibrush", about = "Linked multi-range selection engine for genome browsers")]
struct Cli {
    /// Log engine decisions (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a recorded gesture session and print every frame.
    Replay {
        /// Session file (JSON with config, genome, features and gestures).
        session: PathBuf,
    },
    /// Tile brush selections into panels and print the layout.
    Layout {
        /// Display width in pixels.
        #[arg(long, default_value_t = 1000.0)]
        width: f64,
        /// Gap between panels in pixels.
        #[arg(long, default_value_t = 8.0)]
        gap: f64,
        /// Genome length mapped onto the brush strip (defaults to the width).
        #[arg(long)]
        genome: Option<f64>,
        /// Requested axis ticks per panel.
        #[arg(long, default_value_t = 10)]
        ticks: usize,
        /// Brush selections in pixels, as `lo:hi`.
        #[arg(value_parser = parse_selection, required = true)]
        selections: Vec<Selection>,
    },
}

/// Recorded session driven through the engine by `replay`.
#[derive(Debug, Deserialize)]
struct Session {
    #[serde(default)]
    config: EngineConfig,
    genome: (f64, f64),
    /// Lowest and highest feature lane; derived from the features if absent.
    #[serde(default)]
    lanes: Option<(f64, f64)>,
    #[serde(default)]
    features: FeatureSet,
    #[serde(default)]
    gestures: Vec<Gesture>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Replay { session } => run_replay(session)?,
        Commands::Layout {
            width,
            gap,
            genome,
            ticks,
            selections,
        } => run_layout(width, gap, genome, ticks, selections)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "multibrush=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_replay(path: PathBuf) -> Result<()> {
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read session from {}", path.display()))?;
    let session: Session = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse session {}", path.display()))?;
    info!(gestures = session.gestures.len(), "replaying session");

    let panel_height = session.config.panel_height();
    let mut engine = BrushEngine::new(
        session.config,
        session.genome,
        session.features,
        SceneAdapter::new(),
    )
    .context("failed to initialize engine")?;
    if let Some(lanes) = session.lanes {
        let scale = LinearScale::new(lanes, (panel_height, 0.0)).context("invalid lane domain")?;
        engine = engine.with_lanes(scale);
    }

    for (step, gesture) in session.gestures.into_iter().enumerate() {
        let changed = engine.handle(gesture);
        println!(
            "step {}\t{} on {}\tchanged={}\tactive={}",
            step + 1,
            gesture_name(&gesture),
            gesture.fragment(),
            changed,
            engine
                .active()
                .map_or_else(|| "-".to_string(), |id| id.to_string()),
        );
        print_layout(&engine.view().layout);
        let scene = engine.adapter();
        println!(
            "\tbrushes={}\tintervals={}\tconnections={}",
            scene.brushes.len(),
            scene.shapes.len(),
            scene.paths.len()
        );
    }

    Ok(())
}

fn run_layout(
    width: f64,
    gap: f64,
    genome: Option<f64>,
    ticks: usize,
    selections: Vec<Selection>,
) -> Result<()> {
    let config = EngineConfig::with_size(width, EngineConfig::default().height)
        .with_panel_gap(gap)
        .with_tick_count(ticks);
    config.validate().context("invalid display settings")?;
    let master = LinearScale::new((0.0, genome.unwrap_or(width)), (0.0, width))
        .context("invalid genome length")?;

    let mut store = FragmentStore::new();
    for (idx, selection) in selections.iter().enumerate() {
        if let Some(other) = selections[..idx].iter().find(|s| s.overlaps(selection)) {
            bail!(
                "selection {}:{} overlaps {}:{}",
                selection.lo,
                selection.hi,
                other.lo,
                other.hi
            );
        }
        let id = store.spawn();
        if let Some(fragment) = store.get_mut(id) {
            fragment.set_selection(selection.confine(0.0, width), &master);
        }
    }

    print_layout(&layout_panels(&store, &config));
    Ok(())
}

fn print_layout(layout: &PanelLayout) {
    for panel in &layout.panels {
        println!(
            "\tpanel {}\t{}\tpx=[{:.2}, {:.2}]\twidth={:.2}\tdomain=[{}, {}]\taxis={}",
            panel.index,
            panel.fragment,
            panel.range.0,
            panel.range.1,
            panel.width(),
            panel.domain.lo,
            panel.domain.hi,
            panel.axis.labels().join(" "),
        );
    }
}

fn parse_selection(raw: &str) -> Result<Selection> {
    let Some((lo, hi)) = raw.split_once(':') else {
        bail!("expected lo:hi, got {raw:?}");
    };
    let lo: f64 = lo.trim().parse().with_context(|| format!("bad start in {raw:?}"))?;
    let hi: f64 = hi.trim().parse().with_context(|| format!("bad end in {raw:?}"))?;
    if !lo.is_finite() || !hi.is_finite() {
        bail!("non-finite selection {raw:?}");
    }
    Ok(Selection::new(lo, hi))
}

fn gesture_name(gesture: &Gesture) -> &'static str {
    match gesture {
        Gesture::DragStart { .. } => "drag_start",
        Gesture::Drag { .. } => "drag",
        Gesture::DragEnd { .. } => "drag_end",
        Gesture::ZoomStart { .. } => "zoom_start",
        Gesture::Zoom { .. } => "zoom",
        Gesture::ZoomEnd { .. } => "zoom_end",
    }
}
