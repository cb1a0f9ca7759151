// ABOUTME: pane-grid command line driver.
// ABOUTME: Loads a layout declaration, sizes it, replays drags, and prints the resolved frame.

use anyhow::{bail, Context, Result};
use clap::Parser;
use pane_core::{Config, Point};
use pane_layout::{DragTarget, Layout, LayoutFrame, SystemDecl};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pane-grid",
    about = "Resolve a split-pane layout declaration to pixel geometry",
    version
)]
struct Cli {
    /// Layout declaration (TOML)
    layout: PathBuf,

    /// Container size as WIDTHxHEIGHT
    #[arg(long, default_value = "1280x800", value_parser = parse_size)]
    size: (f32, f32),

    /// Pointer drag as X,Y:DX,DY. Pressed at X,Y, moved by DX,DY, released. Repeatable.
    #[arg(long = "drag", value_parser = parse_drag)]
    drags: Vec<Drag>,

    /// Print the frame as JSON
    #[arg(long)]
    json: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    from: Point,
    dx: f32,
    dy: f32,
}

fn parse_pair(text: &str, separator: char) -> Result<(f32, f32), String> {
    let (a, b) = text
        .split_once(separator)
        .ok_or_else(|| format!("expected two numbers separated by '{separator}'"))?;
    let a = a.trim().parse::<f32>().map_err(|e| format!("{a:?}: {e}"))?;
    let b = b.trim().parse::<f32>().map_err(|e| format!("{b:?}: {e}"))?;
    Ok((a, b))
}

fn parse_size(text: &str) -> Result<(f32, f32), String> {
    parse_pair(text, 'x')
}

fn parse_drag(text: &str) -> Result<Drag, String> {
    let (at, by) = text
        .split_once(':')
        .ok_or_else(|| "expected X,Y:DX,DY".to_string())?;
    let (x, y) = parse_pair(at, ',')?;
    let (dx, dy) = parse_pair(by, ',')?;
    Ok(Drag {
        from: Point::new(x, y),
        dx,
        dy,
    })
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            let config = Config::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            tracing::info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(Config::load_or_default()),
    }
}

fn replay(layout: &mut Layout, drag: &Drag) -> Result<()> {
    let Some(target) = layout.pointer_down(drag.from) else {
        bail!("No splitter at ({}, {})", drag.from.x, drag.from.y);
    };
    match &target {
        DragTarget::Splitter(id) => tracing::info!("Dragging splitter {}", id),
        DragTarget::Intersection(id) => tracing::info!("Dragging intersection {}", id),
    }
    let to = Point::new(drag.from.x + drag.dx, drag.from.y + drag.dy);
    let moved = layout.pointer_move(to);
    layout.pointer_up();
    moved?;
    Ok(())
}

fn print_frame(out: &mut impl Write, frame: &LayoutFrame) -> Result<()> {
    for pane in &frame.panes {
        let r = pane.rect;
        writeln!(out, "pane {:<16} {:>7.1} {:>7.1} {:>7.1} {:>7.1}", pane.id, r.x, r.y, r.width, r.height)?;
    }
    for splitter in &frame.splitters {
        writeln!(
            out,
            "splitter {:<12} {:?} at ({:.1}, {:.1}) length {:.1}",
            splitter.id.to_string(),
            splitter.orientation,
            splitter.x,
            splitter.y,
            splitter.width.max(splitter.height),
        )?;
    }
    for intersection in &frame.intersections {
        writeln!(
            out,
            "intersection {} at ({:.1}, {:.1})",
            intersection.id, intersection.x, intersection.y
        )?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let decl = SystemDecl::load(&cli.layout)
        .with_context(|| format!("Failed to load layout from {}", cli.layout.display()))?;

    let mut layout = Layout::new(&decl, &config)?;
    let (width, height) = cli.size;
    layout.resize(width, height)?;
    tracing::info!(
        "Laid out {} panes with {} splitters",
        layout.panes().len(),
        layout.registry().len()
    );

    for drag in &cli.drags {
        replay(&mut layout, drag)?;
    }

    let frame = layout.frame();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &frame)?;
        writeln!(out)?;
    } else {
        print_frame(&mut out, &frame)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting pane-grid");

    run(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pane_layout::{PaneDecl, PaneSplitterSide, RowDecl};

    #[test]
    fn parses_size() {
        assert_eq!(parse_size("1280x800"), Ok((1280.0, 800.0)));
        assert!(parse_size("1280").is_err());
        assert!(parse_size("wide x 3").is_err());
    }

    #[test]
    fn parses_drag() {
        let drag = parse_drag("240,400:60,-5").unwrap();
        assert_eq!(drag.from, Point::new(240.0, 400.0));
        assert_eq!((drag.dx, drag.dy), (60.0, -5.0));
        assert!(parse_drag("240,400").is_err());
    }

    #[test]
    fn cli_accepts_repeated_drags() {
        let cli = Cli::try_parse_from([
            "pane-grid",
            "layout.toml",
            "--size",
            "800x600",
            "--drag",
            "1,2:3,4",
            "--drag",
            "5,6:7,8",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.size, (800.0, 600.0));
        assert_eq!(cli.drags.len(), 2);
        assert!(cli.json);
    }

    #[test]
    fn replay_moves_the_splitter() {
        let decl = SystemDecl::new().row(
            RowDecl::new()
                .pane(
                    PaneDecl::new("left")
                        .width(200.0)
                        .splitter(PaneSplitterSide::Right),
                )
                .pane(PaneDecl::new("right")),
        );
        let mut layout = Layout::with_defaults(&decl).unwrap();
        layout.resize(800.0, 600.0).unwrap();

        let drag = parse_drag("200,300:50,0").unwrap();
        replay(&mut layout, &drag).unwrap();
        assert_eq!(layout.pane_rect("left").unwrap().width, 250.0);
        assert!(!layout.is_dragging());

        let miss = parse_drag("600,300:50,0").unwrap();
        assert!(replay(&mut layout, &miss).is_err());
    }

    #[test]
    fn prints_text_frame() {
        let decl = SystemDecl::new().row(RowDecl::new().pane(PaneDecl::new("only")));
        let mut layout = Layout::with_defaults(&decl).unwrap();
        layout.resize(100.0, 50.0).unwrap();

        let mut out = Vec::new();
        print_frame(&mut out, &layout.frame()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("pane only"));
        assert!(text.contains("100.0"));
    }
}
