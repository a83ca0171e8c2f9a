#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use icy_flow_engine::{
    EndpointInfo, FilePersistence, Grid, LineMode, Position, StyleId,
    style::draw_styled_line,
    topology::{detect_box, detect_connections, detect_end_points, is_movable_line, is_resizable_side, relocate_box},
};

mod settings;

pub use settings::Settings;

#[derive(Parser, Debug)]
#[command(version, about = "Inspect and edit box-and-line text diagrams", long_about = None)]
pub struct Args {
    /// Drawing style (ascii, light, heavy, double, rounded)
    #[arg(long, global = true, value_parser = parse_style)]
    style: Option<StyleId>,

    /// Drop unrecognized glyphs when loading instead of failing
    #[arg(long, global = true)]
    skip_unrecognized: bool,

    /// Write the log to this file (rotated) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a diagram and print it normalized
    Show { file: PathBuf },

    /// Detect the box running through a cell
    #[command(name = "box")]
    DetectBox { file: PathBuf, x: i32, y: i32 },

    /// List the line ends reachable from a cell
    Endpoints { file: PathBuf, x: i32, y: i32 },

    /// Draw a styled line and print the result
    Line {
        file: PathBuf,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,

        /// Routing (horizontal_first, vertical_first, horizontal_horizontal, vertical_vertical, best)
        #[arg(long, value_parser = parse_line_mode)]
        mode: Option<LineMode>,

        /// Leave a gap where the line crosses another one
        #[arg(long)]
        omit_intersections: bool,

        /// Save the result back to FILE
        #[arg(long)]
        write: bool,
    },

    /// List the lines attached to the box at a cell
    Connections { file: PathBuf, x: i32, y: i32 },

    /// Move the box at a cell, dragging its lines along
    #[command(allow_negative_numbers = true)]
    Move {
        file: PathBuf,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,

        /// Save the result back to FILE
        #[arg(long)]
        write: bool,
    },
}

fn parse_style(arg: &str) -> Result<StyleId, String> {
    StyleId::ALL
        .into_iter()
        .find(|style| style.to_string() == arg.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown style '{arg}'"))
}

fn parse_line_mode(arg: &str) -> Result<LineMode, String> {
    match arg.to_ascii_lowercase().replace('-', "_").as_str() {
        "horizontal_first" | "hf" => Ok(LineMode::HorizontalFirst),
        "vertical_first" | "vf" => Ok(LineMode::VerticalFirst),
        "horizontal_horizontal" | "hh" => Ok(LineMode::HorizontalHorizontal),
        "vertical_vertical" | "vv" => Ok(LineMode::VerticalVertical),
        "best" => Ok(LineMode::Best),
        _ => Err(format!("unknown line mode '{arg}'")),
    }
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str("info")?;
    let logger = if let Some(path) = log_file {
        let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let basename = path.file_stem().map_or_else(|| "icy_flow".to_string(), |s| s.to_string_lossy().to_string());
        logger
            .log_to_file(FileSpec::default().directory(directory).basename(basename).suffix("log").suppress_timestamp())
            .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
            .duplicate_to_stderr(Duplicate::Warn)
    } else {
        logger.log_to_stderr()
    };
    Ok(logger.start()?)
}

/// Size of the text block in cells.
fn text_size(text: &str) -> (i32, i32) {
    let width = text.lines().map(|l| l.trim_end_matches('\r').chars().count()).max().unwrap_or(0);
    (width as i32, text.lines().count() as i32)
}

/// Loads `path` into a grid large enough to also hold every cell of `extent`.
///
/// If `new_canvas` is set a missing file starts an empty diagram of the
/// configured size.
fn load_grid(path: &Path, settings: &Settings, extent: &[Position], new_canvas: bool) -> anyhow::Result<Grid> {
    let text = if new_canvas && !path.exists() {
        log::info!("{} does not exist, starting a {}x{} diagram", path.display(), settings.columns, settings.rows);
        String::new()
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };

    let (mut width, mut height) = text_size(&text);
    if text.is_empty() {
        width = settings.columns;
        height = settings.rows;
    }
    for pos in extent {
        width = width.max(pos.x + 1);
        height = height.max(pos.y + 1);
    }

    let mut grid = Grid::new(width, height);
    grid.import_text(&text, Position::default(), true, settings.skip_unrecognized)
        .with_context(|| format!("loading {}", path.display()))?;
    grid.commit()?;
    Ok(grid)
}

/// Commits the staged edit, saving it to `path` if `write` is set.
fn finish_edit(mut grid: Grid, path: &Path, write: bool) -> anyhow::Result<()> {
    if write {
        let persistence = FilePersistence::new(path);
        log::info!("saving to {}", persistence.path().display());
        grid.set_persistence(Box::new(persistence));
    }
    grid.commit()?;
    print_grid(&grid);
    Ok(())
}

fn print_grid(grid: &Grid) {
    for line in grid.export().lines() {
        println!("{}", line.trim_end());
    }
}

fn print_endpoints(endpoints: &[EndpointInfo], indent: usize) {
    for info in endpoints {
        let mut flags = Vec::new();
        if info.is_junction() {
            flags.push("junction");
        }
        if info.start_arrow {
            flags.push("start arrow");
        }
        if info.end_arrow {
            flags.push("end arrow");
        }
        println!(
            "{:indent$}{} {} neighbours:{} {}",
            "",
            info.direction,
            info.position,
            info.context.length(),
            flags.join(", "),
            indent = indent
        );
        print_endpoints(&info.children, indent + 2);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _logger = init_logging(args.log_file.as_deref())?;

    let mut settings = Settings::load();
    if let Some(style) = args.style {
        settings.style = style;
    }
    settings.skip_unrecognized |= args.skip_unrecognized;
    log::debug!("using {settings:?}");

    match args.command {
        Command::Show { file } => {
            let grid = load_grid(&file, &settings, &[], false)?;
            print_grid(&grid);
        }
        Command::DetectBox { file, x, y } => {
            let grid = load_grid(&file, &settings, &[], false)?;
            let pos = Position::new(x, y);
            match detect_box(&grid, pos) {
                Some(shape) => {
                    println!("box {} with {} boundary cells", shape.bounds, shape.points.len());
                    for connector in &shape.connectors {
                        println!("  connector {connector}");
                    }
                }
                None => println!("no box at {pos}"),
            }
        }
        Command::Endpoints { file, x, y } => {
            let grid = load_grid(&file, &settings, &[], false)?;
            let endpoints = detect_end_points(&grid, Position::new(x, y));
            print_endpoints(&endpoints, 0);
            if is_movable_line(&endpoints) {
                println!("movable line");
            } else if is_resizable_side(&endpoints) {
                println!("resizable side");
            }
        }
        Command::Line {
            file,
            x1,
            y1,
            x2,
            y2,
            mode,
            omit_intersections,
            write,
        } => {
            let start = Position::new(x1, y1);
            let end = Position::new(x2, y2);
            anyhow::ensure!(x1 >= 0 && y1 >= 0 && x2 >= 0 && y2 >= 0, "line coordinates must not be negative");

            let mut grid = load_grid(&file, &settings, &[start, end], true)?;
            let mode = mode.unwrap_or(settings.line_mode);
            draw_styled_line(&mut grid, start, end, mode, settings.style, omit_intersections)?;
            finish_edit(grid, &file, write)?;
        }
        Command::Connections { file, x, y } => {
            let grid = load_grid(&file, &settings, &[], false)?;
            let pos = Position::new(x, y);
            let Some(shape) = detect_box(&grid, pos) else {
                anyhow::bail!("no box at {pos}");
            };
            for connection in detect_connections(&grid, &shape) {
                println!(
                    "{} -> {} ({} cells, redraw {:?})",
                    connection.start(),
                    connection.end(),
                    connection.points().len(),
                    connection.redraw_mode()
                );
            }
        }
        Command::Move { file, x, y, dx, dy, write } => {
            let mut grid = load_grid(&file, &settings, &[], false)?;
            let pos = Position::new(x, y);
            let Some(shape) = detect_box(&grid, pos) else {
                anyhow::bail!("no box at {pos}");
            };
            let bounds = relocate_box(&mut grid, &shape, Position::new(dx, dy), settings.style)?;
            log::info!("box moved to {bounds}");
            finish_edit(grid, &file, write)?;
        }
    }
    Ok(())
}
