//! Torus Life - Entry Point
//!
//! Wires configuration, the simulation and a terminal surface together.
//! Controls:
//!   Arrows / hjkl: Pan camera
//!   + / -, mouse wheel: Zoom
//!   Left / right mouse: Draw / erase cells
//!   Space: Play / pause    s: Stop (clears)    b: Begin    r: Restart
//!   [ / ]: Faster / slower    c: Center camera    q / Esc: Quit

use std::fs::File;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use torus_life::core::{LifeConfig, Result};
use torus_life::render::collect_visible_cells;
use torus_life::simulation::Simulation;
use torus_life::ui::{status_text, Command, InputState, WorldView};

/// How long to wait for input before drawing the next frame
const FRAME_BUDGET: Duration = Duration::from_millis(16);

/// Toroidal Game of Life in the terminal
#[derive(Parser, Debug)]
#[command(name = "torus-life")]
#[command(about = "Toroidal Game of Life with cell-age coloring")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Milliseconds between generations
    #[arg(long)]
    interval: Option<u64>,

    /// Starting pattern (glider, pulsar, acorn, gosper-glider-gun, empty, ...)
    #[arg(long, conflicts_with = "random")]
    pattern: Option<String>,

    /// Start from a random soup with this density
    #[arg(long)]
    random: Option<f64>,

    /// RNG seed for the random soup
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many generations without a terminal and print a summary
    #[arg(long)]
    headless: Option<u64>,

    /// Write logs here while the terminal UI is running
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.headless.is_some(), args.log_file.as_deref())?;

    let config = build_config(&args)?;
    match args.headless {
        Some(generations) => run_headless(&config, generations),
        None => run_terminal(&config),
    }
}

fn init_logging(headless: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("torus_life=info"))
    };

    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(io::stderr)
            .init();
    } else if let Some(path) = log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    // Without a log file the terminal UI runs silent: stderr would draw over it.
    Ok(())
}

/// Config file (or defaults) with command-line overrides applied
fn build_config(args: &Args) -> Result<LifeConfig> {
    let mut config = match &args.config {
        Some(path) => LifeConfig::load(path)?,
        None => LifeConfig::default(),
    };

    if let Some(width) = args.width {
        config.world.width = width;
    }
    if let Some(height) = args.height {
        config.world.height = height;
    }
    if let Some(interval) = args.interval {
        config.clock.step_interval_ms = interval;
    }
    if let Some(pattern) = &args.pattern {
        config.seed.pattern = Some(pattern.clone());
    }
    if let Some(density) = args.random {
        config.seed.pattern = None;
        config.seed.density = density;
    }
    if let Some(seed) = args.seed {
        config.seed.rng_seed = seed;
    }

    config.validate()?;
    Ok(config)
}

fn run_headless(config: &LifeConfig, generations: u64) -> Result<()> {
    let mut sim = Simulation::from_config(config)?;
    let start = Instant::now();
    let initial = sim.world.population();

    for _ in 0..generations {
        sim.world.advance_generation();
    }

    let elapsed = start.elapsed();
    tracing::info!(
        generations,
        elapsed_ms = elapsed.as_millis() as u64,
        "Headless run complete"
    );
    println!(
        "{}x{} | {} generations | population {} -> {} | {:.1} gen/s",
        sim.world.width(),
        sim.world.height(),
        sim.world.generation(),
        initial,
        sim.world.population(),
        generations as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    Ok(())
}

fn run_terminal(config: &LifeConfig) -> Result<()> {
    let mut sim = Simulation::from_config(config)?;
    let mut input = InputState::new(&config.view);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = frame_loop(&mut terminal, &mut sim, &mut input);

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!(
        generation = sim.world.generation(),
        population = sim.world.population(),
        "Exiting"
    );
    result
}

/// World area on top, one status line below
fn split_screen(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

fn frame_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    sim: &mut Simulation,
    input: &mut InputState,
) -> Result<()> {
    let start = Instant::now();
    let mut cells = Vec::new();
    let (mut world_area, _) = split_screen(terminal.size()?);

    loop {
        if event::poll(FRAME_BUDGET)? {
            while event::poll(Duration::ZERO)? {
                let command = match event::read()? {
                    Event::Key(key) => input.handle_key(key),
                    Event::Mouse(mouse) => input.handle_mouse(mouse, (world_area.x, world_area.y)),
                    _ => None,
                };
                match command {
                    Some(Command::Quit) => return Ok(()),
                    Some(command) => command.apply(sim)?,
                    None => {}
                }
            }
        }

        // Held inputs act on the frame the user is looking at
        input.apply(sim);
        input.end_tick();

        let (area, status_area) = split_screen(terminal.size()?);
        world_area = area;
        sim.viewport
            .resize(world_area.width as u32, world_area.height as u32);

        let timestamp = start.elapsed().as_secs_f64() * 1000.0;
        sim.tick(timestamp, |world, viewport| {
            collect_visible_cells(world, viewport, &mut cells);
        });

        let status = status_text(sim);
        terminal.draw(|frame| {
            frame.render_widget(WorldView::new(&cells), world_area);
            frame.render_widget(Paragraph::new(status), status_area);
        })?;
    }
}
