#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

#[cfg(feature = "std")]
use anyhow::Context;
#[cfg(feature = "std")]
use battleship_setup::{
    command::{parse_command, Command, HELP},
    init_logging,
    preferences::{Difficulty, FileStore, Preferences, Theme},
    render::{render_board, render_with_preview},
    BoardSnapshot, BoardState, GridSize, GridSizeSource, Outcome, PlacementSession, ShipClass,
};
#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about = "Battleship fleet placement", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Preferences file (JSON object of string keys and values).
    #[arg(long, global = true, default_value = "battleship-prefs.json")]
    prefs: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Place your fleet interactively.
    Setup {
        #[arg(long, help = "Fix RNG seed for the `random` command (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Continue from a saved board snapshot")]
        resume: Option<PathBuf>,
        #[arg(long, help = "Write the finished board to this file")]
        out: Option<PathBuf>,
    },
    /// Place the whole fleet at random and print it.
    Random {
        #[arg(long, help = "Fix RNG seed for reproducible boards (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Grid size for this board only (8, 10 or 12)")]
        grid_size: Option<usize>,
        #[arg(long, help = "Write the board to this file")]
        out: Option<PathBuf>,
    },
    /// Show preferences, or change the ones given.
    Settings {
        #[arg(long)]
        grid_size: Option<usize>,
        #[arg(long, value_enum)]
        theme: Option<Theme>,
        #[arg(long)]
        animations: Option<bool>,
        #[arg(long)]
        sound: Option<bool>,
        #[arg(long, value_enum)]
        difficulty: Option<Difficulty>,
        #[arg(long, help = "Print the settings as JSON")]
        json: bool,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (board will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
fn save_snapshot(path: &Path, board: &BoardState, grid: GridSize) -> anyhow::Result<()> {
    let bytes = bincode::serialize(&board.snapshot(grid))?;
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    println!("Board saved to {}", path.display());
    Ok(())
}

#[cfg(feature = "std")]
fn load_snapshot(path: &Path) -> anyhow::Result<(BoardState, GridSize)> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let snapshot: BoardSnapshot = bincode::deserialize(&bytes)
        .with_context(|| format!("{} is not a board snapshot", path.display()))?;
    let grid = snapshot.grid_size;
    let board = BoardState::try_from(snapshot)?;
    Ok((board, grid))
}

#[cfg(feature = "std")]
fn print_fleet<S: GridSizeSource>(session: &PlacementSession<S>) {
    println!("{}", render_board(session.board(), session.grid()));
    let pending: Vec<String> = session
        .board()
        .available_ships()
        .map(|s| format!("{} {}", s.id().0, s))
        .collect();
    if pending.is_empty() {
        println!("All ships placed. Type `finish` to start.");
    } else {
        println!("To place: {}", pending.join(", "));
    }
    let selected = session.selected().map_or("none", ShipClass::name);
    println!("Selected: {}  Rotate: {}", selected, session.orientation().arrow());
}

#[cfg(feature = "std")]
fn report<S: GridSizeSource>(session: &PlacementSession<S>, outcome: &Outcome) {
    match outcome {
        Outcome::Selected(id) => {
            if let Some(class) = ShipClass::by_id(*id) {
                println!("Selected {}", class);
            }
        }
        Outcome::Rotated(o) => println!("Rotate: {}", o.arrow()),
        Outcome::Placed { id, cells } => {
            if let (Some(class), Some(anchor)) = (ShipClass::by_id(*id), cells.first()) {
                println!("Placed {} at {}", class.name(), anchor);
            }
            print_fleet(session);
        }
        Outcome::Removed(id) => {
            if let Some(class) = ShipClass::by_id(*id) {
                println!("Removed {}", class.name());
            }
            print_fleet(session);
        }
        Outcome::Preview(preview) => {
            println!(
                "{}",
                render_with_preview(session.board(), session.grid(), Some(preview))
            );
            println!("{}", if preview.valid { "Fits." } else { "Does not fit." });
        }
        Outcome::Cleared => print_fleet(session),
        Outcome::SetupFinished => {
            println!("Fleet ready. Game In Progress: the battle itself is not available yet.")
        }
        Outcome::Ignored => println!("Nothing to do. Select a ship first, or pick an occupied cell to remove."),
        Outcome::Rejected(err) => println!("Rejected: {}", err),
    }
}

#[cfg(feature = "std")]
fn report_evictions<S: GridSizeSource>(session: &mut PlacementSession<S>) {
    for ship in session.take_evicted() {
        println!("{} no longer fits the {} grid and was removed", ship.name(), session.grid());
    }
}

#[cfg(feature = "std")]
fn run_setup(
    prefs: &mut Preferences<FileStore>,
    seed: Option<u64>,
    resume: Option<PathBuf>,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut rng = make_rng(seed);
    let grid_rx = prefs.subscribe_grid_size();
    let mut session = match resume {
        Some(path) => {
            let (board, grid) = load_snapshot(&path)?;
            PlacementSession::with_board(board, grid, grid_rx)
        }
        None => PlacementSession::new(grid_rx),
    };
    report_evictions(&mut session);

    println!("Place your ships. Type `help` for commands.");
    print_fleet(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        if let Err(e) = prefs.reload() {
            log::warn!("keeping current preferences: {}", e);
        }
        session.refresh_grid();
        report_evictions(&mut session);
        let command = match parse_command(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Show => print_fleet(&session),
            Command::Random => match session.place_remaining_randomly(&mut rng) {
                Ok(n) => {
                    println!("Placed {} ship(s) at random", n);
                    print_fleet(&session);
                }
                Err(e) => println!("Rejected: {}", e),
            },
            Command::GridSize(n) => match GridSize::try_from(n) {
                Ok(size) => {
                    prefs.set_grid_size(size)?;
                    session.refresh_grid();
                    report_evictions(&mut session);
                    print_fleet(&session);
                }
                Err(e) => println!("{}", e),
            },
            Command::Event(event) => {
                let outcome = session.handle(event);
                report_evictions(&mut session);
                report(&session, &outcome);
                if outcome == Outcome::SetupFinished {
                    if let Some(path) = &out {
                        save_snapshot(path, session.board(), session.grid())?;
                    }
                    break;
                }
            }
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let store = FileStore::open(&cli.prefs)
        .with_context(|| format!("opening preferences {}", cli.prefs.display()))?;
    let mut prefs = Preferences::new(store);

    match cli.command {
        Commands::Setup { seed, resume, out } => run_setup(&mut prefs, seed, resume, out)?,
        Commands::Random {
            seed,
            grid_size,
            out,
        } => {
            let grid = match grid_size {
                Some(n) => GridSize::try_from(n)?,
                None => prefs.grid_size(),
            };
            let mut rng = make_rng(seed);
            let mut board = BoardState::new();
            board.place_remaining_randomly(&mut rng, grid)?;
            println!("{}", render_board(&board, grid));
            if let Some(path) = out {
                save_snapshot(&path, &board, grid)?;
            }
        }
        Commands::Settings {
            grid_size,
            theme,
            animations,
            sound,
            difficulty,
            json,
        } => {
            if let Some(n) = grid_size {
                prefs.set_grid_size(GridSize::try_from(n)?)?;
            }
            if let Some(theme) = theme {
                prefs.set_theme(theme)?;
            }
            if let Some(enabled) = animations {
                prefs.set_animations(enabled)?;
            }
            if let Some(enabled) = sound {
                prefs.set_sound_enabled(enabled)?;
            }
            if let Some(difficulty) = difficulty {
                prefs.set_difficulty(difficulty)?;
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&prefs.settings())?);
            } else {
                println!("{}", prefs.settings());
            }
        }
    }
    Ok(())
}
