#![cfg(feature = "std")]

//! Text commands of the terminal setup screen.

use crate::common::{BoardError, Cell};
use crate::session::InputEvent;
use crate::ship::{ShipClass, ShipId};

/// A parsed line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forwarded to the placement session.
    Event(InputEvent),
    Random,
    /// Change the grid size preference.
    GridSize(usize),
    Show,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("{0:?} is not a number")]
    NotANumber(String),
    #[error("no ship called {0:?}")]
    UnknownShip(String),
    #[error(transparent)]
    Coordinate(#[from] BoardError),
}

pub const HELP: &str = "\
commands:
  select <ship>   pick a ship by name or id (alias: drag)
  rotate          toggle horizontal/vertical
  place <cell>    place the selected ship, e.g. place B3 (alias: drop)
  hover <cell>    preview the selected ship without placing it
  remove <cell>   remove the ship covering a cell
  random          place all remaining ships at random
  reset           clear the board
  grid <size>     switch to an 8, 10 or 12 grid
  show            print the board
  finish          finish setup once the whole fleet is placed
  quit            leave";

fn ship_arg(arg: Option<&str>, command: &'static str) -> Result<ShipId, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(command))?;
    if let Ok(n) = arg.parse::<u8>() {
        return Ok(ShipId(n));
    }
    ShipClass::by_name(arg)
        .map(ShipClass::id)
        .ok_or_else(|| CommandError::UnknownShip(arg.to_owned()))
}

fn cell_arg(arg: Option<&str>, command: &'static str) -> Result<Cell, CommandError> {
    Ok(arg.ok_or(CommandError::MissingArgument(command))?.parse()?)
}

/// Parse one line. Blank lines are `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    let command = match verb.to_ascii_lowercase().as_str() {
        "select" => Command::Event(InputEvent::Select(ship_arg(arg, "select")?)),
        "drag" => Command::Event(InputEvent::DragStart(ship_arg(arg, "drag")?)),
        "rotate" | "r" => Command::Event(InputEvent::Rotate),
        "place" => Command::Event(InputEvent::Click(cell_arg(arg, "place")?)),
        "drop" => Command::Event(InputEvent::Drop(cell_arg(arg, "drop")?)),
        "hover" => Command::Event(InputEvent::DragOver(cell_arg(arg, "hover")?)),
        "remove" => Command::Event(InputEvent::RightClick(cell_arg(arg, "remove")?)),
        "reset" => Command::Event(InputEvent::Reset),
        "finish" => Command::Event(InputEvent::FinishSetup),
        "random" => Command::Random,
        "grid" => {
            let arg = arg.ok_or(CommandError::MissingArgument("grid"))?;
            Command::GridSize(
                arg.parse()
                    .map_err(|_| CommandError::NotANumber(arg.to_owned()))?,
            )
        }
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_owned())),
    };
    Ok(Some(command))
}
