use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sapador_core::{Board, CellCount, Coord, GameConfig};
use thiserror::Error;

/// Terminal minesweeper: mark suspected mines or claim cells as free.
#[derive(Debug, Parser)]
#[command(name = "sapador", version, about)]
struct Cli {
    /// Number of board rows.
    #[arg(long, default_value_t = 9)]
    rows: Coord,
    /// Number of board columns.
    #[arg(long, default_value_t = 9)]
    cols: Coord,
    /// Number of mines; prompted for interactively when omitted.
    #[arg(long)]
    mines: Option<CellCount>,
    /// Mine layout seed; derived from the system clock when omitted.
    #[arg(long)]
    seed: Option<u64>,
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

#[derive(Debug, Error)]
enum ParseMoveError {
    #[error("expected a move as `x y command`")]
    MissingField,
    #[error("coordinates must be integers: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),
    #[error("unknown command `{0}`, expected `mine` or `free`")]
    UnknownCommand(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Mine,
    Free,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Move {
    x: Coord,
    y: Coord,
    command: Command,
}

fn parse_move(line: &str) -> Result<Move, ParseMoveError> {
    let mut fields = line.split_whitespace();
    let x: Coord = fields.next().ok_or(ParseMoveError::MissingField)?.parse()?;
    let y: Coord = fields.next().ok_or(ParseMoveError::MissingField)?.parse()?;
    let command = match fields.next().ok_or(ParseMoveError::MissingField)? {
        "mine" => Command::Mine,
        "free" => Command::Free,
        other => return Err(ParseMoveError::UnknownCommand(other.into())),
    };
    Ok(Move { x, y, command })
}

fn prompt(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}

fn prompt_mine_count(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<CellCount> {
    prompt("How many mines do you want on the field? ")?;
    let line = lines.next().context("unexpected end of input")??;
    line.trim()
        .parse()
        .context("mine count must be a non-negative integer")
}

fn seed_from_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .init();

    let mut lines = io::stdin().lock().lines();

    let mines = match cli.mines {
        Some(mines) => mines,
        None => prompt_mine_count(&mut lines)?,
    };
    let config =
        GameConfig::new((cli.cols, cli.rows), mines).context("invalid board configuration")?;
    let seed = cli.seed.unwrap_or_else(seed_from_time);
    log::info!(
        "starting a {}x{} game with {mines} mines, seed {seed}",
        cli.cols,
        cli.rows
    );

    let mut board = Board::from_seed(config, seed);

    while !board.is_finished() {
        print!("\n{board}");
        prompt("Set/unset mines marks or claim a cell as free: ")?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("failed to read from stdin")?;

        let mov = match parse_move(&line) {
            Ok(mov) => mov,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match mov.command {
            Command::Mine => {
                if let Err(err) = board.toggle_mark(mov.x, mov.y) {
                    println!("{err}");
                }
            }
            Command::Free => match board.reveal(mov.x, mov.y) {
                Ok(outcome) if !outcome.is_safe() => {
                    print!("\n{board}");
                    println!("You stepped on a mine and failed!");
                    return Ok(());
                }
                Ok(_) => {}
                Err(err) => println!("{err}"),
            },
        }
    }

    print!("\n{board}");
    println!("Congratulations! You found all mines!");
    Ok(())
}
