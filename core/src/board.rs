use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use core::fmt::{self, Write};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Whether the mine layout may still be replaced.
///
/// A layout stays provisional until the first reveal. The transition to
/// `Frozen` happens exactly once, guarded by the regenerate-until-safe
/// loop that keeps the first move from ever hitting a mine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutState {
    Provisional,
    Frozen,
}

/// The whole game-state engine: grid, mine layout, marking and
/// exploration state, and win/loss bookkeeping.
///
/// Public operations take 1-based `(x, y)` coordinates with `x` the
/// column and `y` the row, matching what the player types.
pub struct Board {
    config: GameConfig,
    grid: Array2<Cell>,
    mines_found: CellCount,
    extra_marked: CellCount,
    cells_explored: CellCount,
    layout: LayoutState,
    generator: Box<dyn LayoutGenerator>,
}

impl Board {
    pub fn new(config: GameConfig, generator: Box<dyn LayoutGenerator>) -> Self {
        let mut board = Self {
            config,
            grid: Array2::default(config.size().to_nd_index()),
            mines_found: 0,
            extra_marked: 0,
            cells_explored: 0,
            layout: LayoutState::Provisional,
            generator,
        };
        board.generate_layout();
        board
    }

    pub fn from_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, Box::new(RandomLayoutGenerator::new(seed)))
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn layout_state(&self) -> LayoutState {
        self.layout
    }

    pub fn mines_found(&self) -> CellCount {
        self.mines_found
    }

    pub fn extra_marked(&self) -> CellCount {
        self.extra_marked
    }

    pub fn cells_explored(&self) -> CellCount {
        self.cells_explored
    }

    /// 1-based cell lookup.
    pub fn cell_at(&self, x: Coord, y: Coord) -> Result<Cell> {
        let coords = self.to_grid(x, y)?;
        Ok(self.grid[coords.to_nd_index()])
    }

    /// Toggles a cell between `Default` and `Marked`. Explored cells are
    /// left alone. Never touches kinds and never reveals anything.
    pub fn toggle_mark(&mut self, x: Coord, y: Coord) -> Result<MarkOutcome> {
        let coords = self.to_grid(x, y)?;
        let cell = self.grid[coords.to_nd_index()];

        Ok(match cell.state {
            CellState::Explored => MarkOutcome::NoChange,
            CellState::Default => {
                self.grid[coords.to_nd_index()].state = CellState::Marked;
                if cell.kind.is_mine() {
                    self.mines_found += 1;
                } else {
                    self.extra_marked += 1;
                }
                MarkOutcome::Changed
            }
            CellState::Marked => {
                self.grid[coords.to_nd_index()].state = CellState::Default;
                if cell.kind.is_mine() {
                    self.mines_found -= 1;
                } else {
                    self.extra_marked -= 1;
                }
                MarkOutcome::Changed
            }
        })
    }

    /// Reveals a cell. `HitMine` means the game is lost and every mine on
    /// the board has been exposed; everything else is a safe outcome.
    pub fn reveal(&mut self, x: Coord, y: Coord) -> Result<RevealOutcome> {
        let coords = self.to_grid(x, y)?;
        if self.grid[coords.to_nd_index()].state == CellState::Explored {
            return Ok(RevealOutcome::NoChange);
        }

        self.freeze_layout(coords);

        if self.grid[coords.to_nd_index()].kind.is_mine() {
            self.reveal_all_mines();
            return Ok(RevealOutcome::HitMine);
        }

        self.explore(coords);
        Ok(RevealOutcome::Revealed)
    }

    /// Whether the game has been won, either by marking every mine and
    /// nothing else, or by exploring every safe cell. Pure query.
    pub fn is_finished(&self) -> bool {
        let all_mines_marked =
            self.mines_found == self.config.mines() && self.extra_marked == 0;
        let all_safe_explored = self.cells_explored == self.config.safe_cells();
        all_mines_marked || all_safe_explored
    }

    /// Textual grid snapshot, identical to the `Display` output.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Converts public 1-based `(x, y)` into zero-based grid coordinates.
    fn to_grid(&self, x: Coord, y: Coord) -> Result<Coord2> {
        let (cols, rows) = self.config.size();
        if x == 0 || y == 0 || x > cols || y > rows {
            return Err(GameError::InvalidCoords);
        }
        Ok((x - 1, y - 1))
    }

    /// Assigns a fresh set of kinds: mines from the generator, adjacency
    /// counts for everything else. Player marks survive a relayout, so the
    /// aggregate counters are rescanned against the new kinds.
    fn generate_layout(&mut self) {
        for cell in self.grid.iter_mut() {
            cell.kind = CellKind::Clear(0);
        }
        for coords in self.generator.place_mines(self.config) {
            self.grid[coords.to_nd_index()].kind = CellKind::Mine;
        }
        self.recompute_adjacency();
        self.rescan_marks();
    }

    fn recompute_adjacency(&mut self) {
        let (cols, rows) = self.config.size();
        for x in 0..cols {
            for y in 0..rows {
                if self.grid[(x, y).to_nd_index()].kind.is_mine() {
                    continue;
                }
                let count = self
                    .grid
                    .iter_neighbors((x, y))
                    .filter(|&pos| self.grid[pos.to_nd_index()].kind.is_mine())
                    .count() as u8;
                self.grid[(x, y).to_nd_index()].kind = CellKind::Clear(count);
            }
        }
    }

    fn rescan_marks(&mut self) {
        self.mines_found = 0;
        self.extra_marked = 0;
        for cell in self.grid.iter() {
            if cell.state == CellState::Marked {
                if cell.kind.is_mine() {
                    self.mines_found += 1;
                } else {
                    self.extra_marked += 1;
                }
            }
        }
    }

    /// First-reveal gate: regenerates the provisional layout until the
    /// target is safe, then freezes it for the rest of the game. The
    /// regeneration loop is bounded by the cell count; on very dense
    /// boards it can exhaust, in which case the offending mine is moved
    /// to the first safe cell instead, so the first reveal stays safe for
    /// every valid mine count.
    fn freeze_layout(&mut self, target: Coord2) {
        if self.layout == LayoutState::Frozen {
            return;
        }

        let mut attempts = 0;
        while self.grid[target.to_nd_index()].kind.is_mine()
            && attempts < self.config.total_cells()
        {
            attempts += 1;
            log::debug!("first reveal target {target:?} was a mine, regenerating layout");
            self.generate_layout();
        }

        if self.grid[target.to_nd_index()].kind.is_mine() {
            log::warn!("no safe layout after {attempts} attempts, relocating the mine");
            self.relocate_mine(target);
        }

        self.layout = LayoutState::Frozen;
    }

    /// Moves the mine sitting on `coords` to the first safe cell in grid
    /// order. Only reachable while the layout is provisional.
    fn relocate_mine(&mut self, coords: Coord2) {
        let (cols, rows) = self.config.size();
        let donor = (0..rows)
            .flat_map(|y| (0..cols).map(move |x| (x, y)))
            .find(|&pos| !self.grid[pos.to_nd_index()].kind.is_mine());

        // A validated config always keeps at least one cell safe.
        if let Some(donor) = donor {
            self.grid[donor.to_nd_index()].kind = CellKind::Mine;
            self.grid[coords.to_nd_index()].kind = CellKind::Clear(0);
            self.recompute_adjacency();
            self.rescan_marks();
        }
    }

    /// Loss path: every mine becomes visible.
    fn reveal_all_mines(&mut self) {
        for cell in self.grid.iter_mut() {
            if cell.kind.is_mine() {
                cell.state = CellState::Explored;
            }
        }
    }

    /// Explores a safe cell and, when it has no adjacent mines, flood-fills
    /// the connected zero region plus its numbered border. Work-queue
    /// traversal; the `Explored` flag doubles as the visited marker.
    fn explore(&mut self, start: Coord2) {
        let mut queue = VecDeque::from([start]);

        while let Some(coords) = queue.pop_front() {
            let cell = self.grid[coords.to_nd_index()];
            if cell.state == CellState::Explored {
                continue;
            }
            if cell.state == CellState::Marked {
                // Zero regions never border a mine directly, so a swallowed
                // mark was always a wrong one.
                self.extra_marked -= 1;
            }

            self.grid[coords.to_nd_index()].state = CellState::Explored;
            self.cells_explored += 1;

            if cell.kind == CellKind::Clear(0) {
                queue.extend(
                    self.grid.iter_neighbors(coords).filter(|&pos| {
                        self.grid[pos.to_nd_index()].state != CellState::Explored
                    }),
                );
            }
        }
    }
}

fn frame_line(f: &mut fmt::Formatter<'_>, cols: Coord) -> fmt::Result {
    write!(f, "-|")?;
    for _ in 0..cols {
        f.write_char('-')?;
    }
    writeln!(f, "|")
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (cols, rows) = self.config.size();

        write!(f, " |")?;
        for x in 1..=cols {
            write!(f, "{x}")?;
        }
        writeln!(f, "|")?;
        frame_line(f, cols)?;

        for y in 0..rows {
            write!(f, "{}|", y + 1)?;
            for x in 0..cols {
                f.write_char(self.grid[(x, y).to_nd_index()].glyph())?;
            }
            writeln!(f, "|")?;
        }

        frame_line(f, cols)
    }
}
