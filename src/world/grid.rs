//! Toroidal cell grid and the generation transition
//!
//! Coordinates wrap at every edge: any `i32` pair is normalised with a
//! positive modulo before lookup, so there are no out-of-range accesses.

use std::ops::ControlFlow;

use super::cell::{Cell, MetaState};

/// Dead cells with exactly this many alive neighbours are born
pub const BIRTH_COUNT: u8 = 3;

/// Alive cells survive with a neighbour count in this range
pub const SURVIVAL_RANGE: std::ops::RangeInclusive<u8> = 2..=3;

#[inline]
fn survives(neighbors: u8) -> bool {
    SURVIVAL_RANGE.contains(&neighbors)
}

/// Game of Life world on a torus
///
/// Cells are stored column-major (`x * height + y`) so that the natural
/// storage order is the traversal order: x outer, y inner.
#[derive(Debug, Clone)]
pub struct World {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    /// Target of the transition phase, swapped with `cells` afterwards
    back: Vec<Cell>,
    generation: u64,
}

impl World {
    /// Create a fully dead world
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or does not fit in an `i32`.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "world dimensions must be non-zero");
        assert!(
            i32::try_from(width).is_ok() && i32::try_from(height).is_ok(),
            "world dimensions must fit in i32"
        );

        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
            back: vec![Cell::default(); len],
            generation: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Generations advanced since creation or the last reset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reset_generation(&mut self) {
        self.generation = 0;
    }

    /// Number of alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Normalise a coordinate pair onto the torus
    #[inline]
    pub fn wrap(&self, x: i32, y: i32) -> (u32, u32) {
        (
            x.rem_euclid(self.width as i32) as u32,
            y.rem_euclid(self.height as i32) as u32,
        )
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        let (x, y) = self.wrap(x, y);
        x as usize * self.height as usize + y as usize
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: i32, y: i32) -> &mut Cell {
        let idx = self.index(x, y);
        &mut self.cells[idx]
    }

    /// Bring a cell to life or kill it
    pub fn set(&mut self, x: i32, y: i32, alive: bool) -> &Cell {
        let cell = self.get_mut(x, y);
        if alive {
            cell.born();
        } else {
            cell.die();
        }
        cell
    }

    /// Apply `set` to every coordinate in order
    pub fn set_many<I>(&mut self, coords: I, alive: bool)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        for (x, y) in coords {
            self.set(x, y, alive);
        }
    }

    /// Kill every alive cell
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.is_alive()) {
            cell.die();
        }
    }

    /// Alive cells among the 8 wrapped neighbours of (x, y)
    pub fn count_alive_neighbors(&self, x: i32, y: i32) -> u8 {
        let (x, y) = self.wrap(x, y);
        neighbor_count(&self.cells, self.width, self.height, x, y)
    }

    /// Advance the world one generation
    ///
    /// Runs in two phases. The transition phase reads only the current
    /// buffer and writes only the back buffer, so no neighbour count ever
    /// sees a partially updated grid. A cell condemned on the previous call
    /// dies here whatever its neighbourhood looks like now.
    ///
    /// The condemnation phase then marks every alive cell of the new
    /// generation whose neighbour count falls outside the survival range.
    pub fn advance_generation(&mut self) {
        let (width, height) = (self.width, self.height);

        self.back.fill(Cell::default());
        for x in 0..width {
            for y in 0..height {
                let idx = x as usize * height as usize + y as usize;
                let cell = self.cells[idx];
                let neighbors = neighbor_count(&self.cells, width, height, x, y);

                if cell.is_alive() {
                    if !cell.will_die() && survives(neighbors) {
                        let mut survivor = cell;
                        survivor.age();
                        self.back[idx] = survivor;
                    }
                } else if neighbors == BIRTH_COUNT {
                    self.back[idx].born();
                }
            }
        }
        std::mem::swap(&mut self.cells, &mut self.back);

        for x in 0..width {
            for y in 0..height {
                let idx = x as usize * height as usize + y as usize;
                if self.cells[idx].is_dead() {
                    continue;
                }
                let neighbors = neighbor_count(&self.cells, width, height, x, y);
                self.cells[idx].condemn(!survives(neighbors));
            }
        }

        self.generation += 1;
        tracing::trace!(generation = self.generation, "Advanced generation");
    }

    pub fn meta_state(&self, cell: &Cell) -> Option<MetaState> {
        cell.meta_state()
    }

    pub fn meta_state_at(&self, x: i32, y: i32) -> Option<MetaState> {
        self.get(x, y).meta_state()
    }

    /// Every cell with its coordinates, x outer and y inner
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &Cell)> + '_ {
        let height = self.height as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i / height) as u32, (i % height) as u32, cell))
    }

    /// Alive cells only, in the same order as `cells`
    pub fn alive_cells(&self) -> impl Iterator<Item = (u32, u32, &Cell)> + '_ {
        self.cells().filter(|(_, _, cell)| cell.is_alive())
    }

    /// Visit every cell until the visitor breaks
    pub fn for_each_cell<F>(&self, mut visitor: F) -> ControlFlow<()>
    where
        F: FnMut(u32, u32, &Cell) -> ControlFlow<()>,
    {
        self.cells().try_for_each(|(x, y, cell)| visitor(x, y, cell))
    }

    /// Visit every alive cell until the visitor breaks
    pub fn for_each_alive_cell<F>(&self, mut visitor: F) -> ControlFlow<()>
    where
        F: FnMut(u32, u32, &Cell) -> ControlFlow<()>,
    {
        self.alive_cells()
            .try_for_each(|(x, y, cell)| visitor(x, y, cell))
    }
}

/// Count over an arbitrary buffer; (x, y) must already be normalised.
///
/// Offsets: the row above, then left and right, then the row below.
#[inline]
fn neighbor_count(cells: &[Cell], width: u32, height: u32, x: u32, y: u32) -> u8 {
    let h = height as usize;
    let left = (if x == 0 { width - 1 } else { x - 1 }) as usize;
    let right = (if x + 1 == width { 0 } else { x + 1 }) as usize;
    let up = (if y == 0 { height - 1 } else { y - 1 }) as usize;
    let down = (if y + 1 == height { 0 } else { y + 1 }) as usize;
    let (x, y) = (x as usize, y as usize);

    [
        (left, up),
        (x, up),
        (right, up),
        (left, y),
        (right, y),
        (left, down),
        (x, down),
        (right, down),
    ]
    .iter()
    .filter(|&&(nx, ny)| cells[nx * h + ny].is_alive())
    .count() as u8
}
