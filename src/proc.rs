use std::fmt;

use tracing::trace;

/// Marker drawn for a dead cell.
pub const EMPTY: char = '.';
/// Marker drawn for a live cell.
pub const CELL: char = '#';

/// Moore neighborhood: {-1, 0, 1} x {-1, 0, 1} without the origin.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    #[inline]
    fn from((row, col): (usize, usize)) -> Self {
        Coord::new(row, col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    #[inline]
    pub fn marker(self) -> char {
        match self {
            Cell::Dead => EMPTY,
            Cell::Alive => CELL,
        }
    }

    #[inline]
    pub fn from_marker(ch: char) -> Option<Self> {
        match ch {
            EMPTY => Some(Cell::Dead),
            CELL => Some(Cell::Alive),
            _ => None,
        }
    }
}

/// B3/S23: a live cell survives with two or three neighbors, a dead one
/// is born with exactly three.
#[inline]
pub fn next_state(current: Cell, neighbors: u8) -> Cell {
    match (current, neighbors) {
        (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive,
        (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Birth,
    Kill,
}

impl ChangeKind {
    #[inline]
    pub fn target(self) -> Cell {
        match self {
            ChangeKind::Birth => Cell::Alive,
            ChangeKind::Kill => Cell::Dead,
        }
    }
}

/// A pending mutation staged during evaluation and consumed by `apply`
/// within the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub coord: Coord,
    pub kind: ChangeKind,
}

/// Bounded grid of cells, stored row-major. Cells past the edges do not
/// exist and count as dead when looking at neighbors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    height: usize,
    width: usize,
    data: Vec<Cell>,
}

impl Field {

    /// Creates an all-dead field. Both dimensions must be non-zero.
    pub fn new(height: usize, width: usize) -> Self {
        assert!(
            height > 0 && width > 0,
            "field dimensions must be non-zero, got {height}x{width}"
        );

        Field {
            height,
            width,
            data: vec![Cell::Dead; height * width],
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    #[inline]
    fn index(&self, coord: Coord) -> usize {
        assert!(
            self.contains(coord),
            "coordinate ({}, {}) outside {}x{} field",
            coord.row, coord.col, self.height, self.width
        );
        coord.row * self.width + coord.col
    }

    #[inline]
    pub fn get(&self, coord: Coord) -> Cell {
        self.data[self.index(coord)]
    }

    #[inline]
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        let i = self.index(coord);
        self.data[i] = cell;
    }

    pub fn fill(&mut self, cell: Cell) {
        self.data.fill(cell);
    }

    /// Marks every given coordinate alive.
    pub fn seed<I>(&mut self, coords: I)
    where
        I: IntoIterator,
        I::Item: Into<Coord>,
    {
        for c in coords {
            self.set(c.into(), Cell::Alive);
        }
    }

    pub fn population(&self) -> usize {
        self.data.iter().filter(|c| c.is_alive()).count()
    }

    /// Rows of the field, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.data.chunks(self.width)
    }

    // Off-grid positions yield `None` rather than wrapping around.
    #[inline]
    fn probe(&self, coord: Coord, (dr, dc): (isize, isize)) -> Option<Cell> {
        let row = coord.row.checked_add_signed(dr)?;
        let col = coord.col.checked_add_signed(dc)?;
        let at = Coord::new(row, col);
        self.contains(at).then(|| self.data[row * self.width + col])
    }

    /// Number of live cells among the eight neighbors of `coord`.
    pub fn neighbors(&self, coord: Coord) -> u8 {
        assert!(
            self.contains(coord),
            "coordinate ({}, {}) outside {}x{} field",
            coord.row, coord.col, self.height, self.width
        );

        OFFSETS
            .iter()
            .filter_map(|&off| self.probe(coord, off))
            .filter(|c| c.is_alive())
            .count() as u8
    }

    /// Scans the field in row-major order and stages a change for every cell
    /// whose next state differs from its current one. The field is not touched.
    pub fn evaluate(&self) -> Vec<Change> {
        let mut changes = Vec::new();

        for row in 0..self.height {
            for col in 0..self.width {
                let coord = Coord::new(row, col);
                let current = self.get(coord);
                let next = next_state(current, self.neighbors(coord));

                if next != current {
                    let kind = match next {
                        Cell::Alive => ChangeKind::Birth,
                        Cell::Dead => ChangeKind::Kill,
                    };
                    changes.push(Change { coord, kind });
                }
            }
        }

        changes
    }

    /// Commits a batch produced by `evaluate`, in the order it was staged.
    pub fn apply(&mut self, changes: Vec<Change>) {
        for change in changes {
            self.set(change.coord, change.kind.target());
        }
    }

    /// Runs one generation. Returns how many cells changed; zero means the
    /// field has reached a fixed point.
    pub fn step(&mut self) -> usize {
        let changes = self.evaluate();
        let n = changes.len();
        self.apply(changes);
        trace!(changes = n, "generation step");
        n
    }

    /// One string of markers per row.
    pub fn snapshot(&self) -> Vec<String> {
        self.rows()
            .map(|r| r.iter().map(|c| c.marker()).collect())
            .collect()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.snapshot().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_with(height: usize, width: usize, alive: &[(usize, usize)]) -> Field {
        let mut f = Field::new(height, width);
        f.seed(alive.iter().copied());
        f
    }

    fn alive_cells(f: &Field) -> Vec<(usize, usize)> {
        let mut v = vec![];
        for row in 0..f.height() {
            for col in 0..f.width() {
                if f.get(Coord::new(row, col)).is_alive() {
                    v.push((row, col));
                }
            }
        }
        v
    }

    // Naive single-pass update that writes while it reads.
    fn step_in_place(f: &mut Field) {
        for row in 0..f.height() {
            for col in 0..f.width() {
                let c = Coord::new(row, col);
                let next = next_state(f.get(c), f.neighbors(c));
                f.set(c, next);
            }
        }
    }

    #[test]
    fn transition_rule_table() {
        for n in 0..=8u8 {
            let survive = if n == 2 || n == 3 { Cell::Alive } else { Cell::Dead };
            let born = if n == 3 { Cell::Alive } else { Cell::Dead };
            assert_eq!(next_state(Cell::Alive, n), survive, "alive with {n}");
            assert_eq!(next_state(Cell::Dead, n), born, "dead with {n}");
        }
    }

    #[test]
    fn neighbors_on_full_field_respect_edges() {
        let mut f = Field::new(3, 3);
        f.fill(Cell::Alive);

        for (r, c) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
            assert_eq!(f.neighbors(Coord::new(r, c)), 3, "corner ({r}, {c})");
        }
        for (r, c) in [(0, 1), (1, 0), (1, 2), (2, 1)] {
            assert_eq!(f.neighbors(Coord::new(r, c)), 5, "edge ({r}, {c})");
        }
        assert_eq!(f.neighbors(Coord::new(1, 1)), 8);
    }

    #[test]
    fn neighbors_exclude_self() {
        let f = field_with(3, 3, &[(1, 1)]);
        assert_eq!(f.neighbors(Coord::new(1, 1)), 0);
        assert_eq!(f.neighbors(Coord::new(0, 0)), 1);
    }

    #[test]
    fn neighbors_do_not_wrap() {
        let f = field_with(4, 8, &[(0, 7), (3, 0), (3, 7)]);
        assert_eq!(f.neighbors(Coord::new(0, 0)), 0);
        assert_eq!(f.neighbors(Coord::new(3, 6)), 1);
        assert_eq!(f.neighbors(Coord::new(2, 1)), 1);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn get_out_of_bounds_panics() {
        let f = Field::new(2, 4);
        f.get(Coord::new(2, 0));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn neighbors_out_of_bounds_panics() {
        let f = Field::new(2, 4);
        f.neighbors(Coord::new(0, 4));
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn zero_sized_field_panics() {
        let _ = Field::new(0, 4);
    }

    #[test]
    fn empty_field_is_fixed_point() {
        let mut f = Field::new(8, 16);
        let before = f.clone();
        assert_eq!(f.step(), 0);
        assert_eq!(f, before);
    }

    #[test]
    fn block_is_still_life() {
        let mut f = field_with(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let before = f.clone();
        assert_eq!(f.step(), 0);
        assert_eq!(f, before);
    }

    #[test]
    fn blinker_has_period_two() {
        let mut f = field_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let start = f.clone();

        assert_eq!(f.step(), 4);
        assert_eq!(alive_cells(&f), vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(f.step(), 4);
        assert_eq!(f, start);
    }

    #[test]
    fn glider_uses_previous_generation_only() {
        let glider = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
        let mut staged = field_with(6, 6, &glider);
        let mut naive = staged.clone();

        staged.step();
        step_in_place(&mut naive);

        assert_eq!(alive_cells(&staged), vec![(1, 0), (1, 2), (2, 1), (2, 2), (3, 1)]);
        assert_ne!(staged, naive);
    }

    #[test]
    fn evaluate_leaves_field_untouched() {
        let f = field_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let before = f.clone();
        let changes = f.evaluate();

        assert_eq!(f, before);
        assert_eq!(
            changes,
            vec![
                Change { coord: Coord::new(1, 2), kind: ChangeKind::Birth },
                Change { coord: Coord::new(2, 1), kind: ChangeKind::Kill },
                Change { coord: Coord::new(2, 3), kind: ChangeKind::Kill },
                Change { coord: Coord::new(3, 2), kind: ChangeKind::Birth },
            ]
        );
    }

    #[test]
    fn edge_only_cells() {
        let mut corners = field_with(5, 5, &[(0, 0), (0, 4), (4, 0), (4, 4)]);
        assert_eq!(corners.step(), 4);
        assert_eq!(corners.population(), 0);

        let mut top = field_with(4, 6, &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5)]);
        assert_eq!(top.step(), 6);
        assert_eq!(top.snapshot(), vec![".####.", ".####.", "......", "......"]);
    }

    #[test]
    fn snapshot_and_display() {
        let f = field_with(2, 4, &[(0, 0), (1, 3)]);
        assert_eq!(f.snapshot(), vec!["#...", "...#"]);
        assert_eq!(f.to_string(), "#...\n...#");
    }

    #[test]
    fn fill_overwrites_everything() {
        let mut f = field_with(3, 6, &[(1, 1)]);
        f.fill(Cell::Alive);
        assert_eq!(f.population(), 18);
        f.fill(Cell::Dead);
        assert_eq!(f.population(), 0);
    }

    #[test]
    fn markers_round_trip() {
        assert_eq!(Cell::from_marker('#'), Some(Cell::Alive));
        assert_eq!(Cell::from_marker('.'), Some(Cell::Dead));
        assert_eq!(Cell::from_marker('x'), None);
        assert_eq!(Cell::Alive.marker(), CELL);
    }
}
