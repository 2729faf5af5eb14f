//! A crossword grid: the open and blocked cells of a puzzle and the slots
//! ("variables") that the open cells form.
//!
//! # Expected Format
//!  - One line per grid row.
//!  - `_` denotes an open cell, any other character a blocked cell.
//!  - Every row has the same number of cells.
//!
//! ```text
//! #___#
//! #_##_
//! #_##_
//! #_##_
//! #____
//! ```

use crate::{render::Rendered, Error, Puzzle, Solution};
use std::{
    collections::HashMap,
    fmt::{self, Display},
    fs,
    path::Path,
    str::FromStr,
};

const OPEN_CELL: char = '_';

/// The direction a slot is read in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Left to right.
    Across,
    /// Top to bottom.
    Down,
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => f.write_str("across"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// A slot of the grid that must hold exactly one word.
///
/// Variables compare by value and order lexicographically on their row,
/// column, direction and length.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    /// Row of the first cell.
    pub row: usize,
    /// Column of the first cell.
    pub column: usize,
    /// Direction the word is written in.
    pub direction: Direction,
    /// Number of cells in the slot.
    pub length: usize,
}

impl Variable {
    /// Create a new variable.
    pub fn new(row: usize, column: usize, direction: Direction, length: usize) -> Self {
        debug_assert!(length >= 1, "Variables must span at least one cell");

        Variable {
            row,
            column,
            direction,
            length,
        }
    }

    /// Return the `(row, column)` coordinates of every cell in the slot, in
    /// letter order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let Variable {
            row,
            column,
            direction,
            length,
        } = *self;

        (0..length).map(move |k| match direction {
            Direction::Across => (row, column + k),
            Direction::Down => (row + k, column),
        })
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {} : {}",
            self.row, self.column, self.direction, self.length
        )
    }
}

/// The structure of a crossword puzzle.
#[derive(Debug, Clone)]
pub struct Crossword {
    height: usize,
    width: usize,
    open: Vec<bool>,
    variables: Vec<Variable>,
    overlaps: HashMap<(Variable, Variable), (usize, usize)>,
}

impl Crossword {
    /// Parse a grid structure, see the module documentation for the format.
    pub fn parse(structure: &str) -> Result<Self, Error> {
        let mut rows: Vec<&str> = structure.lines().collect();
        while rows.last().map_or(false, |row| row.is_empty()) {
            rows.pop();
        }

        let height = rows.len();
        let width = rows.first().ok_or(Error::EmptyStructure)?.chars().count();

        let mut open = Vec::with_capacity(height * width);
        for (row_index, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(Error::RaggedRow {
                    row: row_index,
                    expected: width,
                    found,
                });
            }

            open.extend(row.chars().map(|c| c == OPEN_CELL));
        }

        let variables = Self::find_variables(height, width, &open);
        let overlaps = Self::find_overlaps(&variables);

        log::debug!(
            "Parsed [{}x{}] structure with [{}] variables and [{}] crossings.",
            height,
            width,
            variables.len(),
            overlaps.len() / 2
        );
        for variable in &variables {
            log::trace!("Found variable [{}].", variable);
        }

        Ok(Crossword {
            height,
            width,
            open,
            variables,
            overlaps,
        })
    }

    /// Read a grid structure from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let structure = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&structure)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Return true if the cell at `(row, column)` is inside the grid and
    /// open.
    pub fn is_open(&self, row: usize, column: usize) -> bool {
        row < self.height && column < self.width && self.open[row * self.width + column]
    }

    /// Lay out the words of `solution` on the grid.
    ///
    /// The result has one entry per cell, `None` for blocked cells and open
    /// cells that no variable of the solution covers.
    pub fn letter_grid(&self, solution: &Solution<'_>) -> Vec<Vec<Option<char>>> {
        let mut letters = vec![vec![None; self.width]; self.height];

        for (variable, word) in solution.iter() {
            for ((row, column), letter) in variable.cells().zip(word.chars()) {
                if self.is_open(row, column) {
                    letters[row][column] = Some(letter);
                }
            }
        }

        letters
    }

    /// Return a printable view of the grid filled in with `solution`.
    pub fn render(&self, solution: &Solution<'_>) -> Rendered<'_> {
        Rendered::new(self, self.letter_grid(solution))
    }

    // Every maximal run of two or more open cells is a slot. Single open
    // cells are unchecked and do not need a word.
    fn find_variables(height: usize, width: usize, open: &[bool]) -> Vec<Variable> {
        let is_open = |row: usize, column: usize| open[row * width + column];
        let run_length = |row: usize, column: usize, direction: Direction| {
            Variable::new(row, column, direction, height.max(width))
                .cells()
                .take_while(|&(r, c)| r < height && c < width && is_open(r, c))
                .count()
        };

        let mut variables = Vec::new();
        for row in 0..height {
            for column in 0..width {
                if !is_open(row, column) {
                    continue;
                }

                if column == 0 || !is_open(row, column - 1) {
                    let length = run_length(row, column, Direction::Across);
                    if length > 1 {
                        variables.push(Variable::new(row, column, Direction::Across, length));
                    }
                }

                if row == 0 || !is_open(row - 1, column) {
                    let length = run_length(row, column, Direction::Down);
                    if length > 1 {
                        variables.push(Variable::new(row, column, Direction::Down, length));
                    }
                }
            }
        }

        variables.sort();
        variables
    }

    fn find_overlaps(variables: &[Variable]) -> HashMap<(Variable, Variable), (usize, usize)> {
        let mut occupants: HashMap<(usize, usize), Vec<(Variable, usize)>> = HashMap::new();
        for variable in variables {
            for (index, cell) in variable.cells().enumerate() {
                occupants.entry(cell).or_default().push((*variable, index));
            }
        }

        let mut overlaps = HashMap::new();
        for occupants in occupants.values() {
            for (x, index_x) in occupants {
                for (y, index_y) in occupants {
                    if x != y {
                        overlaps.insert((*x, *y), (*index_x, *index_y));
                    }
                }
            }
        }

        overlaps
    }
}

impl FromStr for Crossword {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Puzzle for Crossword {
    fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn overlap(&self, x: &Variable, y: &Variable) -> Option<(usize, usize)> {
        self.overlaps.get(&(*x, *y)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn across(row: usize, column: usize, length: usize) -> Variable {
        Variable::new(row, column, Direction::Across, length)
    }

    fn down(row: usize, column: usize, length: usize) -> Variable {
        Variable::new(row, column, Direction::Down, length)
    }

    const STRUCTURE: &str = "#___#\n#_##_\n#_##_\n#_##_\n#____\n";

    #[test]
    fn finds_variables_in_coordinate_order() {
        let crossword = Crossword::parse(STRUCTURE).unwrap();

        assert_eq!(crossword.height(), 5);
        assert_eq!(crossword.width(), 5);
        assert_eq!(
            crossword.variables(),
            &[across(0, 1, 3), down(0, 1, 5), down(1, 4, 4), across(4, 1, 4)]
        );
    }

    #[test]
    fn overlaps_are_symmetric() {
        let crossword = Crossword::parse(STRUCTURE).unwrap();

        assert_eq!(crossword.overlap(&across(0, 1, 3), &down(0, 1, 5)), Some((0, 0)));
        assert_eq!(crossword.overlap(&down(0, 1, 5), &across(4, 1, 4)), Some((4, 0)));
        assert_eq!(crossword.overlap(&across(4, 1, 4), &down(0, 1, 5)), Some((0, 4)));
        assert_eq!(crossword.overlap(&down(1, 4, 4), &across(4, 1, 4)), Some((3, 3)));
        assert_eq!(crossword.overlap(&across(0, 1, 3), &down(1, 4, 4)), None);
        assert_eq!(crossword.overlap(&across(0, 1, 3), &across(0, 1, 3)), None);

        let mut neighbors = crossword.neighbors(&down(0, 1, 5));
        neighbors.sort();
        assert_eq!(neighbors, vec![&across(0, 1, 3), &across(4, 1, 4)]);
    }

    #[test]
    fn single_cells_are_not_variables() {
        let crossword: Crossword = "_#_\n###\n__#\n".parse().unwrap();

        assert_eq!(crossword.variables(), &[across(2, 0, 2)]);
        assert!(crossword.is_open(0, 2));
        assert!(!crossword.is_open(1, 1));
        assert!(!crossword.is_open(3, 0));
    }

    #[test]
    fn rejects_malformed_structures() {
        assert!(matches!(
            Crossword::parse("\n\n"),
            Err(Error::EmptyStructure)
        ));
        assert!(matches!(
            Crossword::parse("___\n__\n"),
            Err(Error::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn keeps_rows_of_blocked_cells() {
        let crossword = Crossword::parse("__\n  \n").unwrap();
        assert_eq!(crossword.height(), 2);
        assert_eq!(crossword.width(), 2);
        assert_eq!(crossword.variables(), &[across(0, 0, 2)]);

        let dictionary = crate::Dictionary::new(["AB"]);
        let solution = crossword.solver(&dictionary).solve().unwrap();
        assert_eq!(crossword.render(&solution).to_string(), "AB\n██\n");
    }

    #[test]
    fn displays_variables() {
        assert_eq!(across(0, 1, 3).to_string(), "(0, 1) across : 3");
        assert_eq!(down(2, 0, 4).to_string(), "(2, 0) down : 4");
    }
}
