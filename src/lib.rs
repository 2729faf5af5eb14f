#![deny(missing_docs)]

//! Fill a crossword grid with words from a dictionary by treating it as a
//! binary [constraint satisfaction problem](https://en.wikipedia.org/wiki/Constraint_satisfaction_problem).
//!
//! Every slot of the grid is a variable whose values are the dictionary
//! words. Each slot must hold a word of its own length and crossing slots
//! must agree on the letter of the shared cell. The [`Solver`] enforces node
//! consistency, establishes arc consistency with
//! [AC-3](https://en.wikipedia.org/wiki/AC-3_algorithm) and then runs a
//! backtracking search that maintains arc consistency after every choice.
//!
//! ```
//! use crossword_csp::{Crossword, Dictionary, Puzzle};
//!
//! let crossword = Crossword::parse("___\n#_#\n#_#\n").unwrap();
//! let dictionary = Dictionary::new(["CAT", "ART", "DOG"]);
//!
//! let mut solver = crossword.solver(&dictionary);
//! let solution = solver.solve().unwrap();
//!
//! assert_eq!(crossword.render(&solution).to_string(), "CAT\n█R█\n█T█\n");
//! ```

pub mod assignment;
pub mod crossword;
pub mod dictionary;
pub(crate) mod domain;
mod error;
pub mod render;
pub(crate) mod solver;

pub use assignment::{Assignment, Solution};
pub use crossword::{Crossword, Direction, Variable};
pub use dictionary::{Dictionary, Word, WordId};
pub use error::Error;
pub use solver::{Solver, Statistics};

/// The structure of a puzzle: its variables and how they cross.
pub trait Puzzle {
    /// Return every variable of the puzzle.
    ///
    /// The solver refers to variables by their index into this slice and
    /// breaks remaining ties between equally constrained variables in
    /// favour of the earlier one.
    fn variables(&self) -> &[Variable];

    /// Return the letter indices `(index_in_x, index_in_y)` of the cell that
    /// `x` and `y` share, or `None` if they do not cross.
    fn overlap(&self, x: &Variable, y: &Variable) -> Option<(usize, usize)>;

    /// Return every variable that crosses `variable`.
    fn neighbors(&self, variable: &Variable) -> Vec<&Variable> {
        self.variables()
            .iter()
            .filter(|other| *other != variable && self.overlap(variable, other).is_some())
            .collect()
    }

    /// Return a solver that fills this puzzle with words from `dictionary`.
    fn solver<'p>(&'p self, dictionary: &'p Dictionary) -> Solver<'p, Self>
    where
        Self: Sized,
    {
        Solver::new(self, dictionary)
    }
}

impl<P> Puzzle for &P
where
    P: Puzzle,
{
    fn variables(&self) -> &[Variable] {
        <P as Puzzle>::variables(self)
    }

    fn overlap(&self, x: &Variable, y: &Variable) -> Option<(usize, usize)> {
        <P as Puzzle>::overlap(self, x, y)
    }

    fn neighbors(&self, variable: &Variable) -> Vec<&Variable> {
        <P as Puzzle>::neighbors(self, variable)
    }
}
