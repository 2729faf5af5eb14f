//! Text rendering of a filled grid.

use crate::Crossword;
use std::fmt::{self, Display, Write};

/// Character printed for blocked cells.
pub const BLOCK: char = '█';

/// A crossword grid together with the letters placed in it.
///
/// Displays one line per row: open cells show their letter (or a space when
/// no letter was placed) and blocked cells show [`BLOCK`].
#[derive(Debug, Clone)]
pub struct Rendered<'c> {
    crossword: &'c Crossword,
    letters: Vec<Vec<Option<char>>>,
}

impl<'c> Rendered<'c> {
    pub(crate) fn new(crossword: &'c Crossword, letters: Vec<Vec<Option<char>>>) -> Self {
        Rendered { crossword, letters }
    }
}

impl Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, letters) in self.letters.iter().enumerate() {
            for (column, letter) in letters.iter().enumerate() {
                let c = if self.crossword.is_open(row, column) {
                    letter.unwrap_or(' ')
                } else {
                    BLOCK
                };
                f.write_char(c)?;
            }
            f.write_char('\n')?;
        }

        Ok(())
    }
}
