use crossword_csp::{Crossword, Dictionary, Direction, Puzzle, Solution, Variable};
use std::{collections::HashMap, path::PathBuf};

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn data_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);
    path
}

/// A puzzle described directly by its variables and crossings, without a
/// grid behind it.
#[allow(dead_code)]
pub struct Slots {
    variables: Vec<Variable>,
    overlaps: HashMap<(usize, usize), (usize, usize)>,
}

impl Slots {
    #[allow(dead_code)]
    pub fn new(lengths: &[(Direction, usize)]) -> Self {
        let variables = lengths
            .iter()
            .enumerate()
            .map(|(index, (direction, length))| Variable::new(index, 0, *direction, *length))
            .collect();

        Slots {
            variables,
            overlaps: HashMap::new(),
        }
    }

    /// Make letter `index_x` of variable `x` share a cell with letter
    /// `index_y` of variable `y`.
    #[allow(dead_code)]
    pub fn cross(mut self, x: usize, y: usize, index_x: usize, index_y: usize) -> Self {
        self.overlaps.insert((x, y), (index_x, index_y));
        self.overlaps.insert((y, x), (index_y, index_x));
        self
    }

    fn index_of(&self, variable: &Variable) -> Option<usize> {
        self.variables.iter().position(|other| other == variable)
    }
}

impl Puzzle for Slots {
    fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn overlap(&self, x: &Variable, y: &Variable) -> Option<(usize, usize)> {
        let key = (self.index_of(x)?, self.index_of(y)?);

        self.overlaps.get(&key).copied()
    }
}

/// A 3x3 grid with a blocked centre: four slots crossing at the corners.
#[allow(dead_code)]
pub fn ring() -> Crossword {
    Crossword::parse("___\n_#_\n___\n").unwrap()
}

/// Every way of filling `puzzle`, found by trying all combinations of words.
///
/// Each fill lists the words in variable order.
#[allow(dead_code)]
pub fn brute_force(puzzle: &impl Puzzle, dictionary: &Dictionary) -> Vec<Vec<String>> {
    fn extend(
        puzzle: &impl Puzzle,
        words: &[&str],
        partial: &mut Vec<String>,
        fills: &mut Vec<Vec<String>>,
    ) {
        let variables = puzzle.variables();
        if partial.len() == variables.len() {
            fills.push(partial.clone());
            return;
        }

        let current = &variables[partial.len()];
        for word in words {
            if word.chars().count() != current.length || partial.iter().any(|used| used == word) {
                continue;
            }

            let agrees = variables
                .iter()
                .zip(partial.iter())
                .all(|(other, other_word)| match puzzle.overlap(current, other) {
                    Some((index, index_other)) => {
                        word.chars().nth(index) == other_word.chars().nth(index_other)
                    }
                    None => true,
                });

            if agrees {
                partial.push(word.to_string());
                extend(puzzle, words, partial, fills);
                partial.pop();
            }
        }
    }

    let words: Vec<&str> = dictionary.iter().map(|(_, word)| word.as_str()).collect();
    let mut fills = Vec::new();
    extend(puzzle, &words, &mut Vec::new(), &mut fills);

    fills
}

/// List the words of a solution in variable order.
#[allow(dead_code)]
pub fn words_of(solution: &Solution<'_>) -> Vec<String> {
    solution.iter().map(|(_, word)| word.to_string()).collect()
}

/// All `size` element subsets of `pool`, in lexicographic order of
/// positions.
#[allow(dead_code)]
pub fn subsets<'a>(pool: &[&'a str], size: usize) -> Vec<Vec<&'a str>> {
    if size == 0 {
        return vec![Vec::new()];
    }

    (0..pool.len())
        .flat_map(|first| {
            subsets(&pool[first + 1..], size - 1)
                .into_iter()
                .map(move |mut rest| {
                    rest.insert(0, pool[first]);
                    rest
                })
        })
        .collect()
}
