use crate::{
    assignment::{Assignment, Solution},
    dictionary::{Dictionary, WordId},
    domain::{Checkpoint, DomainStore},
    Puzzle, Variable,
};
use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet, VecDeque},
};

/// Counters describing the work done by a [`Solver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Number of search nodes, i.e. variables selected for branching.
    pub nodes: usize,
    /// Number of tentative assignments that were undone.
    pub backtracks: usize,
    /// Number of arc revisions performed.
    pub revisions: usize,
    /// Number of candidate words pruned from domains, counting words that
    /// were later restored by backtracking.
    pub removals: usize,
}

#[derive(Debug)]
enum FrameState {
    // Before assigning the next candidate of the frame variable
    Assign,
    // After propagating a candidate, before undoing it
    Retract,
}

#[derive(Debug)]
struct Frame {
    variable: usize,
    candidates: VecDeque<WordId>,
    checkpoint: Checkpoint,
    state: FrameState,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    Fresh,
    Searching,
    Finished,
}

/// Solver that fills a [`Puzzle`] with words from a [`Dictionary`].
///
/// Variables are referred to by their index into
/// [`Puzzle::variables`]. The solver owns the domain of every variable; the
/// individual propagation steps are public so they can be driven by hand,
/// while [`solve`](Solver::solve) and the [`Iterator`] implementation run the
/// complete search.
#[derive(Debug)]
pub struct Solver<'p, P: Puzzle> {
    puzzle: &'p P,
    dictionary: &'p Dictionary,
    overlaps: Vec<Vec<Option<(usize, usize)>>>,
    neighbors: Vec<Vec<usize>>,

    // Values used to track the state of solving
    domains: DomainStore,
    assignment: Assignment,
    stack: Vec<Frame>,
    phase: Phase,

    node_limit: Option<usize>,
    limit_reached: bool,
    statistics: Statistics,
}

impl<'p, P> Solver<'p, P>
where
    P: Puzzle,
{
    /// Create a new `Solver` where every variable may initially take every
    /// word of the dictionary.
    pub fn new(puzzle: &'p P, dictionary: &'p Dictionary) -> Self {
        let variables = puzzle.variables();
        let indices: HashMap<&Variable, usize> = variables
            .iter()
            .enumerate()
            .map(|(index, variable)| (variable, index))
            .collect();

        let overlaps = variables
            .iter()
            .enumerate()
            .map(|(x_index, x)| {
                variables
                    .iter()
                    .enumerate()
                    .map(|(y_index, y)| {
                        if x_index == y_index {
                            None
                        } else {
                            puzzle.overlap(x, y)
                        }
                    })
                    .collect()
            })
            .collect();

        let neighbors = variables
            .iter()
            .map(|variable| {
                let mut neighbors: Vec<usize> = puzzle
                    .neighbors(variable)
                    .into_iter()
                    .filter_map(|neighbor| indices.get(neighbor).copied())
                    .collect();
                neighbors.sort_unstable();
                neighbors.dedup();
                neighbors
            })
            .collect();

        Solver {
            puzzle,
            dictionary,
            overlaps,
            neighbors,

            domains: DomainStore::new(variables.len(), dictionary.len()),
            assignment: Assignment::new(variables.len()),
            stack: Vec::new(),
            phase: Phase::Fresh,

            node_limit: None,
            limit_reached: false,
            statistics: Statistics::default(),
        }
    }

    /// Give up the search, reporting no solution, once `limit` search nodes
    /// have been expanded.
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Reset all solver state except for the puzzle, dictionary and node
    /// limit.
    pub fn reset(&mut self) {
        self.domains = DomainStore::new(self.num_variables(), self.dictionary.len());
        self.assignment.clear();
        self.stack.clear();
        self.phase = Phase::Fresh;
        self.limit_reached = false;
        self.statistics = Statistics::default();
    }

    /// Return true if the last search stopped because of the node limit.
    pub fn limit_reached(&self) -> bool {
        self.limit_reached
    }

    /// Return the counters accumulated since creation or the last reset.
    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    /// Return the remaining candidates of `variable` in lexicographic order.
    pub fn domain(&self, variable: usize) -> Vec<&'p str> {
        let dictionary: &'p Dictionary = self.dictionary;
        let mut words: Vec<WordId> = self.domains.iter(variable).collect();
        words.sort_unstable();

        words
            .into_iter()
            .map(|word| dictionary[word].as_str())
            .collect()
    }

    /// Return the number of remaining candidates of `variable`.
    pub fn domain_len(&self, variable: usize) -> usize {
        self.domains.len(variable)
    }

    fn num_variables(&self) -> usize {
        self.neighbors.len()
    }

    fn overlap(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        self.overlaps.get(x)?.get(y).copied().flatten()
    }

    fn letter(&self, word: WordId, index: usize) -> Option<char> {
        self.dictionary.get(word)?.letter(index)
    }

    /// Count the remaining candidates of `variable` by their letter at
    /// `index`.
    fn letter_counts(&self, variable: usize, index: usize) -> HashMap<char, usize> {
        let mut counts = HashMap::new();
        for word in self.domains.iter(variable) {
            if let Some(letter) = self.letter(word, index) {
                *counts.entry(letter).or_insert(0) += 1;
            }
        }

        counts
    }

    fn prune(&mut self, variable: usize, words: &[WordId]) -> usize {
        let removed = self.domains.remove_all(variable, words);
        self.statistics.removals += removed;

        removed
    }

    /// Remove every word whose length differs from the length of its
    /// variable.
    pub fn enforce_node_consistency(&mut self) {
        let puzzle: &'p P = self.puzzle;
        let variables = puzzle.variables();

        for (variable, slot) in variables.iter().enumerate() {
            let wrong_length: Vec<WordId> = self
                .domains
                .iter(variable)
                .filter(|word| self.dictionary[*word].len() != slot.length)
                .collect();

            self.prune(variable, &wrong_length);
        }

        log::debug!(
            "Node consistency left [{:?}] candidates per variable.",
            (0..variables.len())
                .map(|variable| self.domains.len(variable))
                .collect::<Vec<_>>()
        );
    }

    /// Return true if `word_x` placed in `x` and `word_y` placed in `y` agree
    /// on the letter of their shared cell.
    ///
    /// Variables that do not cross are always compatible. A word too short
    /// to reach the shared cell is never compatible.
    pub fn is_compatible(&self, word_x: WordId, word_y: WordId, x: usize, y: usize) -> bool {
        match self.overlap(x, y) {
            None => true,
            Some((index_x, index_y)) => {
                match (self.letter(word_x, index_x), self.letter(word_y, index_y)) {
                    (Some(letter_x), Some(letter_y)) => letter_x == letter_y,
                    _ => false,
                }
            }
        }
    }

    /// Make `x` arc consistent with `y`.
    ///
    /// A candidate of `x` survives only if `y` still has some *other* word
    /// compatible with it. Return true if any candidate was removed.
    pub fn revise(&mut self, x: usize, y: usize) -> bool {
        self.statistics.revisions += 1;

        let unsupported: Vec<WordId> = match self.overlap(x, y) {
            Some((index_x, index_y)) => {
                let counts = self.letter_counts(y, index_y);

                self.domains
                    .iter(x)
                    .filter(|&word_x| {
                        let Some(letter) = self.letter(word_x, index_x) else {
                            return true;
                        };

                        let mut support = counts.get(&letter).copied().unwrap_or(0);
                        // A word never supports itself
                        if self.domains.contains(y, word_x)
                            && self.letter(word_x, index_y) == Some(letter)
                        {
                            support -= 1;
                        }

                        support == 0
                    })
                    .collect()
            }
            None => {
                let remaining = self.domains.len(y);

                self.domains
                    .iter(x)
                    .filter(|&word_x| {
                        remaining == 0 || (remaining == 1 && self.domains.contains(y, word_x))
                    })
                    .collect()
            }
        };

        let removed = self.prune(x, &unsupported);
        if removed > 0 {
            log::trace!(
                "Revised arc [{} -> {}], removed [{}] values.",
                x,
                y,
                removed
            );
        }

        removed > 0
    }

    /// Establish arc consistency with the AC-3 algorithm.
    ///
    /// The worklist starts with `arcs`, or with every ordered pair of
    /// distinct variables when `arcs` is `None`. Return false as soon as a
    /// domain is wiped out; otherwise return true once the worklist is empty
    /// and every domain is non-empty.
    pub fn ac3(&mut self, arcs: Option<Vec<(usize, usize)>>) -> bool {
        let num_variables = self.num_variables();
        let mut queue: VecDeque<(usize, usize)> = match arcs {
            Some(arcs) => arcs.into_iter().collect(),
            None => (0..num_variables)
                .flat_map(|x| {
                    (0..num_variables)
                        .filter(move |y| *y != x)
                        .map(move |y| (x, y))
                })
                .collect(),
        };
        let mut queued: HashSet<(usize, usize)> = queue.iter().copied().collect();

        while let Some((x, y)) = queue.pop_front() {
            queued.remove(&(x, y));

            if !self.revise(x, y) {
                continue;
            }

            if self.domains.len(x) == 0 {
                log::trace!(
                    "Domain of variable [{}] wiped out by arc [{} -> {}].",
                    x,
                    x,
                    y
                );
                return false;
            }

            for &neighbor in &self.neighbors[x] {
                if neighbor != y && queued.insert((neighbor, x)) {
                    queue.push_back((neighbor, x));
                }
            }
        }

        (0..num_variables).all(|variable| self.domains.len(variable) > 0)
    }

    /// Return true if every variable of the puzzle is assigned.
    pub fn assignment_complete(&self, assignment: &Assignment) -> bool {
        (0..self.num_variables()).all(|variable| assignment.contains(variable))
    }

    /// Return true if `assignment` uses no word twice, every word fits the
    /// length of its variable and crossing variables agree on their shared
    /// letters.
    pub fn is_consistent(&self, assignment: &Assignment) -> bool {
        let variables = self.puzzle.variables();
        let mut used = HashSet::with_capacity(assignment.len());

        assignment.iter().all(|(variable, word)| {
            let fits = match (variables.get(variable), self.dictionary.get(word)) {
                (Some(slot), Some(entry)) => slot.length == entry.len(),
                _ => false,
            };

            fits && used.insert(word)
                && self.neighbors[variable].iter().all(|&neighbor| {
                    assignment.get(neighbor).map_or(true, |other| {
                        self.is_compatible(word, other, variable, neighbor)
                    })
                })
        })
    }

    /// Select the unassigned variable to branch on next.
    ///
    /// Picks the variable with the fewest remaining candidates, breaking ties
    /// in favour of the most neighbors and then the earliest variable.
    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<usize> {
        (0..self.num_variables())
            .filter(|variable| !assignment.contains(*variable))
            .min_by_key(|&variable| {
                (
                    self.domains.len(variable),
                    Reverse(self.neighbors[variable].len()),
                    variable,
                )
            })
    }

    /// Return the candidates of `variable`, least constraining first.
    ///
    /// A candidate is ranked by how many candidates of the unassigned
    /// neighbors it would rule out. Ties are broken lexicographically.
    pub fn order_domain_values(&self, variable: usize, assignment: &Assignment) -> Vec<WordId> {
        let crossings: Vec<(usize, usize, HashMap<char, usize>)> = self.neighbors[variable]
            .iter()
            .filter(|neighbor| !assignment.contains(**neighbor))
            .filter_map(|&neighbor| {
                let (index, index_neighbor) = self.overlap(variable, neighbor)?;

                Some((
                    index,
                    self.domains.len(neighbor),
                    self.letter_counts(neighbor, index_neighbor),
                ))
            })
            .collect();

        let mut ranked: Vec<(usize, WordId)> = self
            .domains
            .iter(variable)
            .map(|word| {
                let ruled_out = crossings
                    .iter()
                    .map(|(index, remaining, counts)| {
                        let matching = self
                            .letter(word, *index)
                            .and_then(|letter| counts.get(&letter).copied())
                            .unwrap_or(0);

                        remaining - matching
                    })
                    .sum();

                (ruled_out, word)
            })
            .collect();
        ranked.sort_unstable();

        ranked.into_iter().map(|(_, word)| word).collect()
    }

    /// Convert the assigned variables of `assignment` into a [`Solution`].
    pub fn solution(&self, assignment: &Assignment) -> Solution<'p> {
        let puzzle: &'p P = self.puzzle;
        let variables = puzzle.variables();
        let dictionary: &'p Dictionary = self.dictionary;

        Solution::new(
            assignment
                .iter()
                .filter_map(|(variable, word)| {
                    Some((variables.get(variable)?, dictionary.get(word)?.as_str()))
                })
                .collect(),
        )
    }

    /// Reset the solver and return the first solution, or `None` if the
    /// puzzle cannot be filled.
    pub fn solve(&mut self) -> Option<Solution<'p>> {
        self.reset();
        self.next_solution()
    }

    /// Return all remaining solutions.
    pub fn all_solutions(&mut self) -> Vec<Solution<'p>> {
        self.collect()
    }

    /// Compute up to the next solution, returning `None` if there are no more.
    pub fn next_solution(&mut self) -> Option<Solution<'p>> {
        enum Step {
            Try(WordId),
            Retract(Checkpoint),
            Exhausted,
        }

        match self.phase {
            Phase::Finished => return None,
            Phase::Fresh => {
                if let Some(solution) = self.start() {
                    return Some(solution);
                }
            }
            Phase::Searching => {}
        }

        while let Some(frame) = self.stack.last_mut() {
            let variable = frame.variable;
            let step = match frame.state {
                FrameState::Assign => frame
                    .candidates
                    .pop_front()
                    .map_or(Step::Exhausted, Step::Try),
                FrameState::Retract => {
                    frame.state = FrameState::Assign;
                    Step::Retract(frame.checkpoint)
                }
            };

            match step {
                Step::Try(word) => {
                    if let Some(solution) = self.try_word(variable, word) {
                        return Some(solution);
                    }
                }
                Step::Retract(checkpoint) => {
                    self.assignment.remove(variable);
                    self.domains.rollback(checkpoint);
                    self.statistics.backtracks += 1;
                }
                Step::Exhausted => {
                    self.stack.pop();
                }
            }
        }

        log::debug!(
            "Search finished after [{:?}], limit reached [{}].",
            self.statistics,
            self.limit_reached
        );
        self.phase = Phase::Finished;

        None
    }

    fn start(&mut self) -> Option<Solution<'p>> {
        log::debug!(
            "Solving [{}] variables with [{}] words.",
            self.num_variables(),
            self.dictionary.len()
        );
        self.phase = Phase::Searching;

        self.enforce_node_consistency();
        if !self.ac3(None) {
            log::debug!("Initial arc consistency failed, no solution exists.");
            self.phase = Phase::Finished;
            return None;
        }

        // Only a puzzle without variables is complete before branching
        if self.assignment_complete(&self.assignment) {
            self.phase = Phase::Finished;
            return Some(self.solution(&self.assignment));
        }

        self.push_frame();
        None
    }

    /// Tentatively assign `word` to `variable` and propagate the choice.
    ///
    /// Returns a solution if the assignment became complete. On any other
    /// outcome the caller either moves to the next candidate or, if the
    /// choice was propagated, retracts it first.
    fn try_word(&mut self, variable: usize, word: WordId) -> Option<Solution<'p>> {
        self.assignment.insert(variable, word);
        if !self.is_consistent(&self.assignment) {
            self.assignment.remove(variable);
            return None;
        }

        if let Some(frame) = self.stack.last_mut() {
            frame.state = FrameState::Retract;
        }

        self.domains.restrict(variable, word);
        let arcs = self.neighbors[variable]
            .iter()
            .map(|&neighbor| (neighbor, variable))
            .collect();
        if !self.ac3(Some(arcs)) {
            return None;
        }

        if self.assignment_complete(&self.assignment) {
            log::debug!("Found solution after [{:?}].", self.statistics);
            return Some(self.solution(&self.assignment));
        }

        self.push_frame();
        None
    }

    fn push_frame(&mut self) {
        if let Some(limit) = self.node_limit {
            if self.statistics.nodes >= limit {
                log::debug!("Node limit [{}] reached, abandoning search.", limit);
                self.limit_reached = true;
                self.stack.clear();
                return;
            }
        }

        let Some(variable) = self.select_unassigned_variable(&self.assignment) else {
            return;
        };
        let candidates = self.order_domain_values(variable, &self.assignment);
        log::trace!(
            "Branching on variable [{}] with [{}] candidates at depth [{}].",
            variable,
            candidates.len(),
            self.stack.len()
        );

        self.statistics.nodes += 1;
        self.stack.push(Frame {
            variable,
            candidates: candidates.into(),
            checkpoint: self.domains.checkpoint(),
            state: FrameState::Assign,
        });
    }
}

impl<'p, P> Iterator for Solver<'p, P>
where
    P: Puzzle,
{
    type Item = Solution<'p>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_solution()
    }
}
