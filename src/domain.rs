//! Candidate words per variable, with cheap checkpoint and rollback.
//!
//! Each domain is a sparse set over the whole dictionary: `members` is a
//! permutation of every word id and the live candidates are the prefix
//! `members[..len]`. Removing a candidate swaps it just past the live prefix,
//! so shrinking a domain never loses information. Restoring the previous
//! `len` brings back exactly the removed candidates, provided restores
//! happen in the reverse order of the shrinks. The trail records those
//! lengths.

use crate::dictionary::WordId;

/// A position in the trail that the store can be rolled back to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Checkpoint(usize);

#[derive(Debug, Clone)]
struct Domain {
    members: Vec<WordId>,
    positions: Vec<usize>,
    len: usize,
}

impl Domain {
    fn full(num_words: usize) -> Self {
        Domain {
            members: (0..num_words).collect(),
            positions: (0..num_words).collect(),
            len: num_words,
        }
    }

    #[inline]
    fn contains(&self, word: WordId) -> bool {
        self.positions
            .get(word)
            .map_or(false, |position| *position < self.len)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.members.swap(a, b);
        self.positions[self.members[a]] = a;
        self.positions[self.members[b]] = b;
    }

    fn remove(&mut self, word: WordId) -> bool {
        if !self.contains(word) {
            return false;
        }

        let position = self.positions[word];
        let last = self.len - 1;
        self.swap(position, last);
        self.len = last;

        true
    }
}

#[derive(Debug, Copy, Clone)]
struct Shrink {
    variable: usize,
    previous_len: usize,
}

/// Mutable mapping from each variable to its remaining candidate words.
#[derive(Debug, Clone)]
pub(crate) struct DomainStore {
    domains: Vec<Domain>,
    trail: Vec<Shrink>,
}

impl DomainStore {
    /// Create a store where every variable may take every word.
    pub fn new(num_variables: usize, num_words: usize) -> Self {
        DomainStore {
            domains: vec![Domain::full(num_words); num_variables],
            trail: Vec::new(),
        }
    }

    pub fn len(&self, variable: usize) -> usize {
        self.domains[variable].len
    }

    pub fn contains(&self, variable: usize, word: WordId) -> bool {
        self.domains[variable].contains(word)
    }

    /// Return the live candidates of `variable`, in no particular order.
    pub fn iter(&self, variable: usize) -> impl Iterator<Item = WordId> + '_ {
        let domain = &self.domains[variable];

        domain.members[..domain.len].iter().copied()
    }

    /// Remove every listed word from the domain of `variable`, returning how
    /// many were actually present.
    pub fn remove_all(&mut self, variable: usize, words: &[WordId]) -> usize {
        let domain = &mut self.domains[variable];
        let previous_len = domain.len;

        for word in words {
            domain.remove(*word);
        }

        let removed = previous_len - domain.len;
        if removed > 0 {
            self.trail.push(Shrink {
                variable,
                previous_len,
            });
        }

        removed
    }

    /// Shrink the domain of `variable` to the single candidate `word`.
    ///
    /// # Panics
    ///
    /// Panics if `word` is not currently in the domain.
    pub fn restrict(&mut self, variable: usize, word: WordId) {
        let domain = &mut self.domains[variable];
        assert!(
            domain.contains(word),
            "Restricting variable [{}] to word [{}] outside of its domain",
            variable,
            word
        );

        let previous_len = domain.len;
        let position = domain.positions[word];
        domain.swap(position, 0);
        domain.len = 1;

        self.trail.push(Shrink {
            variable,
            previous_len,
        });
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.trail.len())
    }

    /// Undo every shrink recorded since `checkpoint` was taken.
    ///
    /// # Panics
    ///
    /// Panics if the trail was already rolled back past `checkpoint`.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        assert!(
            checkpoint.0 <= self.trail.len(),
            "mismatched checkpoint & rollback"
        );

        while self.trail.len() > checkpoint.0 {
            if let Some(shrink) = self.trail.pop() {
                self.domains[shrink.variable].len = shrink.previous_len;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(store: &DomainStore, variable: usize) -> Vec<WordId> {
        let mut words: Vec<_> = store.iter(variable).collect();
        words.sort_unstable();
        words
    }

    #[test]
    fn remove_all_only_counts_live_words() {
        let mut store = DomainStore::new(2, 5);

        assert_eq!(store.remove_all(0, &[1, 3]), 2);
        assert_eq!(store.remove_all(0, &[1, 4]), 1);

        assert_eq!(sorted(&store, 0), vec![0, 2]);
        assert_eq!(sorted(&store, 1), vec![0, 1, 2, 3, 4]);
        assert!(!store.contains(0, 3));
        assert!(store.contains(1, 3));
    }

    #[test]
    fn rollback_restores_nested_shrinks() {
        let mut store = DomainStore::new(2, 6);
        store.remove_all(0, &[5]);

        let outer = store.checkpoint();
        store.remove_all(0, &[0, 2]);
        store.remove_all(1, &[1]);

        let inner = store.checkpoint();
        store.restrict(0, 3);
        assert_eq!(sorted(&store, 0), vec![3]);

        store.rollback(inner);
        assert_eq!(sorted(&store, 0), vec![1, 3, 4]);
        assert_eq!(sorted(&store, 1), vec![0, 2, 3, 4, 5]);

        store.rollback(outer);
        assert_eq!(sorted(&store, 0), vec![0, 1, 2, 3, 4]);
        assert_eq!(sorted(&store, 1), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_removals_leave_no_trail() {
        let mut store = DomainStore::new(1, 3);
        let checkpoint = store.checkpoint();

        assert_eq!(store.remove_all(0, &[]), 0);
        assert_eq!(store.checkpoint(), checkpoint);
    }

    #[test]
    #[should_panic]
    fn restrict_outside_domain_panics() {
        let mut store = DomainStore::new(1, 3);
        store.remove_all(0, &[2]);
        store.restrict(0, 2);
    }
}
