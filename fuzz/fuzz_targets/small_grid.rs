#![no_main]

use crossword_csp::{Assignment, Crossword, Dictionary, Puzzle};
use libfuzzer_sys::fuzz_target;

const LETTERS: [char; 3] = ['A', 'B', 'C'];

#[derive(Debug)]
struct SmallGridInput {
    structure: String,
    words: Vec<String>,
}

impl<'a> arbitrary::Arbitrary<'a> for SmallGridInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let structure = u
            .arbitrary::<[bool; 16]>()?
            .chunks(4)
            .map(|row| {
                row.iter()
                    .map(|open| if *open { '_' } else { '#' })
                    .chain(std::iter::once('\n'))
                    .collect::<String>()
            })
            .collect();

        let num_words = u.int_in_range(0..=12)?;
        let words = (0..num_words)
            .map(|_| {
                let length = u.int_in_range(2..=4)?;
                (0..length)
                    .map(|_| u.choose(&LETTERS).copied())
                    .collect::<arbitrary::Result<String>>()
            })
            .collect::<arbitrary::Result<Vec<_>>>()?;

        Ok(SmallGridInput { structure, words })
    }
}

fuzz_target!(|data: SmallGridInput| {
    let crossword = Crossword::parse(&data.structure).expect("generated structures are rectangular");
    let dictionary = Dictionary::new(&data.words);
    let mut solver = crossword.solver(&dictionary);

    let solutions: Vec<_> = solver.by_ref().take(8).collect();
    for solution in solutions {
        let mut assignment = Assignment::new(crossword.variables().len());
        for (index, (_, word)) in solution.iter().enumerate() {
            assignment.insert(index, dictionary.id_of(word).unwrap());
        }

        assert!(solver.is_consistent(&assignment));
        assert!(solver.assignment_complete(&assignment));
    }
});
