//! One-shot sampling helpers for exploring generators by hand.

use crate::data::{Seed, Size};
use crate::gen::Gen;
use crate::tree::Tree;
use std::io;

/// Size used by [`Gen::generate_tree`] for quick interactive exploration.
const DEFAULT_SIZE: usize = 30;

/// Number of draws dumped by [`Gen::print_sample`].
const SAMPLE_COUNT: usize = 5;

impl<T: Clone + 'static> Gen<T> {
    /// Draw `count` independent trees at the given size, using freshly
    /// split seeds from one random root seed.
    pub fn sample_tree(&self, size: Size, count: usize) -> Vec<Tree<T>> {
        let mut seed = Seed::random();
        let mut trees = Vec::with_capacity(count);
        for _ in 0..count {
            let (draw_seed, next_seed) = seed.split();
            trees.push(self.generate(size, draw_seed));
            seed = next_seed;
        }
        trees
    }

    /// Draw `count` independent outcomes at the given size.
    pub fn sample(&self, size: Size, count: usize) -> Vec<T> {
        self.sample_tree(size, count)
            .into_iter()
            .map(Tree::into_value)
            .collect()
    }

    /// A single draw at the default size with a fresh random seed.
    ///
    /// Not reproducible; callers that need reproducibility should supply
    /// their own seed via [`Gen::generate`].
    pub fn generate_tree(&self) -> Tree<T> {
        self.generate(Size::new(DEFAULT_SIZE), Seed::random())
    }

    /// Dump a small sample batch to the writer: each outcome followed by
    /// its immediate shrink candidates.
    pub fn print_sample<W: io::Write>(&self, out: &mut W) -> io::Result<()>
    where
        T: std::fmt::Debug,
    {
        for tree in self.sample_tree(Size::new(10), SAMPLE_COUNT) {
            writeln!(out, "=== Outcome ===")?;
            writeln!(out, "{:?}", tree.value())?;
            writeln!(out, "=== Shrinks ===")?;
            for shrink in tree.children() {
                writeln!(out, "{:?}", shrink.value())?;
            }
            writeln!(out, ".")?;
        }
        Ok(())
    }
}
