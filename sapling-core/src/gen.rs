//! Generator combinators built on seed-and-size-driven shrink trees.

use crate::data::{Seed, Size};
use crate::error::GenError;
use crate::range::{from_i128, to_i128, Range};
use crate::shrink;
use crate::tree::Tree;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use num_traits::NumCast;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

/// A generator for test data of type `T`.
///
/// Generators are explicit, first-class values that can be composed using
/// combinator functions. Running one with a seed and a size produces a
/// [`Tree`]: the drawn outcome together with a lazy sequence of simpler
/// candidate values. Because the tree is assembled alongside the value,
/// composite generators shrink without any hand-written shrinkers.
pub struct Gen<T> {
    run: Rc<dyn Fn(Size, Seed) -> Tree<T>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            run: Rc::clone(&self.run),
        }
    }
}

impl<T: Clone + 'static> Gen<T> {
    /// Create a new generator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Size, Seed) -> Tree<T> + 'static,
    {
        Gen { run: Rc::new(f) }
    }

    /// Generate a value using the given size and seed.
    ///
    /// The effective size is clamped to at least 1, so combinators that
    /// divide or scale the size never observe zero. Identical seed, size,
    /// and generator always produce an identical tree.
    pub fn generate(&self, size: Size, seed: Seed) -> Tree<T> {
        let size = size.max(Size::new(1));
        (*self.run)(size, seed)
    }

    /// Create a generator from a draw function and a shrink function.
    ///
    /// The drawn value becomes the tree root; its children unfold
    /// `shrink_fn` recursively.
    pub fn create<D, S, I>(shrink_fn: S, draw_fn: D) -> Self
    where
        D: Fn(Size, Seed) -> T + 'static,
        S: Fn(&T) -> I + Clone + 'static,
        I: Iterator<Item = T> + 'static,
    {
        Gen::new(move |size, seed| {
            let root = draw_fn(size, seed);
            Tree::unfold(|x: &T| x.clone(), shrink_fn.clone(), root)
        })
    }

    /// Create a generator that always produces the same value, with no
    /// shrinks.
    pub fn constant(value: T) -> Self {
        Gen::new(move |_size, _seed| Tree::singleton(value.clone()))
    }

    /// Map a function over the generated values.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> U + Clone + 'static,
    {
        Gen::new(move |size, seed| self.generate(size, seed).map(f.clone()))
    }

    /// Bind/flatmap for dependent generation.
    ///
    /// The incoming seed is split so the two stages draw independently.
    /// Shrinking tries to simplify this generator's value (re-running `k`
    /// against each candidate) before simplifying `k`'s own value.
    pub fn bind<U, F>(self, k: F) -> Gen<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> Gen<U> + Clone + 'static,
    {
        Gen::new(move |size, seed| {
            let (s1, s2) = seed.split();
            let k = k.clone();
            self.generate(size, s1)
                .bind(move |value| k(value).generate(size, s2))
        })
    }

    /// Applicative composition: apply generated functions to generated
    /// values, sequencing effects left to right.
    pub fn apply<U, F>(gf: Gen<F>, gx: Gen<T>) -> Gen<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> U + Clone + 'static,
    {
        gf.bind(move |f| gx.clone().map(f))
    }

    /// Defer construction of a generator until run time.
    ///
    /// Required for self-referential generator definitions; the thunk is
    /// invoked on every run instead of during construction.
    pub fn delay<F>(thunk: F) -> Self
    where
        F: Fn() -> Gen<T> + 'static,
    {
        Gen::new(move |size, seed| thunk().generate(size, seed))
    }

    /// Run `handler` with the panic payload if this generator faults,
    /// running the generator it returns instead.
    pub fn try_with<H>(self, handler: H) -> Self
    where
        H: Fn(Box<dyn std::any::Any + Send>) -> Gen<T> + 'static,
    {
        Gen::new(move |size, seed| {
            match panic::catch_unwind(AssertUnwindSafe(|| self.generate(size, seed))) {
                Ok(tree) => tree,
                Err(fault) => handler(fault).generate(size, seed),
            }
        })
    }

    /// Run `cleanup` after this generator completes or faults; faults are
    /// re-raised afterwards.
    pub fn try_finally<C>(self, cleanup: C) -> Self
    where
        C: Fn() + 'static,
    {
        Gen::new(move |size, seed| {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.generate(size, seed)));
            cleanup();
            match outcome {
                Ok(tree) => tree,
                Err(fault) => panic::resume_unwind(fault),
            }
        })
    }

    /// Generate a vector of exactly `n` independently-drawn values.
    ///
    /// Built by repeated binding, so earlier elements shrink before later
    /// ones.
    pub fn replicate(self, n: usize) -> Gen<Vec<T>> {
        let mut acc: Gen<Vec<T>> = Gen::constant(Vec::new());
        for _ in 0..n {
            let g = self.clone();
            acc = acc.bind(move |values| {
                let g = g.clone();
                g.map(move |value| {
                    let mut values = values.clone();
                    values.push(value);
                    values
                })
            });
        }
        acc
    }
}

/// Size and shrink control.
impl<T: Clone + 'static> Gen<T> {
    /// Build a generator whose behavior depends on the current size.
    pub fn sized<F>(f: F) -> Self
    where
        F: Fn(Size) -> Gen<T> + 'static,
    {
        Gen::new(move |size, seed| f(size).generate(size, seed))
    }

    /// Override the ambient size with a fixed value.
    pub fn resize(self, size: Size) -> Self {
        Gen::new(move |_ambient, seed| self.generate(size, seed))
    }

    /// Transform the ambient size before running.
    pub fn scale<F>(self, f: F) -> Self
    where
        F: Fn(Size) -> Size + 'static,
    {
        Gen::new(move |size, seed| self.generate(f(size), seed))
    }

    /// Keep the draw behavior but discard every shrink candidate.
    pub fn no_shrink(self) -> Self {
        Gen::new(move |size, seed| Tree::singleton(self.generate(size, seed).value().clone()))
    }

    /// Layer an additional lazy shrink function on top of the existing
    /// shrinks.
    pub fn shrink_lazy<S, I>(self, shrink_fn: S) -> Self
    where
        S: Fn(&T) -> I + Clone + 'static,
        I: Iterator<Item = T> + 'static,
    {
        Gen::new(move |size, seed| self.generate(size, seed).expand(shrink_fn.clone()))
    }

    /// Layer an additional finite shrink function on top of the existing
    /// shrinks.
    pub fn shrink<S>(self, shrink_fn: S) -> Self
    where
        S: Fn(&T) -> Vec<T> + Clone + 'static,
    {
        self.shrink_lazy(move |value| shrink_fn(value).into_iter())
    }
}

/// Integral generation, the primitive behind every integer width.
impl<T: Copy + NumCast + 'static> Gen<T> {
    /// Draw a uniformly-distributed integer within the range's bounds at
    /// the current size, shrinking toward the range's origin.
    pub fn integral(range: Range<T>) -> Gen<T> {
        Gen::new(move |size, seed| {
            let (lower, upper) = range.bounds(size);
            let origin = to_i128(range.origin());
            let (value, _) = seed.next_integer(to_i128(lower), to_i128(upper));
            Tree::unfold(
                |wide: &i128| from_i128(*wide),
                move |wide: &i128| shrink::towards(origin, *wide),
                value,
            )
        })
    }
}

impl Gen<f64> {
    /// Draw a uniformly-distributed double within the range's bounds,
    /// shrinking toward the range's origin.
    pub fn double(range: Range<f64>) -> Gen<f64> {
        Gen::new(move |size, seed| {
            let (lower, upper) = range.bounds(size);
            let origin = range.origin();
            let (value, _) = seed.next_double(lower, upper);
            Tree::unfold(
                |x: &f64| *x,
                move |x: &f64| shrink::towards_f64(origin, *x),
                value,
            )
        })
    }
}

impl Gen<f32> {
    /// Single-precision generation, derived from [`Gen::double`] by bound
    /// conversion and result narrowing.
    pub fn single(range: Range<f32>) -> Gen<f32> {
        Gen::<f64>::double(range.map(<f64 as From<f32>>::from)).map(|x| x as f32)
    }
}

impl Gen<bool> {
    /// Uniform boolean; shrinks toward `false`.
    pub fn bool() -> Gen<bool> {
        Gen::item(vec![false, true])
    }
}

impl Gen<char> {
    /// Draw a character from an inclusive code-point range.
    pub fn char_range(lower: char, upper: char) -> Gen<char> {
        Gen::<u32>::integral(Range::constant(lower as u32, upper as u32)).map(decode_char)
    }

    /// A decimal digit: `'0'..='9'`.
    pub fn digit() -> Gen<char> {
        Gen::char_range('0', '9')
    }

    /// A lowercase Latin letter.
    pub fn lower() -> Gen<char> {
        Gen::char_range('a', 'z')
    }

    /// An uppercase Latin letter.
    pub fn upper() -> Gen<char> {
        Gen::char_range('A', 'Z')
    }

    /// A letter of either case.
    pub fn alpha() -> Gen<char> {
        Gen::choice(vec![Gen::lower(), Gen::upper()])
    }

    /// A letter or a digit.
    pub fn alpha_num() -> Gen<char> {
        Gen::choice(vec![Gen::lower(), Gen::upper(), Gen::digit()])
    }

    /// Any seven-bit character.
    pub fn ascii() -> Gen<char> {
        Gen::char_range('\0', '\x7f')
    }

    /// Any Latin-1 character.
    pub fn latin1() -> Gen<char> {
        Gen::char_range('\0', '\u{ff}')
    }

    /// Any code point in the 16-bit plane.
    ///
    /// Surrogate code points are not representable as `char` and map to
    /// U+FFFD.
    pub fn unicode_all() -> Gen<char> {
        Gen::<u32>::integral(Range::constant(0, 0xffff)).map(decode_char)
    }

    /// Any code point in the 16-bit plane excluding surrogates and the two
    /// noncharacters U+FFFE and U+FFFF.
    pub fn unicode() -> Gen<char> {
        Gen::<u32>::integral(Range::constant(0, 0xffff))
            .filter(|cp| !(0xd800..=0xdfff).contains(cp) && *cp != 0xfffe && *cp != 0xffff)
            .map(decode_char)
    }

    /// Generate text from this character generator; the length is driven
    /// solely by `length`.
    pub fn string(self, length: Range<usize>) -> Gen<String> {
        self.collection(length)
    }
}

fn decode_char(code_point: u32) -> char {
    char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER)
}

impl Gen<String> {
    /// Sixteen uniformly-drawn bytes in the canonical hyphenated 128-bit
    /// identifier form.
    pub fn guid() -> Gen<String> {
        Gen::<u8>::integral(Range::constant(0, 0xff))
            .replicate(16)
            .map(|bytes| {
                let mut out = String::with_capacity(36);
                for (i, byte) in bytes.iter().enumerate() {
                    if i == 4 || i == 6 || i == 8 || i == 10 {
                        out.push('-');
                    }
                    out.push_str(&format!("{byte:02x}"));
                }
                out
            })
    }
}

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

impl Gen<DateTime<Utc>> {
    /// An instant drawn by epoch-millisecond within `range`.
    ///
    /// Drawn values are clamped one day inside chrono's representable
    /// window, leaving room for any UTC offset applied afterwards.
    pub fn date_time(range: Range<i64>) -> Gen<DateTime<Utc>> {
        Gen::<i64>::integral(range).map(|millis| {
            let lower = DateTime::<Utc>::MIN_UTC.timestamp_millis() + MILLIS_PER_DAY;
            let upper = DateTime::<Utc>::MAX_UTC.timestamp_millis() - MILLIS_PER_DAY;
            DateTime::from_timestamp_millis(millis.clamp(lower, upper))
                .unwrap_or(DateTime::UNIX_EPOCH)
        })
    }
}

impl Gen<DateTime<FixedOffset>> {
    /// An instant plus a UTC offset within ±14 hours; the offset shrinks
    /// toward zero.
    pub fn date_time_offset(range: Range<i64>) -> Gen<DateTime<FixedOffset>> {
        Gen::<DateTime<Utc>>::date_time(range).bind(|utc| {
            Gen::<i32>::integral(Range::constant_from(0, -14 * 60, 14 * 60)).map(move |minutes| {
                let offset = FixedOffset::east_opt(minutes * 60).unwrap_or_else(|| Utc.fix());
                utc.with_timezone(&offset)
            })
        })
    }
}

/// Choice and conditional combinators.
impl<T: Clone + 'static> Gen<T> {
    /// Uniform pick from a non-empty list of items.
    ///
    /// # Panics
    ///
    /// Panics with an invalid-argument fault if `items` is empty.
    pub fn item(items: Vec<T>) -> Gen<T> {
        if items.is_empty() {
            panic!(
                "{}",
                GenError::invalid_argument("items", "item requires a non-empty collection")
            );
        }
        Gen::<usize>::integral(Range::constant(0, items.len() - 1))
            .map(move |index| items[index].clone())
    }

    /// Weighted pick among generators. A pick index is drawn in
    /// `[1, total]` and scanned against the cumulative weights, so
    /// zero-weight entries are never selected and shrinking the index
    /// biases toward earlier entries.
    ///
    /// # Panics
    ///
    /// Panics with an invalid-argument fault if `weighted` is empty or its
    /// weights sum to zero.
    pub fn frequency(weighted: Vec<(u64, Gen<T>)>) -> Gen<T> {
        if weighted.is_empty() {
            panic!(
                "{}",
                GenError::invalid_argument("weighted", "frequency requires a non-empty collection")
            );
        }
        let total: u64 = weighted.iter().map(|(weight, _)| *weight).sum();
        if total == 0 {
            panic!(
                "{}",
                GenError::invalid_argument("weighted", "frequency requires a positive total weight")
            );
        }
        Gen::<u64>::integral(Range::constant(1, total)).bind(move |pick| {
            let mut remaining = pick;
            for (weight, g) in &weighted {
                if remaining <= *weight {
                    return g.clone();
                }
                remaining -= *weight;
            }
            panic!(
                "{}",
                GenError::internal("frequency pick exceeded the cumulative weight")
            );
        })
    }

    /// Uniform pick among generators.
    ///
    /// # Panics
    ///
    /// Panics with an invalid-argument fault if `gens` is empty.
    pub fn choice(gens: Vec<Gen<T>>) -> Gen<T> {
        if gens.is_empty() {
            panic!(
                "{}",
                GenError::invalid_argument("gens", "choice requires a non-empty collection")
            );
        }
        Gen::<usize>::integral(Range::constant(0, gens.len() - 1)).bind(move |index| gens[index].clone())
    }

    /// Uniform pick for recursive structures.
    ///
    /// At size 1 only `non_recursive` generators are candidates, forcing
    /// termination; at larger sizes the `recursive` generators join in,
    /// each rescaled to half the current size.
    ///
    /// # Panics
    ///
    /// Panics with an invalid-argument fault if `non_recursive` is empty.
    pub fn choice_rec(non_recursive: Vec<Gen<T>>, recursive: Vec<Gen<T>>) -> Gen<T> {
        if non_recursive.is_empty() {
            panic!(
                "{}",
                GenError::invalid_argument(
                    "non_recursive",
                    "choice_rec requires at least one non-recursive generator"
                )
            );
        }
        Gen::sized(move |size| {
            if size.get() <= 1 {
                Gen::choice(non_recursive.clone())
            } else {
                let halved = recursive
                    .iter()
                    .map(|g| g.clone().scale(|s| Size::new(s.get() / 2)));
                Gen::choice(non_recursive.iter().cloned().chain(halved).collect())
            }
        })
    }

    /// Attempt up to `size` escalating resizes to find a value satisfying
    /// the predicate; `None` when every attempt fails.
    ///
    /// A successful tree is pruned so its shrinks satisfy the predicate
    /// too.
    pub fn try_filter<P>(self, pred: P) -> Gen<Option<T>>
    where
        P: Fn(&T) -> bool + Clone + 'static,
    {
        Gen::new(move |size, seed| match try_filter_tree(&self, &pred, size, seed) {
            Some(tree) => tree.map(Some),
            None => Tree::singleton(None),
        })
    }

    /// Retry until the predicate admits a value, growing the size by one
    /// between rounds.
    ///
    /// There is no retry cap: a predicate that is unsatisfiable at every
    /// size makes this loop forever. Choosing predicates that stay
    /// satisfiable is the caller's responsibility.
    pub fn filter<P>(self, pred: P) -> Gen<T>
    where
        P: Fn(&T) -> bool + Clone + 'static,
    {
        Gen::new(move |size, seed| {
            let mut size = size;
            let mut seed = seed;
            loop {
                let (attempt_seed, next_seed) = seed.split();
                if let Some(tree) = try_filter_tree(&self, &pred, size, attempt_seed) {
                    return tree;
                }
                size = Size::new(size.get() + 1);
                seed = next_seed;
            }
        })
    }
}

/// One round of filtering: up to `size` attempts, resized to `2k + remaining`
/// on the k-th attempt.
fn try_filter_tree<T, P>(g: &Gen<T>, pred: &P, size: Size, seed: Seed) -> Option<Tree<T>>
where
    T: Clone + 'static,
    P: Fn(&T) -> bool + Clone + 'static,
{
    let attempts = size.get().max(1);
    let mut seed = seed;
    for k in 0..attempts {
        let remaining = attempts - k;
        let (attempt_seed, next_seed) = seed.split();
        let tree = g.generate(Size::new(2 * k + remaining), attempt_seed);
        if pred(tree.value()) {
            return Some(tree.filter(pred.clone()));
        }
        seed = next_seed;
    }
    None
}

impl<T: Clone + 'static> Gen<Option<T>> {
    /// Filter out `None` outcomes and unwrap.
    ///
    /// # Panics
    ///
    /// Panics with an internal-invariant fault if a `None` survives the
    /// filter; that state is unreachable while `filter` behaves.
    pub fn some(self) -> Gen<T> {
        self.filter(|value: &Option<T>| value.is_some())
            .map(|value| match value {
                Some(inner) => inner,
                None => panic!(
                    "{}",
                    GenError::internal("some observed a None that filter should have rejected")
                ),
            })
    }
}

/// Collection and text combinators.
impl<T: Clone + 'static> Gen<T> {
    /// `None` or `Some` of this generator; larger sizes bias toward
    /// presence.
    pub fn option(self) -> Gen<Option<T>> {
        Gen::sized(move |size| {
            Gen::frequency(vec![
                (2, Gen::constant(None)),
                (1 + size.get() as u64, self.clone().map(Some)),
            ])
        })
    }

    /// A vector whose length is drawn from `length`, elements drawn
    /// independently.
    pub fn list(self, length: Range<usize>) -> Gen<Vec<T>> {
        Gen::<usize>::integral(length).bind(move |n| self.clone().replicate(n))
    }

    /// Like [`Gen::list`], assembled into any collection shape.
    pub fn collection<C>(self, length: Range<usize>) -> Gen<C>
    where
        C: FromIterator<T> + Clone + 'static,
    {
        self.list(length).map(|values| values.into_iter().collect())
    }
}
