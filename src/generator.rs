//! Re-randomized generators producing shrink trees.
//!
//! A [`Gen`] is an immutable recipe: every [`Gen::generate`] call draws
//! fresh randomness from a [`RandomSource`] and builds a brand-new
//! [`Tree`] for the drawn value. The combinators here lift the tree
//! combinators to the randomized layer, keeping draw order strictly
//! sequential so a seeded source reproduces whole runs.

use std::rc::Rc;

use crate::error::PropertyError;
use crate::rng::RandomSource;
use crate::shrink::towards;
use crate::tree::Tree;

/// A composable producer of values together with their shrink structure.
///
/// Cloning a `Gen` is cheap; the underlying closure is shared. Generators
/// hold no mutable state of their own, so one value can be invoked any
/// number of times and from any number of compositions.
pub struct Gen<T> {
    run: Rc<dyn Fn(&RandomSource) -> Tree<T>>,
}

impl<T: Clone + 'static> Gen<T> {
    /// Wrap a generation function
    pub fn new(run: impl Fn(&RandomSource) -> Tree<T> + 'static) -> Self {
        Gen { run: Rc::new(run) }
    }

    /// Draw fresh randomness and build a shrink tree
    pub fn generate(&self, source: &RandomSource) -> Tree<T> {
        (*self.run)(source)
    }

    /// A generator that ignores the source and always yields a leaf
    pub fn constant(value: T) -> Gen<T> {
        Gen::new(move |_| Tree::leaf(value.clone()))
    }

    /// Transform generated values, preserving shrink structure
    pub fn map<U: Clone + 'static>(&self, f: impl Fn(&T) -> U + 'static) -> Gen<U> {
        let inner = self.clone();
        let f = Rc::new(f);
        Gen::new(move |source| {
            let f = Rc::clone(&f);
            inner.generate(source).map(move |value| (*f)(value))
        })
    }

    /// Dependent composition: pick the next generator from the drawn value.
    ///
    /// The inner generator is invoked (drawing fresh randomness) once for
    /// the initial value, and again whenever shrink search revisits a
    /// different outer value; the inner portion is re-randomized on every
    /// such step. Outer candidates are tried before inner ones.
    pub fn bind<U: Clone + 'static>(&self, f: impl Fn(&T) -> Gen<U> + 'static) -> Gen<U> {
        let outer = self.clone();
        let f = Rc::new(f);
        Gen::new(move |source| {
            let tree = outer.generate(source);
            let f = Rc::clone(&f);
            let source = source.clone();
            tree.bind(move |value| (*f)(value).generate(&source))
        })
    }

    /// Pair this generator with another, left drawn first
    pub fn zip<U: Clone + 'static>(&self, other: &Gen<U>) -> Gen<(T, U)> {
        let left = self.clone();
        let right = other.clone();
        Gen::new(move |source| {
            let left_tree = left.generate(source);
            let right_tree = right.generate(source);
            Tree::combine2(|a: &T, b: &U| (a.clone(), b.clone()), left_tree, right_tree)
        })
    }

    /// Draw `count` root values, discarding their shrink trees.
    ///
    /// Handy for eyeballing a generator's distribution.
    pub fn sample(&self, source: &RandomSource, count: usize) -> Vec<T> {
        (0..count)
            .map(|_| self.generate(source).value().clone())
            .collect()
    }
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            run: Rc::clone(&self.run),
        }
    }
}

/// Uniform integers in `[low, high]`, shrinking toward the in-range value
/// closest to zero.
///
/// Returns [`PropertyError::InvalidRange`] when `low > high`.
pub fn try_int_between(low: i64, high: i64) -> Result<Gen<i64>, PropertyError> {
    if low > high {
        return Err(PropertyError::invalid_range(low, high));
    }
    let shrink = towards(low, high);
    Ok(Gen::new(move |source| {
        let value = source.draw(low, high);
        Tree::expand(value, Rc::clone(&shrink))
    }))
}

/// Uniform integers in `[low, high]`; panics if the range is empty.
pub fn int_between(low: i64, high: i64) -> Gen<i64> {
    match try_int_between(low, high) {
        Ok(generator) => generator,
        Err(error) => panic!("int_between: {}", error),
    }
}

/// Combine an ordered sequence of generators with an n-ary function.
///
/// Draws happen left to right against the one source; candidate trees are
/// combined position by position in the same order.
pub fn combine_n<T, U>(f: impl Fn(&[T]) -> U + 'static, gens: Vec<Gen<T>>) -> Gen<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
{
    let f = Rc::new(f);
    Gen::new(move |source| {
        let trees: Vec<Tree<T>> = gens.iter().map(|g| g.generate(source)).collect();
        let f = Rc::clone(&f);
        Tree::combine_n(move |values| (*f)(values), trees)
    })
}

/// Lists of exactly `length` elements
pub fn list_of_length<T: Clone + 'static>(length: usize, element: &Gen<T>) -> Gen<Vec<T>> {
    combine_n(|items: &[T]| items.to_vec(), vec![element.clone(); length])
}

/// Lists of 0 to 10 elements whose length itself shrinks.
///
/// Built from `bind` over a length draw, so shrink search tries shorter
/// lists before it touches any surviving element's value.
pub fn list_of<T: Clone + 'static>(element: &Gen<T>) -> Gen<Vec<T>> {
    let element = element.clone();
    int_between(0, 10).bind(move |&length| list_of_length(length as usize, &element))
}

/// Pick uniformly among the given generators; panics on an empty list.
pub fn one_of<T: Clone + 'static>(gens: Vec<Gen<T>>) -> Gen<T> {
    if gens.is_empty() {
        panic!("one_of cannot choose from an empty list of generators");
    }
    let last = gens.len() as i64 - 1;
    int_between(0, last).bind(move |&index| gens[index as usize].clone())
}
