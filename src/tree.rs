//! Lazy candidate trees: a value plus an ordered sequence of simpler values.
//!
//! A [`Tree`] pairs a concrete value with a lazily produced sequence of
//! candidate subtrees, each holding a strictly simpler value under some
//! well-founded measure. Shrink search walks these candidates; the
//! combinators here keep the candidate *ordering* aligned with the generator
//! combinators so that minimal counterexamples are deterministic.

use std::fmt;
use std::rc::Rc;

/// A shrink policy: given a value, the ordered simpler values to try.
///
/// Every yielded value must be strictly simpler than the input, which bounds
/// the depth of any tree built from the policy.
pub type Shrink<T> = Rc<dyn Fn(&T) -> Box<dyn Iterator<Item = T>>>;

type Thunk<T> = Rc<dyn Fn() -> Box<dyn Iterator<Item = Tree<T>>>>;

/// A lazily branching tree of a value and its shrink candidates.
///
/// The candidate sequence is a thunk that is re-invoked on every traversal,
/// so it can be walked any number of times, from independent contexts,
/// without exhausting anything. Breadth may be conceptually unbounded; only
/// the nodes a traversal actually visits are ever built.
pub struct Tree<T> {
    value: T,
    children: Thunk<T>,
}

impl<T: Clone + 'static> Tree<T> {
    /// Build a tree from a value and a candidate thunk
    pub fn new(value: T, children: impl Fn() -> Box<dyn Iterator<Item = Tree<T>>> + 'static) -> Self {
        Tree {
            value,
            children: Rc::new(children),
        }
    }

    /// A tree with no candidates: the value is already maximally simple
    pub fn leaf(value: T) -> Self {
        Tree::new(value, || Box::new(std::iter::empty()))
    }

    /// Unfold a tree from a shrink policy.
    ///
    /// Each candidate value becomes a subtree unfolded from the same policy,
    /// so a whole shrink space is reachable from the root while staying
    /// finite along every path.
    pub fn expand(value: T, shrink: Shrink<T>) -> Self {
        let root = value.clone();
        Tree::new(root, move || {
            let shrink_again = Rc::clone(&shrink);
            Box::new((*shrink)(&value).map(move |v| Tree::expand(v, Rc::clone(&shrink_again))))
        })
    }

    /// The value at the root of this tree
    pub fn value(&self) -> &T {
        &self.value
    }

    /// A fresh traversal of the candidate subtrees, in shrink order
    pub fn children(&self) -> Box<dyn Iterator<Item = Tree<T>>> {
        (*self.children)()
    }

    /// Transform every value in the tree, preserving its structure
    pub fn map<U: Clone + 'static>(self, f: impl Fn(&T) -> U + 'static) -> Tree<U> {
        map_shared(Rc::new(f), self)
    }

    /// Dependent composition: grow an inner tree from this tree's value.
    ///
    /// Candidates rebind the *outer* candidates first and only then fall
    /// back to the inner tree's own candidates. Shrinking the outer value
    /// first is a heuristic (a smaller outer input tends to produce a
    /// smaller inner result), not a completeness guarantee.
    pub fn bind<U: Clone + 'static>(self, f: impl Fn(&T) -> Tree<U> + 'static) -> Tree<U> {
        bind_shared(Rc::new(f), self)
    }

    /// Combine two trees with a binary function.
    ///
    /// Candidates exhaust the left tree's shrinks (right held fixed) before
    /// trying the right tree's (left held fixed); earlier-bound arguments
    /// shrink first, which keeps reported counterexamples reproducible.
    pub fn combine2<B, C>(
        f: impl Fn(&T, &B) -> C + 'static,
        left: Tree<T>,
        right: Tree<B>,
    ) -> Tree<C>
    where
        B: Clone + 'static,
        C: Clone + 'static,
    {
        combine2_shared(Rc::new(f), left, right)
    }

    /// Combine an ordered sequence of trees with an n-ary function.
    ///
    /// For each position in left-to-right order, each of that tree's
    /// candidates is substituted with all other positions held fixed.
    pub fn combine_n<U: Clone + 'static>(
        f: impl Fn(&[T]) -> U + 'static,
        trees: Vec<Tree<T>>,
    ) -> Tree<U> {
        combine_n_shared(Rc::new(f), Rc::new(trees))
    }
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Tree {
            value: self.value.clone(),
            children: Rc::clone(&self.children),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

fn map_shared<T, U>(f: Rc<dyn Fn(&T) -> U>, tree: Tree<T>) -> Tree<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
{
    let value = (*f)(tree.value());
    Tree::new(value, move || {
        let f = Rc::clone(&f);
        Box::new(tree.children().map(move |c| map_shared(Rc::clone(&f), c)))
    })
}

fn bind_shared<T, U>(f: Rc<dyn Fn(&T) -> Tree<U>>, tree: Tree<T>) -> Tree<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
{
    let inner = (*f)(tree.value());
    let value = inner.value().clone();
    Tree::new(value, move || {
        let f = Rc::clone(&f);
        let outer = tree.children().map(move |c| bind_shared(Rc::clone(&f), c));
        Box::new(outer.chain(inner.children()))
    })
}

fn combine2_shared<A, B, C>(f: Rc<dyn Fn(&A, &B) -> C>, left: Tree<A>, right: Tree<B>) -> Tree<C>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
{
    let value = (*f)(left.value(), right.value());
    Tree::new(value, move || {
        let f_left = Rc::clone(&f);
        let f_right = Rc::clone(&f);
        let right_fixed = right.clone();
        let left_fixed = left.clone();
        let left_shrinks = left
            .children()
            .map(move |c| combine2_shared(Rc::clone(&f_left), c, right_fixed.clone()));
        let right_shrinks = right
            .children()
            .map(move |c| combine2_shared(Rc::clone(&f_right), left_fixed.clone(), c));
        Box::new(left_shrinks.chain(right_shrinks))
    })
}

fn combine_n_shared<T, U>(f: Rc<dyn Fn(&[T]) -> U>, trees: Rc<Vec<Tree<T>>>) -> Tree<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
{
    let values: Vec<T> = trees.iter().map(|t| t.value().clone()).collect();
    let value = (*f)(&values);
    Tree::new(value, move || {
        let f = Rc::clone(&f);
        let trees = Rc::clone(&trees);
        let positions = trees.len();
        Box::new((0..positions).flat_map(move |i| {
            let f = Rc::clone(&f);
            let trees = Rc::clone(&trees);
            trees[i].children().map(move |candidate| {
                let mut substituted: Vec<Tree<T>> = trees.as_ref().clone();
                substituted[i] = candidate;
                combine_n_shared(Rc::clone(&f), Rc::new(substituted))
            })
        }))
    })
}
