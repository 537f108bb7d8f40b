//! Generic top-down DD construction.
//!
//! The builder walks levels from the root down. Each level keeps the unique
//! canonical states seen so far together with a state→column map; generating
//! the children of level `ℓ` inserts states into lower levels only, so the
//! moment a level starts emitting nodes its own map can be released — that
//! map is the dominant memory cost of a build.

use hashbrown::HashMap;
use log::debug;

use crate::node::{Node, NodeRef};
use crate::spec::{DdSpec, Step};
use crate::structure::DdStructure;

struct LevelBucket<S> {
    states: Vec<S>,
    index: HashMap<S, u32>,
}

impl<S> LevelBucket<S> {
    fn new() -> Self {
        Self {
            states: Vec::new(),
            index: HashMap::new(),
        }
    }
}

/// Runs `spec` to completion and returns the unreduced diagram.
pub fn build<S: DdSpec>(spec: &S) -> DdStructure {
    let (step, root_state) = spec.root();
    let top = match step {
        Step::Reject => return DdStructure::constant(false),
        Step::Accept => return DdStructure::constant(true),
        Step::To(level) => level,
    };
    assert!(top >= 1, "root level must be positive");

    let mut buckets: Vec<LevelBucket<S::State>> = (0..=top).map(|_| LevelBucket::new()).collect();
    buckets[top].index.insert(root_state.clone(), 0);
    buckets[top].states.push(root_state);

    let mut levels: Vec<Vec<Node>> = vec![Vec::new(); top + 1];

    for level in (1..=top).rev() {
        let bucket = std::mem::replace(&mut buckets[level], LevelBucket::new());
        // All references into this level exist by now.
        drop(bucket.index);

        let mut nodes = Vec::with_capacity(bucket.states.len());
        for state in &bucket.states {
            let mut lo = NodeRef::ZERO;
            let mut hi = NodeRef::ZERO;
            for (take, child) in [(false, &mut lo), (true, &mut hi)] {
                let mut next_state = state.clone();
                *child = match spec.child(&mut next_state, level, take) {
                    Step::Reject => NodeRef::ZERO,
                    Step::Accept => NodeRef::ONE,
                    Step::To(next) => {
                        assert!((1..level).contains(&next), "child level must descend");
                        let bucket = &mut buckets[next];
                        let col = match bucket.index.get(&next_state) {
                            Some(&col) => col,
                            None => {
                                let col = bucket.states.len() as u32;
                                bucket.index.insert(next_state.clone(), col);
                                bucket.states.push(next_state);
                                col
                            }
                        };
                        NodeRef::new(next as u32, col)
                    }
                };
            }
            nodes.push(Node::new(lo, hi));
        }

        debug!("build: level {} holds {} nodes", level, nodes.len());
        levels[level] = nodes;
    }

    DdStructure::from_parts(levels, NodeRef::new(top as u32, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A two-variable spec accepting exactly {x2} and {x1, x2}: x2 must be
    /// taken, x1 is free.
    struct TopForced;

    impl DdSpec for TopForced {
        type State = ();

        fn root(&self) -> (Step, Self::State) {
            (Step::To(2), ())
        }

        fn child(&self, _state: &mut Self::State, level: usize, take: bool) -> Step {
            match (level, take) {
                (2, false) => Step::Reject,
                (2, true) => Step::To(1),
                (1, _) => Step::Accept,
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn test_build_forced_top() {
        let dd = build(&TopForced);
        assert_eq!(dd.size(), 2);
        assert_eq!(dd.cardinality().to_string(), "2");
    }

    #[test]
    fn test_build_merges_equal_states() {
        // Both branches of the top level funnel into one level-1 state.
        struct Funnel;
        impl DdSpec for Funnel {
            type State = u8;

            fn root(&self) -> (Step, Self::State) {
                (Step::To(2), 7)
            }

            fn child(&self, state: &mut Self::State, level: usize, _take: bool) -> Step {
                if level == 2 {
                    *state = 0;
                    Step::To(1)
                } else {
                    Step::Accept
                }
            }
        }

        let dd = build(&Funnel);
        // One node at level 2, one merged node at level 1.
        assert_eq!(dd.size(), 2);
        assert_eq!(dd.cardinality().to_string(), "4");
    }

    #[test]
    fn test_constant_roots() {
        struct Nothing;
        impl DdSpec for Nothing {
            type State = ();
            fn root(&self) -> (Step, Self::State) {
                (Step::Reject, ())
            }
            fn child(&self, _: &mut Self::State, _: usize, _: bool) -> Step {
                unreachable!()
            }
        }

        let dd = build(&Nothing);
        assert_eq!(dd.size(), 0);
        assert_eq!(dd.cardinality().to_string(), "0");
    }
}
