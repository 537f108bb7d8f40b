//! Family cardinality.
//!
//! In a ZDD every path to `⊤` denotes exactly one member set (skipped levels
//! are zero-forced), so the count of a node is the sum of its children's
//! counts. Counts grow with `2^n` in the worst case, hence big integers.

use hashbrown::HashMap;
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::node::NodeRef;
use crate::structure::DdStructure;

impl DdStructure {
    /// Number of member sets. The decimal string is `cardinality().to_string()`.
    pub fn cardinality(&self) -> BigUint {
        let mut cache: HashMap<NodeRef, BigUint> = HashMap::new();
        self.count_node(self.root(), &mut cache)
    }

    fn count_node(&self, r: NodeRef, cache: &mut HashMap<NodeRef, BigUint>) -> BigUint {
        if r.is_zero() {
            return BigUint::zero();
        }
        if r.is_one() {
            return BigUint::one();
        }
        if let Some(count) = cache.get(&r) {
            return count.clone();
        }

        let node = self.node(r);
        let count = self.count_node(node.lo, cache) + self.count_node(node.hi, cache);

        cache.insert(r, count.clone());
        count
    }
}
