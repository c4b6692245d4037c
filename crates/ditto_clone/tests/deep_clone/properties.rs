//! Property tests: any chain of any length clones to an equal, fully
//! disjoint chain.

#![allow(
    clippy::doc_markdown,
    reason = "proptest macros generate code with these patterns"
)]

use proptest::prelude::*;

use crate::common::{chain, links, node_class, point, point_class, setup};

fn labels() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{0,8}", 1..40)
}

proptest! {
    #[test]
    fn chain_clone_is_equal_and_disjoint(labels in labels()) {
        let (registry, cloner) = setup();
        let node = node_class(&registry);
        let root = chain(&registry, node, &labels);

        let copy = cloner.clone_object(&root).unwrap();
        prop_assert!(copy.deep_eq(&root));

        let (orig, copied) = (links(&root), links(&copy));
        prop_assert_eq!(orig.len(), copied.len());
        for o in &orig {
            prop_assert!(copied.iter().all(|c| !c.ptr_eq(o)));
        }
    }

    #[test]
    fn point_clone_matches_source(x in any::<i64>(), y in any::<i64>()) {
        let (registry, cloner) = setup();
        let class = point_class(&registry);
        let p = point(&registry, class, x, y);

        let copy = cloner.clone_object(&p).unwrap();
        prop_assert!(copy.deep_eq(&p));
        prop_assert!(!copy.ptr_eq(&p));
    }
}
