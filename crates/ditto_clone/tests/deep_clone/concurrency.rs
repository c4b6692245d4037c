//! Many threads cloning through one shared cloner.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rayon::prelude::*;

use ditto_model::Value;

use crate::common::{point, point_class, setup};

#[test]
fn concurrent_first_use_settles_on_one_plan() {
    let (registry, cloner) = setup();
    let class = point_class(&registry);

    let plans: Vec<_> = (0..64)
        .into_par_iter()
        .map(|_| cloner.plan_for(class).unwrap())
        .collect();

    let first = &plans[0];
    assert!(plans.iter().all(|plan| Arc::ptr_eq(plan, first)));
    assert_eq!(cloner.cache().len(), 1);

    let stats = cloner.cache().stats();
    assert_eq!(stats.hits + stats.misses, 64);
    assert!(stats.builds >= 1);
}

#[test]
fn parallel_clones_are_independent() {
    let (registry, cloner) = setup();
    let class = point_class(&registry);
    let originals: Vec<_> = (0..256_i64).map(|i| point(&registry, class, i, -i)).collect();

    let copies: Vec<_> = originals
        .par_iter()
        .map(|p| cloner.clone_object(p).unwrap())
        .collect();

    for (i, (orig, copy)) in (0_i64..).zip(originals.iter().zip(&copies)) {
        assert!(!orig.ptr_eq(copy));
        assert_eq!(copy.get("x").unwrap(), Value::int(i));
        assert_eq!(copy.get("y").unwrap(), Value::int(-i));
    }
    assert_eq!(cloner.cache().len(), 1);
}

#[test]
fn cache_clear_races_with_cloning() {
    let (registry, cloner) = setup();
    let class = point_class(&registry);
    let p = point(&registry, class, 1, 1);

    (0..128).into_par_iter().for_each(|i| {
        if i % 16 == 0 {
            cloner.clear_cache();
        }
        let copy = cloner.clone_object(&p).unwrap();
        assert!(copy.deep_eq(&p));
    });
}
