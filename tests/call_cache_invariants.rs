// ==============================================
// CALL CACHE BEHAVIOR TESTS (integration)
// ==============================================
//
// End-to-end checks of the public API: memoization, insertion-order
// eviction, key equality and the pass-through configuration.

use std::cell::Cell;

use callcache::config::CacheOptions;
use callcache::{ArgValue, CallArgs, CallCache, CallCacheError};

fn int(args: &CallArgs, name: &str, index: usize) -> i64 {
    args.param(name, index)
        .and_then(ArgValue::as_int)
        .unwrap_or(0)
}

// ==============================================
// Memoization
// ==============================================

mod memoization {
    use super::*;

    #[test]
    fn side_effect_runs_once_for_identical_calls() {
        let counter = Cell::new(0u32);
        let mut cache = CallCache::with_max_size(
            |args: &CallArgs| -> i64 {
                counter.set(counter.get() + 1);
                int(args, "n", 0) + 1
            },
            8,
        );

        let first = cache.call(&CallArgs::new().arg(41)).unwrap();
        let second = cache.call(&CallArgs::new().arg(41)).unwrap();

        assert_eq!(first, 42);
        assert_eq!(second, first);
        assert_eq!(counter.get(), 1, "hit must not invoke the function");
    }

    #[test]
    fn results_are_cloned_not_recomputed() {
        let counter = Cell::new(0u32);
        let mut cache = CallCache::with_max_size(
            |args: &CallArgs| -> Vec<String> {
                counter.set(counter.get() + 1);
                vec![args.to_string(); 2]
            },
            2,
        );

        let a = cache.call(&CallArgs::new().arg("x")).unwrap();
        let b = cache.call(&CallArgs::new().arg("x")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, vec!["(\"x\")".to_string(), "(\"x\")".to_string()]);
        assert_eq!(counter.get(), 1);
    }
}

// ==============================================
// Eviction Order
// ==============================================

mod eviction_order {
    use super::*;

    #[test]
    fn overflow_by_one_evicts_only_the_first() {
        let max_size = 5;
        let mut cache =
            CallCache::with_max_size(|args: &CallArgs| -> i64 { int(args, "n", 0) }, max_size);

        for n in 0..=max_size as i64 {
            cache.call(&CallArgs::new().arg(n)).unwrap();
            assert!(cache.len() <= max_size);
        }

        assert!(!cache.is_cached(&CallArgs::new().arg(0)));
        for n in 1..=max_size as i64 {
            assert!(cache.is_cached(&CallArgs::new().arg(n)), "{n} should remain");
        }
    }

    #[test]
    fn square_example() {
        let mut square = CallCache::with_max_size(
            |args: &CallArgs| -> i64 {
                let n = int(args, "n", 0);
                n * n
            },
            2,
        );

        assert_eq!(square.call_positional([2]), Ok(4));
        assert_eq!(square.call_positional([3]), Ok(9));
        assert_eq!(square.call_positional([2]), Ok(4));
        assert_eq!(square.call_positional([4]), Ok(16));

        let err = square.get_cached(&CallArgs::new().arg(2)).unwrap_err();
        assert_eq!(err, CallCacheError::NotCached);
        assert_eq!(square.len(), 2);
    }
}

// ==============================================
// Key Equality
// ==============================================

mod key_equality {
    use super::*;

    #[test]
    fn keyword_versus_positional_are_distinct() {
        let counter = Cell::new(0u32);
        let mut add = CallCache::with_max_size(
            |args: &CallArgs| -> i64 {
                counter.set(counter.get() + 1);
                int(args, "x", 0) + int(args, "y", 1)
            },
            4,
        );

        assert_eq!(add.call(&CallArgs::new().arg(1).kwarg("y", 2)), Ok(3));
        assert_eq!(add.call(&CallArgs::new().arg(1).arg(2)), Ok(3));
        assert_eq!(counter.get(), 2);

        assert_eq!(add.call(&CallArgs::new().arg(1)), Ok(1));
        assert_eq!(add.call(&CallArgs::new().kwarg("x", 1)), Ok(1));
        assert_eq!(counter.get(), 4);
    }

    #[test]
    fn keyword_order_is_ignored() {
        let counter = Cell::new(0u32);
        let mut add = CallCache::with_max_size(
            |args: &CallArgs| -> i64 {
                counter.set(counter.get() + 1);
                int(args, "x", 0) + int(args, "y", 1)
            },
            4,
        );

        add.call(&CallArgs::new().kwarg("x", 1).kwarg("y", 2)).unwrap();
        add.call(&CallArgs::new().kwarg("y", 2).kwarg("x", 1)).unwrap();

        assert_eq!(counter.get(), 1);
        assert_eq!(add.len(), 1);
    }

    #[test]
    fn numerically_equal_arguments_hit() {
        let counter = Cell::new(0u32);
        let mut identity = CallCache::with_max_size(
            |args: &CallArgs| -> String {
                counter.set(counter.get() + 1);
                args.to_string()
            },
            4,
        );

        identity.call(&CallArgs::new().arg(1)).unwrap();
        identity.call(&CallArgs::new().arg(1.0)).unwrap();
        identity.call(&CallArgs::new().arg(true)).unwrap();
        identity.call(&CallArgs::new().kwarg("x", 1)).unwrap();
        identity.call(&CallArgs::new().kwarg("x", 1.0)).unwrap();

        assert_eq!(counter.get(), 2);
        assert_eq!(identity.len(), 2);
        assert!(identity.is_cached(&CallArgs::new().kwarg("x", true)));
        assert!(!identity.is_cached(&CallArgs::new().arg(1.5)));
    }

    #[test]
    fn different_arity_never_matches() {
        let counter = Cell::new(0u32);
        let mut count_args = CallCache::with_max_size(
            |args: &CallArgs| -> usize {
                counter.set(counter.get() + 1);
                args.len()
            },
            4,
        );

        assert_eq!(count_args.call(&CallArgs::new().arg(1)), Ok(1));
        assert_eq!(count_args.call(&CallArgs::new().arg(1).arg(1)), Ok(2));
        assert_eq!(count_args.call(&CallArgs::new()), Ok(0));
        assert_eq!(counter.get(), 3);
    }

    #[test]
    fn tuples_are_valid_keys() {
        let mut sum = CallCache::with_max_size(
            |args: &CallArgs| -> i64 {
                match args.get(0) {
                    Some(ArgValue::Tuple(items)) => items.iter().filter_map(ArgValue::as_int).sum(),
                    _ => 0,
                }
            },
            4,
        );

        let args = CallArgs::new().arg(ArgValue::tuple([1, 2, 3]));
        assert_eq!(sum.call(&args), Ok(6));
        assert_eq!(sum.get_cached(&args), Ok(&6));
    }

    #[test]
    fn unhashable_arguments_are_rejected_when_caching() {
        let mut first = CallCache::with_max_size(
            |args: &CallArgs| -> Option<ArgValue> { args.get(0).cloned() },
            4,
        );

        let err = first
            .call(&CallArgs::new().arg(ArgValue::list([1, 2])))
            .unwrap_err();
        assert!(matches!(
            err,
            CallCacheError::UnhashableArgument { kind: "list", .. }
        ));
        assert!(first.is_empty());
    }
}

// ==============================================
// Pass-Through Mode
// ==============================================

mod passthrough {
    use super::*;

    #[test]
    fn zero_max_size_never_stores() {
        let counter = Cell::new(0u32);
        let mut cache = CallCache::from_options(
            |_: &CallArgs| -> u32 {
                counter.set(counter.get() + 1);
                counter.get()
            },
            &CacheOptions::with_max_size(0),
        )
        .unwrap();

        for expected in 1..=4 {
            assert_eq!(cache.call(&CallArgs::new().arg(1)), Ok(expected));
            assert_eq!(cache.len(), 0);
        }
        assert_eq!(counter.get(), 4);
    }

    #[test]
    fn negative_options_are_rejected() {
        let result: Result<CallCache<_, u32>, _> =
            CallCache::from_options(|_: &CallArgs| -> u32 { 0 }, &CacheOptions::with_max_size(-7));
        assert!(matches!(
            result,
            Err(CallCacheError::InvalidConfiguration { max_size: -7 })
        ));
    }
}

// ==============================================
// Clear
// ==============================================

#[test]
fn clear_resets_to_cold_cache() {
    let counter = Cell::new(0u32);
    let mut cache = CallCache::with_max_size(
        |args: &CallArgs| -> i64 {
            counter.set(counter.get() + 1);
            int(args, "n", 0)
        },
        3,
    );

    for n in [1, 2, 3] {
        cache.call_positional([n]).unwrap();
    }
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.capacity(), 3);

    for n in [1, 2, 3] {
        cache.call_positional([n]).unwrap();
    }
    assert_eq!(counter.get(), 6);
    assert!(cache.check_invariants().is_ok());
}
