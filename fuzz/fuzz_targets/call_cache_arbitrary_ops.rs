#![no_main]

use callcache::{ArgValue, CallArgs, CallCache};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on CallCache
//
// Mixes positional and keyword calls, lookups, clears and unhashable
// arguments, checking store consistency after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First byte picks the capacity (0-32)
    let capacity = (data[0] as usize) % 33;
    let mut cache = CallCache::with_max_size(
        |args: &CallArgs| -> i64 {
            args.positional_int(0).unwrap_or(0) + args.keyword_int("k").unwrap_or(0)
        },
        capacity,
    );

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 6;
        let key = i64::from(data[idx + 1]);

        match op {
            0 => {
                assert_eq!(cache.call(&CallArgs::new().arg(key)), Ok(key));
            },
            1 => {
                assert_eq!(cache.call(&CallArgs::new().kwarg("k", key)), Ok(key));
            },
            2 => {
                // Read-only lookup
                if let Ok(value) = cache.get_cached(&CallArgs::new().arg(key)) {
                    assert_eq!(*value, key);
                }
            },
            3 => {
                let len = cache.len();
                let result = cache.call(&CallArgs::new().arg(ArgValue::list([key])));
                if capacity > 0 {
                    assert!(result.is_err());
                }
                assert_eq!(cache.len(), len);
            },
            4 => cache.clear(),
            5 => {
                let _ = cache.is_cached(&CallArgs::new().arg(key).kwarg("k", key));
            },
            _ => unreachable!(),
        }

        assert!(cache.check_invariants().is_ok());
        assert!(cache.len() <= cache.capacity());
        if capacity == 0 {
            assert!(cache.is_empty());
        }

        idx += 2;
    }
});
