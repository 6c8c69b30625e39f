use callcache::{CallArgs, CallCache};

fn main() {
    // Memoize a function, keeping at most 100 distinct calls
    let mut square = CallCache::with_max_size(
        |args: &CallArgs| -> i64 {
            let n = args.positional_int(0).unwrap_or(0);
            println!("computing {n}^2");
            n * n
        },
        100,
    );

    // First call computes, second is served from the cache
    for _ in 0..2 {
        if let Ok(value) = square.call_positional([12]) {
            println!("square(12) = {value}");
        }
    }

    // Look up without computing
    if let Ok(value) = square.get_cached(&CallArgs::new().arg(12)) {
        println!("Got from cache: {value}");
    }
}
