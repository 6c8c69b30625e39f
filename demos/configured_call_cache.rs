//! Builds a call cache from TOML options with tracing output enabled.
//!
//! Run with: `RUST_LOG=callcache=trace cargo run --example configured_call_cache`

use callcache::config::CacheOptions;
use callcache::{CallArgs, CallCache, CallCacheError};
use tracing_subscriber::EnvFilter;

const OPTIONS: &str = r#"
max_size = 2
name = "add"
"#;

fn main() -> Result<(), CallCacheError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("callcache=debug")),
        )
        .init();

    let options = CacheOptions::from_toml_str(OPTIONS)?;
    let mut add = CallCache::from_options(
        |args: &CallArgs| -> i64 {
            let x = args.param("x", 0).and_then(|v| v.as_int()).unwrap_or(0);
            let y = args.param("y", 1).and_then(|v| v.as_int()).unwrap_or(0);
            x + y
        },
        &options,
    )?;

    println!("{}", add.call(&CallArgs::new().arg(1).kwarg("y", 2))?);
    println!("{}", add.call(&CallArgs::new().kwarg("y", 2).arg(1))?);
    println!("{}", add.call(&CallArgs::new().arg(1).arg(2))?);
    // Evicts (1, y=2)
    println!("{}", add.call(&CallArgs::new().arg(5).arg(5))?);

    for key in add.keys() {
        println!("cached {key}");
    }
    Ok(())
}
