/// Read-through caching for async lookups.
///
/// Evaluates to the cached value for `$key` when present. Otherwise awaits
/// `$block`, queues the result for storage with `$ttl` seconds to live and
/// evaluates to it. Errors from the cache read or the block propagate with
/// `?`, so the macro must be used inside a function returning `AppResult`.
///
/// The cached type must round-trip through JSON. A value that serializes to
/// `null` reads back as a miss.
///
/// ```ignore
/// let video_id: String = cached!(cache, CacheKey::Trailer(name), TTL, provider.lookup(name));
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        match $cache.get_from_cache(&key).await? {
            Some(hit) => hit,
            None => {
                let value = $block.await?;
                $cache.set_in_background(&key, &value, $ttl);
                value
            }
        }
    }};
}
