/// Read-through caching against a [`Cache`](crate::db::Cache).
///
/// Looks `$key` up first. On a hit the cached value is returned as `Ok`; on a
/// miss `$block` is awaited, its value queued for a background write with
/// `$ttl` seconds to live, and returned as `Ok`. A failed lookup is logged and
/// treated as a miss. Errors from the block propagate with `?`, so the macro
/// must be used inside a function returning `AppResult`.
///
/// ```rust,ignore
/// async fn read_all(&self) -> AppResult<Vec<Resource>> {
///     cached!(self.cache, CacheKey::Catalog, self.ttl, self.inner.read_all())
/// }
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        let lookup = match $cache.get_from_cache(&key).await {
            Ok(lookup) => lookup,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache lookup failed");
                None
            }
        };
        if let Some(hit) = lookup {
            tracing::debug!(key = %key, "Cache hit");
            Ok(hit)
        } else {
            tracing::debug!(key = %key, "Cache miss");
            let value = $block.await?;
            $cache.set_in_background(&key, &value, $ttl);
            Ok(value)
        }
    }};
}
