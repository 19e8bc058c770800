/// Returns a cached value, or computes, caches and returns it.
///
/// * `$cache`: a [`Cache`](crate::db::Cache)
/// * `$key`: the [`CacheKey`](crate::db::CacheKey) to read and write
/// * `$ttl`: time-to-live in seconds for a freshly computed value
/// * `$block`: future producing an `AppResult` of the value on a miss
///
/// Must be used inside a function returning `AppResult`.
///
/// # Example
/// ```rust,ignore
/// let movies: Vec<Movie> = cached!(cache, CacheKey::Catalog("tmdb".into()), 3600, async {
///     fetch_popular_movies().await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        if let Some(cached) = $cache.get_from_cache(&key).await? {
            tracing::debug!(key = %key, "Cache hit");
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&key, &value, $ttl);
            Ok(value)
        }
    }};
}
