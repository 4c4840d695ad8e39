/// `--limit` when given, else the configured default. Zero means unlimited.
#[must_use]
pub fn effective_limit(flag: Option<u32>, default_limit: u32) -> usize {
    let limit = flag.unwrap_or(default_limit);
    if limit == 0 {
        usize::MAX
    } else {
        usize::try_from(limit).unwrap_or(usize::MAX)
    }
}
