/// Derive a short repository name from a clone URL.
///
/// Handles `https://host/org/name.git`, scp-style `git@host:org/name.git`
/// and local paths. Falls back to the input when nothing usable remains.
pub fn repo_name(url: &str) -> &str {
    let trimmed = url.trim_end_matches(['/', '\\']);
    let last = trimmed
        .rsplit(['/', '\\', ':'])
        .next()
        .unwrap_or(trimmed);
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() {
        url
    } else {
        name
    }
}
