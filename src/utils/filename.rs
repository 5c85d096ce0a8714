/// Map a display name to a token that is safe to use as a file name.
///
/// Spaces become `_`; colons and both slashes become `-`. Everything else is kept.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ' ' => '_',
            ':' | '\\' | '/' => '-',
            other => other,
        })
        .collect()
}
