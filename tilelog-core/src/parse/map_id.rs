use crate::parse::envelope::is_digits;

/// Strips a trailing cache-busting `:<digits>(.<digits>)?` marker from a map token.
///
/// Named-map tokens (`user@template@hash`) are kept whole; only the revision
/// marker is removed. Tokens without a well-formed marker come back unchanged.
pub fn layer_group_id(token: &str) -> &str {
    match token.rsplit_once(':') {
        Some((id, marker)) if is_revision_marker(marker) => id,
        _ => token,
    }
}

fn is_revision_marker(marker: &str) -> bool {
    match marker.split_once('.') {
        Some((millis, fraction)) => is_digits(millis) && is_digits(fraction),
        None => is_digits(marker),
    }
}
