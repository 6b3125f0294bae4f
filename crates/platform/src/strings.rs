//! Bounded-string helpers shared by the feature crates.

use heapless::String;

/// Copy `s` into a bounded string, truncating at a character boundary when
/// it exceeds the capacity.
pub fn bounded<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    let mut end = s.len().min(N);
    while end > 0 && !s.is_char_boundary(end) {
        end = end.saturating_sub(1);
    }
    if let Some(head) = s.get(..end) {
        // Cannot fail: head.len() <= N by construction.
        let _ = out.push_str(head);
    }
    out
}
