//! Human-facing key presentation.

/// Separator inserted between key groups.
pub const KEY_SEPARATOR: char = '-';

/// Characters per display group.
pub const KEY_GROUP_SIZE: usize = 5;

/// Strips separators and whitespace from a typed key.
#[must_use]
pub fn normalize(key: &str) -> String {
    key.chars()
        .filter(|&c| c != KEY_SEPARATOR && !c.is_whitespace())
        .collect()
}

/// Groups a key for display: `ABCDE-FGHIJ-K`.
///
/// The input is normalized first, so formatting twice is harmless. A group
/// size of zero returns the normalized key.
#[must_use]
pub fn format_key(key: &str, group_size: usize) -> String {
    let normalized = normalize(key);
    if group_size == 0 {
        return normalized;
    }
    let chars: Vec<char> = normalized.chars().collect();
    chars
        .chunks(group_size)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR.to_string().as_str())
}
