// ABOUTME: Shared constants for names and view classes
// ABOUTME: Length bounds used by validation and the CSS classes used by helpers

/// Shortest accepted list or todo name, in characters, after trimming
pub const NAME_MIN_LENGTH: usize = 1;

/// Longest accepted list or todo name, in characters, after trimming
pub const NAME_MAX_LENGTH: usize = 100;

/// CSS class for a list or todo that is done
pub const COMPLETE_CLASS: &str = "complete";

/// CSS class for a list or todo with work remaining
pub const INCOMPLETE_CLASS: &str = "incomplete";
