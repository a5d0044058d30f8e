//! Ordered searches over divider lists.
//!
//! Page coordinates follow PDF user space: `y` grows towards the top of the
//! page. Row dividers are therefore kept in descending order (top of page
//! first) and column dividers in ascending order (left edge first).

/// Number of leading entries of an ascending slice that are `<= value`.
///
/// # Examples
///
/// ```
/// use pdf2table::geometry::count_at_or_below;
///
/// let dividers = [50.0, 120.0, 200.0];
/// assert_eq!(count_at_or_below(&dividers, 10.0), 0);
/// assert_eq!(count_at_or_below(&dividers, 120.0), 2);
/// assert_eq!(count_at_or_below(&dividers, 500.0), 3);
/// ```
pub fn count_at_or_below(ascending: &[f32], value: f32) -> usize {
    ascending.partition_point(|&d| d <= value)
}

/// Number of leading entries of a descending slice that are `>= value`.
///
/// # Examples
///
/// ```
/// use pdf2table::geometry::count_at_or_above;
///
/// let dividers = [105.0, 85.0, 65.0];
/// assert_eq!(count_at_or_above(&dividers, 200.0), 0);
/// assert_eq!(count_at_or_above(&dividers, 85.0), 2);
/// assert_eq!(count_at_or_above(&dividers, 0.0), 3);
/// ```
pub fn count_at_or_above(descending: &[f32], value: f32) -> usize {
    descending.partition_point(|&d| d >= value)
}

/// Index of the band whose left edge is the largest divider `<= value`.
///
/// Values left of the first divider clamp into band 0; values right of the
/// last divider fall into the last band.
///
/// # Examples
///
/// ```
/// use pdf2table::geometry::predecessor_band;
///
/// let dividers = [50.0, 120.0];
/// assert_eq!(predecessor_band(&dividers, 20.0), 0);
/// assert_eq!(predecessor_band(&dividers, 50.0), 0);
/// assert_eq!(predecessor_band(&dividers, 119.9), 0);
/// assert_eq!(predecessor_band(&dividers, 400.0), 1);
/// ```
pub fn predecessor_band(ascending: &[f32], value: f32) -> usize {
    count_at_or_below(ascending, value).saturating_sub(1)
}

/// Index of the band whose upper edge is the smallest divider `>= value`.
///
/// Returns `None` when the value lies above every divider. Values below the
/// last divider fall into the last band.
pub fn successor_band(descending: &[f32], value: f32) -> Option<usize> {
    count_at_or_above(descending, value).checked_sub(1)
}
