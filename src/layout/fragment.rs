//! Positioned text fragments.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A piece of page text with its bounding box.
///
/// Coordinates are in PDF user space, so `y0` is the bottom edge and larger
/// values are higher up the page. Fragments are produced by the layout step
/// upstream of this crate and never modified here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Left edge
    pub x0: f32,
    /// Bottom edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
    /// Text content, possibly with surrounding whitespace
    pub text: String,
}

impl Fragment {
    /// Create a new fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf2table::layout::Fragment;
    ///
    /// let fragment = Fragment::new(5.0, 100.0, 20.0, 110.0, " 1 ");
    /// assert_eq!(fragment.trimmed(), "1");
    /// assert_eq!(fragment.width(), 15.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32, text: impl Into<String>) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            text: text.into(),
        }
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Whether the fragment carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    /// Whether this fragment is a section boundary.
    pub fn is_boundary(&self, marker: &str) -> bool {
        self.text.contains(marker)
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Page order: top of page first, then left to right.
    pub fn cmp_page_order(&self, other: &Self) -> Ordering {
        other
            .y0
            .total_cmp(&self.y0)
            .then_with(|| self.x0.total_cmp(&other.x0))
    }

    /// Order within a row: left to right, and for ties the higher fragment first.
    pub fn cmp_row_order(&self, other: &Self) -> Ordering {
        self.x0
            .total_cmp(&other.x0)
            .then_with(|| other.y0.total_cmp(&self.y0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank() {
        assert!(Fragment::new(0.0, 0.0, 1.0, 1.0, " \n\t").is_blank());
        assert!(!Fragment::new(0.0, 0.0, 1.0, 1.0, " x ").is_blank());
    }

    #[test]
    fn test_boundary() {
        let boundary = Fragment::new(0.0, 0.0, 1.0, 1.0, "****** SECTION ******");
        assert!(boundary.is_boundary("*****"));
        assert!(!Fragment::new(0.0, 0.0, 1.0, 1.0, "** note").is_boundary("*****"));
    }

    #[test]
    fn test_page_order() {
        let mut fragments = vec![
            Fragment::new(50.0, 80.0, 60.0, 90.0, "c"),
            Fragment::new(50.0, 100.0, 60.0, 110.0, "b"),
            Fragment::new(5.0, 100.0, 20.0, 110.0, "a"),
        ];
        fragments.sort_by(Fragment::cmp_page_order);
        let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_row_order() {
        let mut fragments = vec![
            Fragment::new(50.0, 90.0, 60.0, 95.0, "lower"),
            Fragment::new(5.0, 80.0, 20.0, 90.0, "index"),
            Fragment::new(50.0, 100.0, 60.0, 110.0, "upper"),
        ];
        fragments.sort_by(Fragment::cmp_row_order);
        let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["index", "upper", "lower"]);
    }

    #[test]
    fn test_deserialize() {
        let fragment: Fragment =
            serde_json::from_str(r#"{"x0":1,"y0":2,"x1":3,"y1":4,"text":"hi"}"#).unwrap();
        assert_eq!(fragment, Fragment::new(1.0, 2.0, 3.0, 4.0, "hi"));
        assert_eq!(fragment.height(), 2.0);
    }
}
