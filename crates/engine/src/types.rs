use serde::{Deserialize, Serialize};

/// Fragments must score strictly above this to survive assembly.
pub const MIN_CONFIDENCE: f32 = 0.4;

/// Axis-aligned pixel region of a recognized span.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> u32 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox { left, top, width: right - left, height: bottom - top }
    }
}

/// One recognized text span with its confidence score (0.0–1.0).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fragment {
    pub bbox: BoundingBox,
    pub text: String,
    pub confidence: f32,
}

impl Fragment {
    pub fn new(bbox: BoundingBox, text: impl Into<String>, confidence: f32) -> Self {
        Self { bbox, text: text.into(), confidence: confidence.clamp(0.0, 1.0) }
    }

    /// Whether this fragment carries readable text with enough confidence.
    pub fn is_confident(&self) -> bool {
        !self.text.trim().is_empty() && self.confidence > MIN_CONFIDENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_clamps_confidence() {
        let f = Fragment::new(BoundingBox::default(), "x", 1.5);
        assert_eq!(f.confidence, 1.0);
        let f = Fragment::new(BoundingBox::default(), "x", -0.1);
        assert_eq!(f.confidence, 0.0);
    }

    #[test]
    fn threshold_is_strict() {
        let at = Fragment::new(BoundingBox::default(), "edge", MIN_CONFIDENCE);
        assert!(!at.is_confident());
        let above = Fragment::new(BoundingBox::default(), "edge", 0.41);
        assert!(above.is_confident());
    }

    #[test]
    fn blank_text_is_never_confident() {
        let f = Fragment::new(BoundingBox::default(), "  \t", 0.99);
        assert!(!f.is_confident());
    }

    #[test]
    fn union_covers_both_boxes() {
        let a = BoundingBox::new(10, 20, 30, 10);
        let b = BoundingBox::new(35, 15, 20, 10);
        assert_eq!(a.union(&b), BoundingBox::new(10, 15, 45, 15));
    }

    #[test]
    fn fragment_serializes_with_nested_box() {
        let f = Fragment::new(BoundingBox::new(1, 2, 3, 4), "Hi", 0.5);
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["bbox"]["width"], 3);
        assert_eq!(json["text"], "Hi");
    }
}
