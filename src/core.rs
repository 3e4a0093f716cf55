pub use kurbo::{Affine, Point, Vec2};

/// Timeline position in frames. Out-of-range values are legal inputs to the
/// evaluator, which clamps through normalized progress, so the inner type is
/// signed.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub i64);

impl FrameIndex {
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_is_a_bare_number_on_the_wire() {
        let s = serde_json::to_string(&FrameIndex(42)).unwrap();
        assert_eq!(s, "42");
        let de: FrameIndex = serde_json::from_str("-3").unwrap();
        assert_eq!(de, FrameIndex(-3));
    }
}
