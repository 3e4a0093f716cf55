/// Size used when vector markup carries no parsable nominal size.
pub const FALLBACK_SIZE: f64 = 100.0;

/// Nominal width/height of a vector image payload. The markup stays an
/// opaque string everywhere else in the crate; this parse exists only so
/// newly added elements get a sensible intrinsic size. Unparsable payloads
/// fall back to [`FALLBACK_SIZE`] square rather than erroring.
pub fn vector_intrinsic_size(source: &str) -> (f64, f64) {
    let opts = usvg::Options::default();
    match usvg::Tree::from_str(source, &opts) {
        Ok(tree) => {
            let size = tree.size();
            (f64::from(size.width()), f64::from(size.height()))
        }
        Err(err) => {
            tracing::warn!(%err, "vector markup did not parse; using fallback size");
            (FALLBACK_SIZE, FALLBACK_SIZE)
        }
    }
}
