/// Configuration errors, detected eagerly at the call that discovers them.
///
/// A zero or negative item size would corrupt every downstream offset, so it
/// is surfaced immediately rather than coerced or deferred.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("item size must be finite and greater than 0 (got {size} for index {index})")]
    InvalidSize { index: usize, size: f64 },
    #[error("sticky indexes must be sorted in strictly ascending order")]
    InvalidStickies,
    #[error("scroll duration must be finite and greater than 0 (got {0})")]
    InvalidDuration(f64),
}
