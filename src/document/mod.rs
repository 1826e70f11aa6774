/*!
 * Timed-text document model.
 *
 * The hierarchy is strictly tree-shaped:
 * Document -> Segment -> Line -> Word, each carrying a sanitized `TimeFragment`.
 */

pub mod model;

pub use model::{sanitize_range, Document, Line, Segment, TimeFragment, Word, TIME_EPSILON};
