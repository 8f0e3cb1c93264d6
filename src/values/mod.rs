//! Validated CSS values built from props.
//!
//! - [`TrackList`]: grid track sizes for `grid-template-columns`/`rows`
//! - [`AreaMatrix`]: row strings for `grid-template-areas`
//! - [`Placement`]: `start / end` lines for `grid-column`/`grid-row`

mod area;
mod placement;
mod track;

pub use area::AreaMatrix;
pub(crate) use placement::is_safe_value;
pub use placement::{GridLine, Placement};
pub use track::TrackList;

/// Formats `part / whole` as a percentage, e.g. `33.33333333333333%`.
pub fn percentage(part: u32, whole: u32) -> String {
    format!("{}%", f64::from(part) / f64::from(whole) * 100.0)
}
