//! Installed third-party distributions.
//!
//! Maps the origin files of third-party modules back to the installed
//! distribution that owns them and renders distributions as requirement
//! strings.

pub mod index;
pub mod metadata;
pub mod requirement;

pub use index::DistributionIndex;
pub use metadata::{DirectUrl, Distribution, VcsInfo};
pub use requirement::format_requirement;
