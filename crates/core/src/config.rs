//! Run-wide settings, fixed before the first URL is processed.

use crate::overrides::Overrides;
use crate::render::OutputMode;

/// Settings shared by every input URL.
///
/// Borrows the override and template sources it was compiled from.
pub struct Config<'a> {
    /// Remove `.` and `..` path segments before applying overrides.
    pub resolve: bool,
    pub overrides: Overrides<'a>,
    pub output: OutputMode<'a>,
}

impl Default for Config<'_> {
    fn default() -> Self {
        Self {
            resolve: false,
            overrides: Overrides::default(),
            output: OutputMode::Json,
        }
    }
}
