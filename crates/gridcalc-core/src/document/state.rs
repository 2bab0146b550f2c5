use gridcalc_engine::engine::Grid;

use crate::settings::Settings;

/// UI-agnostic document state for the spreadsheet.
///
/// Holds the sparse grid of raw cell text. Display values are computed on
/// every read; nothing is cached, so a read always reflects the latest writes.
#[derive(Clone, Debug, Default)]
pub struct Document {
    /// The spreadsheet grid
    pub grid: Grid,
    pub settings: Settings,
}

impl Document {
    /// Create an empty document with default settings.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Document {
            grid: Grid::new(),
            settings,
        }
    }
}
