/// Columns taken by the outer margin, two on each side
pub const MARGIN_WIDTH: u16 = 4;
/// Rows taken by the outer margin, one above and one below
pub const MARGIN_HEIGHT: u16 = 2;
/// Rows reserved for the key help under the panes
pub const HELP_HEIGHT: u16 = 3;

/// Pane sizes derived from the terminal size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaneLayout {
    pub total_width: usize,
    pub total_height: usize,
    pub list_width: usize,
    pub detail_width: usize,
}

impl PaneLayout {
    /// Split a terminal of `width` x `height` into the list (two thirds) and
    /// detail (one third) panes. Degenerate sizes clamp to zero.
    pub fn compute(width: u16, height: u16) -> Self {
        let total_width = usize::from(width.saturating_sub(MARGIN_WIDTH));
        let total_height = usize::from(height.saturating_sub(MARGIN_HEIGHT + HELP_HEIGHT));

        Self {
            total_width,
            total_height,
            list_width: total_width * 2 / 3,
            detail_width: total_width / 3,
        }
    }

    /// Rows inside the detail pane border
    pub fn detail_rows(&self) -> usize {
        self.total_height.saturating_sub(2)
    }
}
