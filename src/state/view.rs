/// Which screen the application shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Selecting images and editing panels
    #[default]
    Editing,
    /// Read-only rendering of the finished strip
    Previewing,
}

impl ViewMode {
    /// Switch to the preview, which requires at least one panel
    pub fn preview(self, panel_count: usize) -> Self {
        if panel_count == 0 {
            self
        } else {
            ViewMode::Previewing
        }
    }

    /// Return to the editor (always allowed)
    pub fn edit(self) -> Self {
        ViewMode::Editing
    }
}
