use std::mem;

use super::data::{Panel, PanelId, StagedId, StagedImage};
use super::list::OrderedList;
use super::view::ViewMode;

/// Owns everything the user is building: the committed panels, the staged
/// selection, the pending caption and the current screen.
///
/// Each method applies one user action. None of them can fail; actions that
/// do not apply to the current state leave it unchanged.
#[derive(Debug, Default)]
pub struct Composer {
    panels: OrderedList<Panel>,
    staged: OrderedList<StagedImage>,
    pending_caption: String,
    mode: ViewMode,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panels(&self) -> &OrderedList<Panel> {
        &self.panels
    }

    pub fn staged(&self) -> &OrderedList<StagedImage> {
        &self.staged
    }

    pub fn pending_caption(&self) -> &str {
        &self.pending_caption
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn can_commit(&self) -> bool {
        !self.staged.is_empty()
    }

    pub fn can_preview(&self) -> bool {
        !self.panels.is_empty()
    }

    // ========== Staging ==========

    /// Install a fresh selection, discarding any unreviewed one
    pub fn stage(&mut self, images: Vec<StagedImage>) {
        self.staged = mem::take(&mut self.staged).replace_all(images);
    }

    pub fn clear_staged(&mut self) {
        self.staged = mem::take(&mut self.staged).clear();
    }

    pub fn remove_staged(&mut self, id: StagedId) {
        tracing::debug!(%id, "discarding staged image");
        self.staged = mem::take(&mut self.staged).remove(id);
    }

    pub fn move_staged_up(&mut self, index: usize) {
        self.staged = mem::take(&mut self.staged).move_up(index);
    }

    pub fn move_staged_down(&mut self, index: usize) {
        self.staged = mem::take(&mut self.staged).move_down(index);
    }

    pub fn set_pending_caption(&mut self, caption: String) {
        self.pending_caption = caption;
    }

    /// Turn every staged image into a panel, in staged order.
    ///
    /// The pending caption goes to the first new panel only; the rest start
    /// with an empty caption. Returns how many panels were created.
    pub fn commit(&mut self) -> usize {
        if self.staged.is_empty() {
            return 0;
        }

        let mut caption = mem::take(&mut self.pending_caption);
        let staged = mem::take(&mut self.staged).into_vec();
        let count = staged.len();

        // The first take moves the caption out, later ones get an empty string
        let new_panels: Vec<Panel> = staged
            .into_iter()
            .map(|image| Panel::from_staged(image, mem::take(&mut caption)))
            .collect();

        self.panels = mem::take(&mut self.panels).append(new_panels);

        tracing::info!(count, total = self.panels.len(), "committed staged images as panels");
        count
    }

    // ========== Panels ==========

    pub fn remove_panel(&mut self, id: PanelId) {
        tracing::debug!(%id, "removing panel");
        self.panels = mem::take(&mut self.panels).remove(id);
        if self.panels.is_empty() {
            self.mode = self.mode.edit();
        }
    }

    pub fn move_panel_up(&mut self, index: usize) {
        self.panels = mem::take(&mut self.panels).move_up(index);
    }

    pub fn move_panel_down(&mut self, index: usize) {
        self.panels = mem::take(&mut self.panels).move_down(index);
    }

    pub fn set_caption(&mut self, id: PanelId, caption: String) {
        self.panels = mem::take(&mut self.panels).update(id, |panel| panel.caption = caption);
    }

    // ========== Screens ==========

    /// Switch to the preview. Returns false (and stays in the editor) when
    /// there are no panels to show.
    pub fn go_to_preview(&mut self) -> bool {
        self.mode = self.mode.preview(self.panels.len());
        self.mode == ViewMode::Previewing
    }

    pub fn back_to_editing(&mut self) {
        self.mode = self.mode.edit();
    }
}
