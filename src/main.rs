use iced::widget::text_editor;
use iced::{Element, Task, Theme};
use rfd::FileDialog;

mod config;
mod media;
mod state;
mod ui;

use config::Settings;
use media::LoadError;
use state::composer::Composer;
use state::data::{PanelId, StagedId, StagedImage};
use state::view::ViewMode;
use ui::editor::CaptionEditors;

/// Main application state
struct ComicStrip {
    /// Panels, staged images and the current screen
    composer: Composer,
    /// Edit buffers of the multi-line caption boxes
    editors: CaptionEditors,
    /// Settings read at startup
    settings: Settings,
    /// Bumped for every selection; load results from older ones are ignored
    load_generation: u64,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Select images"
    SelectImages,
    /// Background loading of the picked files finished (tagged with the
    /// selection generation that started it)
    ImagesLoaded(u64, Result<Vec<StagedImage>, LoadError>),
    /// User discarded the whole pending selection
    ClearSelection,
    StagedMoveUp(usize),
    StagedMoveDown(usize),
    StagedRemove(StagedId),
    /// Input in the caption box for the next commit
    PendingCaptionEdited(text_editor::Action),
    /// User clicked "Add selected images to the strip"
    CommitStaged,
    PanelMoveUp(usize),
    PanelMoveDown(usize),
    PanelRemove(PanelId),
    PanelCaptionEdited(PanelId, text_editor::Action),
    GoToPreview,
    BackToEditing,
}

impl ComicStrip {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        (Self::with_settings(Settings::load()), Task::none())
    }

    fn with_settings(settings: Settings) -> Self {
        tracing::info!(
            thumbnail_size = settings.thumbnail_size,
            extensions = ?settings.extensions,
            "🎨 Comic Strip initialized"
        );

        ComicStrip {
            composer: Composer::new(),
            editors: CaptionEditors::default(),
            settings,
            load_generation: 0,
            status: "Ready. Select images to start a strip.".to_string(),
        }
    }

    /// Start a new selection, superseding any load still in flight
    fn begin_load(&mut self) -> u64 {
        self.load_generation += 1;
        self.load_generation
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectImages => {
                // Show the native file picker dialog
                let files = FileDialog::new()
                    .set_title("Select images for new panels")
                    .add_filter("Images", self.settings.extensions.as_slice())
                    .pick_files();

                if let Some(paths) = files.filter(|paths| !paths.is_empty()) {
                    self.status = format!("Loading {} image(s)...", paths.len());
                    let generation = self.begin_load();

                    return Task::perform(
                        media::load_images(paths, self.settings.thumbnail_size),
                        move |result| Message::ImagesLoaded(generation, result),
                    );
                }

                Task::none()
            }
            Message::ImagesLoaded(generation, _) if generation != self.load_generation => {
                tracing::debug!(
                    generation,
                    current = self.load_generation,
                    "ignoring result of a superseded selection"
                );
                Task::none()
            }
            Message::ImagesLoaded(_, Ok(images)) => {
                self.status = format!("Selected {} image(s).", images.len());
                self.composer.stage(images);
                Task::none()
            }
            Message::ImagesLoaded(_, Err(err)) => {
                // The previous selection stays as it was
                tracing::warn!("dropping image selection: {err}");
                self.status = format!("⚠️  Could not load the selection: {err}");
                Task::none()
            }
            Message::ClearSelection => {
                self.begin_load();
                self.composer.clear_staged();
                Task::none()
            }
            Message::StagedMoveUp(index) => {
                self.composer.move_staged_up(index);
                Task::none()
            }
            Message::StagedMoveDown(index) => {
                self.composer.move_staged_down(index);
                Task::none()
            }
            Message::StagedRemove(id) => {
                self.composer.remove_staged(id);
                Task::none()
            }
            Message::PendingCaptionEdited(action) => {
                if let Some(caption) = self.editors.edit_pending(action) {
                    self.composer.set_pending_caption(caption);
                }
                Task::none()
            }
            Message::CommitStaged => {
                let added = self.composer.commit();
                if added > 0 {
                    self.editors.reset_pending();
                    self.editors.sync(self.composer.panels());
                    self.status = format!(
                        "✅ Added {} panel(s). The strip has {} panel(s).",
                        added,
                        self.composer.panels().len()
                    );
                }
                Task::none()
            }
            Message::PanelMoveUp(index) => {
                self.composer.move_panel_up(index);
                Task::none()
            }
            Message::PanelMoveDown(index) => {
                self.composer.move_panel_down(index);
                Task::none()
            }
            Message::PanelRemove(id) => {
                self.composer.remove_panel(id);
                self.editors.sync(self.composer.panels());
                Task::none()
            }
            Message::PanelCaptionEdited(id, action) => {
                if let Some(caption) = self.editors.edit_panel(id, action) {
                    self.composer.set_caption(id, caption);
                }
                Task::none()
            }
            Message::GoToPreview => {
                if !self.composer.go_to_preview() {
                    tracing::debug!("preview requested with no panels");
                }
                Task::none()
            }
            Message::BackToEditing => {
                self.composer.back_to_editing();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        match self.composer.mode() {
            ViewMode::Editing => ui::editor::view(&self.composer, &self.editors, &self.status),
            ViewMode::Previewing => ui::preview::view(&self.composer),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        if self.settings.dark_theme {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt::init();

    iced::application("Comic Strip", ComicStrip::update, ComicStrip::view)
        .theme(ComicStrip::theme)
        .centered()
        .run_with(ComicStrip::new)
}
