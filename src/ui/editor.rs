/// Editor screen: image selection, staging list and panel editing
use std::collections::HashMap;

use iced::widget::text_editor::{Action, Content};
use iced::widget::{
    button, column, container, image, row, scrollable, text, text_editor, Column,
};
use iced::{Alignment, ContentFit, Element, Length};

use crate::state::composer::Composer;
use crate::state::data::{Panel, PanelId, StagedImage};
use crate::state::list::OrderedList;
use crate::Message;

/// Height of the staged thumbnails in the list
const THUMBNAIL_HEIGHT: f32 = 96.0;

/// Height of the pending caption box (about three lines)
const PENDING_CAPTION_HEIGHT: f32 = 72.0;

/// Height of a panel's caption box (about two lines)
const PANEL_CAPTION_HEIGHT: f32 = 52.0;

/// Multi-line edit buffers behind the caption boxes.
///
/// The composer keeps the caption strings; these hold cursor and selection
/// state for the widgets and hand back the new text after each edit.
pub struct CaptionEditors {
    pending: Content,
    panels: HashMap<PanelId, Content>,
}

impl Default for CaptionEditors {
    fn default() -> Self {
        Self {
            pending: Content::new(),
            panels: HashMap::new(),
        }
    }
}

impl CaptionEditors {
    /// Apply an action to the pending caption box.
    ///
    /// Returns the new caption when the action changed the text.
    pub fn edit_pending(&mut self, action: Action) -> Option<String> {
        let is_edit = action.is_edit();
        self.pending.perform(action);
        is_edit.then(|| caption_text(&self.pending))
    }

    /// Apply an action to a panel's caption box
    pub fn edit_panel(&mut self, id: PanelId, action: Action) -> Option<String> {
        let content = self.panels.get_mut(&id)?;
        let is_edit = action.is_edit();
        content.perform(action);
        is_edit.then(|| caption_text(content))
    }

    /// Empty the pending box after a commit
    pub fn reset_pending(&mut self) {
        self.pending = Content::new();
    }

    /// Create boxes for new panels and drop the ones of removed panels
    pub fn sync(&mut self, panels: &OrderedList<Panel>) {
        self.panels.retain(|id, _| panels.contains(*id));

        for panel in panels.iter() {
            self.panels
                .entry(panel.id)
                .or_insert_with(|| Content::with_text(&panel.caption));
        }
    }
}

/// The editor reports a final newline the user never typed
fn caption_text(content: &Content) -> String {
    let mut text = content.text();
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

/// Build the editor screen
pub fn view<'a>(
    composer: &'a Composer,
    editors: &'a CaptionEditors,
    status: &'a str,
) -> Element<'a, Message> {
    let mut content: Column<Message> =
        column![new_panels(composer, editors), text(status).size(14)].spacing(20);

    if !composer.panels().is_empty() {
        content = content.push(panel_list(composer.panels(), editors));
    }

    super::page(
        "Editor",
        "Preview",
        composer.can_preview().then_some(Message::GoToPreview),
        scrollable(content).height(Length::Fill),
    )
}

/// The "add new panels" box: pending caption, file picker and staged images
fn new_panels<'a>(composer: &'a Composer, editors: &'a CaptionEditors) -> Element<'a, Message> {
    let caption = column![
        text("Dialogue (optional, goes on the first new panel):"),
        text_editor(&editors.pending)
            .placeholder("Type some dialogue...")
            .on_action(Message::PendingCaptionEdited)
            .height(Length::Fixed(PENDING_CAPTION_HEIGHT))
            .padding(8),
    ]
    .spacing(6);

    let pickers = row![
        button("Select images")
            .on_press(Message::SelectImages)
            .style(button::primary)
            .padding(10),
        button("Clear selection")
            .on_press_maybe((!composer.staged().is_empty()).then_some(Message::ClearSelection))
            .style(button::secondary)
            .padding(10),
    ]
    .spacing(10);

    let mut section: Column<Message> =
        column![text("Add new panels").size(20), caption, pickers]
            .spacing(14)
            .padding(16);

    let staged = composer.staged();
    if !staged.is_empty() {
        let rows = staged
            .iter()
            .enumerate()
            .map(|(index, image)| staged_row(index, image, staged.is_last(index)));

        section = section
            .push(text(format!("Selected images ({})", staged.len())).size(16))
            .push(Column::with_children(rows).spacing(8))
            .push(
                button(text("Add selected images to the strip"))
                    .on_press_maybe(composer.can_commit().then_some(Message::CommitStaged))
                    .style(button::success)
                    .width(Length::Fill)
                    .padding(10),
            );
    }

    container(section).style(container::rounded_box).into()
}

fn staged_row(index: usize, staged: &StagedImage, is_last: bool) -> Element<'_, Message> {
    let thumbnail = image(staged.preview.clone())
        .height(Length::Fixed(THUMBNAIL_HEIGHT))
        .content_fit(ContentFit::Contain);

    row![
        thumbnail,
        column![
            text(format!("Image {}", index + 1)),
            text(format!(
                "{} ({}×{})",
                staged.source.name, staged.source.width, staged.source.height
            ))
            .size(12),
        ]
        .spacing(4)
        .width(Length::Fill),
        reorder_controls(
            index,
            is_last,
            Message::StagedMoveUp(index),
            Message::StagedMoveDown(index),
            Message::StagedRemove(staged.id),
        ),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}

fn panel_list<'a>(
    panels: &'a OrderedList<Panel>,
    editors: &'a CaptionEditors,
) -> Element<'a, Message> {
    let cards = panels.iter().enumerate().map(|(index, panel)| {
        panel_card(index, panel, panels.is_last(index), editors.panels.get(&panel.id))
    });

    column![
        text("Panels").size(20),
        Column::with_children(cards).spacing(16),
    ]
    .spacing(12)
    .into()
}

fn panel_card<'a>(
    index: usize,
    panel: &'a Panel,
    is_last: bool,
    caption: Option<&'a Content>,
) -> Element<'a, Message> {
    let id = panel.id;

    let header = row![
        column![
            text(format!("Panel {}", index + 1)),
            text(&panel.label).size(12),
        ]
        .spacing(2)
        .width(Length::Fill),
        reorder_controls(
            index,
            is_last,
            Message::PanelMoveUp(index),
            Message::PanelMoveDown(index),
            Message::PanelRemove(id),
        ),
    ]
    .align_y(Alignment::Center);

    let caption: Element<Message> = match caption {
        Some(content) => text_editor(content)
            .placeholder("No dialogue")
            .on_action(move |action| Message::PanelCaptionEdited(id, action))
            .height(Length::Fixed(PANEL_CAPTION_HEIGHT))
            .padding(8)
            .into(),
        None => text(&panel.caption).into(),
    };

    let card = column![
        header,
        image(panel.image.clone()).width(Length::Fill),
        text("Dialogue:"),
        caption,
    ]
    .spacing(8)
    .padding(12);

    container(card).style(container::rounded_box).into()
}

/// Up/down/remove buttons shared by staged rows and panel cards
fn reorder_controls<'a>(
    index: usize,
    is_last: bool,
    up: Message,
    down: Message,
    remove: Message,
) -> Element<'a, Message> {
    row![
        button("↑").on_press_maybe((index > 0).then_some(up)).padding([4, 10]),
        button("↓").on_press_maybe((!is_last).then_some(down)).padding([4, 10]),
        button("×").on_press(remove).style(button::danger).padding([4, 10]),
    ]
    .spacing(6)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::fixtures::staged;
    use iced::widget::text_editor::{Edit, Motion};

    fn typed(text: &str) -> Vec<Action> {
        text.chars()
            .map(|c| match c {
                '\n' => Action::Edit(Edit::Enter),
                c => Action::Edit(Edit::Insert(c)),
            })
            .collect()
    }

    #[test]
    fn test_pending_edit_returns_multi_line_text() {
        let mut editors = CaptionEditors::default();

        let mut latest = None;
        for action in typed("Hi\nthere") {
            latest = editors.edit_pending(action).or(latest);
        }

        assert_eq!(latest.as_deref(), Some("Hi\nthere"));
    }

    #[test]
    fn test_cursor_moves_are_not_edits() {
        let mut editors = CaptionEditors::default();
        assert_eq!(editors.edit_pending(Action::Move(Motion::Right)), None);
    }

    #[test]
    fn test_sync_follows_panel_list() {
        let mut composer = Composer::new();
        composer.stage(vec![staged("a.png"), staged("b.png")]);
        composer.set_pending_caption("Yo".to_string());
        composer.commit();
        let ids = composer.panels().keys();

        let mut editors = CaptionEditors::default();
        editors.sync(composer.panels());
        assert_eq!(editors.panels.len(), 2);
        assert_eq!(caption_text(&editors.panels[&ids[0]]), "Yo");

        composer.remove_panel(ids[0]);
        editors.sync(composer.panels());
        assert!(!editors.panels.contains_key(&ids[0]));
        assert_eq!(editors.edit_panel(ids[0], Action::Edit(Edit::Insert('x'))), None);
        assert_eq!(
            editors.edit_panel(ids[1], Action::Edit(Edit::Insert('x'))).as_deref(),
            Some("x")
        );
    }
}
