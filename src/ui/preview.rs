/// Preview screen: the finished strip, read-only
use iced::alignment::Horizontal;
use iced::widget::image::Handle;
use iced::widget::{column, container, image, scrollable, stack, text, Column};
use iced::{Border, Color, Element, Length};

use crate::state::composer::Composer;
use crate::state::data::Panel;
use crate::state::list::OrderedList;
use crate::Message;

/// Maximum width of the rendered strip in logical pixels
const STRIP_WIDTH: f32 = 720.0;

/// One panel as the preview shows it
#[derive(Debug, Clone)]
pub struct StripPanel<'a> {
    /// 1-based position in the strip
    pub number: usize,
    pub image: &'a Handle,
    /// Bubble text, absent when the panel has no dialogue
    pub caption: Option<&'a str>,
}

/// Project the panel list into what the preview draws
pub fn strip(panels: &OrderedList<Panel>) -> Vec<StripPanel<'_>> {
    panels
        .iter()
        .enumerate()
        .map(|(index, panel)| StripPanel {
            number: index + 1,
            image: &panel.image,
            caption: panel.has_caption().then_some(panel.caption.as_str()),
        })
        .collect()
}

/// Build the preview screen
pub fn view(composer: &Composer) -> Element<'_, Message> {
    let strip = strip(composer.panels());

    let body: Element<Message> = if strip.is_empty() {
        container(text("No panels yet. Go back to the editor and add some images."))
            .padding(40)
            .center_x(Length::Fill)
            .style(container::rounded_box)
            .into()
    } else {
        let panels = Column::with_children(strip.into_iter().map(strip_panel)).spacing(24);

        scrollable(
            container(panels)
                .max_width(STRIP_WIDTH)
                .padding(24)
                .style(|_theme| container::Style {
                    background: Some(Color::WHITE.into()),
                    ..container::Style::default()
                }),
        )
        .height(Length::Fill)
        .into()
    };

    super::page(
        "Preview",
        "Back to editing",
        Some(Message::BackToEditing),
        column![body].width(Length::Fill).align_x(Horizontal::Center),
    )
}

fn strip_panel(panel: StripPanel<'_>) -> Element<'_, Message> {
    let picture = image(panel.image.clone()).width(Length::Fill);

    let framed: Element<Message> = match panel.caption {
        Some(caption) => stack![picture, speech_bubble(caption)].into(),
        None => picture.into(),
    };

    column![
        text(format!("Panel {}", panel.number))
            .size(12)
            .color(Color::from_rgb(0.4, 0.4, 0.4)),
        framed,
    ]
    .spacing(4)
    .into()
}

/// Dialogue drawn over the top-right corner of a panel
fn speech_bubble(caption: &str) -> Element<'_, Message> {
    let bubble = container(text(caption).color(Color::BLACK))
        .padding(12)
        .max_width(STRIP_WIDTH * 0.7)
        .style(|_theme| container::Style {
            background: Some(Color::WHITE.into()),
            border: Border {
                color: Color::BLACK,
                width: 2.0,
                radius: 8.0.into(),
            },
            ..container::Style::default()
        });

    container(bubble)
        .width(Length::Fill)
        .align_x(Horizontal::Right)
        .padding(16)
        .into()
}
