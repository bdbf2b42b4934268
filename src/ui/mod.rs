/// Screens of the application
///
/// Each screen is a pure function of the composer state that returns the
/// widget tree; user input comes back as `Message` values.
use iced::widget::{button, column, container, horizontal_space, row, text, Column};
use iced::{Alignment, Element, Length};

use crate::Message;

pub mod editor;
pub mod preview;

/// Shared page frame: app title, screen title and the mode toggle button
fn page<'a>(
    title: &'a str,
    action: &'a str,
    on_action: Option<Message>,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    let header = row![
        text(title).size(24),
        horizontal_space(),
        button(text(action))
            .on_press_maybe(on_action)
            .style(button::secondary)
            .padding(10),
    ]
    .align_y(Alignment::Center);

    let content: Element<'a, Message> = content.into();
    let page: Column<Message> = column![
        container(text("Comic Strip").size(36)).center_x(Length::Fill),
        header,
        content,
    ]
    .spacing(20)
    .padding(30);

    page.into()
}
