// SPDX-License-Identifier: MPL-2.0
//! Free-text search bar shown above the carousel.
//!
//! The entered text is used as the search location, not as a keyword;
//! pressing Enter starts a fresh search. There is no dedicated button,
//! matching the single-line input of the original design.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{radius, spacing, typography};
use iced::{
    widget::{container, text_input, Container},
    Border, Element, Length, Theme,
};

/// Messages emitted by the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The input text changed.
    InputChanged(String),
    /// Enter was pressed.
    Submitted,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// The user requested a search with the current text.
    Submitted,
}

/// Process a search bar message against the owned input text.
pub fn update(message: Message, value: &mut String) -> Event {
    match message {
        Message::InputChanged(new_value) => {
            *value = new_value;
            Event::None
        }
        Message::Submitted => Event::Submitted,
    }
}

/// Contextual data needed to render the search bar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub value: &'a str,
}

/// Render the search input.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let placeholder = ctx.i18n.tr("search-placeholder");

    let input = text_input(&placeholder, ctx.value)
        .on_input(Message::InputChanged)
        .on_submit(Message::Submitted)
        .size(typography::TITLE_MD)
        .padding(spacing::SM)
        .style(input_style);

    Container::new(input)
        .width(Length::Fill)
        .padding([spacing::MD, spacing::LG])
        .style(bar_style)
        .into()
}

fn input_style(theme: &Theme, status: text_input::Status) -> text_input::Style {
    use iced::widget::text_input::{Status, Style};

    let palette = theme.extended_palette();

    let border_color = match status {
        Status::Focused { .. } => palette.primary.strong.color,
        Status::Hovered => palette.background.strong.color,
        _ => palette.background.weak.color,
    };

    Style {
        background: palette.background.base.color.into(),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::MD.into(),
        },
        icon: palette.background.weak.text,
        placeholder: palette.background.strong.text,
        value: palette.background.base.text,
        selection: palette.primary.weak.color,
    }
}

fn bar_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.weak.color.into()),
        border: Border {
            radius: radius::NONE.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
