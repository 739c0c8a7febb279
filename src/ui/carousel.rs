// SPDX-License-Identifier: MPL-2.0
//! One-card-at-a-time carousel with the signature red/green controls.
//!
//! The carousel shows the active restaurant card with a Previous and a
//! Next button underneath. Movement saturates at both ends; every actual
//! move emits [`Event::Snapped`] so the parent can decide whether the
//! snap landed on the prefetch trigger.

use crate::i18n::fluent::I18n;
use crate::search::BusinessRecord;
use crate::ui::card;
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use iced::widget::image::Handle;
use iced::{
    alignment::{Horizontal, Vertical},
    widget::{button, container, Column, Container, Row, Space, Text},
    Border, Color, Element, Length, Theme,
};

/// Position state of the carousel.
#[derive(Debug, Clone, Default)]
pub struct State {
    active: usize,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the card currently shown.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Snaps back to the first card.
    pub fn reset(&mut self) {
        self.active = 0;
    }

    /// Keeps the active index valid after the result list changed.
    pub fn clamp_to(&mut self, len: usize) {
        if len == 0 {
            self.active = 0;
        } else if self.active >= len {
            self.active = len - 1;
        }
    }
}

/// Messages emitted by the carousel controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Previous,
    Next,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// The carousel moved and now rests on this index.
    Snapped(usize),
}

/// Process a carousel message against the current result count.
///
/// Movement that would run off either end is swallowed; only real moves
/// produce a snap.
pub fn update(message: Message, state: &mut State, len: usize) -> Event {
    match message {
        Message::Previous => {
            if state.active > 0 {
                state.active -= 1;
                Event::Snapped(state.active)
            } else {
                Event::None
            }
        }
        Message::Next => {
            if len > 0 && state.active + 1 < len {
                state.active += 1;
                Event::Snapped(state.active)
            } else {
                Event::None
            }
        }
    }
}

/// Contextual data needed to render the carousel.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub records: &'a [BusinessRecord],
    pub active: usize,
    /// Cached photo for the active record, if available.
    pub photo: Option<Handle>,
}

/// Render the carousel with its navigation buttons.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let content: Element<'a, Message> = match ctx.records.get(ctx.active) {
        Some(record) => card::view(card::ViewContext {
            i18n: ctx.i18n,
            record,
            photo: ctx.photo,
        }),
        None => Container::new(
            Text::new(ctx.i18n.tr("carousel-empty")).size(typography::BODY_LG),
        )
        .width(Length::Fixed(sizing::CARD_SIDE))
        .height(Length::Fixed(sizing::CARD_SIDE))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(empty_style)
        .into(),
    };

    let buttons = Row::new()
        .width(Length::Fill)
        .push(Space::new().width(Length::FillPortion(1)))
        .push(nav_button(
            ctx.i18n.tr("carousel-previous"),
            Message::Previous,
            previous_button_style,
        ))
        .push(Space::new().width(Length::FillPortion(2)))
        .push(nav_button(
            ctx.i18n.tr("carousel-next"),
            Message::Next,
            next_button_style,
        ))
        .push(Space::new().width(Length::FillPortion(1)));

    Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .push(
            Container::new(content)
                .width(Length::Fill)
                .align_x(Horizontal::Center)
                .padding(spacing::SM),
        )
        .push(Space::new().height(Length::Fill))
        .push(Container::new(buttons).padding([spacing::XXL, spacing::MD]))
        .into()
}

/// Build one square navigation button.
fn nav_button<'a>(
    label: String,
    message: Message,
    style: fn(&Theme, button::Status) -> button::Style,
) -> Element<'a, Message> {
    button(
        Container::new(
            Text::new(label)
                .size(typography::CAPTION)
                .color(palette::WHITE),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center),
    )
    .width(Length::Fixed(sizing::NAV_BUTTON))
    .height(Length::Fixed(sizing::NAV_BUTTON))
    .on_press(message)
    .style(style)
    .into()
}

/// Style function for the Previous button (red).
fn previous_button_style(theme: &Theme, status: button::Status) -> button::Style {
    nav_style(theme, status, palette::NAV_PREVIOUS)
}

/// Style function for the Next button (green).
fn next_button_style(theme: &Theme, status: button::Status) -> button::Style {
    nav_style(theme, status, palette::NAV_NEXT)
}

fn nav_style(_theme: &Theme, status: button::Status, base: Color) -> button::Style {
    let background = match status {
        button::Status::Active => base,
        button::Status::Hovered => Color {
            a: 0.9,
            ..base
        },
        button::Status::Pressed => Color {
            r: base.r * 0.85,
            g: base.g * 0.85,
            b: base.b * 0.85,
            a: base.a,
        },
        button::Status::Disabled => Color {
            a: opacity::DISABLED,
            ..base
        },
    };

    button::Style {
        background: Some(background.into()),
        text_color: palette::WHITE,
        border: Border {
            radius: radius::NAV_BUTTON.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Muted surface shown when there are no results yet.
fn empty_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.weak.color.into()),
        text_color: Some(palette.background.weak.text),
        border: Border {
            radius: radius::CARD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
