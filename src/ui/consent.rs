// SPDX-License-Identifier: MPL-2.0
//! In-app location consent prompt.
//!
//! Shown once on first launch, before any position lookup happens. The
//! answer is persisted, so the prompt does not come back on later runs
//! unless the stored decision is cleared.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{radius, spacing, typography};
use iced::{
    alignment::Horizontal,
    widget::{button, container, Column, Container, Row, Text},
    Border, Element, Length, Theme,
};

/// Messages emitted by the consent prompt buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The user allows position lookups.
    Accept,
    /// The user declines; searches fall back to the default place.
    Decline,
}

/// Contextual data needed to render the prompt.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

/// Render the centered consent dialog.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let title = Text::new(ctx.i18n.tr("consent-title")).size(typography::TITLE_SM);
    let body = Text::new(ctx.i18n.tr("consent-body")).size(typography::BODY);

    let buttons = Row::new()
        .spacing(spacing::MD)
        .push(
            button(Text::new(ctx.i18n.tr("consent-decline")).size(typography::BODY))
                .padding([spacing::SM, spacing::LG])
                .on_press(Message::Decline)
                .style(button::secondary),
        )
        .push(
            button(Text::new(ctx.i18n.tr("consent-accept")).size(typography::BODY))
                .padding([spacing::SM, spacing::LG])
                .on_press(Message::Accept)
                .style(button::primary),
        );

    let dialog = Column::new()
        .spacing(spacing::LG)
        .align_x(Horizontal::Center)
        .max_width(420.0)
        .push(title)
        .push(body)
        .push(buttons);

    Container::new(
        Container::new(dialog)
            .padding(spacing::XXL)
            .style(dialog_style),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}

fn dialog_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.weak.color.into()),
        text_color: Some(palette.background.weak.text),
        border: Border {
            color: palette.background.strong.color,
            width: 1.0,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consent_view_renders() {
        let i18n = I18n::default();
        let _element = view(ViewContext { i18n: &i18n });
    }

    #[test]
    fn messages_are_distinct() {
        assert_ne!(Message::Accept, Message::Decline);
    }
}
