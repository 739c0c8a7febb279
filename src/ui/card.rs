// SPDX-License-Identifier: MPL-2.0
//! Restaurant card rendered inside the carousel.
//!
//! A card is a square photo with two overlays: the rating badge in the
//! top-right corner and a title strip along the bottom edge carrying the
//! name plus a review-count/price line. Cards emit no messages of their
//! own; interaction happens on the carousel around them.

use crate::i18n::fluent::I18n;
use crate::search::BusinessRecord;
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use iced::widget::image::{Handle, Image};
use iced::{
    alignment::{Horizontal, Vertical},
    widget::{container, Column, Container, Stack, Text},
    Border, ContentFit, Element, Length, Theme,
};

/// Contextual data needed to render one card.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub record: &'a BusinessRecord,
    /// Cached photo for this record, if it has arrived.
    pub photo: Option<Handle>,
}

/// Render a restaurant card.
pub fn view<'a, Message: 'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let base: Element<'a, Message> = match ctx.photo {
        Some(handle) => Image::new(handle)
            .content_fit(ContentFit::Cover)
            .width(Length::Fixed(sizing::CARD_SIDE))
            .height(Length::Fixed(sizing::CARD_SIDE))
            .into(),
        None => Container::new(
            Text::new(ctx.i18n.tr("card-photo-pending")).size(typography::BODY),
        )
        .width(Length::Fixed(sizing::CARD_SIDE))
        .height(Length::Fixed(sizing::CARD_SIDE))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(placeholder_style)
        .into(),
    };

    let stack = Stack::new()
        .push(base)
        .push(rating_badge(ctx.record))
        .push(title_strip(ctx.i18n, ctx.record));

    Container::new(stack)
        .width(Length::Fixed(sizing::CARD_SIDE))
        .height(Length::Fixed(sizing::CARD_SIDE))
        .into()
}

/// Rating badge pinned to the photo's top-right corner.
fn rating_badge<'a, Message: 'a>(record: &BusinessRecord) -> Element<'a, Message> {
    let badge = Container::new(
        Text::new(format!("{:.1}", record.rating))
            .size(typography::CAPTION)
            .color(palette::WHITE),
    )
    .width(Length::Fixed(sizing::RATING_BADGE_WIDTH))
    .padding(spacing::XXS)
    .align_x(Horizontal::Center)
    .style(overlay_style(radius::LG));

    Container::new(badge)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Right)
        .padding([spacing::LG, spacing::SM])
        .into()
}

/// Title strip along the photo's bottom edge.
fn title_strip<'a, Message: 'a>(i18n: &I18n, record: &'a BusinessRecord) -> Element<'a, Message> {
    let mut lines = Column::new().align_x(Horizontal::Center).push(
        Text::new(record.name.as_str())
            .size(typography::BODY_LG)
            .color(palette::WHITE),
    );

    let mut details = i18n.tr_with_count("card-review-count", record.review_count);
    if let Some(price) = &record.price {
        details.push_str(" \u{00b7} ");
        details.push_str(price);
    }
    lines = lines.push(
        Text::new(details)
            .size(typography::CAPTION)
            .color(palette::GRAY_200),
    );

    let strip = Container::new(lines)
        .width(Length::Fixed(sizing::CARD_TITLE_WIDTH))
        .padding(spacing::XXS)
        .align_x(Horizontal::Center)
        .style(overlay_style(radius::CARD_OVERLAY));

    Container::new(strip)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Bottom)
        .padding(spacing::SM)
        .into()
}

/// Shared translucent black overlay used by both card decorations.
fn overlay_style(corner_radius: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(
            iced::Color {
                a: opacity::CARD_OVERLAY,
                ..palette::BLACK
            }
            .into(),
        ),
        border: Border {
            radius: corner_radius.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Muted surface shown while the photo is still downloading.
fn placeholder_style(theme: &Theme) -> container::Style {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> BusinessRecord {
        BusinessRecord {
            id: "north-italia".to_string(),
            name: "North Italia".to_string(),
            rating: 4.5,
            image_url: Some("https://cdn.example.com/photo.jpg".to_string()),
            review_count: 1276,
            price: Some("$$".to_string()),
        }
    }

    #[test]
    fn card_view_renders_without_photo() {
        let i18n = I18n::default();
        let record = record();
        let _element: Element<'_, ()> = view(ViewContext {
            i18n: &i18n,
            record: &record,
            photo: None,
        });
    }

    #[test]
    fn card_view_renders_with_photo() {
        let i18n = I18n::default();
        let record = record();
        let photo = Handle::from_bytes(vec![0u8; 16]);
        let _element: Element<'_, ()> = view(ViewContext {
            i18n: &i18n,
            record: &record,
            photo: Some(photo),
        });
    }
}
