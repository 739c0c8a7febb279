// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! This module handles the `view()` function that composes the search
//! bar with the carousel, the loading spinner, or the consent prompt,
//! depending on application state.

use super::Message;
use crate::app::state::ViewState;
use crate::domain::PermissionStatus;
use crate::i18n::fluent::I18n;
use crate::search::BusinessRecord;
use crate::ui::carousel::{self, ViewContext as CarouselViewContext};
use crate::ui::consent::{self, ViewContext as ConsentViewContext};
use crate::ui::design_tokens::typography;
use crate::ui::photos::PhotoCache;
use crate::ui::search_bar::{self, ViewContext as SearchBarViewContext};
use crate::ui::theme::{ColorScheme, ThemeMode};
use crate::ui::widgets::AnimatedSpinner;
use iced::{
    alignment::Horizontal,
    widget::{Column, Container, Text},
    Element, Length,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a ViewState,
    pub carousel: &'a carousel::State,
    pub photos: &'a PhotoCache,
    pub awaiting_consent: bool,
    pub spinner_rotation: f32,
    pub theme_mode: ThemeMode,
}

/// Renders the application: search bar on top, content below.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let search = search_bar::view(SearchBarViewContext {
        i18n: ctx.i18n,
        value: &ctx.state.search_text,
    })
    .map(Message::SearchBar);

    let content: Element<'_, Message> = if ctx.awaiting_consent {
        consent::view(ConsentViewContext { i18n: ctx.i18n }).map(Message::Consent)
    } else if ctx.state.loading {
        view_loading(&ctx)
    } else {
        view_carousel(&ctx)
    };

    let mut column = Column::new().push(search);

    if permission_hint_visible(&ctx) {
        column = column.push(
            Container::new(
                Text::new(ctx.i18n.tr(ctx.state.permission.i18n_key()))
                    .size(typography::CAPTION),
            )
            .width(Length::Fill)
            .align_x(Horizontal::Center),
        );
    }

    column
        .push(
            Container::new(content)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// The spinner replaces the carousel while the first page or the
/// position lookup is in flight.
fn view_loading<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let scheme = ColorScheme::for_mode(ctx.theme_mode);
    let spinner = AnimatedSpinner::new(scheme.brand_primary, ctx.spinner_rotation).into_element();

    Container::new(spinner)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn view_carousel<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let active = ctx.carousel.active();
    let photo = ctx
        .state
        .results
        .get(active)
        .and_then(BusinessRecord::photo_url)
        .and_then(|url| ctx.photos.peek(url));

    carousel::view(CarouselViewContext {
        i18n: ctx.i18n,
        records: &ctx.state.results,
        active,
        photo,
    })
    .map(Message::Carousel)
}

/// Shows the permission status line only while it explains an empty
/// screen.
fn permission_hint_visible(ctx: &ViewContext<'_>) -> bool {
    !ctx.awaiting_consent
        && !ctx.state.loading
        && ctx.state.results.is_empty()
        && ctx.state.permission != PermissionStatus::Granted
}
