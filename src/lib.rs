// SPDX-License-Identifier: MPL-2.0
//! `iced_bites` is a restaurant finder built with the Iced GUI framework.
//!
//! It looks up the device position (with consent), pages through nearby
//! restaurants from a business-search service, and presents them as a
//! swipeable card carousel with localized UI.

#![doc(html_root_url = "https://docs.rs/iced_bites/0.1.0")]

pub mod app;
pub mod domain;
pub mod error;
pub mod geo;
pub mod i18n;
pub mod search;
pub mod ui;
