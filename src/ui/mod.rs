// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based architecture
//! with the Elm-style "state down, messages up" pattern.
//!
//! # Components
//!
//! - [`search_bar`] - Free-text location input above the carousel
//! - [`carousel`] - One-card-at-a-time restaurant browser with Previous/Next
//! - [`card`] - Single restaurant card (photo, rating badge, title strip)
//! - [`consent`] - First-run location consent prompt
//!
//! # Shared Infrastructure
//!
//! - [`photos`] - Byte-bounded LRU cache for downloaded card photos
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theme`] - Color schemes and Light/Dark/System mode management

pub mod card;
pub mod carousel;
pub mod consent;
pub mod design_tokens;
pub mod photos;
pub mod search_bar;
pub mod theme;
pub mod widgets;
