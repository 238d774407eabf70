// SPDX-License-Identifier: MPL-2.0
//! Content area: placeholder or thumbnail grid, plus the detail modal.
//!
//! The view is a pure function of [`ViewState`]: `Idle`, `Loading` and
//! `Failed` draw a placeholder, `Loaded` draws the grid (or the empty hint
//! when no record survived the image filter).

pub mod grid;
pub mod loading;
pub mod modal;
pub mod placeholder;

use crate::application::{GalleryItem, ViewState};
use crate::media::PreviewCache;
use iced::widget::text;
use iced::{Element, Theme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A tile was pressed; carries its index in the rendered item list.
    ItemSelected(usize),
    /// Re-submit the last range after a failure.
    Retry,
    ToggleErrorDetails,
}

pub struct ViewContext<'a> {
    pub state: &'a ViewState,
    pub items: &'a [GalleryItem],
    pub previews: &'a PreviewCache,
    pub loading: &'a loading::State,
    pub show_error_details: bool,
    pub scroll_locked: bool,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    match ctx.state {
        ViewState::Idle => placeholder::idle(),
        ViewState::Loading => placeholder::loading(ctx.loading),
        ViewState::Loaded(_) if ctx.items.is_empty() => placeholder::empty(),
        ViewState::Loaded(_) => grid::view(ctx.items, ctx.previews, ctx.scroll_locked),
        ViewState::Failed(error) => placeholder::failed(error, ctx.show_error_details),
    }
}

/// Secondary text color used for captions and hints.
pub(crate) fn muted_text(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(theme.extended_palette().background.strong.text),
    }
}
