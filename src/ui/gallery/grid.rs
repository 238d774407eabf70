// SPDX-License-Identifier: MPL-2.0
//! Thumbnail grid.

use super::{muted_text, Message};
use crate::application::GalleryItem;
use crate::media::PreviewCache;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{button, image, Column, Container, Row, Scrollable, Text};
use iced::{alignment, ContentFit, Element, Length};

/// Characters of the explanation shown on a tile.
const EXCERPT_CHARS: usize = 160;

pub const UNAVAILABLE_LABEL: &str = "Image unavailable";

/// Shortens `text` to `limit` characters, cutting at a word boundary when
/// one is close enough.
pub fn excerpt(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let cut: String = text.chars().take(limit).collect();
    let trimmed = match cut.rfind(' ') {
        Some(pos) if pos >= limit / 2 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}\u{2026}", trimmed.trim_end())
}

pub fn view<'a>(
    items: &'a [GalleryItem],
    previews: &'a PreviewCache,
    scroll_locked: bool,
) -> Element<'a, Message> {
    let tiles: Vec<Element<'a, Message>> = items
        .iter()
        .enumerate()
        .map(|(index, item)| tile(index, item, previews))
        .collect();

    let grid = Row::with_children(tiles)
        .spacing(spacing::MD)
        .wrap()
        .vertical_spacing(spacing::MD);

    let content = Container::new(grid)
        .width(Length::Fill)
        .padding(spacing::LG)
        .align_x(alignment::Horizontal::Center);

    // The modal keeps the grid in place while it is open.
    let scrollbar = if scroll_locked {
        Scrollbar::hidden()
    } else {
        Scrollbar::new()
    };

    Scrollable::new(content)
        .direction(Direction::Vertical(scrollbar))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn tile<'a>(
    index: usize,
    item: &'a GalleryItem,
    previews: &'a PreviewCache,
) -> Element<'a, Message> {
    let caption = Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(item.title.as_str()).size(typography::TITLE_SM))
        .push(
            Text::new(item.date_label.as_str())
                .size(typography::CAPTION)
                .style(muted_text),
        )
        .push(
            Text::new(excerpt(item.explanation.as_str(), EXCERPT_CHARS))
                .size(typography::BODY_SM),
        );

    let body = Column::new()
        .spacing(spacing::SM)
        .push(thumbnail(&item.image_url, previews))
        .push(Container::new(caption).padding([0.0, spacing::XS]));

    button(body)
        .padding(spacing::XS)
        .width(Length::Fixed(sizing::GALLERY_ITEM_WIDTH))
        .style(styles::button::gallery_item)
        .on_press(Message::ItemSelected(index))
        .into()
}

fn thumbnail<'a>(url: &str, previews: &'a PreviewCache) -> Element<'a, Message> {
    if let Some(preview) = previews.peek(url) {
        return image(preview.handle.clone())
            .content_fit(ContentFit::Cover)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::THUMBNAIL_HEIGHT))
            .into();
    }

    let label: Element<'a, Message> = if previews.has_failed(url) {
        Text::new(UNAVAILABLE_LABEL)
            .size(typography::CAPTION)
            .style(muted_text)
            .into()
    } else {
        Text::new("").into()
    };

    Container::new(label)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::THUMBNAIL_HEIGHT))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::thumbnail_placeholder)
        .into()
}
