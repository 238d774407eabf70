// SPDX-License-Identifier: MPL-2.0
//! Detail view drawn above the gallery.
//!
//! The layer is built from two nested mouse areas: the outer one covers the
//! whole window and reports [`Event::BackdropPressed`], the inner one wraps
//! the card and reports [`Event::ContentPressed`]. Both are opaque so nothing
//! underneath receives input while the modal is shown.
//!
//! The picture is the detail-size image once it has arrived, and the grid
//! thumbnail until then.

use crate::application::modal::{Event, ModalContent};
use crate::media::{DetailImage, Preview, PreviewCache};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::gallery::grid::UNAVAILABLE_LABEL;
use crate::ui::gallery::muted_text;
use crate::ui::styles;
use iced::widget::{
    button, center, image, mouse_area, opaque, Column, Container, Row, Scrollable, Space, Text,
};
use iced::{alignment, ContentFit, Element, Length};

pub const CLOSE_GLYPH: &str = "\u{2715}";
pub const COPY_LINK_LABEL: &str = "Copy high resolution link";
/// Toast shown once the link is on the clipboard.
pub const LINK_COPIED: &str = "High resolution link copied to the clipboard.";

pub fn view<'a>(
    content: &'a ModalContent,
    detail: &'a DetailImage,
    previews: &'a PreviewCache,
) -> Element<'a, Event> {
    let close_button = button(Text::new(CLOSE_GLYPH).size(typography::BODY))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::button::modal_close)
        .on_press(Event::CloseButton);

    let header = Row::new()
        .align_y(alignment::Vertical::Center)
        .push(
            Text::new(content.title.as_str())
                .size(typography::TITLE_MD)
                .width(Length::Fill),
        )
        .push(Space::new().width(spacing::SM))
        .push(close_button);

    let mut body = Column::new()
        .spacing(spacing::SM)
        .push(picture(content, detail, previews))
        .push(
            Text::new(content.date_label.as_str())
                .size(typography::CAPTION)
                .style(muted_text),
        )
        .push(Text::new(content.explanation.as_str()).size(typography::BODY));

    if let Some(copyright) = &content.copyright {
        body = body.push(
            Text::new(format!("\u{a9} {copyright}"))
                .size(typography::CAPTION)
                .style(muted_text),
        );
    }

    if content.hd_url.is_some() {
        body = body.push(
            button(Text::new(COPY_LINK_LABEL).size(typography::CAPTION))
                .padding(0.0)
                .style(button::text)
                .on_press(Event::CopyHdLink),
        );
    }

    let card = Container::new(
        Column::new()
            .spacing(spacing::MD)
            .push(header)
            .push(Scrollable::new(body).height(Length::Shrink)),
    )
    .padding(spacing::LG)
    .max_width(sizing::MODAL_MAX_WIDTH)
    .style(styles::container::modal_card);

    let inner = mouse_area(card).on_press(Event::ContentPressed);

    opaque(
        mouse_area(
            center(opaque(inner))
                .padding(spacing::XL)
                .style(styles::container::modal_backdrop),
        )
        .on_press(Event::BackdropPressed),
    )
}

/// Best image available for the open record.
fn shown_preview<'a>(
    url: &str,
    detail: &'a DetailImage,
    previews: &'a PreviewCache,
) -> Option<&'a Preview> {
    detail
        .preview()
        .filter(|_| detail.url() == Some(url))
        .or_else(|| previews.peek(url))
}

fn picture<'a>(
    content: &'a ModalContent,
    detail: &'a DetailImage,
    previews: &'a PreviewCache,
) -> Element<'a, Event> {
    let url = content.image_url.as_deref();

    if let Some(preview) = url.and_then(|url| shown_preview(url, detail, previews)) {
        return image(preview.handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::MODAL_IMAGE_HEIGHT))
            .into();
    }

    let failed = url.is_none() || detail.has_failed();
    let label: Element<'a, Event> = if failed {
        Text::new(UNAVAILABLE_LABEL)
            .size(typography::CAPTION)
            .style(muted_text)
            .into()
    } else {
        Text::new("").into()
    };

    Container::new(label)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::MODAL_IMAGE_HEIGHT))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::thumbnail_placeholder)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::PreviewCacheConfig;

    fn preview(width: u32) -> Preview {
        Preview::from_rgba(width, 1, vec![0; (width * 4) as usize])
    }

    #[test]
    fn thumbnail_stands_in_until_detail_arrives() {
        let mut previews = PreviewCache::new(PreviewCacheConfig::default());
        previews.insert("a".into(), preview(3));
        let mut detail = DetailImage::default();
        detail.request("a");

        assert_eq!(shown_preview("a", &detail, &previews).map(|p| p.width), Some(3));

        detail.complete("a".into(), Ok(preview(8)));
        assert_eq!(shown_preview("a", &detail, &previews).map(|p| p.width), Some(8));
    }

    #[test]
    fn detail_of_another_record_is_ignored() {
        let previews = PreviewCache::new(PreviewCacheConfig::default());
        let mut detail = DetailImage::default();
        detail.request("a");
        detail.complete("a".into(), Ok(preview(8)));

        assert!(shown_preview("b", &detail, &previews).is_none());
    }
}
