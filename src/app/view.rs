// SPDX-License-Identifier: MPL-2.0
//! Page composition: countdown cards, ceremony slider, gallery grid,
//! music bar and the lightbox overlay.

use super::{App, Message};
use crate::assets::SlideSource;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, image, mouse_area, scrollable, Column, Container, Row, Space, Stack, Text};
use iced::{Background, Color, Element, Length, Theme};

/// Thumbnails per gallery row.
const GALLERY_COLUMNS: usize = 5;

/// Inline slider height in logical pixels.
const SLIDER_HEIGHT: f32 = 420.0;

// Invitation palette
const NAVY: Color = Color::from_rgb(0.10, 0.18, 0.29);
const GOLD: Color = Color::from_rgb(0.83, 0.69, 0.22);
const CREAM: Color = Color::from_rgb(0.98, 0.976, 0.965);

fn page_style(_theme: &Theme) -> iced::widget::container::Style {
    iced::widget::container::Style {
        background: Some(Background::Color(CREAM)),
        ..Default::default()
    }
}

fn card_style(_theme: &Theme) -> iced::widget::container::Style {
    iced::widget::container::Style {
        background: Some(Background::Color(Color::WHITE)),
        border: iced::Border {
            color: GOLD,
            width: 1.0,
            radius: 12.0.into(),
        },
        ..Default::default()
    }
}

fn overlay_style(_theme: &Theme) -> iced::widget::container::Style {
    iced::widget::container::Style {
        background: Some(Background::Color(Color { a: 0.95, ..NAVY })),
        ..Default::default()
    }
}

/// One countdown flip card; a changed unit is tinted with the accent so
/// the transition reads even without animation.
fn unit_card(value: u64, label: &str, changed: bool) -> Element<'static, Message> {
    let value_color = if changed { GOLD } else { NAVY };

    let card = Column::new()
        .align_x(Horizontal::Center)
        .spacing(6)
        .push(Text::new(format!("{value:02}")).size(44).color(value_color))
        .push(Text::new(label.to_string()).size(13).color(GOLD));

    Container::new(card)
        .padding([16, 24])
        .style(card_style)
        .into()
}

impl App {
    /// Builds the whole page, with the lightbox stacked on top while open.
    pub fn view(&self) -> Element<'_, Message> {
        let page = Column::new()
            .spacing(32)
            .padding(24)
            .align_x(Horizontal::Center)
            .push(self.header_section())
            .push(self.countdown_section())
            .push(self.slider_section())
            .push(self.gallery_section())
            .push(self.music_section());

        // Page scroll is suspended while the lightbox holds it
        let base: Element<'_, Message> = if self.scroll.is_scroll_enabled() {
            Container::new(scrollable(page).width(Length::Fill).height(Length::Fill))
                .style(page_style)
                .into()
        } else {
            Container::new(page)
                .width(Length::Fill)
                .height(Length::Fill)
                .clip(true)
                .style(page_style)
                .into()
        };

        match self.lightbox_overlay() {
            Some(overlay) => Stack::new().push(base).push(overlay).into(),
            None => base,
        }
    }

    fn header_section(&self) -> Element<'_, Message> {
        let mut header = Column::new()
            .align_x(Horizontal::Center)
            .spacing(8)
            .push(Text::new(self.title.clone()).size(34).color(NAVY));

        if let Some(couple) = &self.couple {
            header = header.push(Text::new(couple.clone()).size(22).color(GOLD));
        }
        if let Some(venue) = &self.venue {
            header = header.push(Text::new(venue.clone()).size(14).color(NAVY));
        }

        header.into()
    }

    fn countdown_section(&self) -> Element<'_, Message> {
        let left = self.countdown.current();
        let changes = self.countdown.changes();

        Row::new()
            .spacing(16)
            .align_y(Vertical::Center)
            .push(unit_card(left.days, "Days", changes.days))
            .push(unit_card(left.hours, "Hours", changes.hours))
            .push(unit_card(left.minutes, "Minutes", changes.minutes))
            .push(unit_card(left.seconds, "Seconds", changes.seconds))
            .into()
    }

    /// Renders a slide, falling back to a placeholder until a remote
    /// slide's bytes have arrived.
    fn slide_image(&self, source: &SlideSource) -> Element<'_, Message> {
        match source {
            SlideSource::Local(path) => image(image::Handle::from_path(path))
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            SlideSource::Remote(_) => match self.remote_handles.get(source) {
                Some(handle) => image(handle.clone())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into(),
                None => Container::new(Text::new("Loading…").size(16).color(GOLD))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(Horizontal::Center)
                    .align_y(Vertical::Center)
                    .into(),
            },
        }
    }

    fn slider_section(&self) -> Element<'_, Message> {
        let carousel = self.slider.carousel();

        if carousel.is_empty() {
            return Container::new(Text::new("No photos yet").size(16).color(NAVY))
                .width(Length::Fill)
                .height(Length::Fixed(SLIDER_HEIGHT / 2.0))
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center)
                .into();
        }

        let current = carousel.current().map_or_else(
            || Space::new().width(Length::Fill).height(Length::Fill).into(),
            |s| self.slide_image(s),
        );

        // Hovering pauses auto-advance; press/release resolves a swipe
        let slide_area = mouse_area(
            Container::new(current)
                .width(Length::Fill)
                .height(Length::Fixed(SLIDER_HEIGHT)),
        )
        .on_enter(Message::SliderEntered)
        .on_exit(Message::SliderExited)
        .on_move(Message::SliderCursorMoved)
        .on_press(Message::SliderPressed)
        .on_release(Message::SliderReleased);

        let counter = carousel
            .current_index()
            .map(|index| format!("{} / {}", index + 1, carousel.len()))
            .unwrap_or_default();

        let controls = Row::new()
            .spacing(16)
            .align_y(Vertical::Center)
            .push(
                button(Text::new("◀").size(20))
                    .padding([4, 12])
                    .on_press(Message::SliderPrevious),
            )
            .push(Text::new(counter).size(14).color(NAVY))
            .push(
                button(Text::new("▶").size(20))
                    .padding([4, 12])
                    .on_press(Message::SliderNext),
            );

        let mut dots = Row::new().spacing(8).align_y(Vertical::Center);
        for index in 0..carousel.len() {
            let active = carousel.current_index() == Some(index);
            let dot = Text::new("●")
                .size(if active { 14 } else { 9 })
                .color(if active { GOLD } else { Color { a: 0.4, ..GOLD } });
            dots = dots.push(button(dot).padding(2).on_press(Message::SliderGoTo(index)));
        }

        Column::new()
            .spacing(12)
            .align_x(Horizontal::Center)
            .push(slide_area)
            .push(controls)
            .push(dots)
            .into()
    }

    fn gallery_section(&self) -> Element<'_, Message> {
        if self.gallery_slides.is_empty() {
            return Space::new().into();
        }

        let mut grid = Column::new().spacing(12);
        for (row_index, chunk) in self.gallery_slides.chunks(GALLERY_COLUMNS).enumerate() {
            let mut row = Row::new().spacing(12);
            for (col_index, source) in chunk.iter().enumerate() {
                let index = row_index * GALLERY_COLUMNS + col_index;
                let thumbnail = Container::new(self.slide_image(source))
                    .width(Length::Fill)
                    .height(Length::Fixed(160.0));
                row = row.push(
                    mouse_area(thumbnail).on_release(Message::OpenLightbox(index)),
                );
            }
            grid = grid.push(row);
        }

        grid.into()
    }

    fn music_section(&self) -> Element<'_, Message> {
        if self.playlist.is_empty() {
            return Space::new().into();
        }

        let toggle_label = if self.playlist.is_playing() {
            "⏸"
        } else {
            "♪"
        };

        let mut bar = Row::new()
            .spacing(12)
            .align_y(Vertical::Center)
            .push(
                button(Text::new(toggle_label).size(18))
                    .padding([4, 12])
                    .on_press(Message::TogglePlayback),
            );

        if let Some(track) = self.playlist.current_track() {
            bar = bar.push(Text::new(track.name.clone()).size(14).color(NAVY));
        }

        for (index, track) in self.playlist.tracks().iter().enumerate() {
            let active = self.playlist.current_index() == Some(index);
            let label = Text::new(track.id.to_string())
                .size(12)
                .color(if active { GOLD } else { NAVY });
            bar = bar.push(button(label).padding([2, 8]).on_press(Message::TrackSelected(index)));
        }

        bar.into()
    }

    fn lightbox_overlay(&self) -> Option<Element<'_, Message>> {
        let index = self.lightbox.current()?;
        let source = self.gallery_slides.get(index)?;

        let counter = format!("{} / {}", index + 1, self.gallery_slides.len());

        let top_bar = Row::new()
            .align_y(Vertical::Center)
            .push(Text::new(counter).size(14).color(CREAM))
            .push(Space::new().width(Length::Fill))
            .push(
                button(Text::new("✕").size(18))
                    .padding([4, 12])
                    .on_press(Message::CloseLightbox),
            );

        let body = Row::new()
            .spacing(16)
            .align_y(Vertical::Center)
            .push(
                button(Text::new("◀").size(24))
                    .padding([8, 12])
                    .on_press(Message::LightboxPrevious),
            )
            .push(
                Container::new(self.slide_image(source))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(Horizontal::Center)
                    .align_y(Vertical::Center),
            )
            .push(
                button(Text::new("▶").size(24))
                    .padding([8, 12])
                    .on_press(Message::LightboxNext),
            );

        let panel = Column::new()
            .spacing(16)
            .push(top_bar)
            .push(body);

        Some(
            Container::new(panel)
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(24)
                .style(overlay_style)
                .into(),
        )
    }
}
