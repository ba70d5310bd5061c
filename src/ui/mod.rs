use iced::{
    widget::{
        button, center, column, container, mouse_area, opaque, pick_list, row, text, text_input,
        Column, Space,
    },
    Color, Element, Length, Theme,
};

use crate::{
    application::{DownloadModal, ModalTarget},
    domain::{Artist, Notification, NotificationStyle, Quality, QualityLevel, Song, QUALITY_LEVELS},
};

const MAX_NOTIFICATIONS: usize = 5;

/// Main view state
pub struct DownloadView {
    pub song_id: String,
    pub source: String,
    pub name: String,
    pub artist: String,
    pub quality: Option<QualityLevel>,
    pub status_message: String,
    pub download_dir: String,
    pub notifications: Vec<Notification>,
}

impl Default for DownloadView {
    fn default() -> Self {
        Self {
            song_id: String::new(),
            source: "netease".to_string(),
            name: String::new(),
            artist: String::new(),
            quality: Some(QUALITY_LEVELS[2]),
            status_message: "Enter a song to download".to_string(),
            download_dir: String::new(),
            notifications: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    SongIdChanged(String),
    SourceChanged(String),
    NameChanged(String),
    ArtistChanged(String),
    QualitySelected(QualityLevel),
    DownloadPressed,
    ChooseFolderPressed,
}

impl DownloadView {
    pub fn update(&mut self, message: DownloadMessage) {
        match message {
            DownloadMessage::SongIdChanged(id) => self.song_id = id,
            DownloadMessage::SourceChanged(source) => self.source = source,
            DownloadMessage::NameChanged(name) => self.name = name,
            DownloadMessage::ArtistChanged(artist) => self.artist = artist,
            DownloadMessage::QualitySelected(level) => self.quality = Some(level),
            DownloadMessage::DownloadPressed | DownloadMessage::ChooseFolderPressed => {
                // Will be handled by the app
            }
        }
    }

    /// The song described by the form, if it is complete enough to resolve.
    pub fn song(&self) -> Option<(Song, Quality)> {
        if self.song_id.trim().is_empty() || self.name.trim().is_empty() {
            return None;
        }

        let mut names: Vec<String> = self
            .artist
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        let artist = if names.len() == 1 {
            Artist::Single(names.remove(0))
        } else {
            Artist::Many(names)
        };

        let song = Song {
            id: self.song_id.trim().to_string(),
            source: self.source.trim().to_string(),
            name: self.name.trim().to_string(),
            artist,
        };
        let quality = self.quality.unwrap_or(QUALITY_LEVELS[2]).into();
        Some((song, quality))
    }

    pub fn push_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let overflow = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..overflow);
        }
    }

    pub fn view(&self) -> Element<'_, DownloadMessage> {
        let notifications = self
            .notifications
            .iter()
            .fold(Column::new().spacing(4), |col, n| {
                let style: fn(&Theme) -> text::Style = match n.style {
                    NotificationStyle::Default => text::default,
                    NotificationStyle::Success => text::success,
                    NotificationStyle::Error => text::danger,
                };
                col.push(text(&n.message).size(13).style(style))
            });

        column![
            text("Song Downloader").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text_input("Song ID...", &self.song_id)
                .on_input(DownloadMessage::SongIdChanged)
                .padding(10),
            text_input("Source (netease, kuwo, ...)", &self.source)
                .on_input(DownloadMessage::SourceChanged)
                .padding(10),
            text_input("Title...", &self.name)
                .on_input(DownloadMessage::NameChanged)
                .padding(10),
            text_input("Artists, comma separated...", &self.artist)
                .on_input(DownloadMessage::ArtistChanged)
                .padding(10),
            row![
                text("Quality:").size(16),
                pick_list(
                    &QUALITY_LEVELS[..],
                    self.quality,
                    DownloadMessage::QualitySelected
                ),
            ]
            .spacing(10),
            row![
                text(format!("Save folder: {}", self.download_dir)).size(14),
                button("Change...")
                    .on_press(DownloadMessage::ChooseFolderPressed)
                    .padding([4, 10]),
            ]
            .spacing(10),
            Space::new().height(Length::Fixed(10.0)),
            text(&self.status_message).size(14),
            Space::new().height(Length::Fixed(20.0)),
            button("Download")
                .on_press(DownloadMessage::DownloadPressed)
                .padding([10, 20]),
            Space::new().height(Length::Fixed(20.0)),
            notifications,
        ]
        .padding(20)
        .spacing(10)
        .into()
    }
}

/// The download choice dialog drawn over a dimmed backdrop.
pub fn modal_view<'a>(
    modal: &'a DownloadModal,
    song: Option<&'a Song>,
) -> Element<'a, ModalTarget> {
    let choice = |label: &'a str, hint: &'a str, target: ModalTarget| {
        button(column![text(label).size(16), text(hint).size(12)].spacing(4))
            .on_press(target)
            .padding([12, 16])
    };

    let header = row![
        text(modal.title).size(20).width(Length::Fill),
        button("x").on_press(ModalTarget::CloseButton),
    ];

    let dialog = container(
        column![
            header,
            text(song.map(|s| s.name.as_str()).unwrap_or_default()).size(14),
            row![
                choice(
                    modal.browser_label,
                    modal.browser_hint,
                    ModalTarget::BrowserChoice
                ),
                choice(modal.server_label, modal.server_hint, ModalTarget::ServerChoice),
            ]
            .spacing(12),
        ]
        .spacing(16),
    )
    .width(Length::Fixed(420.0))
    .padding(20)
    .style(container::rounded_box);

    opaque(
        mouse_area(center(opaque(dialog)).style(|_theme| container::Style {
            background: Some(
                Color {
                    a: 0.8,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..container::Style::default()
        }))
        .on_press(ModalTarget::Overlay),
    )
}
