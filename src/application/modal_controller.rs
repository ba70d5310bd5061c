use crate::domain::{DownloadJob, DownloadTarget, Quality, Song};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Hidden,
    Visible,
}

/// Clickable regions of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTarget {
    Overlay,
    CloseButton,
    BrowserChoice,
    ServerChoice,
}

/// Static content of the download choice dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadModal {
    pub title: &'static str,
    pub browser_label: &'static str,
    pub browser_hint: &'static str,
    pub server_label: &'static str,
    pub server_hint: &'static str,
}

impl DownloadModal {
    fn build() -> Self {
        Self {
            title: "Choose download method",
            browser_label: "Direct download",
            browser_hint: "Save to this device",
            server_label: "Download to server",
            server_hint: "Save to the server directory",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Handler {
    Dismiss,
    Download(DownloadTarget),
}

/// Handlers bound by one `show`, together with the song they act on.
#[derive(Debug, Clone)]
struct ModalHandlers {
    song: Song,
    quality: Quality,
    overlay: Handler,
    close: Handler,
    browser: Handler,
    server: Handler,
}

impl ModalHandlers {
    fn bind(song: Song, quality: Quality) -> Self {
        Self {
            song,
            quality,
            overlay: Handler::Dismiss,
            close: Handler::Dismiss,
            browser: Handler::Download(DownloadTarget::Browser),
            server: Handler::Download(DownloadTarget::Server),
        }
    }

    fn for_target(&self, target: ModalTarget) -> Handler {
        match target {
            ModalTarget::Overlay => self.overlay,
            ModalTarget::CloseButton => self.close,
            ModalTarget::BrowserChoice => self.browser,
            ModalTarget::ServerChoice => self.server,
        }
    }

    fn job(&self, target: DownloadTarget) -> DownloadJob {
        DownloadJob {
            target,
            song: self.song.clone(),
            quality: self.quality.clone(),
        }
    }
}

/// Owns the single download modal and what its buttons do.
///
/// Each `show` replaces the bound handlers, so a click always acts on the
/// most recent song no matter how many times the modal was shown.
#[derive(Debug, Default)]
pub struct ModalController {
    modal: Option<DownloadModal>,
    state: ModalState,
    handlers: Option<ModalHandlers>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_created(&mut self) -> &DownloadModal {
        self.modal.get_or_insert_with(|| {
            log::debug!("Creating download modal");
            DownloadModal::build()
        })
    }

    pub fn show(&mut self, song: Song, quality: Quality) {
        self.ensure_created();
        self.handlers = Some(ModalHandlers::bind(song, quality));
        self.state = ModalState::Visible;
    }

    pub fn hide(&mut self) {
        self.state = ModalState::Hidden;
    }

    /// Runs the handler bound to `target`.
    ///
    /// The modal is hidden before returning; a choice yields the job to run.
    pub fn click(&mut self, target: ModalTarget) -> Option<DownloadJob> {
        if self.state != ModalState::Visible {
            return None;
        }
        let handlers = self.handlers.as_ref()?;
        let job = match handlers.for_target(target) {
            Handler::Dismiss => None,
            Handler::Download(download_target) => Some(handlers.job(download_target)),
        };
        self.hide();
        job
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == ModalState::Visible
    }

    pub fn modal(&self) -> Option<&DownloadModal> {
        self.modal.as_ref()
    }

    /// The song and quality bound by the last `show`.
    pub fn context(&self) -> Option<(&Song, &Quality)> {
        self.handlers.as_ref().map(|h| (&h.song, &h.quality))
    }
}
