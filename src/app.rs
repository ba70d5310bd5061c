use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::stack;
use iced::Task;

use crate::api::{ApiClient, ApiConfig};
use crate::application::{
    ChannelNotifier, DownloadExecutor, LocalFileSaver, ModalController, ModalTarget,
};
use crate::domain::{DownloadJob, Notification};
use crate::ui::{modal_view, DownloadMessage, DownloadView};

pub struct DownloadApp {
    view: DownloadView,
    modal: ModalController,
    executor: DownloadExecutor,
    saver: LocalFileSaver,
}

impl Default for DownloadApp {
    fn default() -> Self {
        Self::new(ApiConfig::from_env())
    }
}

impl DownloadApp {
    pub fn new(config: ApiConfig) -> Self {
        let api_client = ApiClient::new(config.clone());
        let client = Arc::new(api_client.clone());
        let saver = LocalFileSaver::new(api_client, config.download_dir.clone());
        let executor = DownloadExecutor::new(
            client.clone(),
            client.clone(),
            Arc::new(saver.clone()),
            client,
        );

        let view = DownloadView {
            download_dir: config.download_dir.display().to_string(),
            ..DownloadView::default()
        };

        Self {
            view,
            modal: ModalController::new(),
            executor,
            saver,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    Modal(ModalTarget),
    Notified(Notification),
    /// A download flow finished; its outcome already arrived as notifications.
    DownloadSettled,
    DownloadDirSelected(Option<PathBuf>),
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                DownloadMessage::DownloadPressed => match app.view.song() {
                    Some((song, quality)) => {
                        app.view.status_message = format!("Choose where to save: {}", song.name);
                        app.modal.show(song, quality);
                    }
                    None => {
                        app.view.status_message = "Song ID and title are required".to_string();
                    }
                },
                DownloadMessage::ChooseFolderPressed => {
                    let saver = app.saver.clone();
                    return Task::perform(
                        async move { saver.choose_download_dir().await },
                        Message::DownloadDirSelected,
                    );
                }
                _ => {}
            }
        }
        Message::Modal(target) => {
            if let Some(job) = app.modal.click(target) {
                return spawn_download(app.executor.clone(), job);
            }
        }
        Message::Notified(notification) => {
            app.view.push_notification(notification);
        }
        Message::DownloadSettled => {}
        Message::DownloadDirSelected(dir) => {
            // None means the user cancelled the dialog
            if let Some(dir) = dir {
                log::info!("Download folder set to {}", dir.display());
                app.view.download_dir = dir.display().to_string();
                app.saver.set_download_dir(dir);
            }
        }
    }
    Task::none()
}

/// Runs one download flow, streaming its notifications back into the app.
fn spawn_download(executor: DownloadExecutor, job: DownloadJob) -> Task<Message> {
    let (notifier, receiver) = ChannelNotifier::channel();

    Task::batch([
        Task::stream(receiver).map(Message::Notified),
        Task::perform(
            async move { executor.run(job, &notifier).await },
            |_| Message::DownloadSettled,
        ),
    ])
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    let base = app.view.view().map(Message::UiMessage);

    match app.modal.modal().filter(|_| app.modal.is_visible()) {
        Some(modal) => {
            let song = app.modal.context().map(|(song, _)| song);
            stack![base, modal_view(modal, song).map(Message::Modal)].into()
        }
        None => base,
    }
}
