pub mod download_executor;
pub mod local_saver;
pub mod modal_controller;
pub mod notifier;
pub mod ports;

pub use download_executor::DownloadExecutor;
pub use local_saver::LocalFileSaver;
pub use modal_controller::{DownloadModal, ModalController, ModalState, ModalTarget};
pub use notifier::ChannelNotifier;
