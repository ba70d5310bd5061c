pub mod error;
pub mod model;

pub use error::AppError;
pub use model::{
    Artist, DownloadJob, DownloadTarget, Notification, NotificationStyle, Quality, QualityLevel,
    Song, QUALITY_LEVELS,
};
