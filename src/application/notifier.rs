use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};

use crate::{
    application::ports::Notifier,
    domain::{Notification, NotificationStyle},
};

/// Forwards notifications to the UI over a channel.
#[derive(Clone)]
pub struct ChannelNotifier {
    sender: UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn channel() -> (Self, UnboundedReceiver<Notification>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn show(&self, message: &str, style: NotificationStyle) {
        // The UI may be gone already; nothing to do then.
        let _ = self.sender.unbounded_send(Notification {
            message: message.to_string(),
            style,
        });
    }
}
