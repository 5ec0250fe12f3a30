pub mod errors;
pub mod notify;
pub mod summary;

pub use errors::{OutboundError, OutboundResult};
pub use notify::{
    video_deep_link, DeliveryReceipt, HttpNotifier, NotificationRequest, Notifier, NotifyConfig,
    Recipient,
};
pub use summary::{
    ChatSummaryConfig, ChatSummaryProvider, DigestCopy, SummaryProvider, SummaryRequest,
};
