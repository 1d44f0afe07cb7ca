//! User-facing notifications.
//!
//! [`ToastQueue`] holds pending toasts; the `notify_*` helpers translate
//! selection and bulk download outcomes into the messages users see.

mod messages;
mod toast;

pub use messages::{notify_download, notify_frozen, notify_reselect, notify_toggle};
pub use toast::{Level, Toast, ToastQueue};
