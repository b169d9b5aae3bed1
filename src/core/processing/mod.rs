//! Processing wait strategies
//!
//! Decide when the remote transformation of an uploaded batch is done:
//! a fixed delay, polling the artifact location, or a push notification.

mod cancel;
mod fixed;
mod polling;
mod probe;
mod push;
mod strategy;


pub use cancel::CancelSignal;
pub use fixed::FixedDelayWait;
pub use polling::PollingWait;
pub use probe::{ArtifactProbe, HttpArtifactProbe};
pub use push::{CompletionNotifier, PushNotificationWait};
pub use strategy::{ProcessingWait, ProcessingWaitStrategy};
