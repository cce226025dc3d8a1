//! Per-image editing state with stale-result tracking.
//!
//! An `EditSession` pairs the current settings with the last encode made for
//! exactly those settings. Any settings change drops the cached result, and
//! encodes started before the change are rejected when they complete (last
//! write wins).
//!
//! ```ignore
//! let mut session = EditSession::new(descriptor);
//! session.apply(SettingsEdit::Percentage(50));
//!
//! let ticket = session.begin_encode();
//! let outcome = engine.encode(&pixels, ticket.settings());
//! match session.complete_encode(ticket, outcome) {
//!     EncodeStatus::Ready { size } => println!("{} bytes", size),
//!     status => println!("{:?}", status),
//! }
//! ```

use tracing::debug;

use crate::decode::DecodedImage;
use crate::encode::{EncodeError, EncodeOutcome, EncodeResult, EncodingEngine, FormatEncoder};
use crate::settings::{
    reconcile, reconcile_patch, ImageDescriptor, ResizeSettings, SettingsEdit, SettingsPatch,
};

/// Settings snapshot handed out when an encode starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeTicket {
    revision: u64,
    settings: ResizeSettings,
}

impl EncodeTicket {
    /// The settings this encode must use.
    pub fn settings(&self) -> &ResizeSettings {
        &self.settings
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// What happened to a finished encode.
#[derive(Debug)]
pub enum EncodeStatus {
    /// Stored as the current result.
    Ready { size: usize },
    /// Stored, but it is larger than the requested target.
    TargetMissed { size: usize, target_bytes: usize },
    /// Settings changed while encoding; the result was discarded.
    Superseded,
    /// The encoder failed; previous settings and result are unchanged.
    Failed(EncodeError),
}

/// Editing state for one loaded image.
#[derive(Debug, Clone)]
pub struct EditSession {
    descriptor: ImageDescriptor,
    settings: ResizeSettings,
    result: Option<EncodeResult>,
    revision: u64,
}

impl EditSession {
    /// Start a session with the default settings for `descriptor`.
    pub fn new(descriptor: ImageDescriptor) -> Self {
        Self::with_settings(descriptor, ResizeSettings::for_image(&descriptor))
    }

    pub fn with_settings(descriptor: ImageDescriptor, settings: ResizeSettings) -> Self {
        Self {
            descriptor,
            settings,
            result: None,
            revision: 0,
        }
    }

    pub fn descriptor(&self) -> &ImageDescriptor {
        &self.descriptor
    }

    pub fn settings(&self) -> ResizeSettings {
        self.settings
    }

    /// Incremented on every settings change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Reconcile one edit and return the new settings.
    pub fn apply(&mut self, edit: SettingsEdit) -> ResizeSettings {
        let next = reconcile(self.settings, &self.descriptor, edit);
        self.replace_settings(next);
        self.settings
    }

    /// Reconcile a partial update and return the new settings.
    pub fn apply_patch(&mut self, patch: &SettingsPatch) -> ResizeSettings {
        let next = reconcile_patch(self.settings, &self.descriptor, patch);
        self.replace_settings(next);
        self.settings
    }

    fn replace_settings(&mut self, next: ResizeSettings) {
        if next == self.settings {
            return;
        }
        self.settings = next;
        self.revision += 1;
        if self.result.take().is_some() {
            debug!(revision = self.revision, "settings changed, cached encode dropped");
        }
    }

    /// The cached encode, present only while it matches the current settings.
    pub fn result(&self) -> Option<&EncodeResult> {
        self.result.as_ref()
    }

    /// True when there is no encode for the current settings.
    pub fn is_stale(&self) -> bool {
        self.result.is_none()
    }

    /// Bytes the cached result is over its unreachable target.
    pub fn target_shortfall(&self) -> Option<usize> {
        self.result.as_ref().and_then(EncodeResult::shortfall)
    }

    /// Snapshot the current settings for an encode.
    pub fn begin_encode(&self) -> EncodeTicket {
        EncodeTicket {
            revision: self.revision,
            settings: self.settings,
        }
    }

    /// Record the outcome of an encode started with `ticket`.
    pub fn complete_encode(
        &mut self,
        ticket: EncodeTicket,
        outcome: Result<EncodeResult, EncodeError>,
    ) -> EncodeStatus {
        if ticket.revision != self.revision {
            debug!(
                ticket = ticket.revision,
                current = self.revision,
                "discarding superseded encode"
            );
            return EncodeStatus::Superseded;
        }

        let result = match outcome {
            Ok(result) => result,
            Err(err) => return EncodeStatus::Failed(err),
        };

        let size = result.size();
        let status = match result.outcome {
            EncodeOutcome::TargetUnreachable { target_bytes } => {
                EncodeStatus::TargetMissed { size, target_bytes }
            }
            _ => EncodeStatus::Ready { size },
        };
        self.result = Some(result);
        status
    }

    /// Encode the current settings with `engine` and store the result.
    pub fn encode_with<E: FormatEncoder>(
        &mut self,
        engine: &EncodingEngine<E>,
        pixels: &DecodedImage,
    ) -> EncodeStatus {
        let ticket = self.begin_encode();
        let outcome = engine.encode(pixels, ticket.settings());
        self.complete_encode(ticket, outcome)
    }
}
