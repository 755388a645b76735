//! Response bodies that may or may not be wrapped in `data`.

use serde::Deserialize;

/// Which response shape a payload arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    /// The value was nested under a `data` key.
    Wrapped,
    /// The value was the response body itself.
    Bare,
}

/// A response body that is either `{ "data": T, .. }` or `T` directly.
///
/// The shape is resolved once when the body is decoded; callers only see the
/// inner value afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// Payload under `data`, with record metadata beside it.
    Wrapped {
        /// The payload.
        data: T,
        /// Template name stored with the record.
        #[serde(default)]
        template: Option<String>,
    },
    /// The payload is the whole body.
    Bare(T),
}

impl<T> Envelope<T> {
    /// Which shape the body arrived in.
    #[must_use]
    pub fn shape(&self) -> EnvelopeShape {
        match self {
            Self::Wrapped { .. } => EnvelopeShape::Wrapped,
            Self::Bare(_) => EnvelopeShape::Bare,
        }
    }

    /// Borrow the payload.
    #[must_use]
    pub fn data(&self) -> &T {
        match self {
            Self::Wrapped { data, .. } | Self::Bare(data) => data,
        }
    }

    /// Template name recorded next to wrapped payloads, if any.
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        match self {
            Self::Wrapped { template, .. } => template.as_deref(),
            Self::Bare(_) => None,
        }
    }

    /// Take the payload.
    pub fn into_data(self) -> T {
        match self {
            Self::Wrapped { data, .. } | Self::Bare(data) => data,
        }
    }
}
