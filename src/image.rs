//! Captured camera frames.
//!
//! The controller never inspects pixels itself. A frame carries its
//! dimensions plus whatever labels the camera's on-board classifier
//! attached, and an [`ImageAnalyzer`](crate::app::ports::ImageAnalyzer)
//! decides whether the monitored subject is present.

use serde::{Deserialize, Serialize};

/// A classifier label with its confidence in percent (0-100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageLabel {
    pub name: String,
    pub confidence: f32,
}

impl ImageLabel {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// One frame from the camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub labels: Vec<ImageLabel>,
}

impl Image {
    /// An unlabelled frame of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            labels: Vec::new(),
        }
    }

    /// Builder-style label attachment.
    #[must_use]
    pub fn with_label(mut self, name: impl Into<String>, confidence: f32) -> Self {
        self.labels.push(ImageLabel::new(name, confidence));
        self
    }
}
