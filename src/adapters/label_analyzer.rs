//! Label-matching image analyzer.
//!
//! Cameras with an on-board classifier ship each frame with a list of
//! `(label, confidence)` pairs. [`LabelAnalyzer`] reports the subject as
//! present when any label matches the configured subject name (ASCII
//! case-insensitive) with a confidence at or above the threshold.

use crate::app::ports::{AnalyzerError, ImageAnalyzer};
use crate::config::SystemConfig;
use crate::image::Image;

/// [`ImageAnalyzer`] over classifier labels.
#[derive(Debug, Clone)]
pub struct LabelAnalyzer {
    subject: String,
}

impl LabelAnalyzer {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.subject_label.clone())
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl ImageAnalyzer for LabelAnalyzer {
    fn detect_subject(&mut self, image: &Image, threshold: f32) -> Result<bool, AnalyzerError> {
        if image.width == 0 || image.height == 0 {
            return Err(AnalyzerError::InvalidImage);
        }
        Ok(image.labels.iter().any(|label| {
            label.name.eq_ignore_ascii_case(&self.subject) && label.confidence >= threshold
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_label_case_insensitively_above_threshold() {
        let mut a = LabelAnalyzer::new("cat");
        let img = Image::blank(256, 256).with_label("Cat", 50.0);
        assert!(a.detect_subject(&img, 50.0).unwrap(), "threshold is inclusive");
        assert!(!a.detect_subject(&img, 50.1).unwrap());
    }

    #[test]
    fn other_labels_do_not_count() {
        let mut a = LabelAnalyzer::new("cat");
        let img = Image::blank(256, 256)
            .with_label("Dog", 99.0)
            .with_label("Catamaran", 99.0);
        assert!(!a.detect_subject(&img, 10.0).unwrap());
        assert!(!a.detect_subject(&Image::blank(256, 256), 0.0).unwrap());
    }

    #[test]
    fn zero_sized_frame_is_rejected() {
        let mut a = LabelAnalyzer::from_config(&SystemConfig::default());
        assert_eq!(a.subject(), "cat");
        assert_eq!(
            a.detect_subject(&Image::blank(0, 256), 50.0),
            Err(AnalyzerError::InvalidImage)
        );
    }
}
