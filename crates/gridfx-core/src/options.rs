//! Grid configuration and the defaults-plus-overrides merge.

use serde::Deserialize;

use crate::GridError;

/// Normalized anchor for the center of the enlarged image.
///
/// Each axis lies in `[-1, 1]`. The sign picks which side of the viewport the
/// anchor measures from, the magnitude how much of the viewport the image may
/// occupy along that axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct ImagePosition {
    pub x: f64,
    pub y: f64,
}

impl ImagePosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Resolved grid options, immutable once a grid is built.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridOptions {
    /// Minimum pixel margin kept around the enlarged image.
    pub page_margin: f64,
    pub image_position: ImagePosition,
}

/// Partial options as supplied by the host page.
///
/// Any field left out keeps the value of whatever it is merged onto.
/// Unrecognised keys are ignored when deserializing.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridOptionsPatch {
    pub page_margin: Option<f64>,
    pub image_position: Option<ImagePosition>,
}

impl GridOptions {
    /// Shallow-merge every field present in `patch` over `self`.
    pub fn merge(mut self, patch: &GridOptionsPatch) -> Self {
        if let Some(margin) = patch.page_margin {
            self.page_margin = margin;
        }
        if let Some(position) = patch.image_position {
            self.image_position = position;
        }
        self
    }

    /// Defaults with `patch` applied, then validated.
    pub fn from_patch(patch: &GridOptionsPatch) -> Result<Self, GridError> {
        let options = GridOptions::default().merge(patch);
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if !self.page_margin.is_finite() || self.page_margin < 0.0 {
            return Err(GridError::InvalidOptions(format!(
                "pageMargin must be a non-negative number, got {}",
                self.page_margin
            )));
        }
        let ImagePosition { x, y } = self.image_position;
        for (axis, value) in [("x", x), ("y", y)] {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(GridError::InvalidOptions(format!(
                    "imagePosition.{axis} must be within [-1, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}
