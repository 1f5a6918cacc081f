//! Transform geometry for moving a thumbnail into the enlarged position.

use crate::options::GridOptions;

/// Axis-aligned box in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.left + 0.5 * self.width
    }

    pub fn center_y(&self) -> f64 {
        self.top + 0.5 * self.height
    }

    /// Whether the box has a positive, finite width and height.
    pub fn has_area(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        positive(self.width) && positive(self.height)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Parse a `"<width>x<height>"` size attribute.
    ///
    /// Both parts must be positive, finite numbers.
    pub fn parse(value: &str) -> Option<Self> {
        let (width, height) = value.trim().split_once(['x', 'X'])?;
        let width: f64 = width.trim().parse().ok()?;
        let height: f64 = height.trim().parse().ok()?;
        let valid = |v: f64| v.is_finite() && v > 0.0;
        (valid(width) && valid(height)).then_some(Self { width, height })
    }
}

/// A translate-then-uniform-scale transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub dx: f64,
    pub dy: f64,
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        dx: 0.0,
        dy: 0.0,
        scale: 1.0,
    };

    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite() && self.scale.is_finite()
    }

    /// Render as a CSS `transform` value.
    ///
    /// Translation comes first so the scale is anchored at the translated
    /// position.
    pub fn to_css(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0) scale3d({}, {}, 1)",
            self.dx, self.dy, self.scale, self.scale
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Fraction of the viewport at which the anchor sits for one axis.
fn anchor_fraction(a: f64) -> f64 {
    if a > 0.0 { 1.0 - a.abs() } else { a.abs() }
}

/// Target pixel center along one axis.
fn target_center(a: f64, viewport: f64) -> f64 {
    anchor_fraction(a) * viewport + a * viewport / 2.0
}

/// Compute the transform that carries a thumbnail at `thumb` (viewport
/// coordinates) to the enlarged preview position.
///
/// The scale is the largest that keeps the enlarged image inside both the
/// configured anchor region and its natural size, less the page margin, on
/// both axes.
///
/// A thumbnail without area yields a non-finite scale; callers check
/// [`Rect::has_area`] or [`Transform::is_finite`] before applying it.
pub fn expand_transform(
    thumb: Rect,
    viewport: Size,
    natural: Size,
    options: &GridOptions,
) -> Transform {
    let position = options.image_position;
    let margin = options.page_margin;

    let dx = target_center(position.x, viewport.width) - thumb.center_x();
    let dy = target_center(position.y, viewport.height) - thumb.center_y();

    let scale_x =
        (viewport.width * position.x.abs() - margin).min(natural.width - margin) / thumb.width;
    let scale_y =
        (viewport.height * position.y.abs() - margin).min(natural.height - margin) / thumb.height;
    let scale = scale_x.min(scale_y);

    tracing::trace!(dx, dy, scale_x, scale_y, "expand_transform");

    Transform { dx, dy, scale }
}
