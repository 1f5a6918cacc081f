use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while building or driving a grid.
///
/// Markup problems are reported at construction time rather than surfacing
/// later as nonsensical geometry.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum GridError {
    #[error("grid root has no following preview element")]
    #[diagnostic(
        code(gridfx::markup::missing_preview),
        help("place the preview overlay immediately after the grid element")
    )]
    MissingPreview,

    #[error("preview element has no close control")]
    #[diagnostic(
        code(gridfx::markup::missing_close),
        help("add a `button.action--close` inside the preview")
    )]
    MissingCloseControl,

    #[error("preview element has no description slot")]
    #[diagnostic(
        code(gridfx::markup::missing_description),
        help("add a `.description--preview` element inside the preview")
    )]
    MissingDescriptionSlot,

    #[error("grid contains no items")]
    #[diagnostic(code(gridfx::markup::no_items))]
    NoItems,

    #[error("grid item {index} has no thumbnail image")]
    #[diagnostic(code(gridfx::markup::missing_thumbnail))]
    MissingThumbnail { index: usize },

    #[error("grid item {index} has no link to its full-size image")]
    #[diagnostic(code(gridfx::markup::missing_full_image))]
    MissingFullImage { index: usize },

    #[error("grid item {index} has no data-size attribute")]
    #[diagnostic(code(gridfx::markup::missing_size))]
    MissingSize { index: usize },

    #[error("grid item {index} has malformed size {value:?}")]
    #[diagnostic(
        code(gridfx::markup::malformed_size),
        help("expected `<width>x<height>` with positive numbers, e.g. `1200x800`")
    )]
    MalformedSize { index: usize, value: String },

    #[error("invalid options: {0}")]
    #[diagnostic(code(gridfx::options::invalid))]
    InvalidOptions(String),

    #[error("thumbnail of item {index} measures {width}x{height}")]
    #[diagnostic(
        code(gridfx::geometry::degenerate_thumbnail),
        help("the thumbnail must be laid out with a positive size before it can be opened")
    )]
    DegenerateThumbnail {
        index: usize,
        width: f64,
        height: f64,
    },

    #[error("item {index} is out of range (grid has {len} items)")]
    #[diagnostic(code(gridfx::controller::out_of_range))]
    ItemOutOfRange { index: usize, len: usize },

    #[error("DOM operation failed: {0}")]
    #[diagnostic(code(gridfx::dom))]
    Dom(String),
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        GridError::Dom(s.to_string())
    }
}

impl From<String> for GridError {
    fn from(s: String) -> Self {
        GridError::Dom(s)
    }
}
