use crate::GridError;
use crate::geometry::Size;

/// One validated grid item.
#[derive(Clone, Debug, PartialEq)]
pub struct GridItem {
    /// URL of the full-resolution image.
    pub full_src: String,
    /// Natural size of the full-resolution image.
    pub natural_size: Size,
}

impl GridItem {
    pub fn new(full_src: impl Into<String>, natural_size: Size) -> Self {
        Self {
            full_src: full_src.into(),
            natural_size,
        }
    }

    /// Build an item from the raw markup values of item `index`.
    ///
    /// `href` comes from the item's link, `size` from its `data-size`
    /// attribute.
    pub fn from_markup(
        index: usize,
        href: Option<String>,
        size: Option<String>,
    ) -> Result<Self, GridError> {
        let full_src = href
            .filter(|h| !h.trim().is_empty())
            .ok_or(GridError::MissingFullImage { index })?;
        let size = size.ok_or(GridError::MissingSize { index })?;
        let natural_size =
            Size::parse(&size).ok_or(GridError::MalformedSize { index, value: size })?;
        Ok(Self {
            full_src,
            natural_size,
        })
    }
}
