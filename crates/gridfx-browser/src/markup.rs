//! Reading and validating the grid's markup contract.
//!
//! Expected structure:
//!
//! ```html
//! <div class="grid">
//!   <div class="grid__item" data-size="1280x857">
//!     <a href="img/original/1.jpg" class="img-wrap">
//!       <img src="img/thumbs/1.jpg" alt="" />
//!       <div class="description">...</div>
//!     </a>
//!   </div>
//!   ...
//! </div>
//! <div class="preview">
//!   <button class="action action--close">Close</button>
//!   <div class="description description--preview"></div>
//! </div>
//! ```

use gridfx_core::{GridError, GridItem};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlImageElement};

use crate::dom::{next_element_sibling, query, query_all};

pub const ITEM_SELECTOR: &str = ".grid__item";
pub const CLOSE_SELECTOR: &str = "button.action--close";
pub const PREVIEW_DESCRIPTION_SELECTOR: &str = ".description--preview";
pub const ITEM_DESCRIPTION_SELECTOR: &str = ".description";
pub const SIZE_ATTRIBUTE: &str = "data-size";

/// DOM handles for one grid item.
#[derive(Clone, Debug)]
pub struct ItemMarkup {
    pub element: Element,
    pub thumbnail: HtmlImageElement,
    pub description: Option<Element>,
    pub item: GridItem,
}

/// DOM handles for a whole grid, validated.
#[derive(Clone, Debug)]
pub struct GridMarkup {
    pub root: HtmlElement,
    pub preview: HtmlElement,
    pub close_control: Element,
    pub description_slot: Element,
    pub items: Vec<ItemMarkup>,
}

impl GridMarkup {
    /// Collect the grid's items and its preview overlay.
    ///
    /// Items are a snapshot: elements added later are not picked up.
    pub fn parse(root: &HtmlElement) -> Result<Self, GridError> {
        let preview = next_element_sibling(root)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            .ok_or(GridError::MissingPreview)?;
        let close_control =
            query(&preview, CLOSE_SELECTOR)?.ok_or(GridError::MissingCloseControl)?;
        let description_slot = query(&preview, PREVIEW_DESCRIPTION_SELECTOR)?
            .ok_or(GridError::MissingDescriptionSlot)?;

        let items = query_all(root, ITEM_SELECTOR)?
            .into_iter()
            .enumerate()
            .map(|(index, element)| parse_item(index, element))
            .collect::<Result<Vec<_>, _>>()?;
        if items.is_empty() {
            return Err(GridError::NoItems);
        }

        tracing::debug!(items = items.len(), "grid markup parsed");

        Ok(Self {
            root: root.clone(),
            preview,
            close_control,
            description_slot,
            items,
        })
    }

    pub fn grid_items(&self) -> Vec<GridItem> {
        self.items.iter().map(|m| m.item.clone()).collect()
    }
}

fn parse_item(index: usize, element: Element) -> Result<ItemMarkup, GridError> {
    let thumbnail = query(&element, "img")?
        .and_then(|e| e.dyn_into::<HtmlImageElement>().ok())
        .ok_or(GridError::MissingThumbnail { index })?;
    let href = query(&element, "a")?.and_then(|a| a.get_attribute("href"));
    let size = element.get_attribute(SIZE_ATTRIBUTE);
    let item = GridItem::from_markup(index, href, size)?;
    let description = query(&element, ITEM_DESCRIPTION_SELECTOR)?;

    Ok(ItemMarkup {
        element,
        thumbnail,
        description,
        item,
    })
}
