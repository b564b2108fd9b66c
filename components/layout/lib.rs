/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Block and inline layout.
//!
//! Layout is a pure function of the document, the stylesheet and the
//! viewport width: the same inputs produce a bit-identical box tree, and
//! the serialized dump of that tree is the regression format. `display:none`
//! subtrees never enter the tree at all.
//!
//! The model is the classic CSS box: a content rect wrapped by padding,
//! border and margin, all in `Au` (1/60 CSS px) so arithmetic is exact.

mod block;
mod construct;
mod serialize;

pub use construct::build_layout_tree;
pub use serialize::serialize_layout;

use app_units::Au;
use euclid::{Point2D, Rect, Size2D};
use style::{CSSPixel, Color, ComputedStyle};

/// The advance of one character, as a fraction of the font size. Text
/// measurement is this fixed approximation; there is no font shaping.
pub const CHAR_ADVANCE_FACTOR: f32 = 0.5;

/// Per-edge `Au` thicknesses.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeSizes {
    pub top: Au,
    pub right: Au,
    pub bottom: Au,
    pub left: Au,
}

impl EdgeSizes {
    pub fn from_px(edges: &style::EdgeWidths) -> EdgeSizes {
        EdgeSizes {
            top: Au::from_f32_px(edges.top),
            right: Au::from_f32_px(edges.right),
            bottom: Au::from_f32_px(edges.bottom),
            left: Au::from_f32_px(edges.left),
        }
    }

    pub fn horizontal(&self) -> Au {
        self.left + self.right
    }

    pub fn vertical(&self) -> Au {
        self.top + self.bottom
    }
}

/// A box's rectangles: the content rect plus the three surrounding rings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimensions {
    pub content: Rect<Au, CSSPixel>,
    pub padding: EdgeSizes,
    pub border: EdgeSizes,
    pub margin: EdgeSizes,
}

impl Dimensions {
    pub fn padding_box(&self) -> Rect<Au, CSSPixel> {
        expand(self.content, &self.padding)
    }

    pub fn border_box(&self) -> Rect<Au, CSSPixel> {
        expand(self.padding_box(), &self.border)
    }

    pub fn margin_box(&self) -> Rect<Au, CSSPixel> {
        expand(self.border_box(), &self.margin)
    }
}

fn expand(rect: Rect<Au, CSSPixel>, edges: &EdgeSizes) -> Rect<Au, CSSPixel> {
    Rect::new(
        Point2D::new(rect.origin.x - edges.left, rect.origin.y - edges.top),
        Size2D::new(
            rect.size.width + edges.horizontal(),
            rect.size.height + edges.vertical(),
        ),
    )
}

/// What kind of box this is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BoxType {
    /// A block-level element box.
    Block,
    /// The inline content of a container whose children are all inline.
    Inline,
    /// A synthesized block wrapping inline content that shares a container
    /// with block siblings.
    Anonymous,
}

/// One placed fragment of text. `origin` is the top-left corner of the
/// fragment's bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub origin: Point2D<Au, CSSPixel>,
    pub font_size: Au,
    pub line_height: Au,
    pub color: Color,
}

/// A piece of inline content waiting to be line-broken: a text fragment and
/// the computed style it inherited.
#[derive(Clone, Debug, PartialEq)]
pub struct InlineItem {
    pub text: String,
    pub style: ComputedStyle,
}

/// One node of the layout tree.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutBox {
    pub box_type: BoxType,
    pub style: ComputedStyle,
    /// The tag of the generating element; `None` for synthesized boxes.
    pub tag_name: Option<String>,
    /// The generating element's `id` attribute, when present.
    pub element_id: Option<String>,
    pub dimensions: Dimensions,
    pub children: Vec<LayoutBox>,
    /// Inline content collected at construction, consumed by line breaking.
    pub inline_items: Vec<InlineItem>,
    /// Placed text, filled in during layout.
    pub text_runs: Vec<TextRun>,
}

impl LayoutBox {
    pub fn new(box_type: BoxType, style: ComputedStyle) -> LayoutBox {
        LayoutBox {
            box_type,
            style,
            tag_name: None,
            element_id: None,
            dimensions: Dimensions::default(),
            children: Vec::new(),
            inline_items: Vec::new(),
            text_runs: Vec::new(),
        }
    }
}

/// The advance width of `text` at `font_size`, under the fixed-width
/// approximation.
pub fn text_advance(text: &str, font_size: f32) -> Au {
    let chars = text.chars().count() as f32;
    Au::from_f32_px(chars * font_size * CHAR_ADVANCE_FACTOR)
}
