// src/document.rs
//! The intermediate document format: positioned drawing primitives grouped
//! into pages, plus the raster images they reference.
//!
//! Coordinates follow PDF user space: the origin is the bottom-left corner
//! of the page and y grows upward. Rectangles are anchored at their
//! bottom-left corner; text coordinates name the baseline start.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    /// The x coordinate names the right edge of the rendered string.
    Right,
}

/// The complete style of one text primitive. Every primitive carries its own
/// style; nothing leaks from one cell or row into the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
}

impl TextStyle {
    pub fn regular(size: f32, color: Color) -> Self {
        Self { size, weight: FontWeight::Regular, color }
    }

    pub fn bold(size: f32, color: Color) -> Self {
        Self { size, weight: FontWeight::Bold, color }
    }
}

#[derive(Debug, Clone)]
pub enum Primitive {
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Color>,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        width: f32,
    },
    Text {
        x: f32,
        y: f32,
        content: String,
        style: TextStyle,
        align: TextAlign,
    },
    /// An embedded raster image; `image` indexes into
    /// [`ReportDocument::images`].
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: usize,
    },
}

/// One finished page: an ordered list of primitives, painted first to last.
#[derive(Debug, Clone)]
pub struct Page {
    pub number: u32,
    pub primitives: Vec<Primitive>,
}

impl Page {
    pub fn new(number: u32) -> Self {
        Self { number, primitives: Vec::new() }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// All text primitives on the page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, &TextStyle)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { content, style, .. } => Some((content.as_str(), style)),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|(content, _)| content.contains(needle))
    }
}

/// A rendered raster image as raw 8-bit RGB pixels, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

/// The final report artifact before PDF serialization. Built once per
/// request and discarded after the bytes are produced.
#[derive(Debug, Clone, Default)]
pub struct ReportDocument {
    pub pages: Vec<Page>,
    pub images: Vec<RasterImage>,
}

impl ReportDocument {
    /// Registers an image and returns the index primitives refer to it by.
    pub fn add_image(&mut self, image: RasterImage) -> usize {
        self.images.push(image);
        self.images.len() - 1
    }
}
