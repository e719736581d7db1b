// src/render.rs
//! PDF serialization of a [`ReportDocument`] using `lopdf`.
//!
//! The renderer builds the document's object graph in memory: one content
//! stream per page, one image `XObject` per chart, a single shared resources
//! dictionary, then Flate-compresses the streams and writes the bytes out.

use crate::document::{Color, FontWeight, Primitive, ReportDocument, TextAlign};
use crate::layout::PageGeometry;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes the page sequence to PDF bytes. Fails atomically: any error
/// discards the partially built object graph.
pub fn render_pdf(report: &ReportDocument, geometry: &PageGeometry) -> Result<Vec<u8>, RenderError> {
    let mut document = Document::with_version("1.7");
    let pages_id = document.new_object_id();

    let font_regular = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut xobjects = Dictionary::new();
    for (index, image) in report.images.iter().enumerate() {
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            image.rgb.clone(),
        );
        let id = document.add_object(stream);
        xobjects.set(image_name(index), Object::Reference(id));
    }

    // One resources dictionary shared by every page.
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_regular,
            "F2" => font_bold,
        },
        "XObject" => Object::Dictionary(xobjects),
    });

    let mut page_ids = Vec::with_capacity(report.pages.len());
    for page in &report.pages {
        let mut ctx = PageContext::new();
        for primitive in &page.primitives {
            ctx.draw(primitive);
        }
        let encoded = ctx.finish().encode()?;
        let content_id = document.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                geometry.width.into(),
                geometry.height.into(),
            ],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
        "Count" => page_ids.len() as i64,
    };
    document.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);
    document.compress();

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    log::debug!(
        "serialized {} pages / {} images into {} bytes",
        report.pages.len(),
        report.images.len(),
        buffer.len()
    );
    Ok(buffer)
}

fn image_name(index: usize) -> Vec<u8> {
    format!("Im{}", index + 1).into_bytes()
}

// --- Page content stream assembly ---

#[derive(Default, Clone, PartialEq)]
struct GraphicsState {
    font: Option<(&'static str, f32)>,
    fill: Option<Color>,
}

/// Builds one page's content operations, eliding redundant font and fill
/// color operators through a tracked graphics state.
struct PageContext {
    content: Content,
    state: GraphicsState,
}

impl PageContext {
    fn new() -> Self {
        Self { content: Content { operations: vec![] }, state: GraphicsState::default() }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Rect { rect, fill, stroke } => {
                if let Some(color) = fill {
                    self.set_fill(*color);
                }
                if let Some(color) = stroke {
                    self.op("w", vec![1.0f32.into()]);
                    self.op("RG", color_operands(*color));
                }
                self.op(
                    "re",
                    vec![rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into()],
                );
                match (fill, stroke) {
                    (Some(_), Some(_)) => self.op("B", vec![]),
                    (Some(_), None) => self.op("f", vec![]),
                    (None, Some(_)) => self.op("S", vec![]),
                    (None, None) => self.op("n", vec![]),
                }
            }
            Primitive::Line { from, to, color, width } => {
                self.op("w", vec![(*width).into()]);
                self.op("RG", color_operands(*color));
                self.op("m", vec![from.0.into(), from.1.into()]);
                self.op("l", vec![to.0.into(), to.1.into()]);
                self.op("S", vec![]);
            }
            Primitive::Text { x, y, content, style, align } => {
                if content.is_empty() {
                    return;
                }
                let start_x = match align {
                    TextAlign::Left => *x,
                    TextAlign::Right => *x - text_width(content, style.size),
                };
                self.op("BT", vec![]);
                self.set_font(style.weight, style.size);
                self.set_fill(style.color);
                self.op("Td", vec![start_x.into(), (*y).into()]);
                self.op(
                    "Tj",
                    vec![Object::String(to_win_ansi(content), StringFormat::Literal)],
                );
                self.op("ET", vec![]);
            }
            Primitive::Image { x, y, width, height, image } => {
                self.op("q", vec![]);
                self.op(
                    "cm",
                    vec![
                        (*width).into(),
                        0.into(),
                        0.into(),
                        (*height).into(),
                        (*x).into(),
                        (*y).into(),
                    ],
                );
                self.op("Do", vec![Object::Name(image_name(*image))]);
                self.op("Q", vec![]);
            }
        }
    }

    fn set_font(&mut self, weight: FontWeight, size: f32) {
        let name = match weight {
            FontWeight::Regular => "F1",
            FontWeight::Bold => "F2",
        };
        if self.state.font != Some((name, size)) {
            self.op("Tf", vec![Object::Name(name.as_bytes().to_vec()), size.into()]);
            self.state.font = Some((name, size));
        }
    }

    fn set_fill(&mut self, color: Color) {
        if self.state.fill != Some(color) {
            self.op("rg", color_operands(color));
            self.state.fill = Some(color);
        }
    }
}

fn color_operands(color: Color) -> Vec<Object> {
    vec![
        (color.r as f32 / 255.0).into(),
        (color.g as f32 / 255.0).into(),
        (color.b as f32 / 255.0).into(),
    ]
}

fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) <= 255 => c as u8,
            _ => b'?',
        })
        .collect()
}

/// Coarse Helvetica advance-width estimate, good enough to right-align the
/// short banner and footer strings this report uses.
fn text_width(text: &str, size: f32) -> f32 {
    let units: f32 = text
        .chars()
        .map(|c| match c {
            'i' | 'j' | 'l' | 't' | 'f' | 'I' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 0.30,
            'm' | 'w' | 'M' | 'W' | '@' | '%' => 0.85,
            ' ' => 0.28,
            '0'..='9' => 0.556,
            'A'..='Z' => 0.72,
            _ => 0.52,
        })
        .sum();
    units * size
}
