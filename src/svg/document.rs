use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::io::Write;
use std::path::Path;

use super::Drawing;
use crate::error::*;
use crate::geometry::PageSize;
use crate::units::to_user_units;

/// The document the calendar is drawn onto. The source is kept verbatim and
/// re-emitted with the calendar appended to the root element.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    source: String,
    page: PageSize,
}

fn attribute(e: &BytesStart, name: &str) -> Result<Option<String>> {
    match e.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn parse_view_box(value: &str) -> Option<(f64, f64)> {
    let numbers: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
        .ok()?;

    match numbers.as_slice() {
        [_, _, width, height] if *width > 0.0 && *height > 0.0 => Some((*width, *height)),
        _ => None,
    }
}

fn is_svg_root(e: &BytesStart) -> bool {
    e.local_name().as_ref() == b"svg"
}

fn page_size(root: &BytesStart) -> Result<PageSize> {
    let width = attribute(root, "width")?.and_then(|w| to_user_units(&w).ok());
    let height = attribute(root, "height")?.and_then(|h| to_user_units(&h).ok());
    let view_box = attribute(root, "viewBox")?.and_then(|v| parse_view_box(&v));

    match (view_box, width, height) {
        (Some((vb_width, vb_height)), width, _) => Ok(PageSize {
            width: vb_width,
            height: vb_height,
            user_units_per_px: width.map_or(1.0, |width| vb_width / width),
        }),
        (None, Some(width), Some(height)) => Ok(PageSize::new(width, height)),
        _ => Err(Error::new(
            ErrorKind::DocumentParse,
            "the root element has neither a usable width and height nor a viewBox",
        )),
    }
}

fn read_page(source: &str) -> Result<PageSize> {
    let mut reader = Reader::from_str(source);

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                if !is_svg_root(&e) {
                    return Err(Error::new(
                        ErrorKind::DocumentParse,
                        "the root element is not <svg>",
                    ));
                }
                return page_size(&e);
            }
            Event::Eof => {
                return Err(Error::new(ErrorKind::DocumentParse, "no root element"));
            }
            _ => {}
        }
    }
}

impl SvgDocument {
    pub fn parse(source: String) -> Result<Self> {
        let page = read_page(&source)?;
        log::debug!("Document page: {:?}", page);

        Ok(SvgDocument { source, page })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::parse(source).map_err(|e| {
            let msg = format!(
                "{}: {}",
                path.display(),
                e.message.as_deref().unwrap_or_default()
            );
            e.with_msg(&msg)
        })
    }

    /// An empty page of the given size, e.g. `210mm` by `297mm`.
    pub fn blank(width: &str, height: &str) -> Result<Self> {
        let width_uu = to_user_units(width)?;
        let height_uu = to_user_units(height)?;

        let source = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" \
             width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n</svg>\n",
            width.trim(),
            height.trim(),
            width_uu,
            height_uu
        );

        Self::parse(source)
    }

    pub fn page(&self) -> PageSize {
        self.page
    }

    /// Writes the document with `drawing` appended as the last child of the
    /// root element.
    pub fn write_with<W: Write>(&self, drawing: &Drawing, out: W) -> Result<W> {
        let mut reader = Reader::from_str(&self.source);
        let mut writer = Writer::new(out);
        let mut depth = 0usize;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    depth += 1;
                    writer.write_event(Event::Start(e))?;
                }
                Event::End(e) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        drawing.write(&mut writer)?;
                    }
                    writer.write_event(Event::End(e))?;
                }
                Event::Empty(e) if depth == 0 => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    writer.write_event(Event::Start(e))?;
                    drawing.write(&mut writer)?;
                    writer.write_event(Event::End(BytesEnd::new(name)))?;
                }
                Event::Eof => break,
                event => writer.write_event(event)?,
            }
        }

        Ok(writer.into_inner())
    }
}
