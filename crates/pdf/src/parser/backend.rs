use std::collections::BTreeMap;

use lopdf::{self, content::Content};

use crate::PdfError;

/// A page identifier mirroring `lopdf::ObjectId`: (object number, generation number).
pub type PageId = (u32, u16);

/// Info dictionary keys surfaced as document metadata.
const INFO_KEYS: &[&[u8]] = &[b"Title", b"Author", b"Creator", b"Producer", b"Subject"];

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// A font referenced from a page's resource dictionary.
#[derive(Debug, Clone)]
pub struct BackendFontInfo {
    /// Resource key as used by `Tf` (e.g. `b"F1"`).
    pub name: Vec<u8>,
    pub base_font: Option<String>,
}

/// A PDF value detached from `lopdf`, so text extraction can run against
/// plain data.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Dict(Vec<(Vec<u8>, PdfValue)>),
    Reference(PageId),
}

/// One content-stream operator with its operands.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Numeric operand as `f32`; integers and reals both qualify.
pub fn get_number_from_value(val: &PdfValue) -> Option<f32> {
    match val {
        PdfValue::Integer(i) => Some(*i as f32),
        PdfValue::Real(f) => Some(*f),
        _ => None,
    }
}

/// Convert a `lopdf::Object` into a [`PdfValue`].
///
/// Streams keep only their dictionary; content bytes go through
/// [`PdfBackend::page_content`].
pub fn convert_object(obj: &lopdf::Object) -> PdfValue {
    match obj {
        lopdf::Object::Null => PdfValue::Null,
        lopdf::Object::Boolean(b) => PdfValue::Bool(*b),
        lopdf::Object::Integer(i) => PdfValue::Integer(*i),
        lopdf::Object::Real(f) => PdfValue::Real(*f),
        lopdf::Object::Name(n) => PdfValue::Name(n.clone()),
        lopdf::Object::String(s, _) => PdfValue::Str(s.clone()),
        lopdf::Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        lopdf::Object::Dictionary(dict) => PdfValue::Dict(convert_dict(dict)),
        lopdf::Object::Stream(stream) => PdfValue::Dict(convert_dict(&stream.dict)),
        lopdf::Object::Reference(id) => PdfValue::Reference(*id),
    }
}

fn convert_dict(dict: &lopdf::Dictionary) -> Vec<(Vec<u8>, PdfValue)> {
    dict.iter()
        .map(|(k, v)| (k.clone(), convert_object(v)))
        .collect()
}

/// Decode PDF string bytes without font information.
///
/// UTF-16BE with a BOM first, then UTF-8, and finally Latin-1 byte by byte.
/// Used for Info strings and for fonts whose encoding cannot be resolved.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(payload) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return decode_utf16be(payload);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}

/// Decode big-endian UTF-16 code units; a trailing odd byte is dropped.
fn decode_utf16be(bytes: &[u8]) -> String {
    let code_units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect();
    String::from_utf16_lossy(&code_units)
}

// ---------------------------------------------------------------------------
// TextDecoder
// ---------------------------------------------------------------------------

/// Turns the operand of a text-showing operator into text, for one page.
pub trait TextDecoder {
    /// `font_key` is the resource name selected by the last `Tf`.
    fn decode(&self, font_key: &[u8], bytes: &[u8]) -> String;
}

/// Font-agnostic decoder built on [`decode_text_simple`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTextDecoder;

impl TextDecoder for SimpleTextDecoder {
    fn decode(&self, _font_key: &[u8], bytes: &[u8]) -> String {
        decode_text_simple(bytes)
    }
}

/// The encodings of one page's fonts, resolved once per page.
///
/// A `/ToUnicode` CMap wins over the `/Encoding` entry; fonts lopdf cannot
/// resolve fall back to [`decode_text_simple`].
struct PageFontEncodings<'a> {
    encodings: BTreeMap<Vec<u8>, lopdf::Encoding<'a>>,
}

impl TextDecoder for PageFontEncodings<'_> {
    fn decode(&self, font_key: &[u8], bytes: &[u8]) -> String {
        let Some(encoding) = self.encodings.get(font_key) else {
            return decode_text_simple(bytes);
        };
        lopdf::Document::decode_text(encoding, bytes).unwrap_or_else(|e| {
            log::debug!(
                "font {}: {e}; decoding without font",
                String::from_utf8_lossy(font_key)
            );
            decode_text_simple(bytes)
        })
    }
}

// ---------------------------------------------------------------------------
// PdfBackend trait
// ---------------------------------------------------------------------------

/// The operations page text extraction needs from a PDF library.
///
/// [`LopdfBackend`] is the production implementation; tests substitute
/// in-memory mocks that hand back pre-decoded operators.
pub trait PdfBackend {
    /// 1-based page number to [`PageId`], in page order.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>, PdfError>;

    /// Raw content stream bytes for a page, decompressed and concatenated.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>, PdfError>;

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>, PdfError>;

    /// A decoder for strings shown with the page's fonts.
    fn text_decoder(&self, page: PageId) -> Box<dyn TextDecoder + '_>;
}

// ---------------------------------------------------------------------------
// LopdfBackend
// ---------------------------------------------------------------------------

pub struct LopdfBackend {
    doc: lopdf::Document,
}

impl LopdfBackend {
    /// Parse a PDF held in memory.
    pub fn load_bytes(data: &[u8]) -> Result<Self, PdfError> {
        let doc = lopdf::Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(PdfError::Encrypted);
        }

        Ok(Self { doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// String entries of the trailer's Info dictionary, keyed by name.
    pub fn metadata(&self) -> BTreeMap<String, String> {
        let mut meta = BTreeMap::new();

        let info_dict = match self.doc.trailer.get(b"Info") {
            Ok(lopdf::Object::Reference(id)) => match self.doc.get_object(*id) {
                Ok(lopdf::Object::Dictionary(d)) => d,
                _ => return meta,
            },
            Ok(lopdf::Object::Dictionary(d)) => d,
            _ => return meta,
        };

        for key in INFO_KEYS {
            let value = match info_dict.get(key) {
                Ok(lopdf::Object::String(bytes, _)) => decode_text_simple(bytes),
                Ok(lopdf::Object::Name(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
                _ => continue,
            };
            meta.insert(String::from_utf8_lossy(key).into_owned(), value);
        }

        meta
    }
}

fn name_entry(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        lopdf::Object::Name(n) => Some(String::from_utf8_lossy(n).into_owned()),
        _ => None,
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>, PdfError> {
        let fonts = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| PdfError::Parse(format!("cannot get page fonts: {}", e)))?;

        Ok(fonts
            .iter()
            .map(|(name, dict)| BackendFontInfo {
                name: name.clone(),
                base_font: name_entry(dict, b"BaseFont"),
            })
            .collect())
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>, PdfError> {
        self.doc
            .get_page_content(page)
            .map_err(|e| PdfError::Parse(format!("cannot get page content: {}", e)))
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>, PdfError> {
        let content = Content::decode(data)
            .map_err(|e| PdfError::Parse(format!("content stream decode error: {}", e)))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operands: op.operands.iter().map(convert_object).collect(),
                operator: op.operator,
            })
            .collect())
    }

    fn text_decoder(&self, page: PageId) -> Box<dyn TextDecoder + '_> {
        let fonts = match self.doc.get_page_fonts(page) {
            Ok(fonts) => fonts,
            Err(e) => {
                log::debug!("page {page:?}: cannot read fonts: {e}");
                return Box::new(SimpleTextDecoder);
            }
        };

        let encodings = fonts
            .into_iter()
            .filter_map(|(key, font)| match font.get_font_encoding(&self.doc) {
                Ok(encoding) => Some((key, encoding)),
                Err(e) => {
                    log::debug!(
                        "font {}: no usable encoding: {e}",
                        String::from_utf8_lossy(&key)
                    );
                    None
                }
            })
            .collect();

        Box::new(PageFontEncodings { encodings })
    }
}
