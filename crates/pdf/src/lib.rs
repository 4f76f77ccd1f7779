use thiserror::Error;

use parser::backend::{LopdfBackend, PdfBackend};

pub mod cleanup;
pub mod parser;
pub mod types;

pub use types::*;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// A parsed PDF document.
///
/// Constructed via [`ParsedDocument::from_bytes`]. Page text and metadata are
/// read from the same parse.
pub struct ParsedDocument {
    backend: LopdfBackend,
}

impl ParsedDocument {
    /// Parse PDF bytes. Fails on malformed or encrypted documents.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PdfError> {
        let backend = LopdfBackend::load_bytes(bytes)?;
        log::debug!("loaded PDF with {} pages", backend.page_count());
        Ok(ParsedDocument { backend })
    }

    /// Text of every page in page order.
    ///
    /// A page with no extractable text is `None`. So is a page whose content
    /// stream cannot be read; that case is logged and the remaining pages are
    /// still extracted.
    pub fn page_texts(&self) -> Vec<Option<String>> {
        self.backend
            .pages()
            .into_iter()
            .map(|(number, page_id)| {
                match parser::text::page_text(&self.backend, page_id) {
                    Ok(text) => {
                        let text = cleanup::cleanup_page_text(&text);
                        (!text.trim().is_empty()).then_some(text)
                    }
                    Err(e) => {
                        log::warn!("skipping page {number}: {e}");
                        None
                    }
                }
            })
            .collect()
    }

    pub fn metadata(&self) -> DocumentMetadata {
        let raw = self.backend.metadata();
        DocumentMetadata {
            title: raw.get("Title").cloned(),
            author: raw.get("Author").cloned(),
            page_count: self.backend.page_count(),
            creator: raw.get("Creator").cloned(),
            producer: raw.get("Producer").cloned(),
            subject: raw.get("Subject").cloned(),
        }
    }
}

/// Anything that can turn PDF bytes into per-page text.
pub trait PageTextSource {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<Option<String>>, PdfError>;
}

/// [`PageTextSource`] backed by `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfTextSource;

impl PageTextSource for LopdfTextSource {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<Option<String>>, PdfError> {
        Ok(ParsedDocument::from_bytes(bytes)?.page_texts())
    }
}

// ---------------------------------------------------------------------------
// Convenience free functions (stateless, re-parse each call)
// ---------------------------------------------------------------------------

/// Extract the text of every page.
pub fn extract_page_texts(bytes: &[u8]) -> Result<Vec<Option<String>>, PdfError> {
    LopdfTextSource.page_texts(bytes)
}

/// Get document metadata without extracting any text.
pub fn info(bytes: &[u8]) -> Result<DocumentMetadata, PdfError> {
    Ok(ParsedDocument::from_bytes(bytes)?.metadata())
}

#[cfg(test)]
mod tests {
    use lopdf::{dictionary, Object, Stream};

    use super::*;

    /// Glyphs 1..=13 spell "Semiconductor".
    const SEMICONDUCTOR_CMAP: &[u8] = b"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS)
/Supplement 0
>> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
13 beginbfchar
<0001> <0053>
<0002> <0065>
<0003> <006D>
<0004> <0069>
<0005> <0063>
<0006> <006F>
<0007> <006E>
<0008> <0064>
<0009> <0075>
<000A> <0063>
<000B> <0074>
<000C> <006F>
<000D> <0072>
endbfchar
endcmap
CMapName currentdict /CMap defineresource pop
end
end";

    /// Build a PDF with one page per content stream, all using Helvetica as F1.
    fn pdf_with_pages(contents: &[&str], title: Option<&str>) -> Vec<u8> {
        pdf_with_font(
            |doc| {
                doc.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => "Helvetica",
                })
            },
            contents,
            title,
        )
    }

    /// Like [`pdf_with_pages`], with F1 added to the document by `font`.
    fn pdf_with_font(
        font: impl FnOnce(&mut lopdf::Document) -> lopdf::ObjectId,
        contents: &[&str],
        title: Option<&str>,
    ) -> Vec<u8> {
        let mut doc = lopdf::Document::with_version("1.5");
        let font_id = font(&mut doc);

        let media_box = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ];

        let mut page_ids = Vec::new();
        for content in contents {
            let stream = Stream::new(dictionary! {}, content.as_bytes().to_vec());
            let content_id = doc.add_object(stream);
            let page_dict = dictionary! {
                "Type" => "Page",
                "MediaBox" => media_box.clone(),
                "Contents" => Object::Reference(content_id),
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => Object::Reference(font_id) },
                },
            };
            page_ids.push(doc.add_object(page_dict));
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(contents.len() as i64),
        });

        for &pid in &page_ids {
            if let Ok(page_obj) = doc.get_object_mut(pid) {
                if let Ok(dict) = page_obj.as_dict_mut() {
                    dict.set("Parent", Object::Reference(pages_id));
                }
            }
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        if let Some(title) = title {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::string_literal(title),
                "Producer" => Object::string_literal("parascope tests"),
            });
            doc.trailer.set("Info", Object::Reference(info_id));
        }

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_two_page_document() {
        let bytes = pdf_with_pages(
            &[
                "BT /F1 12 Tf 72 720 Td (Intro paragraph.) Tj 0 -40 Td (Semiconductor growth is strong.) Tj ET",
                "BT /F1 12 Tf 72 720 Td (Orderbook remains healthy.) Tj 0 -40 Td (Unrelated text.) Tj ET",
            ],
            None,
        );

        let pages = extract_page_texts(&bytes).unwrap();
        assert_eq!(
            pages,
            vec![
                Some("Intro paragraph.\n\nSemiconductor growth is strong.".to_string()),
                Some("Orderbook remains healthy.\n\nUnrelated text.".to_string()),
            ]
        );
    }

    #[test]
    fn test_type0_font_decoded_through_to_unicode() {
        let bytes = pdf_with_font(
            |doc| {
                let cmap = Stream::new(dictionary! {}, SEMICONDUCTOR_CMAP.to_vec());
                let cmap_id = doc.add_object(cmap);
                doc.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type0",
                    "BaseFont" => "NotoSans-Regular",
                    "Encoding" => "Identity-H",
                    "ToUnicode" => Object::Reference(cmap_id),
                })
            },
            &["BT /F1 12 Tf 72 720 Td <000100020003000400050006000700080009000A000B000C000D> Tj ET"],
            None,
        );

        let pages = extract_page_texts(&bytes).unwrap();
        assert_eq!(pages, vec![Some("Semiconductor".to_string())]);
    }

    #[test]
    fn test_win_ansi_font_maps_curly_quotes() {
        let bytes = pdf_with_font(
            |doc| {
                doc.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "TrueType",
                    "BaseFont" => "Arial",
                    "Encoding" => "WinAnsiEncoding",
                })
            },
            &["BT /F1 12 Tf 72 720 Td (\\223Orderbook\\224 remains healthy.) Tj ET"],
            None,
        );

        let pages = extract_page_texts(&bytes).unwrap();
        assert_eq!(
            pages,
            vec![Some("\u{201C}Orderbook\u{201D} remains healthy.".to_string())]
        );
    }

    #[test]
    fn test_flipped_page_matrix_keeps_reading_order() {
        let bytes = pdf_with_pages(
            &["1 0 0 -1 0 792 cm BT /F1 12 Tf 1 0 0 -1 72 100 Tm (First paragraph.) Tj 1 0 0 -1 72 140 Tm (Second paragraph.) Tj ET"],
            None,
        );

        let pages = extract_page_texts(&bytes).unwrap();
        assert_eq!(
            pages,
            vec![Some("First paragraph.\n\nSecond paragraph.".to_string())]
        );
    }

    #[test]
    fn test_lines_of_one_paragraph_stay_together() {
        let bytes = pdf_with_pages(
            &["BT /F1 12 Tf 14 TL 72 720 Td (First line) Tj T* (second line) Tj ET"],
            None,
        );
        let pages = extract_page_texts(&bytes).unwrap();
        assert_eq!(pages, vec![Some("First line\nsecond line".to_string())]);
    }

    #[test]
    fn test_page_without_text_is_none() {
        let bytes = pdf_with_pages(
            &["0 0 m 100 100 l S", "BT /F1 12 Tf 72 720 Td (Hi) Tj ET"],
            None,
        );
        let pages = extract_page_texts(&bytes).unwrap();
        assert_eq!(pages, vec![None, Some("Hi".to_string())]);
    }

    #[test]
    fn test_info_reads_metadata() {
        let bytes = pdf_with_pages(&["BT ET", "BT ET", "BT ET"], Some("Annual Report"));
        let meta = info(&bytes).unwrap();
        assert_eq!(meta.page_count, 3);
        assert_eq!(meta.title.as_deref(), Some("Annual Report"));
        assert_eq!(meta.producer.as_deref(), Some("parascope tests"));
        assert_eq!(meta.author, None);
    }

    #[test]
    fn test_invalid_bytes() {
        assert!(matches!(
            extract_page_texts(b"%PDF-garbage"),
            Err(PdfError::Parse(_))
        ));
        assert!(info(&[]).is_err());
    }
}
