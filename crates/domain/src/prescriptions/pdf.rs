use lopdf::Document;
use tracing::info;

use crate::errors::Error;

/// Extracts plain text from a PDF, one line per page in page order.
///
/// Any page that cannot be decoded fails the whole document with
/// [`Error::Pdf`]; a document with no text at all is [`Error::EmptyDocument`].
pub fn extract_text(data: &[u8]) -> Result<String, Error> {
    let doc = Document::load_mem(data)?;

    let pages = doc.get_pages();
    let mut lines = Vec::with_capacity(pages.len());
    for (page, page_id) in &pages {
        for content_id in doc.get_page_contents(*page_id) {
            doc.get_object(content_id)?;
        }
        let text = doc.extract_text(&[*page])?;
        lines.push(text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    let text = lines.join("\n");
    if text.trim().is_empty() {
        return Err(Error::EmptyDocument);
    }

    info!(pages = pages.len(), chars = text.len(), "extracted prescription text");
    Ok(text)
}

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures {
    use lopdf::{
        content::{Content, Operation},
        dictionary, Document, Object, Stream,
    };

    /// Builds a PDF with one page per entry of `pages`, each line drawn with `Tj`.
    pub fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
        build(&pages.iter().map(|lines| Some(*lines)).collect::<Vec<_>>())
    }

    /// Builds a PDF whose first page holds `lines` and whose second page
    /// points its `Contents` at an object that does not exist.
    pub fn pdf_with_missing_contents(lines: &[&str]) -> Vec<u8> {
        build(&[Some(lines), None])
    }

    fn build(pages: &[Option<&[&str]>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for lines in pages {
            let Some(lines) = lines else {
                let page_id = doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "Contents" => Object::Reference((9999, 0)),
                    "Resources" => resources_id,
                });
                kids.push(page_id.into());
                continue;
            };

            let mut operations = vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
            ];
            for line in lines.iter() {
                operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
                operations.push(Operation::new("Td", vec![0.into(), (-16).into()]));
            }
            operations.push(Operation::new("ET", vec![]));

            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    pub fn prescription_pdf() -> Vec<u8> {
        pdf_with_pages(&[&[
            "Patient: Rajesh",
            "Date: 04-Apr-2025",
            "Dx: Fever",
            "Paracetamol 500mg twice a day",
        ]])
    }
}
