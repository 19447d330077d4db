//! [`PdfTextPort`] backed by `lopdf`.

use lopdf::Document;
use sage_application::ports::pdf_text::{PdfError, PdfText, PdfTextPort};
use tracing::debug;

/// Reads each page's text layer in page order.
///
/// Text items on a page are joined by single spaces; scanned pages without a
/// text layer come back empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfTextReader;

impl LopdfTextReader {
    pub fn new() -> Self {
        Self
    }
}

/// Join a page's text items with single spaces.
fn normalize_page(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl PdfTextPort for LopdfTextReader {
    fn read_text(&self, bytes: &[u8]) -> Result<PdfText, PdfError> {
        let document = Document::load_mem(bytes).map_err(|e| PdfError::Malformed(e.to_string()))?;
        if document.is_encrypted() {
            return Err(PdfError::Encrypted);
        }

        let mut pages = Vec::new();
        for page_number in document.get_pages().into_keys() {
            let raw = document
                .extract_text(&[page_number])
                .map_err(|e| PdfError::Page {
                    page: page_number,
                    message: e.to_string(),
                })?;
            pages.push(normalize_page(&raw));
        }

        debug!("Read {} PDF pages", pages.len());
        Ok(PdfText::new(pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ReqwestPageFetcher, ScraperReadability};
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};
    use sage_application::{ExtractArticleUseCase, NoProgress, ResolveContentUseCase};
    use sage_domain::{ArticleInput, ContentOrigin};
    use std::sync::Arc;

    /// A PDF with one line of Type1 text per page.
    fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![50.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_reads_pages_in_order() {
        let bytes = pdf_with_pages(&["First page text", "Second page text"]);
        let text = LopdfTextReader.read_text(&bytes).unwrap();

        assert_eq!(text.pages, vec!["First page text", "Second page text"]);
        assert_eq!(text.joined(), "First page text\nSecond page text\n");
    }

    #[tokio::test]
    async fn test_resolves_pdf_article_through_reader() {
        let first = "The city council approved the new transit budget on Tuesday evening.";
        let second = "Opponents said the plan cuts weekend service on several bus routes.";
        let bytes = pdf_with_pages(&[first, second]);

        let extractor = ExtractArticleUseCase::new(
            Arc::new(ReqwestPageFetcher::with_client(reqwest::Client::new())),
            Arc::new(ScraperReadability::new()),
        );
        let resolver = ResolveContentUseCase::new(extractor, Arc::new(LopdfTextReader::new()));

        let content = resolver
            .execute(
                ArticleInput::Pdf {
                    file_name: "transit.pdf".into(),
                    bytes,
                },
                &NoProgress,
            )
            .await
            .unwrap();

        assert_eq!(content.text(), format!("{}\n{}\n", first, second));
        assert_eq!(
            content.origin(),
            &ContentOrigin::Pdf {
                file_name: "transit.pdf".into(),
                pages: 2,
            }
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = LopdfTextReader.read_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::Malformed(_)));
    }

    #[test]
    fn test_empty_bytes_are_malformed() {
        assert!(matches!(
            LopdfTextReader.read_text(&[]),
            Err(PdfError::Malformed(_))
        ));
    }

    #[test]
    fn test_normalize_page() {
        assert_eq!(
            normalize_page("The  council\napproved \n\n the budget. "),
            "The council approved the budget."
        );
        assert_eq!(normalize_page("   "), "");
    }
}
