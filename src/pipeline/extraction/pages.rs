use lopdf::Document;

use super::types::TextStrategy;

/// Page-walking PDF strategy using lopdf directly.
///
/// Walks pages 1..N and reads each page's text runs individually. A failure
/// on one page is non-fatal: the page is skipped and extraction continues,
/// so a document with a few corrupt pages still yields its readable pages.
pub struct PdfPageWalker;

impl TextStrategy for PdfPageWalker {
    fn name(&self) -> &'static str {
        "pdf-page-walker"
    }

    fn attempt(&self, bytes: &[u8]) -> Result<String, String> {
        let doc = Document::load_mem(bytes).map_err(|e| e.to_string())?;

        let mut out = String::new();
        let mut pages_read = 0usize;
        for (page_number, _) in doc.get_pages() {
            match doc.extract_text(&[page_number]) {
                Ok(page_text) => {
                    // Runs within a page joined by single spaces, one
                    // newline per page.
                    let joined = page_text.split_whitespace().collect::<Vec<_>>().join(" ");
                    out.push_str(&joined);
                    out.push('\n');
                    pages_read += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        page = page_number,
                        error = %e,
                        "page walker: skipping unreadable page"
                    );
                }
            }
        }

        if pages_read == 0 {
            return Err("no readable pages".into());
        }
        Ok(out)
    }
}
