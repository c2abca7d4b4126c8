use super::types::TextStrategy;

/// Digital PDF text layer strategy using the pdf-extract crate.
/// Parses the byte buffer as a PDF container and concatenates all textual
/// content streams in document order.
pub struct PdfTextLayer;

impl TextStrategy for PdfTextLayer {
    fn name(&self) -> &'static str {
        "pdf-text-layer"
    }

    fn attempt(&self, bytes: &[u8]) -> Result<String, String> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string())
    }
}
