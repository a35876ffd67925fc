//! Uploaded-document text extraction. Supports plain text and PDF.

use crate::errors::AppError;

/// Extracts text from an uploaded file, dispatching on the file extension.
pub fn extract_text(filename: &str, data: &[u8]) -> Result<String, AppError> {
    let lower = filename.to_lowercase();

    if lower.ends_with(".txt") {
        String::from_utf8(data.to_vec())
            .map_err(|_| AppError::Validation("Text file is not valid UTF-8".to_string()))
    } else if lower.ends_with(".pdf") {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| AppError::Extraction(format!("Failed to extract PDF text: {e}")))
    } else {
        Err(AppError::Validation(
            "Unsupported file type; expected .txt or .pdf".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_extension_decodes_utf8() {
        let text = extract_text("resume.txt", "Backend engineer".as_bytes()).unwrap();
        assert_eq!(text, "Backend engineer");
    }

    #[test]
    fn test_txt_extension_is_case_insensitive() {
        let text = extract_text("RESUME.TXT", "ok".as_bytes()).unwrap();
        assert_eq!(text, "ok");
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let result = extract_text("resume.txt", &[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let result = extract_text("resume.docx", b"PK");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
