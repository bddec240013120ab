//! Input validation utilities

use crate::constants;

/// Validate that source code is present
pub fn validate_code(code: &str) -> Result<(), &'static str> {
    if code.trim().is_empty() {
        return Err("Code and language are required.");
    }
    Ok(())
}

/// Validate source code size in bytes
pub fn validate_source_size(code: &str, max_bytes: usize) -> Result<(), String> {
    if code.len() > max_bytes {
        return Err(format!(
            "Source code exceeds maximum size of {} bytes",
            max_bytes
        ));
    }
    Ok(())
}

/// Validate judge language identifier
pub fn validate_language_id(language_id: i32) -> Result<(), &'static str> {
    if constants::languages::is_supported(language_id) {
        Ok(())
    } else {
        Err("Unsupported programming language")
    }
}

/// Clamp a 1-based page request to sane bounds
pub fn page_bounds(page: Option<i64>, per_page: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page
        .unwrap_or(constants::DEFAULT_PAGE_SIZE)
        .clamp(1, constants::MAX_PAGE_SIZE);
    (page, per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_code() {
        assert!(validate_code("print(1)").is_ok());
        assert!(validate_code("").is_err());
        assert!(validate_code(" \n\t").is_err());
    }

    #[test]
    fn test_validate_source_size() {
        assert!(validate_source_size("abc", 3).is_ok());
        assert!(validate_source_size("abcd", 3).is_err());
    }

    #[test]
    fn test_validate_language_id() {
        assert!(validate_language_id(71).is_ok());
        assert!(validate_language_id(54).is_ok());
        assert!(validate_language_id(0).is_err());
        assert!(validate_language_id(-5).is_err());
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(None, None), (1, 20));
        assert_eq!(page_bounds(Some(0), Some(500)), (1, 100));
        assert_eq!(page_bounds(Some(3), Some(0)), (3, 1));
    }
}
