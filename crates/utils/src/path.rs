use crate::UtilsError;

/// Checks that a client supplied filename names a single entry inside the
/// photo directory.
pub fn validate_filename(name: &str) -> Result<(), UtilsError> {
    if name.is_empty() {
        return Err(UtilsError::InvalidPath("empty filename".to_string()));
    }

    if name.contains("..") {
        return Err(UtilsError::InvalidPath(
            "Path contains '..' (path traversal attempt)".to_string(),
        ));
    }

    if name.contains('\0') {
        return Err(UtilsError::InvalidPath("Path contains null byte".to_string()));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(UtilsError::InvalidPath(
            "Path separators are not allowed".to_string(),
        ));
    }

    // Windows drive letters (C:, D:, etc.)
    if name.len() >= 2 && name.chars().nth(1) == Some(':') {
        return Err(UtilsError::InvalidPath(
            "Drive letters are not allowed".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_names() {
        assert!(validate_filename("1700000000000-ab12cd34.jpg").is_ok());
        assert!(validate_filename("photo_1700000000000_ABCDEFGHIJKLMNOP.png").is_ok());
        assert!(validate_filename("a.b.c").is_ok());
    }

    #[test]
    fn test_rejects_traversal() {
        assert!(validate_filename("").is_err());
        assert!(validate_filename("../etc/passwd").is_err());
        assert!(validate_filename("..").is_err());
        assert!(validate_filename("sub/file.png").is_err());
        assert!(validate_filename("sub\\file.png").is_err());
        assert!(validate_filename("/abs.png").is_err());
        assert!(validate_filename("C:evil.png").is_err());
        assert!(validate_filename("nul\0.png").is_err());
    }
}
