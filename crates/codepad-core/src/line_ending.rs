//! Line ending helpers.
//!
//! The buffer always holds LF (`'\n'`) separated text. Files are split into lines on load,
//! and the separator used for saving is chosen explicitly, defaulting to the host platform's.

/// Newline sequence used when writing a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `"\n"`.
    Lf,
    /// `"\r\n"`.
    Crlf,
}

impl LineEnding {
    /// The host platform's line separator.
    pub fn platform() -> Self {
        if cfg!(windows) { Self::Crlf } else { Self::Lf }
    }

    /// [`LineEnding::Crlf`] if `text` contains any `"\r\n"`, otherwise [`LineEnding::Lf`].
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// The separator string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }

    /// Split LF text into lines and join them with this separator.
    pub fn apply_to_text(self, text: &str) -> String {
        text.split('\n').collect::<Vec<_>>().join(self.as_str())
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::platform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(LineEnding::detect_in_text("a\r\nb"), LineEnding::Crlf);
        assert_eq!(LineEnding::detect_in_text("a\nb"), LineEnding::Lf);
        assert_eq!(LineEnding::detect_in_text(""), LineEnding::Lf);
    }

    #[test]
    fn test_apply_to_text() {
        assert_eq!(LineEnding::Crlf.apply_to_text("a\nb\n"), "a\r\nb\r\n");
        assert_eq!(LineEnding::Lf.apply_to_text("a\nb"), "a\nb");
    }
}
