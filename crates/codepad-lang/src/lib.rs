#![warn(missing_docs)]
//! `codepad-lang` - data-driven language descriptors for `codepad-core`.
//!
//! A [`LanguageDescriptor`] is a plain value: keyword set, comment tokens, string delimiters,
//! bracket set and a couple of behavior flags. The highlighter and the auto-indenter in
//! `codepad-core` are small pure functions over this value; there is no per-language type
//! hierarchy.
//!
//! "Plain text" is represented by the absence of a descriptor (`Option<LanguageDescriptor>`).

use std::path::Path;

/// Comment tokens/config for a given language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentConfig {
    /// Line comment token (e.g. `//`, `#`).
    pub line: Option<String>,
    /// Block comment start token (e.g. `/*`).
    pub block_start: Option<String>,
    /// Block comment end token (e.g. `*/`).
    pub block_end: Option<String>,
}

impl CommentConfig {
    /// Create a config that supports only line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            line: Some(token.into()),
            block_start: None,
            block_end: None,
        }
    }

    /// Create a config that supports both line and block comments.
    pub fn line_and_block(
        line: impl Into<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        Self {
            line: Some(line.into()),
            block_start: Some(block_start.into()),
            block_end: Some(block_end.into()),
        }
    }

    /// Returns `true` if a line comment token is configured.
    pub fn has_line(&self) -> bool {
        self.line.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Returns `true` if both block comment tokens are configured.
    pub fn has_block(&self) -> bool {
        self.block_start.as_deref().is_some_and(|s| !s.is_empty())
            && self.block_end.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// The `(start, end)` block comment pair, if both tokens are configured.
    pub fn block_pair(&self) -> Option<(&str, &str)> {
        if !self.has_block() {
            return None;
        }
        Some((self.block_start.as_deref()?, self.block_end.as_deref()?))
    }
}

/// Lexical description of a programming language.
///
/// Everything the incremental highlighter and the curly-brace indenter need to know about a
/// language lives here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDescriptor {
    /// Display name (e.g. `"Java"`).
    pub name: String,
    /// File extensions without the leading dot (e.g. `["java"]`).
    pub extensions: Vec<String>,
    /// Reserved words styled as keywords.
    pub keywords: Vec<String>,
    /// Operator tokens styled as operators.
    pub operators: Vec<String>,
    /// Bracket characters styled as brackets.
    pub brackets: Vec<char>,
    /// Comment tokens.
    pub comments: CommentConfig,
    /// Characters that open and close a single-line string literal.
    pub string_delimiters: Vec<char>,
    /// Escape character inside string literals.
    pub escape_char: Option<char>,
    /// Prefix of flagged tokens (annotations/decorators), e.g. `@`.
    pub annotation_prefix: Option<char>,
    /// Keywords only match as whole words (neighbours are not letters, digits or `_`).
    pub whole_words: bool,
    /// Enables `{`/`}` driven auto-indentation.
    pub curly_bracket_indent: bool,
}

impl LanguageDescriptor {
    /// Create a descriptor with the given name and no lexical rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extensions: Vec::new(),
            keywords: Vec::new(),
            operators: Vec::new(),
            brackets: Vec::new(),
            comments: CommentConfig::default(),
            string_delimiters: Vec::new(),
            escape_char: None,
            annotation_prefix: None,
            whole_words: true,
            curly_bracket_indent: false,
        }
    }

    /// Set the recognized file extensions.
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = to_strings(extensions);
        self
    }

    /// Set the keyword list.
    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = to_strings(keywords);
        self
    }

    /// Set the operator list.
    pub fn with_operators(mut self, operators: &[&str]) -> Self {
        self.operators = to_strings(operators);
        self
    }

    /// Set the bracket characters.
    pub fn with_brackets(mut self, brackets: &[char]) -> Self {
        self.brackets = brackets.to_vec();
        self
    }

    /// Set the comment tokens.
    pub fn with_comments(mut self, comments: CommentConfig) -> Self {
        self.comments = comments;
        self
    }

    /// Set the string delimiters and escape character.
    pub fn with_strings(mut self, delimiters: &[char], escape: Option<char>) -> Self {
        self.string_delimiters = delimiters.to_vec();
        self.escape_char = escape;
        self
    }

    /// Set the flagged-token prefix.
    pub fn with_annotation_prefix(mut self, prefix: char) -> Self {
        self.annotation_prefix = Some(prefix);
        self
    }

    /// Enable or disable whole-word keyword matching.
    pub fn with_whole_words(mut self, whole_words: bool) -> Self {
        self.whole_words = whole_words;
        self
    }

    /// Enable or disable curly-bracket auto-indentation.
    pub fn with_curly_bracket_indent(mut self, enabled: bool) -> Self {
        self.curly_bracket_indent = enabled;
        self
    }

    /// Returns `true` if the language has block comments, which force full-document
    /// highlighting whenever a delimiter is touched.
    pub fn has_block_comments(&self) -> bool {
        self.comments.has_block()
    }

    /// Returns `true` if `ext` (without dot, case-insensitive) belongs to this language.
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Java.
    pub fn java() -> Self {
        Self::new("Java")
            .with_extensions(&["java"])
            .with_keywords(&[
                "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char",
                "class", "const", "continue", "default", "do", "double", "else", "enum",
                "extends", "final", "finally", "float", "for", "goto", "if", "implements",
                "import", "instanceof", "int", "interface", "long", "native", "new", "package",
                "private", "protected", "public", "return", "short", "static", "strictfp",
                "super", "switch", "synchronized", "this", "throw", "throws", "transient",
                "try", "void", "volatile", "while", "true", "false", "null", "var", "record",
            ])
            .with_operators(C_FAMILY_OPERATORS)
            .with_brackets(CURLY_BRACKETS)
            .with_comments(CommentConfig::line_and_block("//", "/*", "*/"))
            .with_strings(&['"', '\''], Some('\\'))
            .with_annotation_prefix('@')
            .with_curly_bracket_indent(true)
    }

    /// C.
    pub fn c() -> Self {
        Self::new("C")
            .with_extensions(&["c", "h"])
            .with_keywords(&[
                "auto", "break", "case", "char", "const", "continue", "default", "do",
                "double", "else", "enum", "extern", "float", "for", "goto", "if", "inline",
                "int", "long", "register", "restrict", "return", "short", "signed", "sizeof",
                "static", "struct", "switch", "typedef", "union", "unsigned", "void",
                "volatile", "while",
            ])
            .with_operators(C_FAMILY_OPERATORS)
            .with_brackets(CURLY_BRACKETS)
            .with_comments(CommentConfig::line_and_block("//", "/*", "*/"))
            .with_strings(&['"', '\''], Some('\\'))
            .with_curly_bracket_indent(true)
    }

    /// Rust.
    pub fn rust() -> Self {
        Self::new("Rust")
            .with_extensions(&["rs"])
            .with_keywords(&[
                "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else",
                "enum", "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop",
                "match", "mod", "move", "mut", "pub", "ref", "return", "self", "Self",
                "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
                "where", "while",
            ])
            .with_operators(C_FAMILY_OPERATORS)
            .with_brackets(CURLY_BRACKETS)
            .with_comments(CommentConfig::line_and_block("//", "/*", "*/"))
            .with_strings(&['"'], Some('\\'))
            .with_curly_bracket_indent(true)
    }

    /// JavaScript.
    pub fn javascript() -> Self {
        Self::new("JavaScript")
            .with_extensions(&["js", "mjs", "cjs"])
            .with_keywords(&[
                "break", "case", "catch", "class", "const", "continue", "debugger", "default",
                "delete", "do", "else", "export", "extends", "false", "finally", "for",
                "function", "if", "import", "in", "instanceof", "let", "new", "null",
                "return", "super", "switch", "this", "throw", "true", "try", "typeof",
                "undefined", "var", "void", "while", "with", "yield",
            ])
            .with_operators(C_FAMILY_OPERATORS)
            .with_brackets(CURLY_BRACKETS)
            .with_comments(CommentConfig::line_and_block("//", "/*", "*/"))
            .with_strings(&['"', '\'', '`'], Some('\\'))
            .with_annotation_prefix('@')
            .with_curly_bracket_indent(true)
    }

    /// Python. Line comments only, no curly-bracket indentation.
    pub fn python() -> Self {
        Self::new("Python")
            .with_extensions(&["py", "pyw"])
            .with_keywords(&[
                "False", "None", "True", "and", "as", "assert", "async", "await", "break",
                "class", "continue", "def", "del", "elif", "else", "except", "finally", "for",
                "from", "global", "if", "import", "in", "is", "lambda", "nonlocal", "not",
                "or", "pass", "raise", "return", "try", "while", "with", "yield",
            ])
            .with_operators(&[
                "**", "//", "==", "!=", "<=", ">=", "+", "-", "*", "/", "%", "=", "<", ">",
            ])
            .with_brackets(&['(', ')', '[', ']', '{', '}'])
            .with_comments(CommentConfig::line("#"))
            .with_strings(&['"', '\''], Some('\\'))
            .with_annotation_prefix('@')
    }
}

const CURLY_BRACKETS: &[char] = &['(', ')', '[', ']', '{', '}'];

const C_FAMILY_OPERATORS: &[&str] = &[
    "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+=", "-=", "*=", "/=", "->", "+", "-",
    "*", "/", "%", "=", "<", ">", "!", "&", "|", "^", "~", "?", ":",
];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// All built-in language descriptors.
pub fn builtin_languages() -> Vec<LanguageDescriptor> {
    vec![
        LanguageDescriptor::java(),
        LanguageDescriptor::c(),
        LanguageDescriptor::rust(),
        LanguageDescriptor::javascript(),
        LanguageDescriptor::python(),
    ]
}

/// Look up a built-in language by file extension (without the dot).
///
/// Returns `None` for unknown extensions, i.e. plain text.
pub fn language_for_extension(ext: &str) -> Option<LanguageDescriptor> {
    builtin_languages()
        .into_iter()
        .find(|lang| lang.matches_extension(ext))
}

/// Look up a built-in language from a file path's extension.
pub fn language_for_path(path: &Path) -> Option<LanguageDescriptor> {
    let ext = path.extension()?.to_str()?;
    language_for_extension(ext)
}
