#![warn(missing_docs)]
//! Codepad Core - edit coordination for an embedded code editor
//!
//! # Overview
//!
//! `codepad-core` sits between a text buffer and a host UI. Every text change goes through one
//! [`EditCoordinator`], which keeps the derived state consistent with the buffer:
//!
//! - **Grouped undo/redo**: a linear, prunable history partitioned into units by breakpoints
//! - **Line index**: incremental line boundaries with gutter-friendly line count deltas
//! - **Incremental highlighting**: lexical styling of only the lines an edit touched
//! - **Curly-brace auto-indent**: indentation follow-ups for typed newlines and closing braces
//! - **Observer notifications**: changed/undoable/selection/cursor state, only when it changes
//!
//! Rendering, tokenization beyond simple lexical rules, and file management belong to the host.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditCoordinator (state machine)            │  ← Public API
//! ├──────────────┬──────────────┬───────────────┤
//! │  UndoEngine  │  Highlighter │  Indent       │  ← Follow-ups
//! ├──────────────┴──────────────┴───────────────┤
//! │  LineIndex                                  │  ← Line Access
//! ├─────────────────────────────────────────────┤
//! │  TextBuffer (Rope)                          │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use codepad_core::{EditCoordinator, LanguageDescriptor, STYLE_COMMENT};
//!
//! let mut editor = EditCoordinator::new();
//! editor.load_text("int x = 1;");
//! editor.set_language(Some(LanguageDescriptor::java()));
//!
//! editor.insert(10, " // done").unwrap();
//! assert_eq!(editor.style_at(12), Some(STYLE_COMMENT));
//! assert!(!editor.is_saved());
//!
//! editor.undo();
//! assert!(editor.is_saved());
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - text storage primitive
//! - [`edit`] - the unit of change
//! - [`line_index`] - line boundaries
//! - [`undo`] - grouped undo history
//! - [`indent`] - curly-brace auto-indentation
//! - [`highlight`] / [`spans`] - incremental lexical highlighting
//! - [`coordinator`] - the editing state machine
//! - [`observer`] - UI notifications
//! - [`settings`], [`line_ending`], [`file_io`] - preferences and file collaborators

pub mod buffer;
pub mod coordinator;
pub mod edit;
pub mod error;
pub mod file_io;
pub mod highlight;
pub mod indent;
pub mod line_ending;
pub mod line_index;
pub mod observer;
pub mod settings;
pub mod spans;
pub mod undo;

pub use buffer::{RopeBuffer, TextBuffer};
pub use codepad_lang::{CommentConfig, LanguageDescriptor, language_for_extension, language_for_path};
pub use coordinator::{CoordinatorState, EditCoordinator, EditTransaction, SuspendReason};
pub use edit::{Edit, EditKind};
pub use error::EditError;
pub use highlight::{HighlightPass, HighlightStats, IncrementalHighlighter};
pub use indent::IndentState;
pub use line_ending::LineEnding;
pub use line_index::{LineCountChange, LineIndex};
pub use observer::EditingStateObserver;
pub use settings::EditorSettings;
pub use spans::{
    HighlightSpan, STYLE_ANNOTATION, STYLE_BRACKET, STYLE_COMMENT, STYLE_KEYWORD, STYLE_OPERATOR,
    STYLE_STRING, SpanSet, StyleId, TokenStyle,
};
pub use undo::UndoEngine;
