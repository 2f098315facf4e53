//! Semantic span metadata for rendered content.
//!
//! This module defines the vocabulary shared by the markdown pipeline, the
//! recolorer, and hosts: [`StyleTag`] classifies what a run of text *is*,
//! [`FontClass`] says which configured font it uses, and [`CodeBlockId`]
//! names an extracted code block independently of its position.
//!
//! # Examples
//!
//! ```
//! use chatmark::ui::span::{CodeBlockId, StyleTag};
//!
//! let tag = StyleTag::link("https://example.com");
//! assert_eq!(tag.link_meta().map(|meta| meta.href()), Some("https://example.com"));
//! assert_eq!(CodeBlockId::new(3).get(), 3);
//! ```

use std::fmt;
use std::sync::Arc;

/// Stable identifier of a code block within one rendered document. Assigned
/// monotonically from zero in source order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodeBlockId(usize);

impl CodeBlockId {
    #[inline]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    #[inline]
    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for CodeBlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a run of text is, independent of how it is colored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleTag {
    Plain,
    Bold,
    Italic,
    InlineCode,
    Link(LinkMeta),
}

impl StyleTag {
    #[inline]
    pub fn link(href: impl Into<String>) -> Self {
        StyleTag::Link(LinkMeta::new(href))
    }

    #[inline]
    pub fn is_link(&self) -> bool {
        matches!(self, StyleTag::Link(_))
    }

    #[inline]
    pub fn link_meta(&self) -> Option<&LinkMeta> {
        match self {
            StyleTag::Link(meta) => Some(meta),
            _ => None,
        }
    }

    #[inline]
    pub fn is_code(&self) -> bool {
        matches!(self, StyleTag::InlineCode)
    }

    /// Font class a run with this tag is laid out in.
    #[inline]
    pub fn font_class(&self) -> FontClass {
        if self.is_code() {
            FontClass::Monospace
        } else {
            FontClass::Proportional
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontClass {
    Proportional,
    Monospace,
}

/// Emphasis inherited from every enclosing marker, including the run's own.
/// `**a *b* c**` yields `b` tagged [`StyleTag::Italic`] with both flags set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Emphasis {
    pub bold: bool,
    pub italic: bool,
}

impl Emphasis {
    pub(crate) fn with_bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub(crate) fn with_italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinkMeta {
    href: Arc<str>,
}

impl LinkMeta {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Arc::<str>::from(href.into()),
        }
    }

    pub fn href(&self) -> &str {
        &self.href
    }
}
