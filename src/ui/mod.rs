//! Presentation layer for rendered chat messages.
//!
//! Key submodules include:
//! - [`markdown`]: tokenizing, inline formatting and document assembly, plus
//!   the per-message code block registry.
//! - [`recolor`] and [`theme`]: color and font policy, applied to an existing
//!   document without reparsing.
//! - [`overlay`]: maps code block anchors to host rectangles.
//! - [`layout`] and [`span`]: the terminal text surface and the run style
//!   vocabulary shared by everything above.
//!
//! Ownership boundary: this layer turns message text into styled output, while
//! [`crate::core`] owns messages, settings and errors.

pub mod layout;
pub mod markdown;
pub(crate) mod markdown_wrap;
pub mod overlay;
pub mod recolor;
pub mod span;
pub mod theme;
