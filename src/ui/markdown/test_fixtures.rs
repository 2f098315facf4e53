//! Test fixtures for code block extraction and anchor testing.
//!
//! Provides canonical messages covering edge cases for code block
//! extraction, anchor ordering and registry contents.

use crate::core::config::{FontDescriptor, RenderConfig};
use crate::core::message::Message;

/// Default light config used across markdown tests.
pub fn light_config() -> RenderConfig {
    RenderConfig::new(
        false,
        FontDescriptor::new("Monaco", 10.0).expect("valid monospace font"),
        FontDescriptor::new("Lucida Grande", 13.0).expect("valid proportional font"),
    )
}

pub fn dark_config() -> RenderConfig {
    light_config().with_dark_theme(true)
}

/// Test fixture: single code block in assistant message.
pub fn single_block() -> Message {
    Message::assistant("Here's a function:\n\n```rust\nfn main() {}\n```\n")
}

/// Test fixture: multiple code blocks with different languages.
///
/// Tests id assignment and language tracking across multiple blocks in a
/// single message.
pub fn multiple_blocks() -> Message {
    Message::assistant(concat!(
        "First, here's some Rust:\n\n",
        "```rust\nfn main() {\n    println!(\"Hello\");\n}\n```\n\n",
        "And some Python:\n\n",
        "```python\ndef greet():\n    print(\"Hello\")\n```\n\n",
        "Finally, plain text:\n\n",
        "```\nno language tag\n```\n"
    ))
}

/// Test fixture: code blocks across multiple messages.
///
/// Tests that ids are per-message, not global.
pub fn blocks_across_messages() -> Vec<Message> {
    vec![
        Message::user("Show me Rust code"),
        Message::assistant("```rust\nfn first() {}\n```"),
        Message::user("And Python?"),
        Message::assistant("```python\ndef second():\n    pass\n```"),
    ]
}

/// Test fixture: indented code fences between ordered list items.
pub fn nested_in_list() -> Message {
    Message::assistant(concat!(
        "1. First step\n\n",
        "   ```rust\n",
        "   fn step_one() {}\n",
        "   ```\n\n",
        "2. Second step\n\n",
        "   ```rust\n",
        "   fn step_two() {}\n",
        "   ```\n"
    ))
}

/// Test fixture: empty code block (edge case).
pub fn empty_block() -> Message {
    Message::assistant("Here's an empty block:\n\n```\n```\n\nDone.")
}

/// Test fixture: code block immediately adjacent to text (no blank lines).
pub fn adjacent_to_text() -> Message {
    Message::assistant("Before\n```js\nconsole.log(1);\n```\nAfter")
}

/// Test fixture: every inline style in one paragraph.
pub fn mixed_inline() -> Message {
    Message::user("Use `cargo` with **bold *and italic* text**, see [docs](https://doc.rust-lang.org).")
}
