//! Block rendering.
//!
//! [`Renderer`] turns one [`Block`] and a [`Values`] context into text. Each
//! variant produces its raw content, composite variants recurse into their
//! children, and the block's own [`Flags`](crate::Flags) wrap the result.
//!
//! ## Variants
//!
//! | Variant | Raw content |
//! |---------|-------------|
//! | `StaticText` | `text` verbatim |
//! | `InputField` | the value of `name`, lists and objects as compact JSON |
//! | `ConditionalInput` | `prefix` + value of `name`; when absent, nothing at all (no flags) |
//! | `Greeting` | a phrase picked by the clock's hour |
//! | `DateTime` | the clock's time through a strftime pattern |
//! | `Separator` | `char` repeated `repeat` times, up to [`RenderOptions::max_separator_len`] bytes |
//! | `Choice` | the `choices` entry selected by the value of `name` |
//! | `Toggle` | children, only while the value of `name` is present |
//! | `Repeater` | children once per list element, each in its own scope |
//! | `Table` | a Markdown table over a list of objects |
//! | `Unknown` | nothing |
//!
//! Rendering is fail-soft: nothing a template or context contains makes
//! it fail. The exceptions are the limits in [`RenderOptions`], which
//! are errors in strict mode.
//!
//! ## Scopes
//!
//! `Toggle` children see the same context as the toggle. `Repeater`
//! children see one element at a time: an object element is the child
//! context itself, any other element is exposed as `value`.
//!
//! ```rust
//! use replykit_render::{Block, Flag, Renderer, SystemClock, Values};
//! use serde_json::json;
//!
//! let block = Block::repeater(
//!     "items",
//!     vec![
//!         Block::static_text("• "),
//!         Block::input("value").with_flag(Flag::NewlineAfter),
//!     ],
//! );
//! let values: Values = serde_json::from_value(json!({"items": ["a", "b"]})).unwrap();
//!
//! let renderer = Renderer::new(SystemClock);
//! assert_eq!(renderer.render_block(&block, &values), "• a\n• b\n");
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::{trace, warn};

use crate::block::{Block, BlockKind};
use crate::clock::{greeting, Clock, SystemClock};
use crate::error::{RenderError, Result};
use crate::flags;
use crate::values::{is_present, is_truthy, lookup_key, stringify, Values};

/// Default for [`RenderOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default for [`RenderOptions::max_separator_len`].
pub const DEFAULT_MAX_SEPARATOR_LEN: usize = 64 * 1024;

/// Configuration for a [`Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Deepest block nesting level that is rendered. Root blocks are level
    /// 0, their children level 1, and so on; a block at level `max_depth`
    /// or below is cut off.
    pub max_depth: usize,
    /// Longest `Separator` output, in bytes.
    pub max_separator_len: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_separator_len: DEFAULT_MAX_SEPARATOR_LEN,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_separator_len(mut self, max_separator_len: usize) -> Self {
        self.max_separator_len = max_separator_len;
        self
    }
}

/// What happens when a render runs into one of the [`RenderOptions`] limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LimitPolicy {
    /// Drop the offending output, log a warning and keep going.
    Truncate,
    /// Abort with a [`RenderError`].
    Fail,
}

/// Renders blocks and templates against a clock.
///
/// A renderer holds no per-render state; one instance can serve any number
/// of renders, concurrently if its clock allows.
#[derive(Debug, Clone)]
pub struct Renderer<C = SystemClock> {
    clock: C,
    options: RenderOptions,
}

impl Default for Renderer<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> Renderer<C> {
    /// Creates a renderer with default options.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Renders one block, flags applied.
    ///
    /// Subtrees nested past `max_depth` are dropped.
    pub fn render_block(&self, block: &Block, values: &Values) -> String {
        // Truncation never produces an error.
        self.render_at(block, values, 0, LimitPolicy::Truncate)
            .unwrap_or_default()
    }

    /// Renders one block, failing if it runs past a [`RenderOptions`] limit.
    pub fn try_render_block(&self, block: &Block, values: &Values) -> Result<String> {
        self.render_at(block, values, 0, LimitPolicy::Fail)
    }

    pub(crate) fn render_at(
        &self,
        block: &Block,
        values: &Values,
        depth: usize,
        policy: LimitPolicy,
    ) -> Result<String> {
        if depth >= self.options.max_depth {
            let limit = self.options.max_depth;
            return match policy {
                LimitPolicy::Fail => Err(RenderError::DepthExceeded { limit }),
                LimitPolicy::Truncate => {
                    warn!(
                        limit,
                        kind = block.kind.type_name(),
                        "block nesting too deep, subtree dropped"
                    );
                    Ok(String::new())
                }
            };
        }

        trace!(kind = block.kind.type_name(), depth, "rendering block");
        let raw = match &block.kind {
            BlockKind::StaticText { text } => text.clone(),
            BlockKind::InputField { name, .. } => match values.get(name) {
                Some(value @ (Value::Array(_) | Value::Object(_))) => stringify(value),
                // Falsy scalars (`false`, `0`) render as empty, like unset fields.
                Some(value) if is_truthy(value) => stringify(value),
                _ => String::new(),
            },
            BlockKind::ConditionalInput { name, prefix, .. } => match values.get(name) {
                Some(value) if is_present(Some(value)) => {
                    let mut out = prefix.clone();
                    out.push_str(&stringify(value));
                    out
                }
                // Hidden entirely: flags are not applied either.
                _ => return Ok(String::new()),
            },
            BlockKind::Greeting => greeting(&self.clock).to_string(),
            BlockKind::DateTime { format } => format_timestamp(self.clock.now(), format),
            BlockKind::Separator { character, repeat } => {
                let limit = self.options.max_separator_len;
                match separator(character, *repeat, limit) {
                    Some(line) => line,
                    None => match policy {
                        LimitPolicy::Fail => {
                            return Err(RenderError::SeparatorTooLong {
                                repeat: *repeat,
                                limit,
                            })
                        }
                        LimitPolicy::Truncate => {
                            warn!(repeat = *repeat, limit, "separator too long, rendered as empty");
                            String::new()
                        }
                    },
                }
            }
            BlockKind::Choice { name, choices } => choose(choices, values.get(name)),
            BlockKind::Toggle { name, children } => {
                if is_present(values.get(name)) {
                    self.render_children(children, values, depth + 1, policy)?
                } else {
                    String::new()
                }
            }
            BlockKind::Repeater { name, children } => match values.get(name) {
                Some(Value::Array(items)) => {
                    let mut out = String::new();
                    for item in items {
                        let scope = item_scope(item);
                        out.push_str(&self.render_children(children, &scope, depth + 1, policy)?);
                    }
                    out
                }
                _ => String::new(),
            },
            BlockKind::Table { name, headers } => markdown_table(headers, values.get(name)),
            BlockKind::Unknown => {
                trace!("unrecognized block type rendered as empty");
                String::new()
            }
        };

        Ok(flags::format(&raw, &block.flags))
    }

    pub(crate) fn render_children(
        &self,
        children: &[Block],
        values: &Values,
        depth: usize,
        policy: LimitPolicy,
    ) -> Result<String> {
        let mut out = String::new();
        for child in children {
            out.push_str(&self.render_at(child, values, depth, policy)?);
        }
        Ok(out)
    }
}

/// Renders one block against `clock` with default options.
pub fn render_block(block: &Block, values: &Values, clock: &dyn Clock) -> String {
    Renderer::new(clock).render_block(block, values)
}

/// The context a `Repeater` child sees for one element.
fn item_scope(item: &Value) -> Cow<'_, Values> {
    match item {
        Value::Object(map) => Cow::Borrowed(map),
        other => {
            let mut scope = Values::new();
            scope.insert("value".to_string(), other.clone());
            Cow::Owned(scope)
        }
    }
}

/// `character` repeated `repeat` times, or `None` past `limit` bytes.
///
/// Negative counts repeat zero times.
fn separator(character: &str, repeat: i64, limit: usize) -> Option<String> {
    let count = usize::try_from(repeat).unwrap_or(0);
    if character.is_empty() || count == 0 {
        return Some(String::new());
    }
    match character.len().checked_mul(count) {
        Some(len) if len <= limit => Some(character.repeat(count)),
        _ => None,
    }
}

fn choose(choices: &BTreeMap<String, String>, selected: Option<&Value>) -> String {
    selected
        .and_then(lookup_key)
        .and_then(|key| choices.get(&key))
        .cloned()
        .unwrap_or_default()
}

/// Formats `now` with a strftime pattern. An invalid pattern yields "".
fn format_timestamp(now: NaiveDateTime, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", now.format(pattern)).is_err() {
        warn!(pattern, "invalid date/time pattern");
        return String::new();
    }
    out
}

/// Builds `|h1|h2|` / `|---|---|` / one `|c1|c2|` line per row.
///
/// Rows that are not objects render as empty cells.
fn markdown_table(headers: &[String], rows: Option<&Value>) -> String {
    if headers.is_empty() {
        return String::new();
    }

    let mut md = String::new();
    push_row(&mut md, headers.iter().map(String::as_str));
    push_row(&mut md, headers.iter().map(|_| "---"));

    if let Some(Value::Array(rows)) = rows {
        for row in rows {
            let cells: Vec<String> = headers
                .iter()
                .map(|header| match row {
                    Value::Object(map) => map.get(header).map(stringify).unwrap_or_default(),
                    _ => String::new(),
                })
                .collect();
            push_row(&mut md, cells.iter().map(String::as_str));
        }
    }

    md.truncate(md.trim_end().len());
    md
}

fn push_row<'a>(md: &mut String, cells: impl Iterator<Item = &'a str>) {
    md.push('|');
    for cell in cells {
        md.push_str(cell);
        md.push('|');
    }
    md.push('\n');
}
