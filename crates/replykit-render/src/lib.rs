//! # Replykit Render - Block-Based Reply Templates
//!
//! `replykit-render` turns a declarative tree of typed blocks plus a value
//! context into a flat text document. It is the engine behind the replykit
//! reply generator, and has no I/O of its own: templates and values come in,
//! text goes out.
//!
//! ## Core Concepts
//!
//! - [`Template`]: A named, versioned sequence of root blocks
//! - [`Block`] / [`BlockKind`]: One content node (static text, input field,
//!   conditional, greeting, date/time, separator, choice, toggle, repeater,
//!   table)
//! - [`Flags`]: Case and whitespace formatting around a block's text
//! - [`Values`]: The caller's field values, a JSON object
//! - [`Clock`]: The injected time source for greetings and timestamps
//! - [`Renderer`]: Renders blocks and composes templates
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use replykit_render::{values_from_json, FixedClock, Renderer, Template};
//!
//! let template = Template::from_json(r#"{
//!     "name": "Отказ",
//!     "blocks": [
//!         {"type": "Greeting", "flags": {"newlineAfter": true}},
//!         {"type": "ConditionalInput", "name": "req", "prefix": "По заявке: ",
//!          "flags": {"newlineAfter": true}},
//!         {"type": "StaticText", "text": "Документы отправлены повторно."}
//!     ]
//! }"#).unwrap();
//!
//! let values = values_from_json(r#"{"req": "1842"}"#).unwrap();
//! let at = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
//!
//! let text = Renderer::new(FixedClock::new(at)).compose(&template, &values);
//! assert_eq!(text, "Доброе утро!\nПо заявке: 1842\nДокументы отправлены повторно.");
//! ```
//!
//! ## Failure Model
//!
//! Rendering does not fail on partial input. Missing values render as
//! empty, unknown block types render as empty (their flags still apply),
//! and non-list values where a list is expected count as empty lists.
//! [`RenderError`] is reserved for parsing at the boundary and for the
//! strict limits of [`Renderer::try_compose`].

pub mod block;
pub mod clock;
mod compose;
mod error;
pub mod flags;
pub mod renderer;
pub mod template;
pub mod values;

pub use block::{Block, BlockKind};
pub use clock::{greeting_for_hour, Clock, FixedClock, SystemClock};
pub use compose::compose;
pub use error::{RenderError, Result};
pub use flags::{format, Flag, Flags};
pub use renderer::{
    render_block, RenderOptions, Renderer, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SEPARATOR_LEN,
};
pub use template::Template;
pub use values::{is_present, is_truthy, values_from_json, values_from_yaml, Values};
