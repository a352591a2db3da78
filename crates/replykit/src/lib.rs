//! # Replykit - Reply Generator
//!
//! The application layer around [`replykit_render`]: it finds templates,
//! gathers field values from the user and delivers the rendered reply.
//!
//! - [`store`]: the template collection, file-backed with built-in defaults
//! - [`input`]: building a [`Values`](replykit_render::Values) context from arguments and files
//! - [`output`]: stdout or a `.txt` file
//! - [`cli`]: the `replykit` command line
//!
//! ```rust
//! use replykit::input::ValuesBuilder;
//! use replykit::store::TemplateStore;
//! use replykit_render::{FixedClock, Renderer};
//!
//! let store = TemplateStore::builtin();
//! let template = store.get(0).unwrap();
//! let values = ValuesBuilder::new().set("req_number", "1842").build();
//!
//! let at = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(15, 0, 0).unwrap();
//! let reply = Renderer::new(FixedClock::new(at)).compose(template, &values);
//! assert!(reply.starts_with("Добрый день!\nПо заявке: 1842\n"));
//! ```

pub mod cli;
mod error;
pub mod input;
pub mod output;
pub mod store;

pub use error::{InputError, StoreError};
