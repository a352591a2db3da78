//! Document composition: a whole template to one text.

use tracing::debug;

use crate::clock::Clock;
use crate::error::Result;
use crate::renderer::{LimitPolicy, Renderer};
use crate::template::Template;
use crate::values::Values;

impl<C: Clock> Renderer<C> {
    /// Renders every root block of `template` against the same `values`,
    /// concatenates the results and trims the ends of the document.
    ///
    /// Whitespace inside the document, including line breaks produced by
    /// flags, is kept as is. Output past a [`RenderOptions`](crate::RenderOptions)
    /// limit is dropped.
    ///
    /// ```rust
    /// use replykit_render::{Block, Flag, Renderer, SystemClock, Template, Values};
    ///
    /// let template = Template::new("reply")
    ///     .with_block(Block::static_text("Hello").with_flag(Flag::NewlineAfter))
    ///     .with_block(Block::static_text("World").with_flag(Flag::NewlineAfter));
    ///
    /// let text = Renderer::new(SystemClock).compose(&template, &Values::new());
    /// assert_eq!(text, "Hello\nWorld");
    /// ```
    pub fn compose(&self, template: &Template, values: &Values) -> String {
        // Truncation never produces an error.
        self.compose_with(template, values, LimitPolicy::Truncate)
            .unwrap_or_default()
    }

    /// Like [`compose`](Self::compose), but running past a limit is an
    /// error instead of a silent cut.
    pub fn try_compose(&self, template: &Template, values: &Values) -> Result<String> {
        self.compose_with(template, values, LimitPolicy::Fail)
    }

    fn compose_with(
        &self,
        template: &Template,
        values: &Values,
        policy: LimitPolicy,
    ) -> Result<String> {
        debug!(
            template = %template.name,
            blocks = template.blocks.len(),
            "composing template"
        );
        let document = self.render_children(&template.blocks, values, 0, policy)?;
        Ok(document.trim().to_string())
    }
}

/// Composes `template` against `clock` with default options.
pub fn compose(template: &Template, values: &Values, clock: &dyn Clock) -> String {
    Renderer::new(clock).compose(template, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, BlockKind};
    use crate::clock::FixedClock;
    use crate::error::RenderError;
    use crate::flags::Flag;
    use crate::renderer::RenderOptions;
    use chrono::NaiveDate;
    use serde_json::json;

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 5, 17)
                .unwrap()
                .and_hms_opt(21, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_trims_only_document_edges() {
        let template = Template::new("t")
            .with_block(Block::static_text("one").with_flag(Flag::Newline))
            .with_block(Block::static_text("two").with_flag(Flag::Newline))
            .with_block(Block::static_text("  three  ").with_flag(Flag::NewlineAfter));

        let text = compose(&template, &Values::new(), &clock());
        assert_eq!(text, "one\ntwo\n  three");
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(compose(&Template::new("empty"), &Values::new(), &clock()), "");
    }

    #[test]
    fn test_unknown_block_leaves_blank_line() {
        let template = Template::new("t")
            .with_block(Block::static_text("a"))
            .with_block(Block::new(BlockKind::Unknown).with_flag(Flag::Newline))
            .with_block(Block::static_text("b").with_flag(Flag::Newline));

        assert_eq!(compose(&template, &Values::new(), &clock()), "a\n\nb");
    }

    #[test]
    fn test_shared_context_across_roots() {
        let template = Template::new("t")
            .with_block(Block::greeting().with_flag(Flag::NewlineAfter))
            .with_block(Block::input("name"))
            .with_block(Block::conditional("name", ", ").with_flag(Flag::SpaceBefore));
        let values: Values = serde_json::from_value(json!({"name": "Олег"})).unwrap();

        assert_eq!(
            compose(&template, &values, &clock()),
            "Добрый вечер!\nОлег , Олег"
        );
    }

    #[test]
    fn test_try_compose_reports_depth() {
        let template = Template::new("deep").with_block(Block::toggle(
            "on",
            vec![Block::toggle("on", vec![Block::static_text("x")])],
        ));
        let values: Values = serde_json::from_value(json!({"on": true})).unwrap();
        let renderer = Renderer::new(clock()).with_options(RenderOptions::new().with_max_depth(2));

        assert_eq!(renderer.compose(&template, &values), "");
        assert!(matches!(
            renderer.try_compose(&template, &values),
            Err(RenderError::DepthExceeded { limit: 2 })
        ));
        assert_eq!(
            Renderer::new(clock()).try_compose(&template, &values).unwrap(),
            "x"
        );
    }

    #[test]
    fn test_oversized_separator_from_json() {
        let template = Template::from_json(
            r#"{"blocks": [
                {"type": "StaticText", "text": "до"},
                {"type": "Separator", "char": "—", "repeat": 9223372036854775807},
                {"type": "StaticText", "text": "после", "flags": {"spaceBefore": true}}
            ]}"#,
        )
        .unwrap();
        let renderer = Renderer::new(clock());

        assert_eq!(renderer.compose(&template, &Values::new()), "до после");
        assert!(matches!(
            renderer.try_compose(&template, &Values::new()),
            Err(RenderError::SeparatorTooLong { .. })
        ));
    }
}
