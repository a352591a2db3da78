//! Property-based tests for flag formatting and composition.

use chrono::NaiveDate;
use proptest::prelude::*;
use replykit_render::{format, Block, FixedClock, Flag, Flags, Renderer, Template, Values};
use serde_json::json;

// ============================================================================
// Strategies
// ============================================================================

fn flag_strategy() -> impl Strategy<Value = Flag> {
    prop::sample::select(Flag::ALL.to_vec())
}

fn flags_strategy() -> impl Strategy<Value = Flags> {
    prop::collection::vec(flag_strategy(), 0..5).prop_map(Flags::from_iter)
}

fn renderer() -> Renderer<FixedClock> {
    Renderer::new(FixedClock::new(
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
    ))
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Static text renders exactly as the formatter would format it.
    #[test]
    fn static_text_equals_formatted_text(text in ".{0,40}", flags in flags_strategy()) {
        let block = Block::static_text(text.clone()).with_flags(flags.clone());
        prop_assert_eq!(renderer().render_block(&block, &Values::new()), format(&text, &flags));
    }

    /// Without case flags the text sits untouched between prefix and suffix.
    #[test]
    fn padding_never_alters_the_body(text in "[a-zA-Zа-яА-Я ]{0,30}", pad in prop::collection::vec(
        prop::sample::select(vec![Flag::Newline, Flag::SpaceBefore, Flag::NewlineAfter, Flag::SpaceAfter]),
        0..4,
    )) {
        let flags = Flags::from_iter(pad);
        let out = format(&text, &flags);
        prop_assert!(out.contains(&text));
        prop_assert!(out.len() <= text.len() + 2);
    }

    /// Absent conditional inputs render nothing, whatever the prefix or flags.
    #[test]
    fn absent_conditional_is_empty(
        prefix in ".{0,10}",
        flags in flags_strategy(),
        value in prop::sample::select(vec![json!(null), json!(""), json!([]), json!(false)]),
    ) {
        let block = Block::conditional("x", prefix).with_flags(flags);
        let mut values = Values::new();
        values.insert("x".into(), value);
        prop_assert_eq!(renderer().render_block(&block, &values), "");
    }

    /// A repeater is the ordered concatenation of its per-element renders.
    #[test]
    fn repeater_concatenates_in_order(items in prop::collection::vec("[a-z0-9]{0,6}", 0..8)) {
        let block = Block::repeater("items", vec![Block::input("value"), Block::static_text(",")]);
        let mut values = Values::new();
        values.insert("items".into(), json!(items));

        let expected: String = items.iter().map(|item| format!("{item},")).collect();
        prop_assert_eq!(renderer().render_block(&block, &values), expected);
    }

    /// The composed document never starts or ends with whitespace.
    #[test]
    fn document_edges_are_trimmed(parts in prop::collection::vec(("[ a-z]{0,8}", flags_strategy()), 0..6)) {
        let template = parts.into_iter().fold(Template::new("p"), |tpl, (text, flags)| {
            tpl.with_block(Block::static_text(text).with_flags(flags))
        });
        let doc = renderer().compose(&template, &Values::new());
        prop_assert_eq!(doc.trim(), doc.as_str());
    }

    /// A table without rows is exactly its header and separator lines.
    #[test]
    fn table_without_rows(headers in prop::collection::vec("[A-Z][a-z]{0,5}", 1..5)) {
        let block = Block::table("rows", headers.clone());
        let expected = format!(
            "|{}|\n|{}|",
            headers.join("|"),
            vec!["---"; headers.len()].join("|")
        );
        prop_assert_eq!(renderer().render_block(&block, &Values::new()), expected);
    }
}
