//! Property tests for ER7 escaping.

use hl7_er7::Delimiters;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Text biased towards delimiters, escape characters and line breaks.
fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => "[a-zA-Z0-9 .]{1,4}",
            1 => prop::sample::select(vec!["|", "^", "~", "\\", "&", "\r", "\n", "\\F\\", "\\X0D\\"])
                .prop_map(str::to_string),
        ],
        0..16,
    )
    .prop_map(|parts| parts.concat())
}

fn arb_delimiters() -> impl Strategy<Value = Delimiters> {
    prop::sample::select(vec![
        Delimiters::default(),
        Delimiters {
            field: '#',
            component: ':',
            repetition: '*',
            escape: '!',
            subcomponent: '@',
        },
    ])
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn escape_round_trips(text in arb_text(), delimiters in arb_delimiters()) {
        prop_assert_eq!(delimiters.unescape(&delimiters.escape(&text)), text);
    }

    #[test]
    fn escaped_text_has_no_structural_characters(text in arb_text(), delimiters in arb_delimiters()) {
        let escaped = delimiters.escape(&text);
        for forbidden in [
            delimiters.field,
            delimiters.component,
            delimiters.repetition,
            delimiters.subcomponent,
            '\r',
            '\n',
        ] {
            prop_assert!(!escaped.contains(forbidden), "{escaped:?} contains {forbidden:?}");
        }
    }

    #[test]
    fn plain_text_is_untouched(text in "[a-zA-Z0-9 .,-]{0,32}") {
        let delimiters = Delimiters::default();
        prop_assert_eq!(delimiters.escape(&text), text.clone());
        prop_assert_eq!(delimiters.unescape(&text), text);
    }
}
