//! Property tests for the coercion invariants.

use proptest::prelude::*;

use tamed::text::{self, DEFAULT_TRIM, ReduceFlags};
use tamed::{RoundingMode, Value, Variable, scalar};

fn resolved(v: Variable) -> Value {
    v.resolve().unwrap()
}

fn entries() -> impl Strategy<Value = Value> {
    let list = proptest::collection::vec("[a-z0-9 ,.<&-]{0,8}", 0..8).prop_map(Value::list);
    let map = proptest::collection::vec(("[a-z]{1,4}", "[a-z0-9 ,.-]{0,8}"), 0..8).prop_map(Value::map);
    prop_oneof![list, map]
}

proptest! {
    #[test]
    fn integer_coercion_is_idempotent(s in "\\PC{0,12}", default in -5i64..5) {
        let once = resolved(Variable::with_default(s.as_str(), default).to_integer(false));
        let twice = resolved(Variable::with_default(once.clone(), default).to_integer(false));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn trim_is_idempotent(s in "[ \\t\\n\\r\\x00\\x0Ba-z]{0,16}") {
        let once = text::trim(&s, DEFAULT_TRIM);
        prop_assert_eq!(text::trim(&once, DEFAULT_TRIM), once);
    }

    #[test]
    fn crop_is_idempotent(s in "[ a-zé\\t]{0,24}", n in 0usize..20) {
        let once = text::crop(&s, n);
        prop_assert!(once.chars().count() <= n);
        prop_assert_eq!(text::crop(&once, n), once);
    }

    #[test]
    fn clamp_min_is_bound_or_default(s in "-?[0-9]{1,4}|[a-z]{1,3}", min in -100i64..100, default in -100i64..100) {
        let out = scalar::at_least(&Value::from(s.as_str()), min, default);
        prop_assert!(out >= min || out == default);
    }

    #[test]
    fn clamp_max_is_bound_or_default(s in "-?[0-9]{1,4}|[a-z]{1,3}", max in -100i64..100, default in -100i64..100) {
        let out = scalar::at_most(&Value::from(s.as_str()), max, default);
        prop_assert!(out <= max || out == default);
    }

    #[test]
    fn entity_encoding_round_trips(s in "\\PC{0,24}") {
        prop_assert_eq!(text::html_decode(&text::html_encode(&s)), s);
    }

    #[test]
    fn smart_reduce_ends_on_a_word_boundary(words in proptest::collection::vec("[a-z]{1,8}", 1..8), n in 4usize..40) {
        let text = words.join(" ");
        // a first word longer than the room left by the ending is cut mid-word
        prop_assume!(words[0].len() <= n - 3);

        let out = text::reduce(&text, n, "...", ReduceFlags::SMART);
        if out != text {
            let body = out.strip_suffix("...").unwrap();
            prop_assert!(text.starts_with(body));
            prop_assert!(text[body.len()..].starts_with(' '));
        }
    }

    #[test]
    fn hard_reduce_respects_length(s in "[a-z ]{0,30}", n in 0usize..20) {
        let out = text::reduce(&s, n, "", ReduceFlags::empty());
        prop_assert!(out.chars().count() <= n);
    }

    #[test]
    fn pipeline_steps_preserve_keys(raw in entries()) {
        let before: Vec<_> = raw.as_map().unwrap().keys().cloned().collect();
        let steps: Vec<Variable> = vec![
            Variable::new(raw.clone()).trim(),
            Variable::new(raw.clone()).to_integer(false),
            Variable::new(raw.clone()).to_float(2, RoundingMode::Upward),
            Variable::new(raw.clone()).to_bool(false),
            Variable::new(raw.clone()).clamp_min(1),
            Variable::new(raw.clone()).toggle(0, 1),
            Variable::new(raw.clone()).upper().html_encode(),
            Variable::new(raw.clone()).to_text(),
            Variable::new(raw.clone()).validate_tag_list(),
        ];
        for v in steps {
            let out = resolved(v);
            let after: Vec<_> = out.as_map().unwrap().keys().cloned().collect();
            prop_assert_eq!(after, before.clone());
        }
    }
}
