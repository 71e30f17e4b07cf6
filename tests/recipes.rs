//! Integration tests for pipelines and named recipes.

use insta::assert_snapshot;

use tamed::text::{self, ReduceFlags};
use tamed::{
    Context, DecimalSeparator, Error, Options, Params, Recipe, RoundingMode, ShapeHint, Uniqueness, Value, Variable,
    coerce, coerce_with,
};

fn comma() -> Context {
    Context { decimal_separator: DecimalSeparator::Comma }
}

fn resolved(v: Variable) -> String {
    v.resolve().unwrap().to_string()
}

// --- Scenarios ---------------------------------------------------------------

#[test]
fn comma_decimal_without_dot_parses_as_fraction() {
    let v = Variable::with_default("12,5", 0.0).with_context(comma()).to_float(2, RoundingMode::Auto);
    assert_eq!(v.resolve(), Ok(Value::Float(12.5)));

    let shown = v.format_number(2, ".", "");
    assert_snapshot!(resolved(shown), @r#""12.50""#);
}

#[test]
fn smart_reduce_keeps_whole_words() {
    assert_snapshot!(text::reduce("one two three", 9, "...", ReduceFlags::SMART), @"one two...");

    let v = Variable::new("one two three").reduce(9, "...", ReduceFlags::SMART);
    assert_eq!(v.resolve(), Ok(Value::from("one two...")));
}

#[test]
fn id_list_drops_invalid_and_duplicate_ids() {
    let v = Variable::new("5, -1, abc, 5").validate_id_list(",", Uniqueness::Row);
    assert_eq!(v.resolve(), Ok(Value::from("5")));
}

#[test]
fn on_token_depends_on_strictness() {
    assert_eq!(Variable::with_default("on", 0).to_integer(false).resolve(), Ok(Value::Int(1)));
    assert_eq!(Variable::with_default("on", 0).to_integer(true).resolve(), Ok(Value::Int(0)));
}

#[test]
fn null_scalar_resolves_through_empty_substitute() {
    let v = Variable::with_default(Value::Null, "").empty_as("-");
    assert_eq!(v.shape(), ShapeHint::Scalar);
    assert_eq!(v.resolve(), Ok(Value::from("-")));
}

// --- Recipes -----------------------------------------------------------------

#[test]
fn numeric_recipes() {
    assert_eq!(coerce(" 42 ", "int"), Ok(Value::Int(42)));
    assert_eq!(coerce("12.7", "int"), Ok(Value::Int(12)));
    assert_eq!(coerce("-3", "uint"), Ok(Value::Int(0)));
    assert_eq!(coerce("2.675", "float"), Ok(Value::Float(2.675)));
    assert_eq!(coerce("-2.5", "ufloat"), Ok(Value::Float(0.0)));
    assert_eq!(coerce("yes", "bool"), Ok(Value::Bool(true)));
}

#[test]
fn text_recipes() {
    let v = Variable::new(" <b>Tom & Jerry</b> ").apply_recipe("text").unwrap();
    assert_snapshot!(resolved(v), @r#""&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;""#);
    assert_eq!(coerce("привет World", "upper"), Ok(Value::from("ПРИВЕТ WORLD")));
    assert_eq!(coerce("%D0%9F%D0%A0%D0%98 A+B", "lower"), Ok(Value::from("при a+b")));
    assert_eq!(coerce(7, "string"), Ok(Value::from("7")));
}

#[test]
fn tags_are_unique_across_the_collection() {
    let raw = Value::list([" a, b ,a", "b,c", ""]);
    let v = Variable::new(raw).apply_recipe(Recipe::Tags).unwrap();
    assert_snapshot!(resolved(v), @r#"["a,b", "c", ""]"#);
}

#[test]
fn id_list_recipe_filters_and_reindexes() {
    let raw = Value::list(["3", "x", "3", "-1", "7"]);
    let v = Variable::new(raw).apply_recipe("id_list").unwrap();
    assert!(v.data().is_list());
    assert_snapshot!(resolved(v), @"[3, 7]");
}

#[test]
fn id_recipe_is_scalar_only() {
    assert_eq!(coerce("0", "id"), Ok(Value::Int(0)));
    assert_eq!(Variable::with_default("0", 1).get_integer("id"), Ok(1));
    assert_eq!(Variable::new("12").get_integer("id"), Ok(12));

    let err = Variable::new(Value::list(["1"])).apply_recipe("id").unwrap_err();
    assert_eq!(err, Error::ScalarOnly { operation: "id" });
}

#[test]
fn price_and_cost_render_fixed_decimals() {
    assert_eq!(Variable::new("1 234,5").with_context(comma()).get_input("cost"), Ok("1234.50".into()));
    assert_eq!(Variable::new("19.999").get_input("cost_down"), Ok("19.99".into()));
    assert_eq!(Variable::new("19.001").get_input("cost_up"), Ok("19.01".into()));
    assert_eq!(Variable::new("abc").get_input("price"), Ok("0".into()));
}

#[test]
fn collection_recipes_keep_keys() {
    let raw = Value::map([("a", "1"), ("b", "x"), ("c", "-4")]);
    let out = Variable::with_default(raw, 9).get_array("int").unwrap();
    assert_eq!(Value::Map(out), Value::map([("a", 1), ("b", 9), ("c", -4)]));
}

#[test]
fn array_shape_is_locked_after_declaration() {
    let v = Variable::array("5", 0).unwrap();
    assert_eq!(v.shape(), ShapeHint::Array);
    assert_eq!(
        v.as_scalar().unwrap_err(),
        Error::ShapeLocked { declared: ShapeHint::Array, requested: ShapeHint::Scalar }
    );
}

#[test]
fn empty_array_resolves_to_wrapped_default() {
    let out = Variable::array("", 5).unwrap().get_array("int").unwrap();
    assert_eq!(Value::Map(out), Value::list([5]));
}

#[test]
fn resolve_keys_fill_missing_entries() {
    let raw = Value::map([("page", "2"), ("q", " shoes ")]);
    let v = Variable::with_default(raw, "").trim().empty_as("-");
    let picked = v.resolve_keys(["q", "sort"]).unwrap();
    assert_snapshot!(Value::Map(picked).to_string(), @r#"{q: "shoes", sort: "-"}"#);
}

#[test]
fn params_feed_containers() {
    let query: std::collections::HashMap<String, Value> =
        [("page".to_string(), Value::from("0")), ("limit".to_string(), Value::from("500"))].into_iter().collect();

    assert_eq!(query.input("page", 1).get_integer("page"), Ok(1));
    assert_eq!(query.input("limit", 20).trim().to_integer(false).clamp_max(100).resolve(), Ok(Value::Int(20)));
    assert_eq!(query.input("absent", Value::Null).get_input("string"), Ok(String::new()));
}

#[test]
fn configuration_errors_surface_immediately() {
    let opts = Options::default();
    let ctx = Context::default();
    assert!(matches!(coerce_with("5", -1, "uint", &ctx, &opts), Err(Error::NegativeDefault { .. })));
    assert!(matches!(coerce_with("5", 0, "page", &ctx, &opts), Err(Error::NonPositiveDefault { .. })));
    assert!(matches!(coerce_with("5", 1.5, "options", &ctx, &opts), Err(Error::DefaultType { .. })));
    assert!(matches!(coerce("5", "sideways"), Err(Error::UnknownRecipe { .. })));
}

#[test]
fn traced_recipe_lists_its_steps() {
    let v = Variable::new(" 12.345 ").traced().apply_recipe("cost").unwrap();
    let trace = v.trace().unwrap();
    assert_eq!(trace.operations(), vec!["crop", "to_non_negative_float", "format_number"]);
    // 1234.5 is a tie and rounds to even
    assert_snapshot!(trace.steps[2].snapshot.to_string(), @r#""12.34""#);
}
