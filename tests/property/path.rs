use kubeyaml::primitives::resolve_path;
use kubeyaml::{Path, Value};
use proptest::prelude::*;

fn arb_segment() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9]{0,8}"
}

/// Nest `leaf` under `segments`, outermost first.
fn nest(segments: &[String], leaf: Value) -> Value {
    segments.iter().rev().fold(leaf, |inner, segment| {
        Value::Mapping(vec![(Value::from(segment.as_str()), inner)])
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // Extending a path never changes the path it was extended from.
    #[test]
    fn child_leaves_parent_untouched(
        base in prop::collection::vec(arb_segment(), 0..5),
        a in arb_segment(),
        b in arb_segment(),
    ) {
        let parent: Path = base.iter().cloned().collect();
        let before = parent.to_string();
        let left = parent.child(a.clone());
        let right = parent.child(b.clone());

        prop_assert_eq!(parent.to_string(), before);
        prop_assert_eq!(left.len(), parent.len() + 1);
        prop_assert_eq!(left.segments().last(), Some(&a));
        prop_assert_eq!(right.segments().last(), Some(&b));
    }

    // Display then parse gives back the same path.
    #[test]
    fn display_parses_back(segments in prop::collection::vec(arb_segment(), 1..6)) {
        let path: Path = segments.iter().cloned().collect();
        prop_assert_eq!(Path::from(path.to_string().as_str()), path);
    }

    // A path built while nesting a value finds that value again.
    #[test]
    fn resolve_path_finds_nested_leaf(
        segments in prop::collection::vec(arb_segment(), 0..6),
        leaf in any::<i64>(),
    ) {
        let doc = nest(&segments, Value::Int(leaf));
        let path: Path = segments.iter().cloned().collect();
        prop_assert_eq!(resolve_path(&path, &doc), Some(&Value::Int(leaf)));
    }

    // Sequence indices resolve like keys.
    #[test]
    fn resolve_path_indexes_sequences(items in prop::collection::vec(any::<i64>(), 1..10), pick in any::<prop::sample::Index>()) {
        let i = pick.index(items.len());
        let doc = Value::Sequence(items.iter().copied().map(Value::Int).collect());
        let path = Path::root().index(i);
        prop_assert_eq!(resolve_path(&path, &doc), Some(&Value::Int(items[i])));
        prop_assert_eq!(resolve_path(&Path::root().index(items.len()), &doc), None);
    }
}
