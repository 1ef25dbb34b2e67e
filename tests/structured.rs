use rustc_hash::FxHashMap;
use selecta::{
    ConfigError, InputFn, SelectorCreator, create_selector, create_structured_selector,
    create_structured_selector_with,
};

#[derive(Debug, Clone, PartialEq)]
struct State {
    width: u64,
    height: u64,
}

fn dimensions() -> Vec<(&'static str, InputFn<State, u64>)> {
    vec![
        ("width", Box::new(|state: &State| state.width) as InputFn<State, u64>),
        ("height", Box::new(|state: &State| state.height) as InputFn<State, u64>),
    ]
}

fn map(pairs: &[(&str, u64)]) -> FxHashMap<String, u64> {
    pairs.iter().map(|&(k, v)| (k.to_owned(), v)).collect()
}

#[test]
fn test_keyed_result_shape() {
    let shape = create_structured_selector(dimensions()).unwrap();
    let state = State { width: 20, height: 40 };

    assert_eq!(shape.call(&state), map(&[("width", 20), ("height", 40)]));
    assert_eq!(shape.call(&state), map(&[("width", 20), ("height", 40)]));
    assert_eq!(shape.recomputations(), 1);

    assert_eq!(
        shape.call(&State { width: 20, height: 70 }),
        map(&[("width", 20), ("height", 70)]),
    );
    assert_eq!(shape.recomputations(), 2);
}

#[test]
fn test_empty_mapping_is_rejected() {
    let result = create_structured_selector(Vec::<(&str, InputFn<State, u64>)>::new());
    assert_eq!(result.err(), Some(ConfigError::EmptyMapping));
}

#[test]
fn test_duplicate_keys_are_rejected() {
    let mut mapping = dimensions();
    mapping.push(("width", Box::new(|state: &State| state.width * 2)));

    let result = create_structured_selector(mapping);
    assert_eq!(result.err(), Some(ConfigError::DuplicateKey("width".into())));
}

#[test]
fn test_selectors_as_mapping_values() {
    let area = create_selector(
        vec![
            Box::new(|state: &State| state.width) as InputFn<State, u64>,
            Box::new(|state: &State| state.height) as InputFn<State, u64>,
        ],
        |values: &[u64]| values[0] * values[1],
    )
    .unwrap();

    let mut mapping = dimensions();
    mapping.push(("area", area.into_input()));

    let shape = create_structured_selector(mapping).unwrap();
    assert_eq!(
        shape.call(&State { width: 20, height: 40 }),
        map(&[("width", 20), ("height", 40), ("area", 800)]),
    );
}

#[test]
fn test_custom_creator_widens_the_cache() {
    let narrow = create_structured_selector(dimensions()).unwrap();
    let wide = create_structured_selector_with(
        &SelectorCreator::bounded(2).unwrap(),
        dimensions(),
    )
    .unwrap();

    let small = State { width: 1, height: 2 };
    let large = State { width: 30, height: 40 };
    for _ in 0..2 {
        narrow.call(&small);
        narrow.call(&large);
        wide.call(&small);
        wide.call(&large);
    }

    // One slot thrashes on alternating states; two slots retain both.
    assert_eq!(narrow.recomputations(), 4);
    assert_eq!(wide.recomputations(), 2);
}
