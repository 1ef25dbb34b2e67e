//! Derived-value computation through bounded memoization.
//!
//! A [`Selector`] derives a value from some state: a set of input functions
//! extracts intermediate values, and a combiner folds them into the result.
//! The combiner only reruns when the extracted values actually changed; an
//! immediately repeated call with an equal state skips even the input
//! functions.
//!
//! At the core sits a fixed-capacity memoization cache ([`memoize`],
//! [`memoize_with`]) that retains a function's N most recent distinct
//! argument lists. Argument lists are compared positionally with a
//! caller-supplied equality (plain `==` by default); entries live in a ring
//! buffer, so steady-state hits never allocate, shift, or copy. Once the
//! cache is full, a new entry replaces the oldest one.
//!
//! ```
//! use selecta::{InputFn, create_selector};
//!
//! #[derive(Clone, PartialEq)]
//! struct Cart {
//!     prices: Vec<u64>,
//!     discount: u64,
//! }
//!
//! let inputs: Vec<InputFn<Cart, u64>> = vec![
//!     Box::new(|cart: &Cart| cart.prices.iter().sum()),
//!     Box::new(|cart: &Cart| cart.discount),
//! ];
//! let total = create_selector(inputs, |values: &[u64]| values[0] - values[1]).unwrap();
//!
//! let cart = Cart { prices: vec![300, 45], discount: 20 };
//! assert_eq!(total.call(&cart), 325);
//! assert_eq!(total.call(&cart), 325);
//! assert_eq!(total.recomputations(), 1);
//! ```

mod cache;
mod error;
mod memo;
mod selector;
mod structured;

pub use crate::error::ConfigError;
pub use crate::memo::{Memo, Memoized, default_equality, memoize, memoize_with};
pub use crate::selector::{
    CombinerFn, InputFn, MemoFactory, Selector, SelectorCreator, create_selector,
    create_selector_with_cache_size,
};
pub use crate::structured::{
    StructuredSelector, create_structured_selector, create_structured_selector_with,
};
