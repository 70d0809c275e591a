//! Grid controller integration tests.

mod support;
mod races;
mod properties;
