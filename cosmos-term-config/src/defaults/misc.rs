//! Generic boolean defaults.

pub fn bool_true() -> bool {
    true
}
