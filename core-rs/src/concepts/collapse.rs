/**
 * collapse.rs
 * Reduces 0/1/N values for one key into absent/scalar/list form
 */

use serde::Serialize;

/// One value, or several in encounter order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Collapsed<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Collapsed<T> {
    pub fn len(&self) -> usize {
        match self {
            Collapsed::One(_) => 1,
            Collapsed::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The scalar value, if exactly one was collapsed
    pub fn as_one(&self) -> Option<&T> {
        match self {
            Collapsed::One(value) => Some(value),
            Collapsed::Many(_) => None,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Collapsed::One(value) => std::slice::from_ref(value).iter(),
            Collapsed::Many(values) => values.iter(),
        }
    }

    pub fn contains(&self, needle: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|value| value == needle)
    }
}

/// Collapse a value list: none → `None`, one → scalar, more → list
pub fn collapse<T>(mut values: Vec<T>) -> Option<Collapsed<T>> {
    match values.len() {
        0 => None,
        1 => values.pop().map(Collapsed::One),
        _ => Some(Collapsed::Many(values)),
    }
}
