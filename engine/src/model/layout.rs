//! Key order of a record as it appeared on disk.
//!
//! Typed records serialize in declaration order. A [`Layout`] captured at
//! load replays the file's own order at save, so a load followed by a save
//! leaves hand-arranged records alone.

use serde_yaml::{Mapping, Value};

/// The key order of one YAML node and, recursively, of its children.
///
/// Layout is presentation only: it never takes part in record equality.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    keys: Vec<(Value, Layout)>,
    items: Vec<Layout>,
}

impl PartialEq for Layout {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for Layout {}

impl Layout {
    /// Record the key order of `value` and everything below it.
    #[must_use]
    pub fn capture(value: &Value) -> Self {
        match value {
            Value::Mapping(map) => Self {
                keys: map.iter().map(|(k, v)| (k.clone(), Self::capture(v))).collect(),
                items: Vec::new(),
            },
            Value::Sequence(items) => Self {
                keys: Vec::new(),
                items: items.iter().map(Self::capture).collect(),
            },
            Value::Tagged(tagged) => Self::capture(&tagged.value),
            _ => Self::default(),
        }
    }

    /// Nothing was captured; [`Layout::apply`] is the identity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.items.is_empty()
    }

    /// Reorder `value` to follow the captured layout.
    ///
    /// Keys that were captured come first, in their captured order. Keys the
    /// layout has never seen follow in serialized order. Sequence items past
    /// the captured ones reuse the last captured item's layout, so an
    /// appended term is written like the terms before it.
    #[must_use]
    pub fn apply(&self, value: Value) -> Value {
        match value {
            Value::Mapping(mut map) if !self.keys.is_empty() => {
                let mut ordered = Mapping::with_capacity(map.len());
                for (key, child) in &self.keys {
                    if let Some(v) = map.shift_remove(key) {
                        ordered.insert(key.clone(), child.apply(v));
                    }
                }
                for (key, v) in map {
                    ordered.insert(key, v);
                }
                Value::Mapping(ordered)
            }
            Value::Sequence(items) if !self.items.is_empty() => Value::Sequence(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| match self.items.get(i).or_else(|| self.items.last()) {
                        Some(layout) => layout.apply(item),
                        None => item,
                    })
                    .collect(),
            ),
            other => other,
        }
    }
}
