use crate::error::SchemaError;
use crate::types::{FieldSlot, FieldType, SlotIter};
use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use smol_str::SmolStr;
use std::fmt;

// ─── TupleSchema ────────────────────────────────────────────────────────────

/// The layout of one fixed-size tuple: an ordered, immutable sequence of
/// [`FieldSlot`]s indexed `0..field_count()`.
///
/// A schema always describes at least one field and never changes after
/// construction, so instances can be shared freely across concurrent
/// readers. Byte size and the name index are computed once up front; both
/// are pure functions of the slots.
#[derive(Debug, Clone)]
pub struct TupleSchema<T> {
    slots: Vec<FieldSlot<T>>,
    /// First-occurrence name index. When names repeat, the lowest slot
    /// index wins.
    by_name: FxHashMap<SmolStr, usize>,
    byte_size: usize,
}

// ─── Construction ───────────────────────────────────────────────────────────

impl<T: FieldType> TupleSchema<T> {
    /// Build a schema pairing `types[i]` with `names[i]`.
    ///
    /// The two lists must have equal length; names may be `None`
    /// (anonymous field) and need not be unique.
    pub fn from_types_and_names<N>(
        types: Vec<T>,
        names: Vec<Option<N>>,
    ) -> Result<Self, SchemaError>
    where
        N: Into<SmolStr>,
    {
        if types.len() != names.len() {
            return Err(SchemaError::LengthMismatch {
                types: types.len(),
                names: names.len(),
            });
        }
        Self::from_slots(
            types
                .into_iter()
                .zip(names)
                .map(|(ty, name)| FieldSlot {
                    ty,
                    name: name.map(Into::into),
                })
                .collect(),
        )
    }

    /// Build an anonymous schema: every slot keeps its type, none has a
    /// name.
    pub fn from_types(types: Vec<T>) -> Result<Self, SchemaError> {
        Self::from_slots(types.into_iter().map(FieldSlot::anonymous).collect())
    }

    /// Build from pre-paired slots.
    pub fn from_slots(slots: Vec<FieldSlot<T>>) -> Result<Self, SchemaError> {
        if slots.is_empty() {
            return Err(SchemaError::InvalidSchema);
        }
        Ok(Self::assemble(slots))
    }

    /// Callers must have checked that `slots` is non-empty.
    fn assemble(slots: Vec<FieldSlot<T>>) -> Self {
        let byte_size = slots.iter().map(|slot| slot.ty.byte_len()).sum();
        let mut by_name = FxHashMap::default();
        for (i, slot) in slots.iter().enumerate() {
            if let Some(name) = &slot.name {
                // first occurrence wins
                by_name.entry(name.clone()).or_insert(i);
            }
        }
        Self {
            slots,
            by_name,
            byte_size,
        }
    }

    /// Concatenate two schemas: all of `a`'s slots in order, then all of
    /// `b`'s. Neither input is touched.
    pub fn merge(a: &Self, b: &Self) -> Self
    where
        T: Clone,
    {
        let mut slots = Vec::with_capacity(a.slots.len() + b.slots.len());
        slots.extend_from_slice(&a.slots);
        slots.extend_from_slice(&b.slots);
        // Both inputs hold at least one slot, so the result does too.
        Self::assemble(slots)
    }
}

// ─── Queries ────────────────────────────────────────────────────────────────

impl<T> TupleSchema<T> {
    #[inline]
    pub fn field_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot at position `i`.
    #[inline]
    pub fn slot(&self, i: usize) -> Result<&FieldSlot<T>, SchemaError> {
        self.slots.get(i).ok_or(SchemaError::IndexOutOfRange {
            index: i,
            len: self.slots.len(),
        })
    }

    /// Name at position `i`; `None` for an anonymous slot.
    #[inline]
    pub fn field_name(&self, i: usize) -> Result<Option<&str>, SchemaError> {
        Ok(self.slot(i)?.name.as_deref())
    }

    /// Type at position `i`.
    #[inline]
    pub fn field_type(&self, i: usize) -> Result<&T, SchemaError> {
        Ok(&self.slot(i)?.ty)
    }

    /// Index of the first slot whose name equals `name` exactly
    /// (case-sensitive, no normalization). Anonymous slots never match.
    pub fn index_of(&self, name: &str) -> Result<usize, SchemaError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or(SchemaError::FieldNotFound)
    }

    /// Total byte size of a tuple with this layout: the sum of every
    /// slot type's byte width, fixed for the schema's lifetime.
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    /// Schemas do not hash by value; this always fails with
    /// [`SchemaError::UnsupportedOperation`]. [`std::hash::Hash`] is not
    /// implemented either, so a schema cannot silently end up as a
    /// hash-map key — callers that need one must supply a hash consistent
    /// with `==`.
    pub fn hash_value(&self) -> Result<u64, SchemaError> {
        Err(SchemaError::UnsupportedOperation)
    }

    /// Iterate over all slots in index order. Every call starts a fresh
    /// pass at index 0.
    #[inline]
    pub fn iter(&self) -> SlotIter<'_, T> {
        SlotIter {
            slots: &self.slots,
            pos: 0,
        }
    }
}

impl<'a, T> IntoIterator for &'a TupleSchema<T> {
    type Item = &'a FieldSlot<T>;
    type IntoIter = SlotIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ─── Equality ───────────────────────────────────────────────────────────────

/// Two schemas are equal iff they have the same field count and, at every
/// index, equal types **and** matching names (both absent, or both present
/// and string-equal).
impl<T: PartialEq> PartialEq for TupleSchema<T> {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.slots == other.slots
    }
}

impl<T: Eq> Eq for TupleSchema<T> {}

// ─── Rendering ──────────────────────────────────────────────────────────────

/// Diagnostic rendering: every slot as `type(name)`, concatenated with no
/// separator. Not a parseable format.
impl<T: fmt::Display> fmt::Display for TupleSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            write!(f, "{slot}")?;
        }
        Ok(())
    }
}

// ─── Serialize (diagnostics) ────────────────────────────────────────────────

/// Serializes as a sequence of slots. Export only — schemas are rebuilt
/// through the validating constructors, never deserialized.
impl<T: Serialize> Serialize for TupleSchema<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.slots.len()))?;
        for slot in &self.slots {
            seq.serialize_element(slot)?;
        }
        seq.end()
    }
}
