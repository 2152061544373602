//! Sharded name interner.
//!
//! The table is shared by every phase that touches a tree for one
//! file-processing unit. Rewrite passes intern freshly synthesized
//! identifiers through [`NameTable::intern`]; everything else only looks
//! names up. Per-shard locking keeps concurrent lookups from parallel file
//! workers cheap.

use crate::NameRef;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Per-shard storage for interned strings.
struct Shard {
    /// Map from string content to local index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents.
    strings: Vec<&'static str>,
}

impl Shard {
    fn new() -> Self {
        Shard {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        }
    }

    fn with_empty() -> Self {
        let mut shard = Self::new();
        // Pre-intern the empty string at index 0.
        let empty: &'static str = "";
        shard.map.insert(empty, 0);
        shard.strings.push(empty);
        shard
    }
}

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// Shard exceeded its 28-bit local index space.
    #[error("name shard {shard_idx} exceeded capacity: {count} strings, max is {max}")]
    ShardOverflow {
        shard_idx: usize,
        count: usize,
        max: u32,
    },
}

/// Identifiers every rewrite pass and printer compares against.
///
/// Interned once at table construction so matching is a `NameRef` integer
/// comparison, never a string comparison.
#[derive(Copy, Clone, Debug)]
pub struct KnownNames {
    pub empty: NameRef,
    pub prop: NameRef,
    pub sig: NameRef,
    pub attr_reader: NameRef,
    pub attr_writer: NameRef,
    pub attr_accessor: NameRef,
    pub initialize: NameRef,
    /// `Struct` constant.
    pub struct_const: NameRef,
    /// `new` method.
    pub new_fn: NameRef,
    /// `type` keyword-argument key.
    pub type_key: NameRef,
    /// `!` negation method.
    pub bang: NameRef,
}

impl KnownNames {
    fn intern_all(table: &NameTable) -> Self {
        KnownNames {
            empty: table.intern(""),
            prop: table.intern("prop"),
            sig: table.intern("sig"),
            attr_reader: table.intern("attr_reader"),
            attr_writer: table.intern("attr_writer"),
            attr_accessor: table.intern("attr_accessor"),
            initialize: table.intern("initialize"),
            struct_const: table.intern("Struct"),
            new_fn: table.intern("new"),
            type_key: table.intern("type"),
            bang: table.intern("!"),
        }
    }
}

/// Sharded string interner for identifier names.
///
/// Provides O(1) lookup and equality comparison for interned strings. Uses
/// a `RwLock` per shard so readers on parallel workers do not contend.
pub struct NameTable {
    shards: [RwLock<Shard>; NameRef::NUM_SHARDS],
    /// Total count of interned strings across all shards.
    total_count: AtomicUsize,
    known: KnownNames,
}

impl NameTable {
    /// Create a table with the well-known identifiers pre-interned.
    pub fn new() -> Self {
        let shards = std::array::from_fn(|i| {
            if i == 0 {
                RwLock::new(Shard::with_empty())
            } else {
                RwLock::new(Shard::new())
            }
        });

        // Start with 1 for the empty string pre-interned in shard 0.
        let mut table = NameTable {
            shards,
            total_count: AtomicUsize::new(1),
            known: KnownNames {
                empty: NameRef::EMPTY,
                prop: NameRef::EMPTY,
                sig: NameRef::EMPTY,
                attr_reader: NameRef::EMPTY,
                attr_writer: NameRef::EMPTY,
                attr_accessor: NameRef::EMPTY,
                initialize: NameRef::EMPTY,
                struct_const: NameRef::EMPTY,
                new_fn: NameRef::EMPTY,
                type_key: NameRef::EMPTY,
                bang: NameRef::EMPTY,
            },
        };
        table.known = KnownNames::intern_all(&table);
        table
    }

    /// Well-known identifiers.
    #[inline]
    pub fn known(&self) -> &KnownNames {
        &self.known
    }

    /// Compute shard for a string based on its hash.
    #[inline]
    fn shard_for(s: &str) -> usize {
        let mut hash = 0u32;
        for byte in s.bytes().take(8) {
            hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
        }
        (hash as usize) % NameRef::NUM_SHARDS
    }

    /// Try to intern a string, returning its `NameRef` or an error on
    /// shard overflow.
    pub fn try_intern(&self, s: &str) -> Result<NameRef, InternError> {
        let shard_idx = Self::shard_for(s);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard_idx is bounded by NUM_SHARDS (16)"
        )]
        let shard_idx_u32 = shard_idx as u32;
        let shard = &self.shards[shard_idx];

        // Fast path: already interned.
        {
            let guard = shard.read();
            if let Some(&local) = guard.map.get(s) {
                return Ok(NameRef::new(shard_idx_u32, local));
            }
        }

        let mut guard = shard.write();

        // Double-check after acquiring the write lock.
        if let Some(&local) = guard.map.get(s) {
            return Ok(NameRef::new(shard_idx_u32, local));
        }

        if guard.strings.len() > NameRef::MAX_LOCAL as usize {
            return Err(InternError::ShardOverflow {
                shard_idx,
                count: guard.strings.len(),
                max: NameRef::MAX_LOCAL,
            });
        }

        // Leak the string to get 'static lifetime; interned strings live
        // for the whole processing unit.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());

        #[expect(
            clippy::cast_possible_truncation,
            reason = "length bounded by MAX_LOCAL above"
        )]
        let local = guard.strings.len() as u32;
        guard.strings.push(leaked);
        guard.map.insert(leaked, local);

        self.total_count.fetch_add(1, Ordering::Relaxed);

        Ok(NameRef::new(shard_idx_u32, local))
    }

    /// Intern a string, returning its `NameRef`.
    ///
    /// # Panics
    /// Panics if a shard exceeds its 28-bit index space. Use `try_intern`
    /// for fallible interning.
    #[inline]
    pub fn intern(&self, s: &str) -> NameRef {
        match self.try_intern(s) {
            Ok(name) => name,
            Err(e) => panic!("{e}"),
        }
    }

    /// Look up the string for a `NameRef`.
    ///
    /// Interned strings are leaked, so the returned reference outlives any
    /// table borrow.
    pub fn lookup(&self, name: NameRef) -> &'static str {
        let guard = self.shards[name.shard()].read();
        guard.strings[name.local()]
    }

    /// Number of interned strings.
    pub fn len(&self) -> usize {
        self.total_count.load(Ordering::Relaxed)
    }

    /// Check if the table only holds the empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_and_lookup() {
        let table = NameTable::new();

        let foo = table.intern("foo");
        let bar = table.intern("bar");
        let foo2 = table.intern("foo");

        assert_eq!(foo, foo2);
        assert_ne!(foo, bar);

        assert_eq!(table.lookup(foo), "foo");
        assert_eq!(table.lookup(bar), "bar");
    }

    #[test]
    fn test_empty_string_pre_interned() {
        let table = NameTable::new();
        assert_eq!(table.intern(""), NameRef::EMPTY);
        assert_eq!(table.lookup(NameRef::EMPTY), "");
    }

    #[test]
    fn test_known_names_stable() {
        let table = NameTable::new();
        let known = *table.known();
        assert_eq!(table.intern("prop"), known.prop);
        assert_eq!(table.intern("attr_accessor"), known.attr_accessor);
        assert_eq!(table.lookup(known.struct_const), "Struct");
        assert_eq!(table.lookup(known.bang), "!");
    }

    #[test]
    fn test_len_counts_unique_strings() {
        let table = NameTable::new();
        let before = table.len();
        table.intern("fresh_identifier");
        table.intern("fresh_identifier");
        assert_eq!(table.len(), before + 1);
        assert!(!table.is_empty());
    }
}
