//! Symbol handles and the append-only symbol table.
//!
//! Trees carry non-owning [`SymbolRef`] handles; the metadata behind them
//! lives here. Before name resolution runs, every declaration carries the
//! [`SymbolRef::TODO`] placeholder. The table also pre-enters the built-in
//! value classes that printers and rewrite passes compare against.

use crate::{NameRef, NameTable};

/// Non-owning handle to a declared entity.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct SymbolRef(u32);

impl SymbolRef {
    /// The root scope.
    pub const ROOT: SymbolRef = SymbolRef(0);
    /// Placeholder carried by declarations before resolution.
    pub const TODO: SymbolRef = SymbolRef(1);
    /// Built-in `NilClass`.
    pub const NIL_CLASS: SymbolRef = SymbolRef(2);
    /// Built-in `TrueClass`.
    pub const TRUE_CLASS: SymbolRef = SymbolRef(3);
    /// Built-in `FalseClass`.
    pub const FALSE_CLASS: SymbolRef = SymbolRef(4);
    /// Built-in `Symbol`.
    pub const SYMBOL_CLASS: SymbolRef = SymbolRef(5);
    /// Built-in `String`.
    pub const STRING_CLASS: SymbolRef = SymbolRef(6);
    /// Built-in `Struct`.
    pub const STRUCT_CLASS: SymbolRef = SymbolRef(7);

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether this is still the pre-resolution placeholder.
    #[inline]
    pub const fn is_todo(self) -> bool {
        self.0 == Self::TODO.0
    }
}

/// Kind of declared entity.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolKind {
    Class,
    Module,
    Method,
    Field,
    StaticField,
}

/// Metadata for one symbol.
#[derive(Copy, Clone, Debug)]
pub struct SymbolInfo {
    pub name: NameRef,
    pub owner: SymbolRef,
    pub kind: SymbolKind,
}

/// Append-only store of symbol metadata.
///
/// Resolution appends; everything before it only reads. The well-known
/// slots match the constants on [`SymbolRef`].
pub struct SymbolTable {
    infos: Vec<SymbolInfo>,
}

impl SymbolTable {
    /// Create a table with the root scope, the `<todo>` placeholder, and
    /// the built-in value classes entered.
    pub fn new(names: &NameTable) -> Self {
        let mut table = SymbolTable { infos: Vec::new() };

        let root = table.enter(SymbolRef::ROOT, SymbolKind::Module, names.intern("<root>"));
        debug_assert_eq!(root, SymbolRef::ROOT);
        let todo = table.enter(SymbolRef::ROOT, SymbolKind::Class, names.intern("<todo>"));
        debug_assert_eq!(todo, SymbolRef::TODO);

        for (expected, class_name) in [
            (SymbolRef::NIL_CLASS, "NilClass"),
            (SymbolRef::TRUE_CLASS, "TrueClass"),
            (SymbolRef::FALSE_CLASS, "FalseClass"),
            (SymbolRef::SYMBOL_CLASS, "Symbol"),
            (SymbolRef::STRING_CLASS, "String"),
            (SymbolRef::STRUCT_CLASS, "Struct"),
        ] {
            let entered = table.enter(SymbolRef::ROOT, SymbolKind::Class, names.intern(class_name));
            debug_assert_eq!(entered, expected);
        }

        table
    }

    /// Append a new symbol under `owner`.
    pub fn enter(&mut self, owner: SymbolRef, kind: SymbolKind, name: NameRef) -> SymbolRef {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "symbol count never approaches u32::MAX in one processing unit"
        )]
        let id = self.infos.len() as u32;
        self.infos.push(SymbolInfo { name, owner, kind });
        SymbolRef(id)
    }

    /// Metadata for a symbol.
    pub fn info(&self, sym: SymbolRef) -> &SymbolInfo {
        &self.infos[sym.0 as usize]
    }

    /// Short name of a symbol.
    pub fn name(&self, sym: SymbolRef) -> NameRef {
        self.info(sym).name
    }

    /// Number of symbols entered.
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Fully qualified `Owner::Name` rendering; the root scope is elided
    /// from the path of its children and renders `<root>` on its own.
    pub fn full_name(&self, names: &NameTable, sym: SymbolRef) -> String {
        if sym == SymbolRef::ROOT {
            return names.lookup(self.name(sym)).to_owned();
        }
        let mut parts = vec![names.lookup(self.name(sym))];
        let mut owner = self.info(sym).owner;
        while owner != SymbolRef::ROOT {
            parts.push(names.lookup(self.name(owner)));
            owner = self.info(owner).owner;
        }
        parts.reverse();
        parts.join("::")
    }
}
