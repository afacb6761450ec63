//! Immutable catalog of item definitions.
//!
//! Built once through [`CatalogBuilder`], validated, then shared read-only
//! (typically as `Arc<Catalog>`). The simulator only ever asks it capability
//! questions ("is this a case?") and resolves names for display.

use crate::id::DefId;
use std::collections::HashMap;

/// The closed set of item kinds. Kinds that reference other definitions
/// carry those references here so the catalog can validate them at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Skin,
    Gloves,
    MusicKit,
    Agent,
    Sticker,
    Patch,
    NameTag,
    Graffiti,
    /// A container. `key` is the key definition required to open it, if any.
    Case { key: Option<DefId>, loot: Vec<DefId> },
    CaseKey,
    /// Activating the pass grants `coin`.
    OperationPass { coin: DefId },
    /// Activating the pass grants `coin`.
    ViewerPass { coin: DefId },
    Coin,
    CounterSwapTool,
}

impl ItemKind {
    pub fn is_skin(&self) -> bool {
        matches!(self, ItemKind::Skin)
    }

    pub fn is_gloves(&self) -> bool {
        matches!(self, ItemKind::Gloves)
    }

    pub fn is_music_kit(&self) -> bool {
        matches!(self, ItemKind::MusicKit)
    }

    pub fn is_agent(&self) -> bool {
        matches!(self, ItemKind::Agent)
    }

    pub fn is_sticker(&self) -> bool {
        matches!(self, ItemKind::Sticker)
    }

    pub fn is_patch(&self) -> bool {
        matches!(self, ItemKind::Patch)
    }

    pub fn is_name_tag(&self) -> bool {
        matches!(self, ItemKind::NameTag)
    }

    pub fn is_graffiti(&self) -> bool {
        matches!(self, ItemKind::Graffiti)
    }

    pub fn is_case(&self) -> bool {
        matches!(self, ItemKind::Case { .. })
    }

    pub fn is_case_key(&self) -> bool {
        matches!(self, ItemKind::CaseKey)
    }

    pub fn is_operation_pass(&self) -> bool {
        matches!(self, ItemKind::OperationPass { .. })
    }

    pub fn is_viewer_pass(&self) -> bool {
        matches!(self, ItemKind::ViewerPass { .. })
    }

    pub fn is_counter_swap_tool(&self) -> bool {
        matches!(self, ItemKind::CounterSwapTool)
    }

    /// Kinds whose instances carry a numeric counter attribute.
    pub fn has_counter_attribute(&self) -> bool {
        matches!(self, ItemKind::Skin | ItemKind::MusicKit)
    }

    /// Definitions referenced by this kind, for validation.
    fn references(&self) -> Vec<DefId> {
        match self {
            ItemKind::Case { key, loot } => key.iter().chain(loot.iter()).copied().collect(),
            ItemKind::OperationPass { coin } | ItemKind::ViewerPass { coin } => vec![*coin],
            _ => Vec::new(),
        }
    }
}

/// An item definition in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDef {
    pub name: String,
    pub kind: ItemKind,
}

/// Builder for constructing an immutable [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    defs: Vec<ItemDef>,
    name_to_id: HashMap<String, DefId>,
    duplicates: Vec<String>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Returns its ID. A repeated name is reported by
    /// [`build`](Self::build).
    pub fn register(&mut self, name: &str, kind: ItemKind) -> DefId {
        let id = DefId(self.defs.len() as u32);
        self.defs.push(ItemDef {
            name: name.to_string(),
            kind,
        });
        if self.name_to_id.insert(name.to_string(), id).is_some() {
            self.duplicates.push(name.to_string());
        }
        id
    }

    /// Reserve an ID for a definition whose kind is filled in later through
    /// [`set_kind`](Self::set_kind). Lets data loaders register forward
    /// references (a case listing loot defined further down the file).
    pub fn reserve(&mut self, name: &str) -> DefId {
        self.register(name, ItemKind::Coin)
    }

    /// Replace the kind of an already registered definition.
    pub fn set_kind(&mut self, id: DefId, kind: ItemKind) -> Result<(), CatalogError> {
        let def = self
            .defs
            .get_mut(id.0 as usize)
            .ok_or(CatalogError::InvalidDefRef(id))?;
        def.kind = kind;
        Ok(())
    }

    /// Lookup definition ID by name.
    pub fn def_id(&self, name: &str) -> Option<DefId> {
        self.name_to_id.get(name).copied()
    }

    /// Finalize and build the immutable catalog.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        if let Some(name) = self.duplicates.into_iter().next() {
            return Err(CatalogError::DuplicateName(name));
        }

        for def in &self.defs {
            for reference in def.kind.references() {
                if reference.0 as usize >= self.defs.len() {
                    return Err(CatalogError::InvalidDefRef(reference));
                }
            }
            if let ItemKind::Case { key: Some(key), .. } = &def.kind {
                if !self.defs[key.0 as usize].kind.is_case_key() {
                    return Err(CatalogError::NotAKey {
                        case: def.name.clone(),
                        key: self.defs[key.0 as usize].name.clone(),
                    });
                }
            }
        }

        tracing::debug!(definitions = self.defs.len(), "catalog built");

        Ok(Catalog {
            defs: self.defs,
            name_to_id: self.name_to_id,
        })
    }
}

/// Immutable catalog. Frozen after build(). Thread-safe to share.
#[derive(Debug)]
pub struct Catalog {
    defs: Vec<ItemDef>,
    name_to_id: HashMap<String, DefId>,
}

impl Catalog {
    pub fn get(&self, id: DefId) -> Option<&ItemDef> {
        self.defs.get(id.0 as usize)
    }

    pub fn kind(&self, id: DefId) -> Option<&ItemKind> {
        self.get(id).map(|def| &def.kind)
    }

    pub fn def_id(&self, name: &str) -> Option<DefId> {
        self.name_to_id.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn is_case(&self, id: DefId) -> bool {
        self.kind(id).is_some_and(ItemKind::is_case)
    }

    pub fn is_sticker(&self, id: DefId) -> bool {
        self.kind(id).is_some_and(ItemKind::is_sticker)
    }

    pub fn is_name_tag(&self, id: DefId) -> bool {
        self.kind(id).is_some_and(ItemKind::is_name_tag)
    }

    pub fn is_patch(&self, id: DefId) -> bool {
        self.kind(id).is_some_and(ItemKind::is_patch)
    }

    pub fn is_graffiti(&self, id: DefId) -> bool {
        self.kind(id).is_some_and(ItemKind::is_graffiti)
    }

    pub fn is_operation_pass(&self, id: DefId) -> bool {
        self.kind(id).is_some_and(ItemKind::is_operation_pass)
    }

    pub fn is_viewer_pass(&self, id: DefId) -> bool {
        self.kind(id).is_some_and(ItemKind::is_viewer_pass)
    }

    pub fn is_music_kit(&self, id: DefId) -> bool {
        self.kind(id).is_some_and(ItemKind::is_music_kit)
    }

    pub fn is_skin(&self, id: DefId) -> bool {
        self.kind(id).is_some_and(ItemKind::is_skin)
    }

    pub fn has_counter_attribute(&self, id: DefId) -> bool {
        self.kind(id).is_some_and(ItemKind::has_counter_attribute)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate definition name: {0}")]
    DuplicateName(String),
    #[error("invalid definition reference: {0:?}")]
    InvalidDefRef(DefId),
    #[error("case {case} names {key} as its key, which is not a case key")]
    NotAKey { case: String, key: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_builder() -> CatalogBuilder {
        let mut b = CatalogBuilder::new();
        let key = b.register("alpha_key", ItemKind::CaseKey);
        let skin = b.register("desert_camo", ItemKind::Skin);
        b.register(
            "alpha_case",
            ItemKind::Case {
                key: Some(key),
                loot: vec![skin],
            },
        );
        let coin = b.register("tour_coin", ItemKind::Coin);
        b.register("tour_pass", ItemKind::ViewerPass { coin });
        b
    }

    #[test]
    fn register_and_build() {
        let catalog = setup_builder().build().unwrap();
        assert_eq!(catalog.len(), 5);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn lookup_by_name() {
        let catalog = setup_builder().build().unwrap();
        assert!(catalog.def_id("alpha_case").is_some());
        assert!(catalog.def_id("nonexistent").is_none());
    }

    #[test]
    fn capability_queries() {
        let catalog = setup_builder().build().unwrap();
        let case = catalog.def_id("alpha_case").unwrap();
        let skin = catalog.def_id("desert_camo").unwrap();
        let pass = catalog.def_id("tour_pass").unwrap();

        assert!(catalog.is_case(case));
        assert!(!catalog.is_case(skin));
        assert!(catalog.is_skin(skin));
        assert!(catalog.has_counter_attribute(skin));
        assert!(!catalog.has_counter_attribute(case));
        assert!(catalog.is_viewer_pass(pass));
        assert!(!catalog.is_operation_pass(pass));
    }

    #[test]
    fn unknown_def_answers_false() {
        let catalog = setup_builder().build().unwrap();
        assert!(catalog.get(DefId(999)).is_none());
        assert!(!catalog.is_case(DefId(999)));
        assert!(!catalog.has_counter_attribute(DefId(999)));
    }

    #[test]
    fn duplicate_name_fails() {
        let mut b = setup_builder();
        b.register("alpha_case", ItemKind::Sticker);
        match b.build() {
            Err(CatalogError::DuplicateName(name)) => assert_eq!(name, "alpha_case"),
            other => panic!("expected DuplicateName, got: {other:?}"),
        }
    }

    #[test]
    fn dangling_coin_fails() {
        let mut b = CatalogBuilder::new();
        b.register("broken_pass", ItemKind::OperationPass { coin: DefId(42) });
        let result = b.build();
        match result {
            Err(CatalogError::InvalidDefRef(id)) => {
                assert_eq!(id, DefId(42));
                let msg = format!("{}", CatalogError::InvalidDefRef(id));
                assert!(msg.contains("invalid definition reference"), "got: {msg}");
            }
            other => panic!("expected InvalidDefRef, got: {other:?}"),
        }
    }

    #[test]
    fn case_key_must_be_a_key() {
        let mut b = CatalogBuilder::new();
        let sticker = b.register("gold_star", ItemKind::Sticker);
        b.register(
            "odd_case",
            ItemKind::Case {
                key: Some(sticker),
                loot: vec![],
            },
        );
        assert!(matches!(b.build(), Err(CatalogError::NotAKey { .. })));
    }

    #[test]
    fn reserve_then_set_kind() {
        let mut b = CatalogBuilder::new();
        let case = b.reserve("late_case");
        let skin = b.register("late_skin", ItemKind::Skin);
        b.set_kind(
            case,
            ItemKind::Case {
                key: None,
                loot: vec![skin],
            },
        )
        .unwrap();
        let catalog = b.build().unwrap();
        assert!(catalog.is_case(case));
    }

    #[test]
    fn set_kind_on_unknown_id_fails() {
        let mut b = CatalogBuilder::new();
        assert!(b.set_kind(DefId(3), ItemKind::Skin).is_err());
    }

    #[test]
    fn empty_catalog_builds_successfully() {
        let catalog = CatalogBuilder::new().build().unwrap();
        assert!(catalog.is_empty());
    }
}
