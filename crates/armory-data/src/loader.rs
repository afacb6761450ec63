//! Resolution pipeline: reads data files, resolves name references, builds
//! the catalog.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and
//! deserialization helpers used by [`load_armory_data`].

use crate::schema::{ItemEntry, KindData};
use armory_core::catalog::{Catalog, CatalogBuilder, CatalogError, ItemKind};
use armory_core::config::SimulatorConfig;
use armory_core::id::DefId;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A name reference could not be resolved.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// A field required by the entry's kind is absent.
    #[error("{kind} '{name}' in {file} is missing field '{field}'")]
    MissingField {
        file: PathBuf,
        name: String,
        kind: &'static str,
        field: &'static str,
    },

    /// A duplicate name was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// The resolved definitions do not form a valid catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan `dir` for `{base_name}.ron`, `.toml` or `.json`.
///
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// more than one format exists for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if !candidate.exists() {
            continue;
        }
        if let Some(existing) = found {
            return Err(DataLoadError::ConflictingFormats {
                a: existing,
                b: candidate,
            });
        }
        found = Some(candidate);
    }

    Ok(found)
}

/// Like [`find_data_file`], but a missing file is an error.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// Read a file and deserialize it according to its format.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(path, e)),
    }
}

/// Deserialize a list from a file. TOML files hold the array under
/// `toml_key` in a top-level table; RON and JSON hold a bare list.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    if detect_format(path)? != Format::Toml {
        return deserialize_file(path);
    }

    let content = std::fs::read_to_string(path)?;
    let table: toml::Value = toml::from_str(&content).map_err(|e| parse_error(path, e))?;
    let array = table
        .get(toml_key)
        .ok_or_else(|| parse_error(path, format!("missing key '{toml_key}' in TOML file")))?
        .clone();
    array
        .try_into()
        .map_err(|e: toml::de::Error| parse_error(path, e))
}

// ===========================================================================
// Catalog resolution
// ===========================================================================

fn resolve_name(
    names: &HashMap<String, DefId>,
    name: &str,
    file: &Path,
    expected_kind: &'static str,
) -> Result<DefId, DataLoadError> {
    names
        .get(name)
        .copied()
        .ok_or_else(|| DataLoadError::UnresolvedRef {
            file: file.to_path_buf(),
            name: name.to_string(),
            expected_kind,
        })
}

fn required<'a>(
    value: &'a Option<String>,
    entry: &ItemEntry,
    field: &'static str,
    file: &Path,
) -> Result<&'a str, DataLoadError> {
    value.as_deref().ok_or_else(|| DataLoadError::MissingField {
        file: file.to_path_buf(),
        name: entry.name.clone(),
        kind: entry.kind.as_str(),
        field,
    })
}

/// Turn one entry into a catalog kind, resolving its name references.
fn resolve_kind(
    entry: &ItemEntry,
    names: &HashMap<String, DefId>,
    file: &Path,
) -> Result<ItemKind, DataLoadError> {
    let kind = match entry.kind {
        KindData::Skin => ItemKind::Skin,
        KindData::Gloves => ItemKind::Gloves,
        KindData::MusicKit => ItemKind::MusicKit,
        KindData::Agent => ItemKind::Agent,
        KindData::Sticker => ItemKind::Sticker,
        KindData::Patch => ItemKind::Patch,
        KindData::NameTag => ItemKind::NameTag,
        KindData::Graffiti => ItemKind::Graffiti,
        KindData::CaseKey => ItemKind::CaseKey,
        KindData::Coin => ItemKind::Coin,
        KindData::CounterSwapTool => ItemKind::CounterSwapTool,
        KindData::Case => {
            let key = entry
                .key
                .as_deref()
                .map(|key| resolve_name(names, key, file, "case key"))
                .transpose()?;
            let loot = entry
                .loot
                .iter()
                .map(|name| resolve_name(names, name, file, "loot"))
                .collect::<Result<Vec<_>, _>>()?;
            ItemKind::Case { key, loot }
        }
        KindData::OperationPass => {
            let coin = required(&entry.coin, entry, "coin", file)?;
            ItemKind::OperationPass {
                coin: resolve_name(names, coin, file, "coin")?,
            }
        }
        KindData::ViewerPass => {
            let coin = required(&entry.coin, entry, "coin", file)?;
            ItemKind::ViewerPass {
                coin: resolve_name(names, coin, file, "coin")?,
            }
        }
    };
    Ok(kind)
}

/// Build a catalog from parsed entries. Names may be referenced before the
/// entry that defines them.
pub fn build_catalog(entries: &[ItemEntry], file: &Path) -> Result<Catalog, DataLoadError> {
    let mut builder = CatalogBuilder::new();
    let mut names: HashMap<String, DefId> = HashMap::with_capacity(entries.len());

    for entry in entries {
        if names.contains_key(&entry.name) {
            return Err(DataLoadError::DuplicateName {
                file: file.to_path_buf(),
                name: entry.name.clone(),
            });
        }
        names.insert(entry.name.clone(), builder.reserve(&entry.name));
    }

    for entry in entries {
        let id = names[&entry.name];
        builder.set_kind(id, resolve_kind(entry, &names, file)?)?;
    }

    Ok(builder.build()?)
}

// ===========================================================================
// Top-level loading
// ===========================================================================

/// Everything the simulator needs from a data directory.
#[derive(Debug)]
pub struct ArmoryData {
    pub catalog: Catalog,
    pub config: SimulatorConfig,
}

/// Load the catalog from the required `items.{ron,toml,json}`.
pub fn load_catalog(dir: &Path) -> Result<Catalog, DataLoadError> {
    let path = require_data_file(dir, "items")?;
    let entries: Vec<ItemEntry> = deserialize_list(&path, "items")?;
    let catalog = build_catalog(&entries, &path)?;
    tracing::debug!(file = %path.display(), definitions = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Load `config.{ron,toml,json}` if present; defaults otherwise.
pub fn load_config(dir: &Path) -> Result<SimulatorConfig, DataLoadError> {
    match find_data_file(dir, "config")? {
        Some(path) => {
            let config = deserialize_file(&path)?;
            tracing::debug!(file = %path.display(), "simulator config loaded");
            Ok(config)
        }
        None => Ok(SimulatorConfig::default()),
    }
}

/// Load catalog and config from a data directory.
pub fn load_armory_data(dir: &Path) -> Result<ArmoryData, DataLoadError> {
    Ok(ArmoryData {
        catalog: load_catalog(dir)?,
        config: load_config(dir)?,
    })
}

// ===========================================================================
// Tests
// ===========================================================================
