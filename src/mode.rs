//! Active collection and mode selection.
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::schema::Collection;

/// Collection and mode every variable value is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveMode {
    pub collection_id: Option<String>,
    pub collection_name: Option<String>,
    pub mode_id: String,
    pub mode_name: Option<String>,
}

/// Resolve the active collection and mode.
///
/// Collection: the override when the response contains it, else the first
/// collection. Mode: the override, else the collection default, else the first
/// mode id declared by any collection.
pub fn resolve_active_mode(
    collections: &[Collection],
    config: &SyncConfig,
) -> Result<ActiveMode, SyncError> {
    let known_modes = known_modes(collections);

    let override_hit = config
        .collection_id
        .as_deref()
        .and_then(|id| collections.iter().find(|collection| collection.id == id));
    if let (Some(id), None) = (config.collection_id.as_deref(), override_hit) {
        if config.strict_collection {
            return Err(SyncError::CollectionNotFound(id.to_string()));
        }
        tracing::warn!(
            collection_id = id,
            "collection override not in response; falling back to first collection"
        );
    }
    let active = override_hit.or_else(|| collections.first());

    let mode_id = config
        .mode_id
        .clone()
        .or_else(|| active.and_then(|collection| collection.default_mode_id.clone()))
        .or_else(|| known_modes.first().map(|(id, _)| id.to_string()))
        .ok_or(SyncError::NoActiveMode {
            collections: collections.len(),
        })?;

    let declared = known_modes.iter().find(|(id, _)| *id == mode_id);
    if declared.is_none() {
        tracing::warn!(mode_id = %mode_id, "active mode is not declared by any collection");
    }
    let mode_name = declared.and_then(|(_, name)| name.map(str::to_string));

    Ok(ActiveMode {
        collection_id: active.map(|collection| collection.id.clone()),
        collection_name: active.and_then(|collection| collection.name.clone()),
        mode_id,
        mode_name,
    })
}

/// Every `(modeId, name)` across all collections, first declaration wins.
fn known_modes(collections: &[Collection]) -> Vec<(&str, Option<&str>)> {
    let mut modes: Vec<(&str, Option<&str>)> = Vec::new();
    for mode in collections.iter().flat_map(|collection| &collection.modes) {
        if !modes.iter().any(|(id, _)| *id == mode.mode_id) {
            modes.push((mode.mode_id.as_str(), mode.name.as_deref()));
        }
    }
    modes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Mode;
    use std::path::PathBuf;

    fn config(collection_id: Option<&str>, mode_id: Option<&str>) -> SyncConfig {
        SyncConfig {
            token: None,
            file_key: None,
            collection_id: collection_id.map(str::to_string),
            mode_id: mode_id.map(str::to_string),
            base_url: "http://localhost".to_string(),
            timeout: None,
            strict_collection: false,
            out_dir: PathBuf::from("."),
            baseline: None,
        }
    }

    fn collection(id: &str, default_mode: Option<&str>, modes: &[(&str, &str)]) -> Collection {
        Collection {
            id: id.to_string(),
            default_mode_id: default_mode.map(str::to_string),
            name: Some(format!("{id} name")),
            modes: modes
                .iter()
                .map(|(mode_id, name)| Mode {
                    mode_id: mode_id.to_string(),
                    name: Some(name.to_string()),
                })
                .collect(),
        }
    }

    #[test]
    fn defaults_to_first_collection_default_mode() {
        let collections = vec![
            collection("C1", Some("1:1"), &[("1:0", "Light"), ("1:1", "Dark")]),
            collection("C2", Some("2:0"), &[("2:0", "Base")]),
        ];
        let active = resolve_active_mode(&collections, &config(None, None)).expect("mode");
        assert_eq!(active.collection_id.as_deref(), Some("C1"));
        assert_eq!(active.mode_id, "1:1");
        assert_eq!(active.mode_name.as_deref(), Some("Dark"));
    }

    #[test]
    fn collection_override_selects_its_default_mode() {
        let collections = vec![
            collection("C1", Some("1:0"), &[("1:0", "Light")]),
            collection("C2", Some("2:0"), &[("2:0", "Base")]),
        ];
        let active = resolve_active_mode(&collections, &config(Some("C2"), None)).expect("mode");
        assert_eq!(active.collection_id.as_deref(), Some("C2"));
        assert_eq!(active.mode_id, "2:0");
        assert_eq!(active.mode_name.as_deref(), Some("Base"));
    }

    #[test]
    fn mode_override_wins_over_collection_default() {
        let collections = vec![collection("C1", Some("1:0"), &[("1:0", "Light"), ("1:1", "Dark")])];
        let active = resolve_active_mode(&collections, &config(None, Some("1:1"))).expect("mode");
        assert_eq!(active.mode_id, "1:1");
        assert_eq!(active.mode_name.as_deref(), Some("Dark"));
    }

    #[test]
    fn missing_default_falls_back_to_first_known_mode() {
        let collections = vec![
            collection("C1", None, &[]),
            collection("C2", None, &[("2:5", "Only")]),
        ];
        let active = resolve_active_mode(&collections, &config(None, None)).expect("mode");
        assert_eq!(active.collection_id.as_deref(), Some("C1"));
        assert_eq!(active.mode_id, "2:5");
    }

    #[test]
    fn unknown_collection_override_falls_back_unless_strict() {
        let collections = vec![collection("C1", Some("1:0"), &[("1:0", "Light")])];
        let active = resolve_active_mode(&collections, &config(Some("nope"), None)).expect("mode");
        assert_eq!(active.collection_id.as_deref(), Some("C1"));

        let mut strict = config(Some("nope"), None);
        strict.strict_collection = true;
        let err = resolve_active_mode(&collections, &strict).expect_err("strict");
        assert!(matches!(err, SyncError::CollectionNotFound(id) if id == "nope"));
    }

    #[test]
    fn no_collections_and_no_override_is_fatal() {
        let err = resolve_active_mode(&[], &config(None, None)).expect_err("no mode");
        assert!(matches!(err, SyncError::NoActiveMode { collections: 0 }));
    }

    #[test]
    fn mode_override_without_collections_still_resolves() {
        let active = resolve_active_mode(&[], &config(None, Some("7:0"))).expect("mode");
        assert_eq!(active.mode_id, "7:0");
        assert!(active.collection_id.is_none());
        assert!(active.mode_name.is_none());
    }
}
