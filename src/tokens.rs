//! Token tree, sync summary, and the builder that assembles them.
use crate::classify::{Classification, TokenCategory, Unresolved};
use crate::mode::ActiveMode;
use serde::Serialize;
use std::collections::BTreeMap;

pub type TokenMap = BTreeMap<String, String>;

/// A (possibly partial) design-token tree. Absent categories are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignTokens {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<TokenMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<TokenMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radii: Option<TokenMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<TokenMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<TokenMap>,
}

impl DesignTokens {
    pub fn category(&self, category: TokenCategory) -> Option<&TokenMap> {
        match category {
            TokenCategory::Colors => self.colors.as_ref(),
            TokenCategory::Spacing => self.spacing.as_ref(),
            TokenCategory::Radii => self.radii.as_ref(),
            TokenCategory::BorderWidth => self.border_width.as_ref(),
            TokenCategory::Opacity => self.opacity.as_ref(),
        }
    }

    fn category_mut(&mut self, category: TokenCategory) -> &mut Option<TokenMap> {
        match category {
            TokenCategory::Colors => &mut self.colors,
            TokenCategory::Spacing => &mut self.spacing,
            TokenCategory::Radii => &mut self.radii,
            TokenCategory::BorderWidth => &mut self.border_width,
            TokenCategory::Opacity => &mut self.opacity,
        }
    }

    /// True when at least one category carries a token.
    pub fn has_overrides(&self) -> bool {
        TokenCategory::ALL
            .iter()
            .any(|category| self.category(*category).is_some_and(|map| !map.is_empty()))
    }

    /// Drop category maps that ended up empty.
    pub fn prune(mut self) -> Self {
        for category in TokenCategory::ALL {
            let slot = self.category_mut(category);
            if slot.as_ref().is_some_and(BTreeMap::is_empty) {
                *slot = None;
            }
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub colors: usize,
    pub spacing: usize,
    pub radii: usize,
    pub border_width: usize,
    pub opacity: usize,
    pub unresolved: usize,
    pub mode_id: Option<String>,
    pub mode_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
}

impl SyncSummary {
    /// Zeroed summary that still records the resolved mode, if any.
    pub fn for_mode(mode: Option<&ActiveMode>) -> Self {
        let mut summary = Self::default();
        if let Some(mode) = mode {
            summary.mode_id = Some(mode.mode_id.clone());
            summary.mode_name = mode.mode_name.clone();
            summary.collection_id = mode.collection_id.clone();
            summary.collection_name = mode.collection_name.clone();
        }
        summary
    }

    pub fn count(&self, category: TokenCategory) -> usize {
        match category {
            TokenCategory::Colors => self.colors,
            TokenCategory::Spacing => self.spacing,
            TokenCategory::Radii => self.radii,
            TokenCategory::BorderWidth => self.border_width,
            TokenCategory::Opacity => self.opacity,
        }
    }

    fn count_mut(&mut self, category: TokenCategory) -> &mut usize {
        match category {
            TokenCategory::Colors => &mut self.colors,
            TokenCategory::Spacing => &mut self.spacing,
            TokenCategory::Radii => &mut self.radii,
            TokenCategory::BorderWidth => &mut self.border_width,
            TokenCategory::Opacity => &mut self.opacity,
        }
    }
}

/// Accumulates classified variables into a token tree and summary.
///
/// Category maps are only created on first insert, so [`finish`] never has
/// to guess which empty maps were intentional.
///
/// [`finish`]: TokenTreeBuilder::finish
#[derive(Debug, Default)]
pub struct TokenTreeBuilder {
    tokens: DesignTokens,
    summary: SyncSummary,
}

impl TokenTreeBuilder {
    pub fn new(mode: Option<&ActiveMode>) -> Self {
        Self {
            tokens: DesignTokens::default(),
            summary: SyncSummary::for_mode(mode),
        }
    }

    pub fn record(&mut self, key: &str, classification: Classification) {
        match classification {
            Classification::Token { category, value } => self.insert(category, key, value),
            Classification::Unresolved(reason) => self.unresolved(key, reason),
        }
    }

    pub fn insert(&mut self, category: TokenCategory, key: &str, value: String) {
        self.tokens
            .category_mut(category)
            .get_or_insert_with(TokenMap::new)
            .insert(key.to_string(), value);
        *self.summary.count_mut(category) += 1;
    }

    pub fn unresolved(&mut self, key: &str, reason: Unresolved) {
        tracing::debug!(token = key, %reason, "variable unresolved");
        self.summary.unresolved += 1;
    }

    pub fn finish(self) -> (DesignTokens, SyncSummary) {
        (self.tokens.prune(), self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_materializes_only_touched_categories() {
        let mut builder = TokenTreeBuilder::new(None);
        builder.insert(TokenCategory::Colors, "primary-100", "#ff0000".to_string());
        builder.insert(TokenCategory::Radii, "card-radius", "16px".to_string());
        builder.unresolved("font-family", Unresolved::NonNumeric);
        let (tokens, summary) = builder.finish();

        assert_eq!(
            serde_json::to_value(&tokens).expect("serialize"),
            json!({
                "colors": {"primary-100": "#ff0000"},
                "radii": {"card-radius": "16px"}
            })
        );
        assert_eq!(summary.colors, 1);
        assert_eq!(summary.radii, 1);
        assert_eq!(summary.spacing, 0);
        assert_eq!(summary.unresolved, 1);
        assert!(tokens.has_overrides());
    }

    #[test]
    fn prune_removes_empty_categories() {
        let tokens = DesignTokens {
            radii: Some(TokenMap::new()),
            spacing: Some(TokenMap::from([("gap".to_string(), "1rem".to_string())])),
            ..DesignTokens::default()
        }
        .prune();
        assert!(tokens.radii.is_none());
        assert!(tokens.spacing.is_some());
        let value = serde_json::to_value(&tokens).expect("serialize");
        assert!(value.get("radii").is_none());
    }

    #[test]
    fn empty_tree_serializes_to_empty_object() {
        let tokens = DesignTokens::default();
        assert!(!tokens.has_overrides());
        assert_eq!(serde_json::to_value(&tokens).expect("serialize"), json!({}));
    }

    #[test]
    fn summary_serializes_camel_case_with_mode() {
        let mode = ActiveMode {
            collection_id: Some("C1".to_string()),
            collection_name: None,
            mode_id: "1:0".to_string(),
            mode_name: Some("Light".to_string()),
        };
        let summary = SyncSummary::for_mode(Some(&mode));
        assert_eq!(
            serde_json::to_value(&summary).expect("serialize"),
            json!({
                "colors": 0,
                "spacing": 0,
                "radii": 0,
                "borderWidth": 0,
                "opacity": 0,
                "unresolved": 0,
                "modeId": "1:0",
                "modeName": "Light",
                "collectionId": "C1"
            })
        );
    }
}
