//! Per-export resource registry.
//!
//! Assigns document-local symbolic ids (`r1`, `r2`, ...) to shared formats
//! and asset references. Built fresh for every export call and passed
//! explicitly; there is no process-wide counter. Each distinct logical
//! resource gets exactly one id no matter how many clips reference it.

use std::collections::HashMap;

use super::types::FormatDescriptor;
use crate::timeline::AssetRef;

/// Bidirectional mapping from logical resource identity to symbolic id.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    next: usize,
    format_ids: HashMap<FormatDescriptor, String>,
    formats: Vec<(String, FormatDescriptor)>,
    asset_ids: HashMap<AssetRef, String>,
    assets: Vec<(String, AssetRef)>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for a format descriptor, assigning one on first sight.
    /// Deduplicates by value: equal descriptors share an id.
    pub fn id_for_format(&mut self, format: &FormatDescriptor) -> String {
        if let Some(id) = self.format_ids.get(format) {
            return id.clone();
        }
        let id = self.next_id();
        self.format_ids.insert(format.clone(), id.clone());
        self.formats.push((id.clone(), format.clone()));
        id
    }

    /// Id for an asset reference, assigning one on first sight.
    pub fn id_for_asset(&mut self, asset: &AssetRef) -> String {
        if let Some(id) = self.asset_ids.get(asset) {
            return id.clone();
        }
        let id = self.next_id();
        self.asset_ids.insert(asset.clone(), id.clone());
        self.assets.push((id.clone(), asset.clone()));
        id
    }

    /// Lookup without insertion; `None` means the registry-building pass
    /// never saw this asset.
    pub fn asset_id(&self, asset: &AssetRef) -> Option<&str> {
        self.asset_ids.get(asset).map(String::as_str)
    }

    /// Registered formats in first-registration order.
    pub fn formats(&self) -> impl Iterator<Item = (&str, &FormatDescriptor)> {
        self.formats.iter().map(|(id, f)| (id.as_str(), f))
    }

    /// Registered assets in first-registration order.
    pub fn assets(&self) -> impl Iterator<Item = (&str, &AssetRef)> {
        self.assets.iter().map(|(id, a)| (id.as_str(), a))
    }

    /// Total number of registered resources.
    pub fn len(&self) -> usize {
        self.formats.len() + self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("r{}", self.next)
    }
}
