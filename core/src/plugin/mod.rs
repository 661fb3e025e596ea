//! The inline plugin: registers `?__inline` scripts as entries, then swaps the marker
//! tags for the produced code once the host has rendered its pages.

mod prune;
mod registrar;
mod substitute;

pub use registrar::{INLINE_CHUNK_PREFIX, chunk_name};
pub use substitute::Substitution;

use crate::config::InlineConfig;
use crate::host::HtmlCompanion;
use inlay_shared::{InlayError, InlayResult};
use std::collections::HashMap;
use std::path::PathBuf;

/// A marker backed by a build unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAsset {
    pub chunk: String,
    pub url: String,
    pub raw_script: String,
}

/// A marker backed by a source file read at substitution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAsset {
    pub script_path: PathBuf,
    pub url: String,
    pub raw_script: String,
}

pub struct InlinePlugin {
    config: InlineConfig,
    templates: Vec<String>,
    /// Keyed by raw template path.
    inline_assets: HashMap<PathBuf, Vec<InlineAsset>>,
    raw_assets: HashMap<PathBuf, Vec<RawAsset>>,
}

impl InlinePlugin {
    /// Creates the plugin for one build.
    ///
    /// # Errors
    ///
    /// Returns [`InlayError::MissingDependency`] without a companion HTML generator, and
    /// [`InlayError::NoTemplateConfigured`] when neither the config nor the companion
    /// names a template.
    pub fn new(companion: Option<&dyn HtmlCompanion>, config: InlineConfig) -> InlayResult<Self> {
        let companion = companion.ok_or(InlayError::MissingDependency("an html page generator"))?;

        let templates = if config.templates.is_empty() {
            companion.templates()
        } else {
            config.templates.clone()
        };

        if templates.is_empty() {
            return Err(InlayError::NoTemplateConfigured);
        }

        log::debug!("inline templates: {:?}", templates);

        Ok(Self {
            config,
            templates,
            inline_assets: HashMap::new(),
            raw_assets: HashMap::new(),
        })
    }

    #[inline(always)]
    pub fn config(&self) -> &InlineConfig {
        &self.config
    }

    /// Template references that are scanned for markers.
    #[inline(always)]
    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    pub fn inline_assets(&self) -> &HashMap<PathBuf, Vec<InlineAsset>> {
        &self.inline_assets
    }

    pub fn raw_assets(&self) -> &HashMap<PathBuf, Vec<RawAsset>> {
        &self.raw_assets
    }
}
