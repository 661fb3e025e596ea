//! Capability traits the inline plugin needs from the surrounding build.
//!
//! The plugin never compiles anything itself. It adds entries through [`EntryDefiner`],
//! reads and drops produced files through [`AssetEmitter`], and discovers templates
//! through [`HtmlCompanion`]. [`BuildHost`] ties those together for the phase driver.

use inlay_shared::InlayResult;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// The host's entry configuration.
///
/// Only [`EntrySet::Named`] can take extra entries; the other shapes are what a bundler
/// accepts for a single anonymous entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EntrySet {
    Single(String),
    List(Vec<String>),
    Named(BTreeMap<String, EntryImport>),
}

impl EntrySet {
    pub fn shape(&self) -> &'static str {
        match self {
            EntrySet::Single(_) => "a single path",
            EntrySet::List(_) => "a list of paths",
            EntrySet::Named(_) => "a map of named entries",
        }
    }
}

impl Default for EntrySet {
    fn default() -> Self {
        EntrySet::Named(BTreeMap::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EntryImport {
    Path(String),
    Descriptor { import: Vec<String> },
}

impl EntryImport {
    pub fn imports(&self) -> Vec<&str> {
        match self {
            EntryImport::Path(path) => vec![path.as_str()],
            EntryImport::Descriptor { import } => import.iter().map(String::as_str).collect(),
        }
    }
}

/// Access to the host's entry set before compilation starts.
pub trait EntryDefiner {
    /// The directory bare entry paths and templates are resolved against.
    fn context(&self) -> &Path;

    fn entries_mut(&mut self) -> &mut EntrySet;
}

/// Access to the host's produced files between compilation and write-out.
pub trait AssetEmitter {
    /// Files produced for the chunk named `name`, in output order.
    fn chunk_files(&self, name: &str) -> Option<&[String]>;

    fn asset_source(&self, filename: &str) -> Option<&str>;

    /// Drops a file from the set that will be written. Returns whether it was present.
    fn remove_asset(&mut self, filename: &str) -> bool;

    /// The first file produced for `chunk`.
    fn bundle_for_chunk(&self, chunk: &str) -> Option<&str> {
        self.chunk_files(chunk)?.first().map(String::as_str)
    }
}

/// A chunk the host produced, with the files it wrote for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducedChunk {
    pub name: String,
    pub files: Vec<String>,
}

/// In-memory output of one compilation.
#[derive(Debug, Clone, Default)]
pub struct Compilation {
    chunks: Vec<ProducedChunk>,
    assets: BTreeMap<String, String>,
}

impl Compilation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `filename` as produced by chunk `name`.
    pub fn add_chunk_file(&mut self, name: &str, filename: String, source: String) {
        match self.chunks.iter_mut().find(|chunk| chunk.name == name) {
            Some(chunk) => chunk.files.push(filename.clone()),
            None => self.chunks.push(ProducedChunk {
                name: name.to_string(),
                files: vec![filename.clone()],
            }),
        }
        self.assets.insert(filename, source);
    }

    /// Records a file that belongs to no chunk, such as an emitted asset.
    pub fn add_asset(&mut self, filename: String, source: String) {
        self.assets.insert(filename, source);
    }

    pub fn chunks(&self) -> &[ProducedChunk] {
        &self.chunks
    }

    pub fn assets(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assets
            .iter()
            .map(|(name, source)| (name.as_str(), source.as_str()))
    }

    pub fn into_assets(self) -> BTreeMap<String, String> {
        self.assets
    }
}

impl AssetEmitter for Compilation {
    fn chunk_files(&self, name: &str) -> Option<&[String]> {
        self.chunks
            .iter()
            .find(|chunk| chunk.name == name)
            .map(|chunk| chunk.files.as_slice())
    }

    fn asset_source(&self, filename: &str) -> Option<&str> {
        self.assets.get(filename).map(String::as_str)
    }

    fn remove_asset(&mut self, filename: &str) -> bool {
        self.assets.remove(filename).is_some()
    }
}

/// One configured instance of the companion HTML generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlPage {
    /// Template reference, possibly loader-prefixed. `None` renders a default page.
    #[serde(default)]
    pub template: Option<String>,
    /// Output file name relative to the output directory.
    #[serde(default = "default_page_filename")]
    pub filename: String,
    /// Chunks to reference with `<script>` tags. `None` means every chunk.
    #[serde(default)]
    pub chunks: Option<Vec<String>>,
}

fn default_page_filename() -> String {
    "index.html".to_string()
}

impl HtmlPage {
    pub fn new(template: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            template: Some(template.into()),
            filename: filename.into(),
            chunks: None,
        }
    }

    #[must_use]
    pub fn with_chunks<I, S>(mut self, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chunks = Some(chunks.into_iter().map(Into::into).collect());
        self
    }
}

/// The companion HTML generator's configured pages.
pub trait HtmlCompanion {
    fn pages(&self) -> &[HtmlPage];

    /// Template options of every page that has one.
    fn templates(&self) -> Vec<String> {
        self.pages()
            .iter()
            .filter_map(|page| page.template.clone())
            .collect()
    }
}

/// A page after rendering and inlining, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub filename: String,
    pub html: String,
}

/// A build system the phase driver can run end to end.
pub trait BuildHost: EntryDefiner + HtmlCompanion {
    type Output: AssetEmitter;

    fn compile(&mut self) -> InlayResult<Self::Output>;

    /// Renders `page` against the compiled output, before inlining.
    fn render(&self, page: &HtmlPage, output: &Self::Output) -> InlayResult<String>;

    fn emit(&mut self, output: Self::Output, pages: Vec<RenderedPage>) -> InlayResult;
}
