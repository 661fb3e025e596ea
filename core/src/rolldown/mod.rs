//! A [`BuildHost`] backed by the rolldown bundler.

use crate::host::{
    BuildHost, Compilation, EntryDefiner, EntrySet, HtmlCompanion, HtmlPage, RenderedPage,
};
use crate::html::render_page;
use crate::plugin::INLINE_CHUNK_PREFIX;
use anyhow::anyhow;
use inlay_shared::{InlayError, InlayResult};
use log::debug;
use ::rolldown::{Bundler, BundlerOptions};
use rolldown_common::{InputItem, Output, OutputFormat};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::task::block_in_place;

pub struct RolldownHost {
    root: PathBuf,
    out_dir: PathBuf,
    entries: EntrySet,
    pages: Vec<HtmlPage>,
    public_path: String,
}

impl RolldownHost {
    /// Creates a host rooted at `root`, writing to `root/dist`.
    pub fn new(root: PathBuf) -> Self {
        Self {
            out_dir: root.join("dist"),
            root,
            entries: EntrySet::default(),
            pages: Vec::new(),
            public_path: String::new(),
        }
    }

    #[inline(always)]
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    #[inline(always)]
    pub fn out_dir(&self) -> &PathBuf {
        &self.out_dir
    }

    #[must_use]
    pub fn with_out_dir(mut self, out_dir: PathBuf) -> Self {
        self.out_dir = if out_dir.is_absolute() {
            out_dir
        } else {
            self.root.join(out_dir)
        };
        self
    }

    #[must_use]
    pub fn with_entries(mut self, entries: EntrySet) -> Self {
        self.entries = entries;
        self
    }

    #[must_use]
    pub fn with_pages(mut self, pages: Vec<HtmlPage>) -> Self {
        self.pages = pages;
        self
    }

    /// Prefix for `<script src>` URLs injected into pages.
    #[must_use]
    pub fn with_public_path(mut self, public_path: impl Into<String>) -> Self {
        self.public_path = public_path.into();
        self
    }

    /// Rolldown input items for the current entry set.
    pub fn input_items(&self) -> InlayResult<Vec<InputItem>> {
        let items = match &self.entries {
            EntrySet::Single(import) => vec![InputItem {
                name: None,
                import: import.clone(),
            }],
            EntrySet::List(imports) => imports
                .iter()
                .map(|import| InputItem {
                    name: None,
                    import: import.clone(),
                })
                .collect(),
            EntrySet::Named(entries) => {
                let mut items = Vec::with_capacity(entries.len());
                for (name, entry) in entries {
                    let imports = entry.imports();
                    let [import] = imports.as_slice() else {
                        return Err(anyhow!(
                            "entry '{}' must have exactly one import for rolldown",
                            name
                        )
                        .into());
                    };
                    items.push(InputItem {
                        name: Some(name.clone()),
                        import: import.to_string(),
                    });
                }
                items
            }
        };

        Ok(items)
    }

    /// Runs one rolldown build over `input` and records its files in `compilation`.
    fn bundle(
        &self,
        input: Vec<InputItem>,
        format: OutputFormat,
        compilation: &mut Compilation,
    ) -> InlayResult {
        block_in_place(|| {
            Handle::current().block_on(async move {
                let started = Instant::now();
                let bundler_options = BundlerOptions {
                    input: Some(input),
                    cwd: Some(self.root.clone()),
                    format: Some(format),
                    ..Default::default()
                };

                let mut bundler = Bundler::new(bundler_options).map_err(InlayError::RolldownError)?;
                let result = bundler.generate().await.map_err(InlayError::RolldownError)?;

                for output in &result.assets {
                    let filename = output.filename().to_string();
                    let source = String::from_utf8(output.content_as_bytes().to_vec())?;
                    tracing::trace!("rolldown produced {}", filename);

                    match output {
                        Output::Chunk(chunk) => {
                            compilation.add_chunk_file(&chunk.name, filename, source)
                        }
                        _ => compilation.add_asset(filename, source),
                    }
                }

                debug!(
                    "Rolldown took {:.2}ms",
                    started.elapsed().as_secs_f64() * 1000.0
                );

                Ok::<_, InlayError>(())
            })
        })
    }
}

fn is_inline_item(item: &InputItem) -> bool {
    item.name
        .as_deref()
        .is_some_and(|name| name.starts_with(INLINE_CHUNK_PREFIX))
}

impl EntryDefiner for RolldownHost {
    fn context(&self) -> &Path {
        &self.root
    }

    fn entries_mut(&mut self) -> &mut EntrySet {
        &mut self.entries
    }
}

impl HtmlCompanion for RolldownHost {
    fn pages(&self) -> &[HtmlPage] {
        &self.pages
    }
}

impl BuildHost for RolldownHost {
    type Output = Compilation;

    /// Page entries share one ESM build. Every inline entry is built alone as an IIFE so
    /// its output never imports another chunk.
    fn compile(&mut self) -> InlayResult<Compilation> {
        let (inline, pages): (Vec<InputItem>, Vec<InputItem>) = self
            .input_items()?
            .into_iter()
            .partition(is_inline_item);
        debug!("bundling {} page and {} inline entries", pages.len(), inline.len());

        let mut compilation = Compilation::new();
        if !pages.is_empty() {
            self.bundle(pages, OutputFormat::Esm, &mut compilation)?;
        }
        for item in inline {
            self.bundle(vec![item], OutputFormat::Iife, &mut compilation)?;
        }

        Ok(compilation)
    }

    fn render(&self, page: &HtmlPage, output: &Compilation) -> InlayResult<String> {
        render_page(page, &self.root, output.chunks(), output, &self.public_path)
    }

    fn emit(&mut self, output: Compilation, pages: Vec<RenderedPage>) -> InlayResult {
        let files = output
            .into_assets()
            .into_iter()
            .chain(pages.into_iter().map(|page| (page.filename, page.html)));

        for (filename, content) in files {
            let path = self.out_dir.join(&filename);
            if let Some(parent) = path.parent() {
                fs_err::create_dir_all(parent)?;
            }
            fs_err::write(&path, content)?;
            debug!("wrote {}", path.display());
        }

        Ok(())
    }
}
