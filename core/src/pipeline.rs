//! Drives one build through its phases in order:
//! define entries, compile, render and inline pages, prune, emit.

use crate::host::{BuildHost, RenderedPage};
use crate::plugin::InlinePlugin;
use inlay_shared::InlayResult;
use log::info;
use std::time::Instant;

/// What the inline plugin did during one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Entries added for `?__inline` markers.
    pub registered: usize,
    /// Markers replaced across all pages.
    pub inlined: usize,
    /// Markers left in place because their chunk produced no file.
    pub skipped: usize,
    /// Standalone bundles dropped from the output.
    pub pruned: Vec<String>,
}

pub fn run<H: BuildHost>(plugin: &mut InlinePlugin, host: &mut H) -> InlayResult<BuildReport> {
    let started = Instant::now();
    let mut report = BuildReport {
        registered: plugin.define_entries(host)?,
        ..Default::default()
    };

    let mut output = host.compile()?;

    let mut pages = Vec::with_capacity(host.pages().len());
    for page in host.pages() {
        let mut html = host.render(page, &output)?;

        if let Some(template) = &page.template {
            let substitution = plugin.substitute(template, host.context(), &mut html, &output)?;
            report.inlined += substitution.inlined;
            report.skipped += substitution.skipped;
        }

        pages.push(RenderedPage {
            filename: page.filename.clone(),
            html,
        });
    }

    if !plugin.config().remain_bundle {
        report.pruned = plugin.prune(&mut output);
    }

    host.emit(output, pages)?;

    info!(
        "inlined {} script(s) into {} page(s) in {}ms",
        report.inlined,
        host.pages().len(),
        started.elapsed().as_millis()
    );

    Ok(report)
}
