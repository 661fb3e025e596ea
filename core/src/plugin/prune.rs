use super::InlinePlugin;
use crate::host::AssetEmitter;
use log::debug;

impl InlinePlugin {
    /// Drops the standalone bundle of every inlined chunk from `output`.
    ///
    /// Must only run once every page has been substituted, the content is gone afterwards.
    /// Returns the removed file names.
    pub fn prune<O: AssetEmitter + ?Sized>(&self, output: &mut O) -> Vec<String> {
        let bundles: Vec<String> = self
            .inline_assets
            .values()
            .flatten()
            .filter_map(|asset| output.bundle_for_chunk(&asset.chunk).map(str::to_string))
            .collect();

        let mut removed = Vec::with_capacity(bundles.len());
        for bundle in bundles {
            if output.remove_asset(&bundle) {
                debug!("pruned {}", bundle);
                removed.push(bundle);
            }
        }

        removed.sort();
        removed
    }
}
