mod cli;
mod logger;
mod manifest;

use crate::cli::{Cli, Commands};
use crate::logger::LOGGER;
use crate::manifest::BuildManifest;
use clap::Parser;
use inlay_core::rolldown::RolldownHost;
use inlay_core::{InlineConfig, InlinePlugin};
use inlay_shared::{InlayError, InlayResult, canonicalize_with_strip};
use log::{LevelFilter, info};

#[tokio::main]
async fn main() -> InlayResult {
    let cli = Cli::parse();

    // Map verbosity count (-v, -vv) to log levels
    let log_level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(log_level))
        .expect("Failed to set logger");

    match cli.command {
        Commands::Build {
            root,
            config,
            out_dir,
            context,
            remain_bundle,
        } => {
            let root = canonicalize_with_strip(&root)
                .map_err(|_| InlayError::FileNotFound(root.display().to_string()))?;
            let manifest = BuildManifest::load(root.join(&config))?;

            info!(target: "inlay", "building {}", root.display());

            let mut inline = InlineConfig::from(manifest.inline);
            inline.context = match context {
                Some(context) => Some(canonicalize_with_strip(context)?),
                None => inline.context.map(|context| root.join(context)),
            };
            if remain_bundle {
                inline = inline.with_remain_bundle(true);
            }

            let mut host = RolldownHost::new(root)
                .with_entries(manifest.entry)
                .with_pages(manifest.pages)
                .with_public_path(manifest.public_path.unwrap_or_default());
            if let Some(out_dir) = out_dir.or(manifest.out_dir) {
                host = host.with_out_dir(out_dir);
            }

            let mut plugin = InlinePlugin::new(Some(&host), inline)?;
            let report = inlay_core::run(&mut plugin, &mut host)?;

            if report.skipped > 0 {
                log::warn!(
                    target: "inlay",
                    "{} marker(s) were left in place, their chunks produced no output",
                    report.skipped
                );
            }
            info!(
                target: "inlay",
                "wrote {} ({} entries registered, {} bundles pruned)",
                host.out_dir().display(),
                report.registered,
                report.pruned.len()
            );

            Ok(())
        }
    }
}
