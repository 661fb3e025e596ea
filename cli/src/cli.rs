use clap::builder::styling::{AnsiColor, Effects};
use clap::builder::Styles;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inlay")]
#[command(about = "Inline marked scripts into HTML pages at build time")]
#[command(
    long_about = "inlay: bundles the pages' entries with rolldown and replaces every \
    <script src=\"...?__inline\"> tag with the compiled code (or the source, for ?__inline_raw)"
)]
#[command(version)]
#[command(author)]
#[command(styles = get_styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bundle entries, inline marked scripts and write the output directory
    Build {
        /// Project root; entries, templates and bare script URLs resolve against it
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Build manifest, relative to the root
        #[arg(short, long, default_value = "inlay.json")]
        config: PathBuf,

        /// Output directory relative to the root, overrides the manifest's `outDir`
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Directory bare marker URLs resolve against, overrides the manifest's `inline.context`
        #[arg(long)]
        context: Option<PathBuf>,

        /// Keep the standalone bundles of inlined scripts
        #[arg(long)]
        remain_bundle: bool,
    },
}

fn get_styles() -> Styles {
    Styles::styled()
        .usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Cyan.on_default())
        .invalid(AnsiColor::Red.on_default() | Effects::BOLD)
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
        .valid(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build_flags() {
        let cli = Cli::parse_from([
            "inlay",
            "build",
            "--root",
            "site",
            "--remain-bundle",
            "-vv",
        ]);

        assert_eq!(cli.verbose, 2);
        let Commands::Build {
            root,
            config,
            out_dir,
            context,
            remain_bundle,
        } = cli.command;
        assert_eq!(root, PathBuf::from("site"));
        assert_eq!(config, PathBuf::from("inlay.json"));
        assert!(out_dir.is_none());
        assert!(context.is_none());
        assert!(remain_bundle);
    }
}
