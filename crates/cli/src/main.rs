use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use xml2json_core::{ConvertConfig, SectionIndexer, TreeConverter, DEFAULT_ROOT};

#[derive(Parser)]
#[command(name = "xml2json")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert every XML file under a directory tree to a JSON sibling")]
#[command(long_about = "Recursively walks a directory tree and converts each .xml file to a \
    .json file alongside it, mirroring the XML structure as nested JSON: element tags become \
    keys, attributes become @-prefixed keys, text content becomes string values or #text \
    entries, and repeated sibling elements become arrays.\n\n\
    Existing .json siblings are overwritten. The run stops at the first unreadable or \
    malformed file; artifacts already written stay on disk.")]
pub struct Args {
    /// Root directory to scan
    #[arg(default_value = DEFAULT_ROOT)]
    pub path: PathBuf,

    /// Also write section_index.json mapping section numbers to files
    #[arg(long)]
    pub section_index: bool,

    /// Follow symbolic links during traversal
    #[arg(long)]
    pub follow_links: bool,

    /// Show progress and a completion summary
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ConvertConfig::new(args.path).with_follow_links(args.follow_links);

    // Show progress if verbose
    let spinner = if args.verbose {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Converting tree...");
        Some(pb)
    } else {
        None
    };

    let converter = TreeConverter::new(config.clone());
    let report = converter.run()?;

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Converted {} of {} files in {}ms",
            report.stats.converted, report.stats.total_files, report.metadata.duration_ms
        ));
    }

    if args.section_index {
        let index_path = SectionIndexer::new(config).write()?;
        if args.verbose {
            eprintln!("Section index written to: {}", index_path.display());
        }
    }

    Ok(())
}
