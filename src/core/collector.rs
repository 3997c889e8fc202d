use crate::core::block_formatter::{format_file_block, format_read_failure};
use crate::domain::models::{CollectSummary, CollectorConfig, OutputTarget};
use crate::infra::file_system::{
    directory_qualifies, is_collectable_file, matches_extension, read_file_contents,
    relative_display, should_descend, source_walker,
};
use crate::infra::output::OutputWriter;
use anyhow::{Context, bail};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::DirEntry;

/// Walks `config.root` and writes one delimiter block per eligible file to
/// `writer`, finishing it once the tree is exhausted.
///
/// Unreadable files become a one-line notice in the output. Directory
/// listing and write failures abort the run.
pub fn collect(
    config: &CollectorConfig,
    writer: &mut dyn OutputWriter,
) -> anyhow::Result<CollectSummary> {
    if !config.root.is_dir() {
        bail!("Root {} is not a directory", config.root.display());
    }

    info!("Collecting source files in: {}", config.root.display());
    debug!("Include dirs: {:?}", config.include_dirs);
    debug!("Exclude dirs: {:?}", config.exclude_dirs);
    debug!("Extensions: {:?}", config.extensions);

    let own_output = own_output_path(&config.output);
    let mut summary = CollectSummary::default();
    let mut dirs_pruned = 0;

    let walker = source_walker(&config.root).into_iter().filter_entry(|entry| {
        let descend = should_descend(entry, config);
        if !descend {
            dirs_pruned += 1;
        }
        descend
    });

    for entry in walker {
        let entry = entry.with_context(|| {
            format!("Failed to list directory entries under {}", config.root.display())
        })?;

        if !is_collectable_file(&entry) || !is_eligible(&entry, config) {
            continue;
        }

        if is_own_output(&entry, own_output.as_deref()) {
            debug!("Skipping the output file itself: {}", entry.path().display());
            summary.files_skipped += 1;
            continue;
        }

        let relative = relative_display(entry.path(), &config.root);
        let chunk = match read_file_contents(entry.path()) {
            Ok(contents) => {
                debug!("Adding file {}", relative);
                summary.files_written += 1;
                format_file_block(&relative, &contents)
            }
            Err(e) => {
                warn!("Could not read file {}: {}", relative, e);
                summary.files_failed += 1;
                format_read_failure(&relative, e)
            }
        };

        writer.write(&chunk)?;
        summary.bytes_written += chunk.len();
    }

    writer.finish()?;
    summary.dirs_pruned = dirs_pruned;

    info!(
        "Collected {} files ({} unreadable, {} skipped, {} directories pruned)",
        summary.files_written, summary.files_failed, summary.files_skipped, summary.dirs_pruned
    );
    Ok(summary)
}

fn is_eligible(entry: &DirEntry, config: &CollectorConfig) -> bool {
    let name = entry.file_name().to_string_lossy();
    if !matches_extension(&name, &config.extensions) {
        return false;
    }

    let relative = entry.path().strip_prefix(&config.root).unwrap_or(entry.path());
    let parent = relative.parent().unwrap_or(Path::new(""));
    directory_qualifies(parent, &config.include_dirs)
}

fn own_output_path(target: &OutputTarget) -> Option<PathBuf> {
    match target {
        OutputTarget::File(path) => fs::canonicalize(path).ok(),
        OutputTarget::Stdout => None,
    }
}

fn is_own_output(entry: &DirEntry, own_output: Option<&Path>) -> bool {
    let Some(own_output) = own_output else {
        return false;
    };

    if own_output.file_name() != Some(entry.file_name()) {
        return false;
    }

    fs::canonicalize(entry.path())
        .map(|path| path == own_output)
        .unwrap_or(false)
}
