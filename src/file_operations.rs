use filetime::{set_file_times, FileTime};
use indicatif::ProgressBar;
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::checks::CopyPlan;
use crate::error::CopyError;
use crate::progress_bar::create_progress_bar;

const DEFAULT_BUF_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct CopyOptions {
    pub verify: bool,
    pub show_progress: bool,
    pub dry_run: bool,
    pub buf_size: usize,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            verify: false,
            show_progress: false,
            dry_run: false,
            buf_size: DEFAULT_BUF_SIZE,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CopyReport {
    /// Destination paths of copied files, in walk order
    pub files: Vec<PathBuf>,
    /// Destination directories, the destination root first
    pub directories: Vec<PathBuf>,
    pub bytes: u64,
}

/// Recursively copies `plan.source` into `plan.destination`, which must not exist yet.
///
/// Nothing is created when the source is not a directory. Any later failure
/// stops the copy and leaves what was already written in place.
pub fn copy_tree(plan: &CopyPlan, options: &CopyOptions) -> Result<CopyReport, CopyError> {
    if !plan.source.is_dir() {
        return Err(CopyError::NotADirectory(plan.source.clone()));
    }

    let entries = WalkDir::new(&plan.source)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    let total_size: u64 = entries
        .iter()
        .filter(|e| e.file_type().is_file())
        .map(|e| e.metadata().map(|m| m.len()).unwrap_or(0))
        .sum();

    info!(
        "copying {} entries ({} bytes) from {} to {}",
        entries.len(),
        total_size,
        plan.source.display(),
        plan.destination.display()
    );

    let progress_bar = create_progress_bar(total_size, options.show_progress && !options.dry_run);
    let mut report = CopyReport::default();

    for entry in &entries {
        let relative_path = entry
            .path()
            .strip_prefix(&plan.source)
            .unwrap_or(entry.path());
        let destination_path = plan.destination.join(relative_path);

        if entry.file_type().is_dir() {
            if options.dry_run {
                debug!("would create {}", destination_path.display());
            } else {
                fs::create_dir(&destination_path).map_err(CopyError::io(&destination_path))?;
                debug!("created {}", destination_path.display());
            }

            report.directories.push(destination_path);
        } else {
            progress_bar.set_message(relative_path.display().to_string());

            report.bytes += if options.dry_run {
                debug!("would copy {} -> {}", entry.path().display(), destination_path.display());
                entry.metadata()?.len()
            } else {
                let bytes = copy_file(entry, &destination_path, options, &progress_bar)?;
                debug!("copied {} -> {}", entry.path().display(), destination_path.display());
                bytes
            };

            report.files.push(destination_path);
        }
    }

    progress_bar.finish_and_clear();

    Ok(report)
}

fn copy_file(
    entry: &DirEntry,
    destination: &Path,
    options: &CopyOptions,
    progress_bar: &ProgressBar,
) -> Result<u64, CopyError> {
    let src = entry.path();
    let mut src_file = File::open(src).map_err(CopyError::io(src))?;
    let metadata = src_file.metadata().map_err(CopyError::io(src))?;

    let mut dest_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)
        .map_err(CopyError::io(destination))?;

    let mut buffer = vec![0; options.buf_size.max(1)];
    let mut bytes_copied = 0;

    loop {
        let bytes_read = src_file.read(&mut buffer).map_err(CopyError::io(src))?;

        if bytes_read == 0 {
            break;
        }

        dest_file
            .write_all(&buffer[..bytes_read])
            .map_err(CopyError::io(destination))?;
        bytes_copied += bytes_read as u64;
        progress_bar.inc(bytes_read as u64);
    }

    dest_file.flush().map_err(CopyError::io(destination))?;
    drop(dest_file);

    fs::set_permissions(destination, metadata.permissions()).map_err(CopyError::io(destination))?;

    let accessed = metadata.accessed().map_err(CopyError::io(src))?;
    let modified = metadata.modified().map_err(CopyError::io(src))?;
    set_file_times(
        destination,
        FileTime::from_system_time(accessed),
        FileTime::from_system_time(modified),
    )
    .map_err(CopyError::io(destination))?;

    if options.verify {
        verify_copy(src, destination)?;
    }

    Ok(bytes_copied)
}

fn hash_file(path: &Path) -> Result<blake3::Hash, CopyError> {
    let file = File::open(path).map_err(CopyError::io(path))?;
    let mut hasher = blake3::Hasher::new();
    hasher.update_reader(file).map_err(CopyError::io(path))?;

    Ok(hasher.finalize())
}

pub fn verify_copy(original: &Path, copy: &Path) -> Result<(), CopyError> {
    if hash_file(original)? == hash_file(copy)? {
        Ok(())
    } else {
        Err(CopyError::Verification {
            original: original.to_path_buf(),
            copy: copy.to_path_buf(),
        })
    }
}
