//! Output size measurement

use super::error::PipelineError;
use crate::infra::FileSystem;
use crate::snapshot::{SizeRecord, SizeSnapshot, TOTAL_KEY};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Component, Path};
use walkdir::WalkDir;

const BROTLI_BUFFER_SIZE: usize = 4096;
const BROTLI_QUALITY: u32 = 11;
const BROTLI_WINDOW: u32 = 22;

/// Measure every regular file below `dist_dir`.
///
/// Keys are paths relative to `dist_dir` joined with `/`. The total is the
/// per-metric sum, so an empty directory yields an empty snapshot with a zero
/// total.
pub fn compute_sizes<FS: FileSystem>(
    fs: &FS,
    dist_dir: &Path,
) -> Result<SizeSnapshot, PipelineError> {
    let mut files = BTreeMap::new();

    for entry in WalkDir::new(dist_dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = relative_key(dist_dir, entry.path())?;
        if name == TOTAL_KEY {
            return Err(PipelineError::ReservedName { name });
        }

        let contents = fs.read(entry.path()).map_err(|source| PipelineError::Read {
            path: entry.path().to_path_buf(),
            source,
        })?;
        let record = measure(&contents).map_err(|source| PipelineError::Compress {
            path: entry.path().to_path_buf(),
            source,
        })?;

        log::debug!(
            "{}: raw={} gzip={} brotli={}",
            name,
            record.raw,
            record.gzip,
            record.brotli
        );
        files.insert(name, record);
    }

    Ok(SizeSnapshot::from_files(files))
}

/// Raw, gzip and brotli sizes of one buffer
pub fn measure(contents: &[u8]) -> io::Result<SizeRecord> {
    Ok(SizeRecord {
        raw: contents.len() as u64,
        gzip: gzip_len(contents)?,
        brotli: brotli_len(contents)?,
    })
}

fn gzip_len(contents: &[u8]) -> io::Result<u64> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(contents)?;
    Ok(encoder.finish()?.len() as u64)
}

fn brotli_len(contents: &[u8]) -> io::Result<u64> {
    let mut writer =
        brotli::CompressorWriter::new(Vec::new(), BROTLI_BUFFER_SIZE, BROTLI_QUALITY, BROTLI_WINDOW);
    writer.write_all(contents)?;
    Ok(writer.into_inner().len() as u64)
}

fn relative_key(root: &Path, path: &Path) -> Result<String, PipelineError> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| PipelineError::NonUtf8Name {
            path: path.to_path_buf(),
        })?;
    Ok(parts.join("/"))
}
