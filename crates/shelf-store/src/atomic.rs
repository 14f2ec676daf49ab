use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::StoreResult;

/// Replace the file at `path` with `contents` in one step.
///
/// The bytes go to a temporary file in the same directory which is then
/// renamed over the target, so readers see either the old or the new
/// collection, never a torn write. Missing parent directories are created.
pub(crate) fn replace_file(path: &Path, contents: &[u8]) -> StoreResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), bytes = contents.len(), "catalog file replaced");
    Ok(())
}
