use std::path::{Path, PathBuf};
use std::io;

/// List the regular files directly inside `dir` whose extension matches.
///
/// A missing directory yields an empty list.
pub async fn list_files_with_extension(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(result),
        Err(e) => return Err(e),
    };

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_file()
            && path.extension().and_then(|ext| ext.to_str()) == Some(extension)
        {
            result.push(path);
        }
    }
    result.sort();
    Ok(result)
}
