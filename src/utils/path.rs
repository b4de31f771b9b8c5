//! Path helpers for input inspection and output naming

use std::path::{Path, PathBuf};

/// Suffix appended to the input stem when no output path is given
pub const OUTPUT_SUFFIX: &str = "_subtitled";

/// Get the file extension in lowercase, without the leading dot
pub fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Get file stem (name without extension)
pub fn file_stem_string(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
}

/// Derive `<stem>_subtitled<ext>` next to the input video
pub fn derive_output_path(video_path: &Path) -> PathBuf {
    let stem = file_stem_string(video_path).unwrap_or_default();
    let extension = video_path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let file_name = format!("{}{}{}", stem, OUTPUT_SUFFIX, extension);

    match video_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

/// Compare two paths by what they point to, falling back to the literal path
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_output_path_same_directory() {
        assert_eq!(
            derive_output_path(Path::new("video.mp4")),
            PathBuf::from("video_subtitled.mp4")
        );
    }

    #[test]
    fn test_derive_output_path_keeps_parent_and_case() {
        assert_eq!(
            derive_output_path(Path::new("media/Show S01E01.MKV")),
            PathBuf::from("media/Show S01E01_subtitled.MKV")
        );
    }

    #[test]
    fn test_lowercase_extension() {
        assert_eq!(lowercase_extension(Path::new("a.SRT")), Some("srt".to_string()));
        assert_eq!(lowercase_extension(Path::new("a")), None);
    }

    #[test]
    fn test_same_file_without_existing_paths() {
        assert!(same_file(Path::new("nope/a.mp4"), Path::new("nope/a.mp4")));
        assert!(!same_file(Path::new("nope/a.mp4"), Path::new("nope/b.mp4")));
    }
}
