use crate::domain::TrackOption;
use std::path::{Path, PathBuf};

const SUBTITLE_EXTENSIONS: [&str; 3] = ["srt", "vtt", "ass"];

/// Find subtitle files sitting next to `source`.
///
/// `movie.mp4` picks up `movie.srt`, `movie.en.srt`, `movie.forced.vtt` and so
/// on. Options come back sorted by file name with ids starting at 1.
pub fn discover_subtitles(source: &Path) -> Vec<TrackOption> {
    let (Some(dir), Some(stem)) = (source.parent(), source.file_stem()) else {
        return Vec::new();
    };
    let stem = stem.to_string_lossy();

    let Ok(entries) = dir.read_dir() else {
        return Vec::new();
    };

    let mut found: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| is_subtitle_for(p, &stem))
        .collect();
    found.sort();

    found
        .iter()
        .enumerate()
        .map(|(idx, path)| TrackOption::new(idx as u64 + 1, label_for(path, &stem)))
        .collect()
}

fn is_subtitle_for(path: &Path, stem: &str) -> bool {
    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SUBTITLE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));

    let name_ok = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .is_some_and(|s| s == stem || s.starts_with(&format!("{stem}.")));

    ext_ok && name_ok
}

fn label_for(path: &Path, stem: &str) -> String {
    let file_stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let tag = file_stem
        .strip_prefix(stem)
        .map(|rest| rest.trim_start_matches('.'))
        .unwrap_or_default();

    match tag {
        "" => "Default".to_string(),
        t => language_name(t),
    }
}

fn language_name(tag: &str) -> String {
    let name = match tag.to_ascii_lowercase().as_str() {
        "en" | "eng" => "English",
        "es" | "spa" => "Spanish",
        "fr" | "fre" | "fra" => "French",
        "de" | "ger" | "deu" => "German",
        "it" | "ita" => "Italian",
        "ja" | "jpn" => "Japanese",
        "pt" | "por" => "Portuguese",
        _ => return tag.to_string(),
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn finds_matching_sidecars_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "movie.mp4");
        touch(dir.path(), "movie.srt");
        touch(dir.path(), "movie.fr.srt");
        touch(dir.path(), "movie.en.vtt");

        let options = discover_subtitles(&dir.path().join("movie.mp4"));
        let names: Vec<_> = options.iter().map(|o| o.display_name.as_str()).collect();

        assert_eq!(names, ["English", "French", "Default"]);
        assert_eq!(options[0].id, 1);
        assert_eq!(options[2].id, 3);
    }

    #[test]
    fn ignores_other_media_and_unrelated_subtitles() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "movie.mp4");
        touch(dir.path(), "movie.nfo");
        touch(dir.path(), "movies.srt");
        touch(dir.path(), "other.en.srt");

        assert!(discover_subtitles(&dir.path().join("movie.mp4")).is_empty());
    }

    #[test]
    fn unknown_language_tags_are_kept_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "clip.mkv");
        touch(dir.path(), "clip.forced.ASS");

        let options = discover_subtitles(&dir.path().join("clip.mkv"));
        assert_eq!(options, vec![TrackOption::new(1, "forced")]);
    }

    #[test]
    fn missing_directory_yields_nothing() {
        assert!(discover_subtitles(Path::new("/no/such/dir/movie.mp4")).is_empty());
    }
}
