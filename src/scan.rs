//! Directory ingestion: turn a resource folder into sources.
//!
//! Walks a directory tree, keeps files whose extension maps to a known
//! format, and reads them in parallel. Results come back in deterministic
//! path order so merge precedence does not depend on filesystem iteration
//! order. Unreadable or non-UTF-8 files are logged and skipped, matching
//! the per-file tolerance of the parsers.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;
use crate::parsers::{FormatKind, Source};
use crate::registry::ResourceRegistry;

/// Collect every recognized resource file under `dir` as a [`Source`].
pub fn collect_sources(dir: &Path) -> Vec<Source> {
    let candidates: Vec<(PathBuf, FormatKind)> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            FormatKind::from_path(entry.path()).map(|kind| (entry.into_path(), kind))
        })
        .collect();

    candidates
        .par_iter()
        .filter_map(|(path, kind)| match fs::read_to_string(path) {
            Ok(content) => Some(Source::named(
                *kind,
                path.to_string_lossy().into_owned(),
                content,
            )),
            Err(error) => {
                debug!(path = %path.display(), %error, "skipping unreadable file");
                None
            }
        })
        .collect()
}

/// Scan `dir` and load the result as the registry's full state.
pub fn load_dir(registry: &ResourceRegistry, dir: &Path, default_culture: &str) -> Result<()> {
    registry.load(&collect_sources(dir), default_culture)
}

/// Scan `dir` and merge the result into an already-loaded registry.
pub fn add_dir(registry: &ResourceRegistry, dir: &Path) -> Result<()> {
    registry.add_source(&collect_sources(dir))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn populated_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "en-US.json",
            r#"{"language":"English","description":"US","cultureName":"en-US","greeting":"Hello"}"#,
        );
        write(
            dir.path(),
            "zh-CN.xml",
            r#"<lang language="简体中文" description="CN" cultureName="zh-CN"><greeting>你好</greeting></lang>"#,
        );
        write(
            dir.path(),
            "Resources.fr-FR.resx",
            r#"<root><data name="greeting"><value>Bonjour</value></data></root>"#,
        );
        // Files a directory scan must tolerate.
        write(dir.path(), "notes.txt", "not a resource");
        write(dir.path(), "broken.json", "{not json");
        write(dir.path(), "config.json", r#"{"theme":"dark"}"#);
        dir
    }

    #[test]
    fn test_collect_sources_filters_by_extension() {
        let dir = populated_dir();
        let sources = collect_sources(dir.path());
        // txt excluded; broken/config kept here and skipped at parse time.
        assert_eq!(sources.len(), 5);
        let names: Vec<&str> = sources.iter().map(Source::describe).collect();
        assert!(names.iter().all(|name| !name.ends_with(".txt")));
    }

    #[test]
    fn test_collect_sources_is_deterministic() {
        let dir = populated_dir();
        let first: Vec<String> = collect_sources(dir.path())
            .iter()
            .map(|s| s.describe().to_string())
            .collect();
        let second: Vec<String> = collect_sources(dir.path())
            .iter()
            .map(|s| s.describe().to_string())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_dir_ingests_all_formats() {
        let dir = populated_dir();
        let registry = ResourceRegistry::new();
        load_dir(&registry, dir.path(), "en-US").unwrap();

        let cultures = registry.list_cultures().unwrap();
        let ids: Vec<&str> = cultures.iter().map(|c| c.culture_id.as_str()).collect();
        assert_eq!(ids, ["en-US", "fr-FR", "zh-CN"]);

        assert_eq!(
            registry.get_resource("lang.greeting", Some("zh-CN")).unwrap(),
            "你好"
        );
        assert_eq!(
            registry.get_resource("greeting", Some("fr-FR")).unwrap(),
            "Bonjour"
        );
    }

    #[test]
    fn test_add_dir_merges_without_reset() {
        let base = populated_dir();
        let registry = ResourceRegistry::new();
        load_dir(&registry, base.path(), "en-US").unwrap();

        let extra = TempDir::new().unwrap();
        write(
            extra.path(),
            "en-US.overrides.json",
            r#"{"language":"English","description":"US","cultureName":"en-US","greeting":"Howdy"}"#,
        );
        add_dir(&registry, extra.path()).unwrap();

        assert_eq!(registry.get_resource("greeting", None).unwrap(), "Howdy");
    }
}
