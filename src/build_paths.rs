//! Post-build fix-up for extension HTML: absolute asset paths (`href="/x"`) do not
//! resolve inside a packaged extension, so they are rewritten to relative ones.

use lazy_static::lazy_static;
use regex::Regex;
use std::error::Error;
use std::fs;
use std::path::Path;

/// HTML files patched when none are named explicitly
pub const DEFAULT_HTML_FILES: [&str; 2] = ["popup.html", "sidepanel.html"];

lazy_static! {
    static ref ABSOLUTE_HREF: Regex = Regex::new(r#"href="/([^"]+)""#).unwrap();
    static ref ABSOLUTE_SRC: Regex = Regex::new(r#"src="/([^"]+)""#).unwrap();
}

/// Rewrites absolute `href`/`src` attribute values to relative ones
pub fn fix_paths(html: &str) -> String {
    let html = ABSOLUTE_HREF.replace_all(html, r#"href="./$1""#);
    ABSOLUTE_SRC.replace_all(&html, r#"src="./$1""#).into_owned()
}

/// Patches one file in place, returning whether it changed. A missing file is
/// reported and skipped.
pub fn fix_file(path: &Path) -> Result<bool, std::io::Error> {
    if !path.exists() {
        ::log::warn!("File not found: {}", path.display());
        return Ok(false);
    }

    let original = fs::read_to_string(path)?;
    let fixed = fix_paths(&original);

    if fixed == original {
        ::log::info!("No changes needed: {}", path.display());
        return Ok(false);
    }

    fs::write(path, fixed)?;
    ::log::info!("Fixed paths in: {}", path.display());
    Ok(true)
}

/// Patches the named files inside a build directory, returning how many changed
pub fn fix_build_dir<S: AsRef<str>>(dir: &Path, files: &[S]) -> Result<usize, Box<dyn Error>> {
    if !dir.is_dir() {
        return Err(format!("Build directory not found: {}", dir.display()).into());
    }

    let mut fixed = 0;
    for file in files {
        if fix_file(&dir.join(file.as_ref()))? {
            fixed += 1;
        }
    }

    ::log::info!("Fixed {} file(s) in {}", fixed, dir.display());
    Ok(fixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_paths() {
        let html = r#"<link href="/sidepanel.3f2a.css" rel="stylesheet"><script src="/sidepanel.js"></script><a href="https://example.com">x</a>"#;
        assert_eq!(
            fix_paths(html),
            r#"<link href="./sidepanel.3f2a.css" rel="stylesheet"><script src="./sidepanel.js"></script><a href="https://example.com">x</a>"#
        );
    }

    #[test]
    fn test_relative_paths_are_untouched() {
        let html = r#"<img src="./icon.png"><link href="style.css">"#;
        assert_eq!(fix_paths(html), html);
    }

    #[test]
    fn test_fix_build_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("popup.html"),
            r#"<script src="/popup.js"></script>"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("sidepanel.html"),
            r#"<script src="./sidepanel.js"></script>"#,
        )
        .unwrap();

        let fixed = fix_build_dir(dir.path(), &DEFAULT_HTML_FILES).unwrap();
        assert_eq!(fixed, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("popup.html")).unwrap(),
            r#"<script src="./popup.js"></script>"#
        );

        // Second run finds nothing left to change
        assert_eq!(fix_build_dir(dir.path(), &DEFAULT_HTML_FILES).unwrap(), 0);
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!fix_file(&dir.path().join("popup.html")).unwrap());
        assert_eq!(fix_build_dir(dir.path(), &["popup.html"]).unwrap(), 0);
    }

    #[test]
    fn test_missing_build_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(fix_build_dir(&dir.path().join("chrome-mv3-prod"), &DEFAULT_HTML_FILES).is_err());
    }
}
