//! Test fixture helpers for creating static sites
//!
//! Provides utilities for setting up a project root with a `src/` folder
//! holding the default asset manifest, plus optional configuration.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// A well-formed page referencing the other default assets
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Fixture</title>
    <link rel="stylesheet" href="styles.css">
  </head>
  <body>
    <img src="logo.svg" alt="logo">
    <main id="app"></main>
    <script src="index.js"></script>
  </body>
</html>
"#;

/// Script asset
pub const INDEX_JS: &str = "document.getElementById('app').textContent = 'Hello';\n";

/// Stylesheet asset
pub const STYLES_CSS: &str = "body { margin: 0; font-family: sans-serif; }\n";

/// Image asset
pub const LOGO_SVG: &str =
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16"><circle cx="8" cy="8" r="8"/></svg>"#;

/// Creates a site with the given files under `src/`
///
/// # Returns
///
/// The TempDir holding the project root; it must be kept alive
pub fn create_site(files: &[(&str, &str)]) -> anyhow::Result<TempDir> {
    let temp_dir = TempDir::new()?;
    let src_dir = temp_dir.path().join("src");
    fs::create_dir_all(&src_dir)?;

    for (name, content) in files {
        let path = src_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }

    Ok(temp_dir)
}

/// Creates a site holding the four default manifest assets
pub fn create_default_site() -> anyhow::Result<TempDir> {
    create_site(&[
        ("index.html", INDEX_HTML),
        ("index.js", INDEX_JS),
        ("styles.css", STYLES_CSS),
        ("logo.svg", LOGO_SVG),
    ])
}

/// Writes `sizesnap.toml` into the project root
pub fn write_config(project_root: &Path, contents: &str) -> anyhow::Result<()> {
    fs::write(project_root.join("sizesnap.toml"), contents)?;
    Ok(())
}

/// Appends to a source asset, growing the next build
pub fn grow_asset(project_root: &Path, name: &str, extra: &str) -> anyhow::Result<()> {
    let path = project_root.join("src").join(name);
    let mut content = fs::read_to_string(&path)?;
    content.push_str(extra);
    fs::write(path, content)?;
    Ok(())
}
