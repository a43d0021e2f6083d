//! Site Assembler: embeds the collected posts JSON into an HTML template.
//!
//! The template carries one placeholder statement whose empty-array literal
//! is replaced by the serialized post array; every other byte of the
//! template passes through unchanged.

use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Exact placeholder statement expected in the template.
pub const PLACEHOLDER: &str = "const POSTS_DATA = []; // DATA_PLACEHOLDER";

/// Whitespace-tolerant form of the placeholder statement; the trailing
/// comment is optional.
static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"const POSTS_DATA\s*=\s*\[\];(\s*//\s*DATA_PLACEHOLDER)?")
        .expect("Invalid placeholder regex")
});

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("posts file not found: {0}")]
    MissingPosts(PathBuf),
    #[error("template file not found: {0}")]
    MissingTemplate(PathBuf),
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode posts JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("POSTS_DATA placeholder not found in template")]
    PlaceholderNotFound,
}

/// Build the final page from the posts document and the template, writing it
/// to `output_path`. Returns the number of embedded posts.
///
/// # Errors
///
/// Fails without writing any output when an input file is missing, the posts
/// document is not a valid JSON array, or the placeholder cannot be located.
pub fn assemble(
    posts_path: &Path,
    template_path: &Path,
    output_path: &Path,
) -> Result<usize, SiteError> {
    if !posts_path.exists() {
        return Err(SiteError::MissingPosts(posts_path.to_path_buf()));
    }
    if !template_path.exists() {
        return Err(SiteError::MissingTemplate(template_path.to_path_buf()));
    }

    let raw = std::fs::read_to_string(posts_path).map_err(|source| SiteError::Read {
        path: posts_path.to_path_buf(),
        source,
    })?;
    let posts: Vec<serde_json::Value> = serde_json::from_str(&raw)?;

    let template = std::fs::read_to_string(template_path).map_err(|source| SiteError::Read {
        path: template_path.to_path_buf(),
        source,
    })?;

    let replacement = format!("const POSTS_DATA = {};", embedded_json(&posts)?);
    let html = if template.contains(PLACEHOLDER) {
        template.replace(PLACEHOLDER, &replacement)
    } else if PLACEHOLDER_RE.is_match(&template) {
        PLACEHOLDER_RE
            .replace(&template, regex::NoExpand(&replacement))
            .into_owned()
    } else {
        return Err(SiteError::PlaceholderNotFound);
    };

    std::fs::write(output_path, html).map_err(|source| SiteError::Write {
        path: output_path.to_path_buf(),
        source,
    })?;

    Ok(posts.len())
}

/// Serialize the posts in the embedded wire shape: single line, `", "` after
/// each element and `": "` after each key, non-ASCII left unescaped.
fn embedded_json(posts: &[serde_json::Value]) -> Result<String, SiteError> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    posts.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf).expect("serde_json produces valid UTF-8"))
}

/// Compact JSON formatter with a space after separators, matching the output
/// shape the showcase page was built against.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = concat!(
        "<html><head><title>Showcase</title></head>\n",
        "<body><script>\n",
        "const POSTS_DATA = []; // DATA_PLACEHOLDER\n",
        "render(POSTS_DATA);\n",
        "</script></body></html>\n"
    );

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_round_trip_exact_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let posts = write_file(dir.path(), "posts.json", r#"[{"id":1}]"#);
        let template = write_file(dir.path(), "template.html", TEMPLATE);
        let output = dir.path().join("index.html");

        let count = assemble(&posts, &template, &output).unwrap();
        assert_eq!(count, 1);

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains(r#"const POSTS_DATA = [{"id": 1}];"#));
        // Everything outside the placeholder line is byte-identical.
        assert_eq!(
            html.replace(r#"const POSTS_DATA = [{"id": 1}];"#, PLACEHOLDER),
            TEMPLATE
        );
    }

    #[test]
    fn test_whitespace_tolerant_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let posts = write_file(dir.path(), "posts.json", "[]");
        let template = write_file(
            dir.path(),
            "template.html",
            "<script>const POSTS_DATA  =  [];   //  DATA_PLACEHOLDER</script>",
        );
        let output = dir.path().join("index.html");

        let count = assemble(&posts, &template, &output).unwrap();
        assert_eq!(count, 0);
        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("const POSTS_DATA = [];"));
        assert!(!html.contains("DATA_PLACEHOLDER"));
    }

    #[test]
    fn test_placeholder_without_comment() {
        let dir = tempfile::tempdir().unwrap();
        let posts = write_file(dir.path(), "posts.json", r#"[{"id":7}]"#);
        let template = write_file(
            dir.path(),
            "template.html",
            "<script>const POSTS_DATA = [];</script>",
        );
        let output = dir.path().join("index.html");

        assemble(&posts, &template, &output).unwrap();
        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains(r#"const POSTS_DATA = [{"id": 7}];"#));
    }

    #[test]
    fn test_missing_posts_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_file(dir.path(), "template.html", TEMPLATE);
        let output = dir.path().join("index.html");

        let result = assemble(&dir.path().join("absent.json"), &template, &output);
        assert!(matches!(result, Err(SiteError::MissingPosts(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_template_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let posts = write_file(dir.path(), "posts.json", "[]");
        let output = dir.path().join("index.html");

        let result = assemble(&posts, &dir.path().join("absent.html"), &output);
        assert!(matches!(result, Err(SiteError::MissingTemplate(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let posts = write_file(dir.path(), "posts.json", "{not json");
        let template = write_file(dir.path(), "template.html", TEMPLATE);
        let output = dir.path().join("index.html");

        let result = assemble(&posts, &template, &output);
        assert!(matches!(result, Err(SiteError::Decode(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_unlocatable_placeholder_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let posts = write_file(dir.path(), "posts.json", "[]");
        let template = write_file(dir.path(), "template.html", "<html>no marker</html>");
        let output = dir.path().join("index.html");

        let result = assemble(&posts, &template, &output);
        assert!(matches!(result, Err(SiteError::PlaceholderNotFound)));
        assert!(!output.exists());
    }

    #[test]
    fn test_embedded_json_spacing_and_unicode() {
        let posts: Vec<serde_json::Value> =
            serde_json::from_str(r#"[{"id": 1, "tags": ["Café", "Math"]}]"#).unwrap();
        let json = embedded_json(&posts).unwrap();
        assert_eq!(json, r#"[{"id": 1, "tags": ["Café", "Math"]}]"#);
    }

    #[test]
    fn test_embedded_json_dollar_signs_survive_regex_path() {
        let dir = tempfile::tempdir().unwrap();
        let posts = write_file(dir.path(), "posts.json", r#"[{"content":"costs $5"}]"#);
        let template = write_file(
            dir.path(),
            "template.html",
            "<script>const POSTS_DATA =  []; // DATA_PLACEHOLDER</script>",
        );
        let output = dir.path().join("index.html");

        assemble(&posts, &template, &output).unwrap();
        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains(r#"costs $5"#));
    }
}
