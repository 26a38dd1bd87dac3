//! Page assembly: embed converted markdown into an HTML template.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::TemplateConfig;
use crate::error::PageError;

/// Return the text of the first `# ` line that has any.
pub fn extract_title(markdown: &str) -> Result<String, PageError> {
    markdown
        .split('\n')
        .filter_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .find(|title| !title.is_empty())
        .map(str::to_owned)
        .ok_or(PageError::TitleNotFound)
}

/// Render one markdown document into `template`.
///
/// Root-relative `href="/` and `src="/` references anywhere in the result are
/// rewritten to start with `basepath`.
pub fn render_page(
    markdown: &str,
    template: &str,
    basepath: &str,
    placeholders: &TemplateConfig,
) -> Result<String, PageError> {
    let content = crate::markdown_to_html(markdown)?;
    let title = extract_title(markdown)?;

    let page = template
        .replace(&placeholders.title_placeholder, &title)
        .replace(&placeholders.content_placeholder, &content)
        .replace("href=\"/", &format!("href=\"{basepath}"))
        .replace("src=\"/", &format!("src=\"{basepath}"));
    Ok(page)
}

/// Generate a single page from `from` into `dest`.
pub fn generate_page(
    from: &Path,
    template_path: &Path,
    dest: &Path,
    basepath: &str,
    placeholders: &TemplateConfig,
) -> Result<(), PageError> {
    let template = read(template_path)?;
    write_page(from, &template, dest, basepath, placeholders)
}

/// Generate a page for every `.md` file under `content_dir`, mirroring the
/// directory layout under `dest_dir` with `.html` extensions.
///
/// Returns the number of pages written.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
    basepath: &str,
    placeholders: &TemplateConfig,
) -> Result<usize, PageError> {
    if !content_dir.exists() {
        tracing::warn!(path = %content_dir.display(), "Content directory does not exist");
        return Ok(0);
    }

    let template = read(template_path)?;
    let mut sources = Vec::new();
    collect_markdown(content_dir, &mut sources)?;
    sources.sort();
    tracing::debug!(count = sources.len(), "Found markdown sources");

    let results: Vec<Result<(), PageError>> = sources
        .par_iter()
        .map(|from| {
            let relative = from.strip_prefix(content_dir).unwrap_or(from);
            let dest = dest_dir.join(relative).with_extension("html");
            write_page(from, &template, &dest, basepath, placeholders)
        })
        .collect();

    for result in results {
        result?;
    }
    Ok(sources.len())
}

fn write_page(
    from: &Path,
    template: &str,
    dest: &Path,
    basepath: &str,
    placeholders: &TemplateConfig,
) -> Result<(), PageError> {
    let markdown = read(from)?;
    let page = render_page(&markdown, template, basepath, placeholders).map_err(|e| match e {
        PageError::Markdown(source) => PageError::Convert {
            path: from.to_path_buf(),
            source,
        },
        PageError::TitleNotFound => PageError::Untitled {
            path: from.to_path_buf(),
        },
        other => other,
    })?;

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tracing::debug!(path = %parent.display(), "Creating directory");
            fs::create_dir_all(parent).map_err(|e| PageError::io(parent, e))?;
        }
    }
    fs::write(dest, page).map_err(|e| PageError::io(dest, e))?;

    tracing::info!(from = %from.display(), dest = %dest.display(), "Generated page");
    Ok(())
}

fn collect_markdown(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), PageError> {
    let entries = fs::read_dir(dir).map_err(|e| PageError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| PageError::io(dir, e))?;
        let path = entry.path();
        // Symlinked directories are not descended into.
        let file_type = entry.file_type().map_err(|e| PageError::io(&path, e))?;
        if file_type.is_dir() {
            collect_markdown(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "md") && path.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, PageError> {
    fs::read_to_string(path).map_err(|e| PageError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, FormatError};
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = r#"<html><head><title>{{ Title }}</title><link href="/index.css"></head><body>{{ Content }}</body></html>"#;

    #[test]
    fn title_from_first_h1() {
        assert_eq!(extract_title("# Hello").unwrap(), "Hello");
        assert_eq!(
            extract_title("Intro\n## Sub\n#   Spaced Title  \n# Later").unwrap(),
            "Spaced Title"
        );
    }

    #[test]
    fn empty_h1_is_skipped() {
        assert_eq!(extract_title("# \n# Real").unwrap(), "Real");
    }

    #[test]
    fn no_h1_fails() {
        assert!(matches!(
            extract_title("## Only h2\n#NoSpace"),
            Err(PageError::TitleNotFound)
        ));
        assert!(matches!(extract_title(""), Err(PageError::TitleNotFound)));
    }

    #[test]
    fn render_substitutes_and_rewrites() {
        let page = render_page(
            "# Tolkien\n\n![map](/images/map.png) and [home](/)",
            TEMPLATE,
            "/site/",
            &TemplateConfig::default(),
        )
        .unwrap();
        assert_eq!(
            page,
            r#"<html><head><title>Tolkien</title><link href="/site/index.css"></head><body><div><h1>Tolkien</h1><p><img src="/site/images/map.png" alt="map"></img> and <a href="/site/">home</a></p></div></body></html>"#
        );
    }

    #[test]
    fn default_basepath_leaves_links() {
        let page = render_page(
            "# T\n\n[a](/x)",
            "{{ Content }}",
            "/",
            &TemplateConfig::default(),
        )
        .unwrap();
        assert_eq!(page, r#"<div><h1>T</h1><p><a href="/x">a</a></p></div>"#);
    }

    #[test]
    fn custom_placeholders() {
        let placeholders = TemplateConfig {
            title_placeholder: "%TITLE%".into(),
            content_placeholder: "%BODY%".into(),
        };
        let page = render_page("# T", "%TITLE%|%BODY%", "/", &placeholders).unwrap();
        assert_eq!(page, "T|<div><h1>T</h1></div>");
    }

    #[test]
    fn render_propagates_format_errors() {
        assert!(matches!(
            render_page("# T\n\n*oops", TEMPLATE, "/", &TemplateConfig::default()),
            Err(PageError::Markdown(Error::Format(
                FormatError::UnterminatedDelimiter { delimiter: "*" }
            )))
        ));
    }

    #[test]
    fn generates_tree_of_pages() {
        let root = tempfile::tempdir().unwrap();
        let content = root.path().join("content");
        let public = root.path().join("public");
        let template = root.path().join("template.html");
        fs::create_dir_all(content.join("blog/post")).unwrap();
        fs::write(&template, "<title>{{ Title }}</title>{{ Content }}").unwrap();
        fs::write(content.join("index.md"), "# Home").unwrap();
        fs::write(content.join("blog/post/index.md"), "# Post\n\nBody").unwrap();
        fs::write(content.join("notes.txt"), "ignored").unwrap();

        let count = generate_pages_recursive(
            &content,
            &template,
            &public,
            "/",
            &TemplateConfig::default(),
        )
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            fs::read_to_string(public.join("index.html")).unwrap(),
            "<title>Home</title><div><h1>Home</h1></div>"
        );
        assert_eq!(
            fs::read_to_string(public.join("blog/post/index.html")).unwrap(),
            "<title>Post</title><div><h1>Post</h1><p>Body</p></div>"
        );
        assert!(!public.join("notes.html").exists());
    }

    #[test]
    fn missing_content_dir_generates_nothing() {
        let root = tempfile::tempdir().unwrap();
        let count = generate_pages_recursive(
            &root.path().join("nope"),
            &root.path().join("template.html"),
            &root.path().join("public"),
            "/",
            &TemplateConfig::default(),
        )
        .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn failing_page_names_its_source() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("bad.md");
        let template = root.path().join("template.html");
        fs::write(&source, "# Bad\n\n**open").unwrap();
        fs::write(&template, "{{ Content }}").unwrap();

        let err = generate_page(
            &source,
            &template,
            &root.path().join("bad.html"),
            "/",
            &TemplateConfig::default(),
        )
        .unwrap_err();
        match err {
            PageError::Convert { path, .. } => assert_eq!(path, source),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn untitled_page_names_its_source() {
        let root = tempfile::tempdir().unwrap();
        let content = root.path().join("content");
        let template = root.path().join("template.html");
        fs::create_dir_all(&content).unwrap();
        fs::write(content.join("draft.md"), "## No top heading\n\nBody").unwrap();
        fs::write(&template, "{{ Content }}").unwrap();

        let err = generate_pages_recursive(
            &content,
            &template,
            &root.path().join("public"),
            "/",
            &TemplateConfig::default(),
        )
        .unwrap_err();
        match err {
            PageError::Untitled { path } => assert_eq!(path, content.join("draft.md")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let root = tempfile::tempdir().unwrap();
        let content = root.path().join("content");
        let public = root.path().join("public");
        let template = root.path().join("template.html");
        fs::create_dir_all(&content).unwrap();
        fs::write(content.join("index.md"), "# Home").unwrap();
        fs::write(&template, "{{ Content }}").unwrap();
        std::os::unix::fs::symlink(&content, content.join("loop")).unwrap();

        let count = generate_pages_recursive(
            &content,
            &template,
            &public,
            "/",
            &TemplateConfig::default(),
        )
        .unwrap();

        assert_eq!(count, 1);
        assert!(!public.join("loop").exists());
    }

    #[test]
    fn missing_template_is_io_error() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("a.md");
        fs::write(&source, "# A").unwrap();
        assert!(matches!(
            generate_page(
                &source,
                &root.path().join("missing.html"),
                &root.path().join("a.html"),
                "/",
                &TemplateConfig::default(),
            ),
            Err(PageError::Io { .. })
        ));
    }
}
