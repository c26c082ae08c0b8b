//! Static site generation: asset copying, page rendering and templating.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mdsite_core::{ParseError, Parser, RenderedPage};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::SiteConfig;

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("invalid config '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> SiteError + '_ {
    move |source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Outcome of a site build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Pages written to the output directory.
    pub pages: usize,
    /// Pages skipped under `keep_going`.
    pub failures: Vec<SiteError>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Replace the output directory with a fresh copy of the static directory.
///
/// A missing static directory only produces a warning; the output directory
/// is still recreated empty.
pub fn copy_static(static_dir: &Path, output_dir: &Path) -> Result<(), SiteError> {
    if output_dir.exists() {
        info!(path = %output_dir.display(), "deleting output directory");
        fs::remove_dir_all(output_dir).map_err(io_error(output_dir))?;
    }
    info!(path = %output_dir.display(), "creating output directory");
    fs::create_dir_all(output_dir).map_err(io_error(output_dir))?;

    if !static_dir.is_dir() {
        warn!(path = %static_dir.display(), "static directory not found, nothing to copy");
        return Ok(());
    }
    copy_recursive(static_dir, output_dir)
}

fn copy_recursive(src: &Path, dst: &Path) -> Result<(), SiteError> {
    for path in sorted_entries(src)? {
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = dst.join(name);
        if path.is_file() {
            info!(from = %path.display(), to = %target.display(), "copying file");
            fs::copy(&path, &target).map_err(io_error(&path))?;
        } else if path.is_dir() {
            info!(path = %target.display(), "creating directory");
            fs::create_dir_all(&target).map_err(io_error(&target))?;
            copy_recursive(&path, &target)?;
        }
    }
    Ok(())
}

/// Directory entries in name order, so builds visit files deterministically.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut paths = fs::read_dir(dir)
        .map_err(io_error(dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(io_error(dir))?;
    paths.sort();
    Ok(paths)
}

/// Fill a page template and rewrite root-relative URLs onto `basepath`.
pub fn apply_template(template: &str, page: &RenderedPage, basepath: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, &page.title)
        .replace(CONTENT_PLACEHOLDER, &page.html)
        .replace("href=\"/", &format!("href=\"{basepath}"))
        .replace("src=\"/", &format!("src=\"{basepath}"))
}

/// Renders Markdown files into templated HTML pages.
#[derive(Debug, Clone)]
pub struct PageGenerator {
    parser: Parser,
    template: String,
    basepath: String,
    keep_going: bool,
}

impl PageGenerator {
    pub fn new(parser: Parser, template: impl Into<String>, basepath: impl Into<String>) -> Self {
        Self {
            parser,
            template: template.into(),
            basepath: basepath.into(),
            keep_going: false,
        }
    }

    /// Skip failing pages instead of aborting the walk.
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub fn render_page(&self, markdown: &str) -> Result<String, ParseError> {
        let page = self.parser.render(markdown)?;
        Ok(apply_template(&self.template, &page, &self.basepath))
    }

    /// Render one Markdown file to `dest`, creating parent directories.
    pub fn generate_page(&self, from: &Path, dest: &Path) -> Result<(), SiteError> {
        info!(from = %from.display(), to = %dest.display(), "generating page");

        let markdown = fs::read_to_string(from).map_err(io_error(from))?;
        let html = self.render_page(&markdown).map_err(|source| SiteError::Parse {
            path: from.to_path_buf(),
            source,
        })?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        fs::write(dest, html).map_err(io_error(dest))
    }

    /// Mirror every `.md` file under `content_dir` as `.html` under
    /// `dest_dir`. Other files are ignored.
    pub fn generate_pages_recursive(
        &self,
        content_dir: &Path,
        dest_dir: &Path,
        report: &mut BuildReport,
    ) -> Result<(), SiteError> {
        for path in sorted_entries(content_dir)? {
            let Some(name) = path.file_name() else {
                continue;
            };
            let target = dest_dir.join(name);

            if path.is_dir() {
                self.generate_pages_recursive(&path, &target, report)?;
            } else if path.extension() == Some(OsStr::new("md")) {
                match self.generate_page(&path, &target.with_extension("html")) {
                    Ok(()) => report.pages += 1,
                    Err(err) if self.keep_going => {
                        warn!("skipping page: {}", err);
                        report.failures.push(err);
                    }
                    Err(err) => return Err(err),
                }
            }
        }
        Ok(())
    }
}

/// Build a whole site: copy static assets, then render every content page.
pub fn build_site(config: &SiteConfig, keep_going: bool) -> Result<BuildReport, SiteError> {
    let template = fs::read_to_string(&config.template).map_err(io_error(&config.template))?;

    copy_static(&config.static_dir, &config.output_dir)?;

    let generator = PageGenerator::new(
        Parser::new().with_root_tag(config.root_tag.as_str()),
        template,
        config.basepath.as_str(),
    )
    .keep_going(keep_going);

    let mut report = BuildReport::default();
    generator.generate_pages_recursive(&config.content_dir, &config.output_dir, &mut report)?;

    info!(pages = report.pages, failed = report.failures.len(), "site build finished");
    Ok(report)
}
