//! `benchboard render`

use anyhow::{Context, Result};
use benchboard_report::{from_location, ChartRenderer, FragmentDocument, HtmlPage};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args)]
pub struct RenderArgs {
    /// History location: a directory or an http(s) base URL
    #[arg(short, long, default_value = ".")]
    source: String,

    /// Page containing the mount element; rendered output is spliced into it
    #[arg(short, long)]
    page: Option<PathBuf>,

    /// Where to write the result (stdout by default; the page itself with --page)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn handle_command(args: RenderArgs, config_path: Option<&Path>) -> Result<()> {
    let config = crate::config::resolve(config_path)?;
    let separator = config.thousands_separator.clone();
    let source = from_location(&args.source)
        .with_context(|| format!("invalid history location {}", args.source))?;
    let renderer = ChartRenderer::new(config);

    match args.page {
        Some(page_path) => {
            let html = fs::read_to_string(&page_path)
                .with_context(|| format!("failed to read {}", page_path.display()))?;
            let mut page = HtmlPage::new(html, separator);
            let outcome = renderer.render(&*source, &mut page).await;
            info!("{}: {}", page_path.display(), outcome);

            let target = args.output.unwrap_or(page_path);
            write_output(Some(&target), &page.into_html())
        }
        None => {
            let mut fragment = FragmentDocument::new(separator);
            let outcome = renderer.render(&*source, &mut fragment).await;
            info!("{}", outcome);
            write_output(args.output.as_deref(), &fragment.into_html())
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
