use anyhow::Context;
use std::path::PathBuf;
use tickerview_chart::{ChartSpec, render_html};

/// Where finished charts and halt messages go.
#[derive(Debug, Clone)]
pub enum Surface {
    /// Standalone HTML page, rewritten on every cycle.
    Html(PathBuf),
    /// Vega-Lite JSON on stdout.
    Json,
}

impl Surface {
    pub fn show(&self, title: &str, spec: &ChartSpec) -> anyhow::Result<()> {
        match self {
            Surface::Html(path) => {
                let html = render_html(spec, title).context("Failed to serialize chart")?;
                std::fs::write(path, html)
                    .with_context(|| format!("Failed to write chart to {}", path.display()))?;
                tracing::info!("Chart written to {}", path.display());
            }
            Surface::Json => {
                println!("{}", serde_json::to_string_pretty(spec)?);
            }
        }

        Ok(())
    }

    pub fn message(&self, text: &str) {
        println!("{text}");
    }
}
