//! Panestack CLI - settle and inspect stack manifests.

#![allow(clippy::needless_pass_by_value, clippy::doc_markdown)]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use panestack::prelude::*;
use panestack::yaml::PanelManifest;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "panestack")]
#[command(about = "Adaptive panel layout solver")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Settle a manifest and print every panel's geometry
    Layout {
        /// Path to manifest file
        manifest: PathBuf,

        /// Override the stack width
        #[arg(long)]
        width: Option<i32>,

        /// Override the stack height
        #[arg(long)]
        height: Option<i32>,

        /// Animation frames to step; 0 lays out the overrides without animating
        #[arg(short, long, default_value = "60")]
        frames: u32,

        /// Frame rate the animations are stepped at
        #[arg(long, default_value = "60")]
        fps: f32,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,

        /// Collapse the named panel before running frames (repeatable)
        #[arg(long = "collapse", value_name = "NAME")]
        collapse: Vec<String>,
    },

    /// Check manifest validity and print the minimum stack size
    Check {
        /// Path to manifest file
        #[arg(default_value = "stack.yaml")]
        manifest: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Settled geometry of one panel.
#[derive(Debug, Serialize)]
struct PanelLayout {
    name: String,
    rect: Rect,
    clip: Rect,
    visible: bool,
    collapsed: bool,
    visible_fraction: f32,
    collapse_fraction: f32,
    handle: Option<HandleLayout>,
}

#[derive(Debug, Serialize)]
struct HandleLayout {
    rect: Rect,
    min: i32,
    max: i32,
}

/// Settled geometry of a whole stack.
#[derive(Debug, Serialize)]
struct StackLayout {
    name: String,
    orientation: Orientation,
    rect: Rect,
    min_size: Size,
    report: LayoutReport,
    panels: Vec<PanelLayout>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Layout {
            manifest,
            width,
            height,
            frames,
            fps,
            format,
            collapse,
        } => {
            let options = LayoutOptions {
                width,
                height,
                frames,
                fps,
                collapse,
            };
            let layout = run_layout(&load_manifest(&manifest)?, &options)?;
            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&layout)?),
                Format::Text => print!("{}", render_text(&layout)),
            }
        }
        Commands::Check { manifest } => {
            check_manifest(&manifest)?;
        }
    }
    Ok(())
}

fn load_manifest(path: &Path) -> Result<StackManifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let manifest = StackManifest::from_yaml(&content)
        .with_context(|| format!("manifest {} is invalid", path.display()))?;
    info!(path = %path.display(), panels = manifest.stack.panels.len(), "manifest loaded");
    Ok(manifest)
}

fn check_manifest(path: &Path) -> Result<()> {
    println!("Checking manifest: {}", path.display());
    let manifest = load_manifest(path)?;
    let (stack, _) = settle(&manifest, &LayoutOptions::default())?;

    println!("Manifest valid!");
    println!("  Name: {}", manifest.stack.name);
    println!("  Orientation: {}", stack.orientation());
    println!("  Border size: {}", stack.spacing());
    println!("  Panels: {}", stack.len());
    let min = stack.min_size();
    println!("  Minimum size: {}x{}", min.width, min.height);
    Ok(())
}

#[derive(Debug, Default)]
struct LayoutOptions {
    width: Option<i32>,
    height: Option<i32>,
    frames: u32,
    fps: f32,
    collapse: Vec<String>,
}

/// Build the stack, apply overrides and collapses, then step `frames`
/// animation frames. The report is the one from the last frame stepped.
fn settle(manifest: &StackManifest, options: &LayoutOptions) -> Result<(LayoutStack<BoxPanel>, LayoutReport)> {
    let (mut stack, ids) = build_stack(manifest, &CriticalDamp::instant(), |entry: &PanelManifest| {
        Some(entry.box_panel())
    });

    let rect = stack.rect();
    let width = options.width.unwrap_or(rect.width);
    let height = options.height.unwrap_or(rect.height);
    if width < 0 || height < 0 {
        bail!("stack size must not be negative, got {width}x{height}");
    }
    stack.reshape(width, height);

    for name in &options.collapse {
        let Some((_, id)) = ids.iter().find(|(n, _)| n == name) else {
            bail!("no panel named '{name}' in manifest");
        };
        stack.collapse_panel(*id, true);
    }

    let damp = if options.fps > 0.0 {
        CriticalDamp::at_fps(options.fps)
    } else {
        CriticalDamp::instant()
    };
    let mut last = None;
    for _ in 0..options.frames {
        last = Some(stack.update_layout(&damp));
    }
    // no frames: lay out once with every animation held still
    let report = last.unwrap_or_else(|| stack.update_layout(&|_: f32| 0.0_f32));
    Ok((stack, report))
}

fn run_layout(manifest: &StackManifest, options: &LayoutOptions) -> Result<StackLayout> {
    let (stack, report) = settle(manifest, options)?;

    let panels = stack
        .items()
        .iter()
        .map(|item| {
            let handle = item.handle();
            let (min, max) = handle.resize_limits();
            PanelLayout {
                name: item.panel().name.clone(),
                rect: item.panel().rect,
                clip: item.clip_rect(),
                visible: item.panel().visible,
                collapsed: item.is_collapsed(),
                visible_fraction: item.visible_fraction(),
                collapse_fraction: item.collapse_fraction(),
                handle: handle.is_visible().then(|| HandleLayout {
                    rect: handle.rect(),
                    min,
                    max,
                }),
            }
        })
        .collect();

    Ok(StackLayout {
        name: manifest.stack.name.clone(),
        orientation: stack.orientation(),
        rect: stack.rect(),
        min_size: stack.min_size(),
        report,
        panels,
    })
}

fn render_text(layout: &StackLayout) -> String {
    let mut out = format!(
        "{} ({}, {}x{}, min {}x{}, {})\n",
        if layout.name.is_empty() { "stack" } else { layout.name.as_str() },
        layout.orientation,
        layout.rect.width,
        layout.rect.height,
        layout.min_size.width,
        layout.min_size.height,
        if layout.report.filled { "filled" } else { "unfilled" },
    );
    for panel in &layout.panels {
        let r = panel.rect;
        let c = panel.clip;
        let mut line = format!(
            "  {:<16} rect {},{} {}x{}  clip {}x{}",
            panel.name, r.x, r.y, r.width, r.height, c.width, c.height
        );
        if panel.collapsed {
            line.push_str("  collapsed");
        }
        if !panel.visible {
            line.push_str("  hidden");
        }
        if let Some(handle) = &panel.handle {
            line += &format!("  handle [{}, {}]", handle.min, handle.max);
        }
        out += &line;
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r"
stack:
  name: toolbar
  orientation: horizontal
  border_size: 10
  width: 300
  height: 40
  panels:
    - name: left
      width: 50
      height: 40
      min_width: 50
    - name: middle
      width: 50
      height: 40
      min_width: 50
    - name: right
      width: 50
      height: 40
      min_width: 50
";

    fn manifest() -> StackManifest {
        StackManifest::from_yaml(MANIFEST).unwrap()
    }

    fn options() -> LayoutOptions {
        LayoutOptions {
            frames: 60,
            fps: 60.0,
            ..LayoutOptions::default()
        }
    }

    #[test]
    fn test_layout_reports_settled_geometry() {
        let layout = run_layout(&manifest(), &options()).unwrap();
        let widths: Vec<i32> = layout.panels.iter().map(|p| p.rect.width).collect();
        assert_eq!(widths, vec![93, 94, 93]);
        assert!(layout.report.filled);
        assert_eq!(layout.min_size, Size::new(170, 0));
        // the trailing panel never shows a handle
        assert!(layout.panels[2].handle.is_none());
        assert!(layout.panels[0].handle.is_some());
    }

    #[test]
    fn test_width_override_and_collapse() {
        let opts = LayoutOptions {
            width: Some(400),
            collapse: vec!["middle".to_string()],
            ..options()
        };
        let layout = run_layout(&manifest(), &opts).unwrap();
        assert_eq!(layout.rect.width, 400);
        assert!(layout.panels[1].collapsed);
        assert_eq!(layout.panels[1].clip.width, 50);
        assert!(layout.report.filled);
    }

    #[test]
    fn test_single_frame_shows_collapse_in_progress() {
        let opts = LayoutOptions {
            frames: 1,
            collapse: vec!["middle".to_string()],
            ..options()
        };
        let layout = run_layout(&manifest(), &opts).unwrap();
        let middle = &layout.panels[1];
        assert!(middle.collapsed);
        assert!(middle.collapse_fraction > 0.0 && middle.collapse_fraction < 1.0);
        assert!(middle.clip.width > 50 && middle.clip.width < middle.rect.width);
        assert!(layout.report.filled);
    }

    #[test]
    fn test_zero_frames_leaves_collapse_unstarted() {
        let opts = LayoutOptions {
            frames: 0,
            width: Some(360),
            collapse: vec!["middle".to_string()],
            ..options()
        };
        let layout = run_layout(&manifest(), &opts).unwrap();
        assert_eq!(layout.panels[1].collapse_fraction, 0.0);
        assert_eq!(layout.rect.width, 360);
        assert!(layout.report.filled);
    }

    #[test]
    fn test_unknown_collapse_name_is_an_error() {
        let opts = LayoutOptions {
            collapse: vec!["nope".to_string()],
            ..options()
        };
        let err = run_layout(&manifest(), &opts).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_negative_override_is_an_error() {
        let opts = LayoutOptions {
            height: Some(-1),
            ..options()
        };
        assert!(run_layout(&manifest(), &opts).is_err());
    }

    #[test]
    fn test_render_text_lists_every_panel() {
        let layout = run_layout(&manifest(), &options()).unwrap();
        let text = render_text(&layout);
        assert!(text.starts_with("toolbar (horizontal, 300x40"));
        assert!(text.contains("filled"));
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("handle [50, 180]"));
    }

    #[test]
    fn test_json_output_shape() {
        let layout = run_layout(&manifest(), &options()).unwrap();
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["orientation"], "horizontal");
        assert_eq!(json["panels"][1]["rect"]["x"], 103);
        assert_eq!(json["report"]["filled"], true);
    }
}
