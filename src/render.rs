use crate::geometry::Rect;
use crate::memory::MemorySurface;
use crate::positioner::PositionReport;
use crate::search::SearchOutcome;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const PREVIEW_PAD: f32 = 24.0;

/// Draw the boundary, offset root, anchor, every attempt and the final panel.
pub fn render_svg(surface: &MemorySurface, report: &PositionReport, theme: &Theme) -> String {
    let boundary = surface.boundary.rect();
    let scroll = surface.boundary.scroll();
    let boundary = Rect::new(
        boundary.top + scroll.top,
        boundary.left + scroll.left,
        boundary.width,
        boundary.height,
    );

    let mut extent = boundary;
    let mut grow = |rect: &Rect| {
        let top = extent.top.min(rect.top);
        let left = extent.left.min(rect.left);
        let bottom = extent.bottom().max(rect.bottom());
        let right = extent.right().max(rect.right());
        extent = Rect::new(top, left, right - left, bottom - top);
    };
    grow(&surface.offset_root);
    if let Some(anchor) = &surface.anchor {
        grow(anchor);
    }
    let attempt_rects: Vec<Rect> = report
        .attempts
        .iter()
        .map(|attempt| surface.project(&attempt.edges))
        .collect();
    for rect in &attempt_rects {
        grow(rect);
    }

    let min_x = extent.left - PREVIEW_PAD;
    let min_y = extent.top - PREVIEW_PAD;
    let width = (extent.width + PREVIEW_PAD * 2.0).max(200.0);
    let height = (extent.height + PREVIEW_PAD * 2.0).max(200.0);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"{min_x} {min_y} {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect x=\"{min_x}\" y=\"{min_y}\" width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    push_rect(
        &mut svg,
        &surface.offset_root,
        &format!("fill=\"{}\" stroke=\"none\"", theme.offset_root_fill),
    );
    push_rect(
        &mut svg,
        &boundary,
        &format!(
            "fill=\"none\" stroke=\"{}\" stroke-dasharray=\"6 4\" stroke-width=\"1.2\"",
            theme.boundary_stroke
        ),
    );

    for (rect, attempt) in attempt_rects.iter().zip(&report.attempts) {
        push_rect(
            &mut svg,
            rect,
            &format!(
                "fill=\"none\" stroke=\"{}\" stroke-dasharray=\"2 3\"",
                theme.attempt_stroke
            ),
        );
        push_label(&mut svg, rect, &format!("#{} {}", attempt.depth, attempt.placement), theme);
    }

    if let Some(anchor) = &surface.anchor {
        push_rect(
            &mut svg,
            anchor,
            &format!(
                "fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"",
                theme.anchor_fill, theme.anchor_stroke
            ),
        );
    }

    if let SearchOutcome::Placed { placement, .. } = &report.outcome {
        let panel = surface.panel_rect();
        push_rect(
            &mut svg,
            &panel,
            &format!(
                "fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\" rx=\"4\" ry=\"4\"",
                theme.panel_fill, theme.panel_stroke
            ),
        );
        push_label(&mut svg, &panel, placement.name(), theme);
    }

    svg.push_str("</svg>");
    svg
}

fn push_rect(svg: &mut String, rect: &Rect, attrs: &str) {
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {attrs}/>",
        rect.left, rect.top, rect.width, rect.height
    ));
}

fn push_label(svg: &mut String, rect: &Rect, text: &str, theme: &Theme) {
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        rect.left + 4.0,
        rect.top + theme.font_size + 2.0,
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.text_color,
        escape_xml(text)
    ));
}

pub fn write_output(contents: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)?;
        }
        None => {
            print!("{}", contents);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme.font_family.clone();
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
