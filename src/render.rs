use crate::drawing::{Drawing, Element, Rect, Text};
use crate::text::escape_xml;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

#[cfg(feature = "png")]
use crate::config::RenderConfig;

pub fn render_svg(drawing: &Drawing) -> String {
    let mut svg = String::new();
    let vb = &drawing.view_box;
    let unit = drawing.unit;

    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" baseProfile=\"full\" width=\"{}{unit}\" height=\"{}{unit}\" viewBox=\"{} {} {} {}\"",
        num(drawing.width),
        num(drawing.height),
        num(vb.x),
        num(vb.y),
        num(vb.width),
        num(vb.height),
    );
    if let Some(font_family) = &drawing.font_family {
        let _ = write!(svg, " font-family=\"{}\"", escape_xml(font_family));
    }
    svg.push('>');

    if let Some(title) = &drawing.title {
        let _ = write!(svg, "<title>{}</title>", escape_xml(title));
    }
    if let Some(background) = &drawing.background {
        let _ = write!(
            svg,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            num(vb.x),
            num(vb.y),
            num(vb.width),
            num(vb.height),
            escape_xml(background)
        );
    }

    for element in &drawing.elements {
        push_element(&mut svg, element);
    }

    svg.push_str("</svg>");
    svg
}

fn push_element(svg: &mut String, element: &Element) {
    match element {
        Element::Rect(rect) => push_rect(svg, rect),
        Element::Text(text) => push_text(svg, text),
        Element::Group(group) => {
            if group.elements.is_empty() {
                svg.push_str("<g/>");
                return;
            }
            svg.push_str("<g>");
            for child in &group.elements {
                push_element(svg, child);
            }
            svg.push_str("</g>");
        }
    }
}

fn push_rect(svg: &mut String, rect: &Rect) {
    let _ = write!(
        svg,
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" ry=\"{}\" stroke=\"{}\" fill=\"{}\"",
        num(rect.x),
        num(rect.y),
        num(rect.width),
        num(rect.height),
        num(rect.rx),
        num(rect.ry),
        escape_xml(&rect.stroke),
        escape_xml(&rect.fill),
    );
    if let Some(opacity) = rect.fill_opacity {
        let _ = write!(svg, " fill-opacity=\"{}\"", num(opacity));
    }
    svg.push_str("/>");
}

fn push_text(svg: &mut String, text: &Text) {
    let _ = write!(
        svg,
        "<text x=\"{}\" y=\"{}\" fill=\"{}\" stroke=\"{}\" font-size=\"{}pt\" text-anchor=\"{}\" alignment-baseline=\"{}\">{}</text>",
        num(text.x),
        num(text.y),
        escape_xml(&text.fill),
        escape_xml(&text.stroke),
        num(text.font_size),
        text.anchor.as_str(),
        text.baseline.as_str(),
        escape_xml(&text.content),
    );
}

/// Up to four decimals, trailing zeros dropped.
fn num(value: f64) -> String {
    let mut out = format!("{value:.4}");
    if out.contains('.') {
        let trimmed = out.trim_end_matches('0').trim_end_matches('.').len();
        out.truncate(trimmed);
    }
    if out == "-0" {
        out = "0".to_string();
    }
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height).ok_or_else(|| {
        anyhow::anyhow!("invalid PNG size {}x{}", render_cfg.width, render_cfg.height)
    })?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let [r, g, b] = crate::color::Color::parse(&render_cfg.background)?.to_rgb8();
    pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, 255));

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap
        .save_png(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::config::KeyDefaults;
    use crate::layout::compute_layout;
    use crate::parser::parse_kle;
    use crate::theme::Theme;

    fn render_source(source: &str, theme: &Theme) -> String {
        let parsed = parse_kle(source, &KeyDefaults::default()).unwrap();
        let drawing = compute_layout(&parsed.keyboard, theme, &LayoutConfig::default()).unwrap();
        render_svg(&drawing)
    }

    #[test]
    fn render_svg_basic() {
        let svg = render_source(r#"[{a:7},"Esc","F1"]"#, &Theme::classic());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"48.1mm\""));
        assert!(svg.contains("viewBox=\"-10 -10 48.1 29.05\""));
        assert!(svg.contains(
            "<rect x=\"-4.7625\" y=\"-4.7625\" width=\"38.1\" height=\"19.05\" rx=\"5\" ry=\"5\" stroke=\"black\" fill=\"none\" fill-opacity=\"0\"/>"
        ));
        assert_eq!(svg.matches("<g>").count(), 2);
        assert!(svg.contains(">Esc</text>"));
        assert!(svg.contains("font-size=\"3pt\""));
        assert!(svg.contains("text-anchor=\"middle\" alignment-baseline=\"middle\""));
    }

    #[test]
    fn keycap_fills_are_shaded() {
        let svg = render_source(r##"[{c:"#ffffff",a:7},"A"]"##, &Theme::classic());
        assert!(svg.contains("fill=\"#ccc\""));
        assert!(svg.contains("fill=\"#fff\""));
    }

    #[test]
    fn escapes_label_text() {
        let svg = render_source(r#"[{a:7},"&lt;"]"#, &Theme::classic());
        assert!(svg.contains(">&lt;</text>"));
    }

    #[test]
    fn title_and_background_are_optional() {
        let plain = render_source(r#"["A"]"#, &Theme::classic());
        assert!(!plain.contains("<title>"));
        let named = render_source(r#"{name:"Pad & Co"},["A"]"#, &Theme::dark());
        assert!(named.contains("<title>Pad &amp; Co</title>"));
        assert!(named.contains("fill=\"#1E2127\""));
        assert!(named.contains("font-family="));
    }

    #[test]
    fn formats_numbers_compactly() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(1.524), "1.524");
        assert_eq!(num(-4.7625), "-4.7625");
        assert_eq!(num(0.1 + 0.2), "0.3");
        assert_eq!(num(-0.00001), "0");
    }
}
