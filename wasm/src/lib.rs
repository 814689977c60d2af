use kle_svg_renderer::{RenderOptions, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KleRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    plate_stroke: Option<String>,
    plate_fill: Option<String>,
    background: Option<String>,
    key_width: Option<f64>,
    keycap_color: Option<String>,
    label_color: Option<String>,
}

fn build_render_options(options: KleRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("dark") {
        RenderOptions::dark()
    } else {
        RenderOptions::classic()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = Some(font_family);
    }
    if let Some(stroke) = options.plate_stroke {
        render_options.theme.plate_stroke = stroke;
    }
    if let Some(fill) = options.plate_fill {
        render_options.theme.plate_fill = fill;
        render_options.theme.plate_fill_opacity = 1.0;
    }
    if let Some(background) = options.background {
        render_options.theme.background = Some(background);
    }
    if let Some(key_width) = options.key_width.filter(|width| *width > 0.0) {
        render_options.keys.key_width = key_width;
    }
    if let Some(color) = options.keycap_color {
        render_options.keys.keycap_color = color;
    }
    if let Some(color) = options.label_color {
        render_options.keys.label_color = color;
    }

    render_options
}

#[wasm_bindgen]
pub fn render_kle_svg(code: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<KleRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        KleRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(code, render_options)
        .map_err(|error| JsValue::from_str(&format!("{error:#}")))
}

#[cfg(test)]
mod tests {
    use kle_svg_renderer::render_with_options;

    use crate::{KleRenderOptions, build_render_options};

    #[test]
    fn renders_small_board_with_legends() {
        let code = r#"{name:"Arrows"},
[{x:1},"&uarr;"],
["&larr;","&darr;","&rarr;"]"#;

        let svg = render_with_options(code, build_render_options(KleRenderOptions::default()))
            .expect("arrow cluster should render");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("<title>Arrows</title>"));
        assert!(svg.contains("↑"));
        assert!(svg.contains("→"));
    }

    #[test]
    fn options_override_theme_and_key_defaults() {
        let options: KleRenderOptions = serde_json::from_str(
            r##"{"theme":"dark","plateStroke":"#123456","keyWidth":18,"fontFamily":"Mono"}"##,
        )
        .unwrap();
        let render_options = build_render_options(options);
        assert_eq!(render_options.theme.plate_stroke, "#123456");
        assert_eq!(render_options.theme.font_family.as_deref(), Some("Mono"));
        assert_eq!(render_options.keys.key_width, 18.0);
        assert!(render_options.theme.background.is_some());
    }

    #[test]
    fn non_positive_key_width_is_ignored() {
        let options: KleRenderOptions = serde_json::from_str(r#"{"keyWidth":0}"#).unwrap();
        assert_eq!(build_render_options(options).keys.key_width, 19.05);
    }
}
