#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod drawing;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod text;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, KeyDefaults, LayoutConfig, load_config};
pub use drawing::Drawing;
pub use ir::{Key, Keyboard};
pub use layout::{LayoutError, compute_layout};
pub use parser::parse_kle;
pub use render::render_svg;
pub use theme::Theme;

/// Everything needed to go from KLE text to SVG in one call.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub keys: KeyDefaults,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self::default()
    }

    pub fn dark() -> Self {
        Self {
            theme: Theme::dark(),
            ..Self::default()
        }
    }
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self {
            theme: config.theme.clone(),
            layout: config.layout.clone(),
            keys: config.keys.clone(),
        }
    }
}

pub fn render_with_options(source: &str, options: RenderOptions) -> anyhow::Result<String> {
    let parsed = parse_kle(source, &options.keys)?;
    let drawing = compute_layout(&parsed.keyboard, &options.theme, &options.layout)?;
    Ok(render_svg(&drawing))
}

pub fn render(source: &str) -> anyhow::Result<String> {
    render_with_options(source, RenderOptions::default())
}
