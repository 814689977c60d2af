use thiserror::Error;

use crate::color::ColorError;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("key {label:?} (row {row}, column {column}) uses label style {style}, expected 0-7")]
    LabelStyle {
        label: String,
        row: f64,
        column: f64,
        style: u8,
    },
    #[error("key {label:?} (row {row}, column {column}) has invalid size {width}x{height}")]
    KeySize {
        label: String,
        row: f64,
        column: f64,
        width: f64,
        height: f64,
    },
    #[error("key {label:?}: {source}")]
    Color {
        label: String,
        #[source]
        source: ColorError,
    },
}
