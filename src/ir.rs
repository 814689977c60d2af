/// One decoded key. Coordinates are key centers in drawing units; `width` and
/// `height` are in layout units (1.0 = one key pitch).
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    pub label: String,
    pub row: f64,
    pub column: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label_style: u8,
    pub label_size: f64,
    pub label_color: String,
    pub keycap_color: String,
    pub border_color: String,
    pub decal: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardMetadata {
    pub name: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Key>>,
    pub key_width: f64,
    /// Grid extent in layout units.
    pub columns: f64,
    pub row_count: f64,
    pub metadata: KeyboardMetadata,
}

impl Keyboard {
    pub fn new(key_width: f64) -> Self {
        Self {
            rows: Vec::new(),
            key_width,
            columns: 0.0,
            row_count: 0.0,
            metadata: KeyboardMetadata::default(),
        }
    }

    pub fn width(&self) -> f64 {
        self.columns * self.key_width
    }

    pub fn height(&self) -> f64 {
        self.row_count * self.key_width
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.rows.iter().flatten()
    }

    pub fn key_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}
