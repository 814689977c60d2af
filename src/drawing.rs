//! In-memory vector drawing surface.
//!
//! The layout pass appends primitives here in paint order; `render` turns the
//! finished drawing into SVG markup.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Baseline {
    BeforeEdge,
    Middle,
    AfterEdge,
}

impl Baseline {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BeforeEdge => "before-edge",
            Self::Middle => "middle",
            Self::AfterEdge => "after-edge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rx: f64,
    pub ry: f64,
    pub stroke: String,
    pub fill: String,
    pub fill_opacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub fill: String,
    pub stroke: String,
    /// Font size in points.
    pub font_size: f64,
    pub anchor: TextAnchor,
    pub baseline: Baseline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Rect(Rect),
    Text(Text),
    Group(Group),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Group {
    pub elements: Vec<Element>,
}

impl Group {
    pub fn add_rect(&mut self, rect: Rect) {
        self.elements.push(Element::Rect(rect));
    }

    pub fn add_text(&mut self, text: Text) {
        self.elements.push(Element::Text(text));
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.elements.iter().filter_map(|element| match element {
            Element::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text(text) => Some(text),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawing {
    /// Canvas size, in `unit`.
    pub width: f64,
    pub height: f64,
    pub unit: &'static str,
    pub view_box: ViewBox,
    pub title: Option<String>,
    pub background: Option<String>,
    pub font_family: Option<String>,
    pub elements: Vec<Element>,
}

impl Drawing {
    pub fn new(width: f64, height: f64, unit: &'static str, view_box: ViewBox) -> Self {
        Self {
            width,
            height,
            unit,
            view_box,
            title: None,
            background: None,
            font_family: None,
            elements: Vec::new(),
        }
    }

    pub fn add_rect(&mut self, rect: Rect) {
        self.elements.push(Element::Rect(rect));
    }

    pub fn add_text(&mut self, text: Text) {
        self.elements.push(Element::Text(text));
    }

    /// Appends an empty group and returns it for filling.
    pub fn add_group(&mut self) -> &mut Group {
        self.elements.push(Element::Group(Group::default()));
        match self.elements.last_mut() {
            Some(Element::Group(group)) => group,
            _ => unreachable!("a group was just pushed"),
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.elements.iter().filter_map(|element| match element {
            Element::Group(group) => Some(group),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.elements.iter().filter_map(|element| match element {
            Element::Rect(rect) => Some(rect),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_box() -> ViewBox {
        ViewBox {
            x: -10.0,
            y: -10.0,
            width: 30.0,
            height: 30.0,
        }
    }

    #[test]
    fn groups_keep_insertion_order() {
        let mut drawing = Drawing::new(30.0, 30.0, "mm", view_box());
        let first = drawing.add_group();
        first.add_text(Text {
            content: "A".into(),
            x: 0.0,
            y: 0.0,
            fill: "black".into(),
            stroke: "none".into(),
            font_size: 3.0,
            anchor: TextAnchor::Start,
            baseline: Baseline::BeforeEdge,
        });
        drawing.add_group();
        let groups: Vec<&Group> = drawing.groups().collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].texts().count(), 1);
        assert_eq!(groups[1].elements.len(), 0);
    }

    #[test]
    fn keyword_strings_match_svg_values() {
        assert_eq!(TextAnchor::End.as_str(), "end");
        assert_eq!(Baseline::BeforeEdge.as_str(), "before-edge");
        assert_eq!(Baseline::AfterEdge.as_str(), "after-edge");
    }
}
