use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::dom::tree::{NodeId, RenderTree};

const DEFAULT_WIDTH: u32 = 300;
const DEFAULT_HEIGHT: u32 = 150;
const LINE_WIDTH: f32 = 2.0;

/// Pointer-drawn signature bound to a drawing surface and a hidden input.
///
/// Coordinates arrive in CSS pixels and are stored in backing-store pixels,
/// i.e. multiplied by the device pixel ratio.
#[derive(Debug, Clone)]
pub struct SignaturePad {
    pub surface: NodeId,
    pub hidden: NodeId,
    pub css_width: u32,
    pub css_height: u32,
    pub pixel_ratio: f32,
    strokes: Vec<Vec<(f32, f32)>>,
    drawing: bool,
}

impl SignaturePad {
    /// Bind to the `<canvas>` and hidden input inside `block`, creating the
    /// canvas when the markup has none, and size its backing store.
    pub fn attach(tree: &mut RenderTree, block: NodeId, pixel_ratio: f32) -> Option<Self> {
        let hidden = tree.find_first(block, |el| {
            el.tag == "input" && el.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("hidden"))
        })?;

        let surface = match tree.find_by_tag(block, "canvas") {
            Some(canvas) => canvas,
            None => {
                let canvas = tree.create_element("canvas");
                tree.append_child(block, canvas);
                canvas
            }
        };

        let css_width = dimension(tree, surface, "width", DEFAULT_WIDTH);
        let css_height = dimension(tree, surface, "height", DEFAULT_HEIGHT);
        let ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };

        tree.set_attr(surface, "data-css-width", &css_width.to_string());
        tree.set_attr(surface, "data-css-height", &css_height.to_string());
        tree.set_attr(surface, "width", &((css_width as f32 * ratio).round() as u32).to_string());
        tree.set_attr(surface, "height", &((css_height as f32 * ratio).round() as u32).to_string());
        tree.set_style_property(surface, "width", &format!("{}px", css_width));
        tree.set_style_property(surface, "height", &format!("{}px", css_height));

        Some(Self {
            surface,
            hidden,
            css_width,
            css_height,
            pixel_ratio: ratio,
            strokes: Vec::new(),
            drawing: false,
        })
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.drawing = true;
        let point = self.scale(x, y);
        self.strokes.push(vec![point]);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.drawing {
            return;
        }
        let point = self.scale(x, y);
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.push(point);
        }
    }

    /// Finish the stroke, store the drawing in the hidden input and queue a
    /// `change` event on it.
    pub fn pointer_up(&mut self, tree: &mut RenderTree) {
        if !self.drawing {
            return;
        }
        self.drawing = false;
        tree.set_value(self.hidden, &self.to_data_url());
        tree.dispatch_event(self.hidden, "change");
    }

    pub fn clear(&mut self, tree: &mut RenderTree) {
        self.strokes.clear();
        self.drawing = false;
        tree.set_value(self.hidden, "");
        tree.dispatch_event(self.hidden, "change");
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    fn scale(&self, x: f32, y: f32) -> (f32, f32) {
        let max_x = self.css_width as f32;
        let max_y = self.css_height as f32;
        (
            x.clamp(0.0, max_x) * self.pixel_ratio,
            y.clamp(0.0, max_y) * self.pixel_ratio,
        )
    }

    /// The drawing as an SVG data URL in backing-store coordinates.
    pub fn to_data_url(&self) -> String {
        let width = (self.css_width as f32 * self.pixel_ratio).round() as u32;
        let height = (self.css_height as f32 * self.pixel_ratio).round() as u32;

        let path: String = self
            .strokes
            .iter()
            .filter(|s| !s.is_empty())
            .map(|stroke| {
                let (x0, y0) = stroke[0];
                let mut d = format!("M{:.1} {:.1}", x0, y0);
                // a lone point still needs a segment to render a dot
                let rest: &[(f32, f32)] = if stroke.len() == 1 { &stroke[..] } else { &stroke[1..] };
                for (x, y) in rest {
                    d.push_str(&format!(" L{:.1} {:.1}", x, y));
                }
                d
            })
            .collect::<Vec<_>>()
            .join(" ");

        let svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\
<path d=\"{d}\" fill=\"none\" stroke=\"#000\" stroke-width=\"{lw:.1}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/></svg>",
            w = width,
            h = height,
            d = path,
            lw = LINE_WIDTH * self.pixel_ratio,
        );

        format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
    }
}

fn dimension(tree: &RenderTree, node: NodeId, attr: &str, default: u32) -> u32 {
    let css_attr = format!("data-css-{}", attr);
    tree.attr(node, &css_attr)
        .or_else(|| tree.attr(node, attr))
        .and_then(|v| v.trim().trim_end_matches("px").parse().ok())
        .unwrap_or(default)
}
