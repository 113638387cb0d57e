//! The scene panel: an immediate-mode layout rebuilt from the window size every frame.
//!
//! The panel fills the window minus a fixed margin. The offscreen image covers its
//! content area and an EXIT button sits near the bottom right corner.

use glam::{Vec2, Vec4};

use crate::{abs::TextureHandle, render::ui::uirenderer::UIRenderer};

const MARGIN: f32 = 10.0;
const BUTTON_SIZE: Vec2 = Vec2::new(60.0, 37.0);
/// Offset of the button's top left corner from the panel's bottom right corner.
const BUTTON_INSET: Vec2 = Vec2::new(80.0, 57.0);
const LABEL_PIXEL: f32 = 2.0;

const PANEL_COLOR: Vec4 = Vec4::new(0.06, 0.06, 0.06, 0.94);
const BUTTON_COLOR: Vec4 = Vec4::new(0.26, 0.59, 0.98, 0.4);
const BUTTON_HOVER_COLOR: Vec4 = Vec4::new(0.26, 0.59, 0.98, 1.0);
const LABEL_COLOR: Vec4 = Vec4::ONE;

/// An axis aligned rectangle in window coordinates (y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmplt(self.max).all()
    }

    pub fn corners(&self) -> [Vec2; 2] {
        [self.min, self.max]
    }
}

/// Where everything goes this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelLayout {
    pub panel: Rect,
    /// Area the scene image is drawn into.
    pub content: Rect,
    pub exit_button: Rect,
}

impl PanelLayout {
    pub fn compute(window_size: Vec2) -> Self {
        let panel = Rect::from_min_size(
            Vec2::splat(MARGIN),
            window_size - Vec2::splat(2.0 * MARGIN),
        );
        let content = if panel.size().cmpgt(Vec2::ZERO).all() {
            panel
        } else {
            Rect::from_min_size(Vec2::ZERO, window_size)
        };
        let exit_button =
            Rect::from_min_size(panel.min + panel.size() - BUTTON_INSET, BUTTON_SIZE);

        Self {
            panel,
            content,
            exit_button,
        }
    }

    /// Content size in whole pixels, used as the offscreen viewport.
    pub fn viewport(&self, pixel_scale: f32) -> (i32, i32) {
        let size = (self.content.size() * pixel_scale).max(Vec2::ZERO);
        (size.x as i32, size.y as i32)
    }

    pub fn aspect(&self) -> f32 {
        let size = self.content.size();
        orbview_core::camera::aspect_ratio(size.x, size.y)
    }
}

/// UV rectangle covering the part of a fixed size target a viewport rendered into.
/// V is flipped because the GL texture origin is bottom left.
pub fn target_uv(viewport: (i32, i32), target: (u32, u32)) -> [Vec2; 2] {
    let used = Vec2::new(
        (viewport.0 as f32 / target.0 as f32).clamp(0.0, 1.0),
        (viewport.1 as f32 / target.1 as f32).clamp(0.0, 1.0),
    );
    [Vec2::new(0.0, used.y), Vec2::new(used.x, 0.0)]
}

/// Draws the panel and reports whether the EXIT button was clicked.
pub fn draw(
    ui: &mut UIRenderer,
    layout: &PanelLayout,
    scene: TextureHandle,
    scene_uv: [Vec2; 2],
    mouse_position: Vec2,
    clicked: bool,
) -> bool {
    ui.rect(layout.panel.corners(), PANEL_COLOR);
    ui.image(layout.content.corners(), scene_uv, scene);

    let hovered = layout.exit_button.contains(mouse_position);
    ui.rect(
        layout.exit_button.corners(),
        if hovered {
            BUTTON_HOVER_COLOR
        } else {
            BUTTON_COLOR
        },
    );

    let label_size = label_size("EXIT", LABEL_PIXEL);
    let label_origin =
        layout.exit_button.min + (layout.exit_button.size() - label_size) * 0.5;
    for quad in label_quads("EXIT", label_origin.round(), LABEL_PIXEL) {
        ui.rect(quad.corners(), LABEL_COLOR);
    }
    ui.finish();

    hovered && clicked
}

/// 5x7 bitmaps, one byte per row, bit 4 is the leftmost column.
fn glyph(c: char) -> Option<[u8; 7]> {
    match c {
        'E' => Some([0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F]),
        'I' => Some([0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x1F]),
        'T' => Some([0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
        'X' => Some([0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11]),
        _ => None,
    }
}

fn label_size(text: &str, pixel: f32) -> Vec2 {
    let chars = text.chars().count() as f32;
    Vec2::new((chars * 6.0 - 1.0).max(0.0), 7.0) * pixel
}

/// One quad per lit glyph pixel. Unknown characters leave a blank cell.
fn label_quads(text: &str, origin: Vec2, pixel: f32) -> Vec<Rect> {
    let mut quads = Vec::new();
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let cell = origin + Vec2::new(i as f32 * 6.0 * pixel, 0.0);
        for (y, row) in rows.iter().enumerate() {
            for x in 0..5 {
                if row & (0x10 >> x) != 0 {
                    quads.push(Rect::from_min_size(
                        cell + Vec2::new(x as f32, y as f32) * pixel,
                        Vec2::splat(pixel),
                    ));
                }
            }
        }
    }
    quads
}
