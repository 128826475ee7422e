use std::cmp::Ordering;

use glam::{Mat4, Vec2, Vec3};

use crate::coords::{ColorRgba, Viewport};
use crate::draw::{DrawCmd, FieldCmd, Frame, InstancesCmd, PointsCmd};

/// Outline of a sprite quad.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpriteShape {
    /// Anti-aliased disc inscribed in the quad.
    Disc,
    /// The full quad.
    Square,
}

/// A screen-space quad ready for upload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sprite {
    /// NDC center.
    pub center: Vec2,
    /// NDC half size along each axis.
    pub half_extent: Vec2,
    pub color: ColorRgba,
    pub shape: SpriteShape,
    /// Normalized depth in `[0, 1]`, 0 nearest.
    pub depth: f32,
}

/// Flattens a frame into sprites in paint order.
///
/// Draw items are visited by layer; sprites within one item are sorted
/// back-to-front. Primitives behind the camera or outside the clip volume
/// are dropped.
pub fn project_frame(frame: &Frame, viewport: Viewport) -> Vec<Sprite> {
    let view_proj = frame.camera.view_proj();
    let projection = frame.camera.projection_matrix();
    let mut out = Vec::new();

    for item in frame.list.in_paint_order() {
        let start = out.len();
        match &item.cmd {
            DrawCmd::Points(cmd) => project_points(cmd, view_proj, viewport, &mut out),
            DrawCmd::Instances(cmd) => {
                project_instances(cmd, view_proj, projection, frame.camera.aspect, &mut out)
            }
            DrawCmd::Field(cmd) => project_field(cmd, &mut out),
        }
        out[start..].sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(Ordering::Equal));
    }

    out
}

/// Projects a world-space point; `None` when clipped.
fn to_ndc(view_proj: Mat4, p: Vec3) -> Option<(Vec2, f32, f32)> {
    let clip = view_proj * p.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    let visible = ndc.is_finite()
        && (-1.05..=1.05).contains(&ndc.x)
        && (-1.05..=1.05).contains(&ndc.y)
        && (0.0..=1.0).contains(&ndc.z);
    visible.then(|| (Vec2::new(ndc.x, ndc.y), ndc.z, clip.w))
}

fn project_points(cmd: &PointsCmd, view_proj: Mat4, viewport: Viewport, out: &mut Vec<Sprite>) {
    if cmd.size <= 0.0 {
        return;
    }
    let mvp = view_proj * cmd.model;
    let (hx, hy) = viewport.px_to_ndc(cmd.size * 0.5);

    for (i, p) in cmd.positions.iter().enumerate() {
        let Some((center, depth, _)) = to_ndc(mvp, *p) else {
            continue;
        };
        out.push(Sprite {
            center,
            half_extent: Vec2::new(hx, hy),
            color: cmd.color_at(i),
            shape: SpriteShape::Disc,
            depth,
        });
    }
}

fn project_instances(
    cmd: &InstancesCmd,
    view_proj: Mat4,
    projection: Mat4,
    aspect: f32,
    out: &mut Vec<Sprite>,
) {
    // Vertical focal scale of the projection (cot(fov/2) for perspective).
    let focal = projection.y_axis.y;
    let aspect = if aspect > 0.0 { aspect } else { 1.0 };

    for (transform, color) in cmd.transforms.iter().zip(&cmd.colors) {
        let origin = transform.transform_point3(Vec3::ZERO);
        let Some((center, depth, w)) = to_ndc(view_proj, origin) else {
            continue;
        };
        let scale = transform.x_axis.truncate().length();
        let half_y = cmd.extent * scale * focal / w;
        // Nearer instances are lit slightly brighter.
        let shade = 1.15 - 0.3 * depth.clamp(0.0, 1.0);
        out.push(Sprite {
            center,
            half_extent: Vec2::new(half_y / aspect, half_y),
            color: color.scaled(shade),
            shape: SpriteShape::Square,
            depth,
        });
    }
}

fn project_field(cmd: &FieldCmd, out: &mut Vec<Sprite>) {
    if cmd.columns == 0 || cmd.rows == 0 {
        return;
    }
    let cell_w = 2.0 / cmd.columns as f32;
    let cell_h = 2.0 / cmd.rows as f32;
    let half = Vec2::new(cell_w * 0.5, cell_h * 0.5);

    for row in 0..cmd.rows {
        for column in 0..cmd.columns {
            let Some(color) = cmd.texel(column, row) else {
                continue;
            };
            out.push(Sprite {
                center: Vec2::new(
                    -1.0 + cell_w * (column as f32 + 0.5),
                    1.0 - cell_h * (row as f32 + 0.5),
                ),
                half_extent: half,
                color,
                shape: SpriteShape::Square,
                depth: 1.0,
            });
        }
    }
}
