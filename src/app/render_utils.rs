use eframe::egui::{Color32, Painter, Pos2, Rect, Vec2};

const BACKDROP: Color32 = Color32::from_rgb(19, 23, 29);
const GRID_DOT: Color32 = Color32::from_rgb(52, 60, 68);

fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    (from as f32 + ((to as f32 - from as f32) * t)) as u8
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let t = amount.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        lerp_channel(base.r(), overlay.r(), t),
        lerp_channel(base.g(), overlay.g(), t),
        lerp_channel(base.b(), overlay.b(), t),
        lerp_channel(base.a(), overlay.a(), t),
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    blend_color(BACKDROP, color, factor.clamp(0.0, 1.0) * 0.8 + 0.1)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, BACKDROP);

    let spacing = (64.0 * zoom.clamp(0.5, 2.0)).max(24.0);
    let origin = rect.center() + pan;
    let first_col = ((rect.left() - origin.x) / spacing).floor() as i32;
    let last_col = ((rect.right() - origin.x) / spacing).ceil() as i32;
    let first_row = ((rect.top() - origin.y) / spacing).floor() as i32;
    let last_row = ((rect.bottom() - origin.y) / spacing).ceil() as i32;

    for col in first_col..=last_col {
        for row in first_row..=last_row {
            let dot = origin + Vec2::new(col as f32 * spacing, row as f32 * spacing);
            painter.circle_filled(dot, 1.0, GRID_DOT);
        }
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    rect.expand(radius).contains(position)
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    rect.expand(padding)
        .intersects(Rect::from_two_pos(start, end))
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

fn normalize_log(value: u64, min: u64, max: u64) -> f32 {
    let floor = (min.max(1) as f64).ln();
    let ceiling = (max.max(1) as f64).ln();
    if ceiling - floor < f64::EPSILON {
        return 0.5;
    }
    let position = (value.max(1) as f64).ln();
    (((position - floor) / (ceiling - floor)).clamp(0.0, 1.0)) as f32
}

pub(super) fn node_radius(instances: u64, min: u64, max: u64) -> f32 {
    7.0 + (normalize_log(instances, min, max) * 14.0)
}

pub(super) fn instance_color(instances: u64, min: u64, max: u64) -> Color32 {
    let t = normalize_log(instances, min, max);
    Color32::from_rgb(
        lerp_channel(70, 245, t),
        lerp_channel(165, 120, t),
        lerp_channel(200, 60, t),
    )
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn screen_world_transforms_invert() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0));
        let pan = vec2(35.0, -12.0);
        let zoom = 1.7;

        let world = vec2(123.0, -456.0);
        let screen = world_to_screen(rect, pan, zoom, world);
        let back = screen_to_world(rect, pan, zoom, screen);
        assert!((back - world).length() < 0.001);
    }

    #[test]
    fn normalize_log_spans_the_unit_interval() {
        assert_eq!(normalize_log(1, 1, 1_000_000), 0.0);
        assert_eq!(normalize_log(1_000_000, 1, 1_000_000), 1.0);
        let mid = normalize_log(1_000, 1, 1_000_000);
        assert!((mid - 0.5).abs() < 0.001);
        // Degenerate range collapses to the middle.
        assert_eq!(normalize_log(7, 7, 7), 0.5);
    }

    #[test]
    fn culling_keeps_overlapping_shapes() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        assert!(circle_visible(rect, pos2(-5.0, 50.0), 10.0));
        assert!(!circle_visible(rect, pos2(-50.0, 50.0), 10.0));
        // Edge crossing the viewport with both endpoints outside.
        assert!(edge_visible(rect, pos2(-10.0, 50.0), pos2(110.0, 50.0), 2.0));
        assert!(!edge_visible(rect, pos2(-30.0, -30.0), pos2(-10.0, -10.0), 2.0));
    }
}
