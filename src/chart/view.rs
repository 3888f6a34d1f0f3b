use eframe::egui::{Align2, Color32, FontId, Pos2, Sense, Stroke, Ui};

use crate::data::PopulationDatum;

use super::scale::{LinearScale, PointScale, format_si};

const MARGIN_TOP: f32 = 80.0;
const MARGIN_BOTTOM: f32 = 80.0;
const MARGIN_LEFT: f32 = 120.0;
const MARGIN_RIGHT: f32 = 30.0;
const MARK_RADIUS: f32 = 9.0;
const TICK_COUNT: usize = 10;

fn location_rows(data: &[PopulationDatum]) -> (Vec<&str>, Vec<usize>) {
    let mut locations: Vec<&str> = Vec::new();
    let mut rows = Vec::with_capacity(data.len());
    for datum in data {
        let row = match locations
            .iter()
            .position(|&location| location == datum.location)
        {
            Some(row) => row,
            None => {
                locations.push(datum.location.as_str());
                locations.len() - 1
            }
        };
        rows.push(row);
    }
    (locations, rows)
}

pub fn draw_population_chart(ui: &mut Ui, data: &[PopulationDatum]) {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    if data.is_empty() {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Population dataset is empty.",
            FontId::proportional(14.0),
            Color32::from_gray(200),
        );
        return;
    }

    let inner_left = rect.left() + MARGIN_LEFT;
    let inner_right = rect.right() - MARGIN_RIGHT;
    let inner_top = rect.top() + MARGIN_TOP;
    let inner_bottom = rect.bottom() - MARGIN_BOTTOM;
    if inner_right <= inner_left || inner_bottom <= inner_top {
        return;
    }

    let max_population = data
        .iter()
        .map(|datum| datum.population)
        .fold(0.0f64, f64::max);
    let x_scale = LinearScale::fit(
        max_population as f32,
        (inner_left, inner_right),
        TICK_COUNT,
    );
    let (locations, rows) = location_rows(data);
    let y_scale = PointScale::new(locations.len(), (inner_top, inner_bottom), 0.5);

    painter.text(
        Pos2::new((inner_left + inner_right) * 0.5, rect.top() + 36.0),
        Align2::CENTER_CENTER,
        "Location populations",
        FontId::proportional(18.0),
        Color32::from_gray(235),
    );

    let grid_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 90));
    let label_color = Color32::from_gray(205);

    for tick in x_scale.ticks() {
        let x = x_scale.scale(tick);
        painter.line_segment(
            [Pos2::new(x, inner_top), Pos2::new(x, inner_bottom)],
            grid_stroke,
        );
        painter.text(
            Pos2::new(x, inner_bottom + 16.0),
            Align2::CENTER_CENTER,
            format_si(tick as f64),
            FontId::proportional(12.0),
            label_color,
        );
    }

    for (row, location) in locations.iter().enumerate() {
        let y = y_scale.position(row);
        painter.line_segment(
            [Pos2::new(inner_left, y), Pos2::new(inner_right, y)],
            grid_stroke,
        );
        painter.text(
            Pos2::new(inner_left - 10.0, y),
            Align2::RIGHT_CENTER,
            *location,
            FontId::proportional(12.0),
            label_color,
        );
    }

    painter.text(
        Pos2::new(
            (inner_left + inner_right) * 0.5,
            inner_bottom + MARGIN_BOTTOM * 0.6,
        ),
        Align2::CENTER_CENTER,
        "Population",
        FontId::proportional(14.0),
        Color32::from_gray(225),
    );

    let pointer = response.hover_pos();
    let mut hovered: Option<(usize, f32)> = None;
    if let Some(pointer) = pointer {
        for (index, datum) in data.iter().enumerate() {
            let position = Pos2::new(
                x_scale.scale(datum.population as f32),
                y_scale.position(rows[index]),
            );
            let distance = position.distance(pointer);
            if distance <= MARK_RADIUS + 3.0
                && hovered.is_none_or(|(_, best)| distance < best)
            {
                hovered = Some((index, distance));
            }
        }
    }

    for (index, datum) in data.iter().enumerate() {
        let position = Pos2::new(
            x_scale.scale(datum.population as f32),
            y_scale.position(rows[index]),
        );
        let is_hovered = hovered.is_some_and(|(hover_index, _)| hover_index == index);
        let fill = if is_hovered {
            Color32::from_rgb(255, 164, 101)
        } else {
            Color32::from_rgb(86, 156, 214)
        };
        painter.circle_filled(position, MARK_RADIUS, fill);
        painter.circle_stroke(
            position,
            MARK_RADIUS,
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190)),
        );
    }

    if let Some((index, _)) = hovered {
        let datum = &data[index];
        painter.text(
            rect.left_top() + eframe::egui::vec2(10.0, 10.0),
            Align2::LEFT_TOP,
            format!("{}  |  {}", datum.location, format_si(datum.population)),
            FontId::proportional(13.0),
            Color32::from_gray(240),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datum(location: &str, population: f64) -> PopulationDatum {
        PopulationDatum {
            location: location.to_owned(),
            population,
        }
    }

    #[test]
    fn duplicate_locations_share_a_row() {
        let data = vec![
            datum("China", 1.4e9),
            datum("India", 1.3e9),
            datum("China", 1.41e9),
            datum("Brazil", 2.1e8),
        ];

        let (locations, rows) = location_rows(&data);
        // The point domain holds distinct locations in first-appearance order.
        assert_eq!(locations, vec!["China", "India", "Brazil"]);
        assert_eq!(rows, vec![0, 1, 0, 2]);
    }

    #[test]
    fn unique_locations_map_to_their_own_rows() {
        let data = vec![datum("China", 1.4e9), datum("India", 1.3e9)];
        let (locations, rows) = location_rows(&data);
        assert_eq!(locations.len(), 2);
        assert_eq!(rows, vec![0, 1]);
    }
}
