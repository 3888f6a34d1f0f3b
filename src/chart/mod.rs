mod scale;
mod view;

pub use scale::{LinearScale, PointScale, format_si};
pub use view::draw_population_chart;
