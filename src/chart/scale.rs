#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    domain_max: f32,
    tick_step: f32,
    range: (f32, f32),
}

impl LinearScale {
    pub fn fit(max_value: f32, range: (f32, f32), tick_count: usize) -> Self {
        let max_value = max_value.max(f32::EPSILON);
        let tick_step = tick_step(max_value, tick_count.max(1));
        let domain_max = (max_value / tick_step).ceil() * tick_step;
        Self {
            domain_max,
            tick_step,
            range,
        }
    }

    pub fn scale(&self, value: f32) -> f32 {
        let t = (value / self.domain_max).clamp(0.0, 1.0);
        self.range.0 + (self.range.1 - self.range.0) * t
    }

    pub fn domain_max(&self) -> f32 {
        self.domain_max
    }

    pub fn ticks(&self) -> Vec<f32> {
        let mut ticks = Vec::new();
        let mut value = 0.0f32;
        while value <= self.domain_max + (self.tick_step * 0.5) {
            ticks.push(value);
            value += self.tick_step;
        }
        ticks
    }
}

fn tick_step(max: f32, count: usize) -> f32 {
    let step0 = max / count as f32;
    let power = step0.log10().floor();
    let base = 10.0f32.powf(power);
    let error = step0 / base;

    let factor = if error >= 7.07 {
        10.0
    } else if error >= 3.16 {
        5.0
    } else if error >= 1.414 {
        2.0
    } else {
        1.0
    };
    factor * base
}

#[derive(Clone, Copy, Debug)]
pub struct PointScale {
    count: usize,
    range: (f32, f32),
    padding: f32,
}

impl PointScale {
    pub fn new(count: usize, range: (f32, f32), padding: f32) -> Self {
        Self {
            count,
            range,
            padding,
        }
    }

    fn step(&self) -> f32 {
        let slots = (self.count.saturating_sub(1) as f32 + (self.padding * 2.0)).max(1.0);
        (self.range.1 - self.range.0) / slots
    }

    pub fn position(&self, index: usize) -> f32 {
        self.range.0 + self.step() * (self.padding + index as f32)
    }
}

const SI_PREFIXES: [&str; 6] = ["", "k", "M", "G", "T", "P"];

pub fn format_si(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude < 1.0 {
        return format!("{value:.2}");
    }

    let mut prefix_index = ((magnitude.log10() / 3.0).floor() as usize).min(SI_PREFIXES.len() - 1);
    let mut scaled = value / 1000f64.powi(prefix_index as i32);
    if scaled.abs() >= 999.5 && prefix_index < SI_PREFIXES.len() - 1 {
        prefix_index += 1;
        scaled /= 1000.0;
    }

    let formatted = if scaled.abs() >= 99.95 {
        format!("{scaled:.0}")
    } else if scaled.abs() >= 9.995 {
        format!("{scaled:.1}")
    } else {
        format!("{scaled:.2}")
    };

    let suffix = match SI_PREFIXES[prefix_index] {
        "G" => "B",
        other => other,
    };
    format!("{formatted}{suffix}")
}
