use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn stable_pair(id: &str) -> (f32, f32) {
    (hashed_unit(id, 0xa1), hashed_unit(id, 0xb2))
}

fn hashed_unit(id: &str, salt: u8) -> f32 {
    let mut hasher = DefaultHasher::new();
    salt.hash(&mut hasher);
    id.hash(&mut hasher);
    let bits = hasher.finish() >> 40;
    let unit = bits as f64 / (1u64 << 24) as f64;
    ((unit * 2.0) - 1.0) as f32
}

pub fn wikidata_url(id: &str) -> String {
    let bare = id.strip_prefix("wd:").unwrap_or(id);
    format!("https://www.wikidata.org/wiki/{bare}")
}

pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
