use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Deterministic pseudo-random pair in [-1, 1] derived from a record name.
/// Used to scatter bubbles before the first simulation tick so identical
/// datasets always settle into the same layout.
pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

pub fn format_temp(temp: f32) -> String {
    format!("{temp:.0} °F")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let (x1, y1) = stable_pair("James Allen Dickinson");
        let (x2, y2) = stable_pair("James Allen Dickinson");
        assert_eq!((x1, y1), (x2, y2));
        assert!((-1.0..=1.0).contains(&x1));
        assert!((-1.0..=1.0).contains(&y1));
    }

    #[test]
    fn stable_pair_differs_between_names() {
        assert_ne!(stable_pair("a"), stable_pair("b"));
    }

    #[test]
    fn format_temp_rounds_to_whole_degrees() {
        assert_eq!(format_temp(107.6), "108 °F");
    }
}
