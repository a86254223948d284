//! Built-in patterns

use super::Pattern;

const HEART: [[u8; 8]; 8] = [
    [0, 0, 1, 1, 0, 1, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [0, 1, 1, 1, 1, 1, 1, 0],
    [0, 0, 1, 1, 1, 1, 0, 0],
    [0, 0, 0, 1, 1, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const ONE: [[u8; 8]; 8] = [
    [0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 1, 1, 0, 0, 0, 0],
    [0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 1, 1, 1, 0, 0, 0],
];

const ZERO: [[u8; 8]; 8] = [
    [0, 0, 1, 1, 1, 0, 0, 0],
    [0, 1, 1, 0, 1, 1, 0, 0],
    [1, 1, 0, 0, 0, 1, 1, 0],
    [1, 1, 0, 0, 0, 1, 1, 0],
    [1, 1, 0, 0, 0, 1, 1, 0],
    [1, 1, 0, 0, 0, 1, 1, 0],
    [0, 1, 1, 0, 1, 1, 0, 0],
    [0, 0, 1, 1, 1, 0, 0, 0],
];

const SMILEY: [[u8; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 0, 0, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 1, 1, 1, 1, 0, 1],
    [1, 1, 0, 0, 0, 0, 1, 1],
    [0, 1, 1, 1, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const STAR: [[u8; 8]; 8] = [
    [0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 1, 0, 0, 0, 0],
    [1, 1, 1, 1, 1, 1, 1, 1],
    [0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 1, 1, 1, 0, 0, 0],
    [0, 1, 1, 0, 1, 1, 0, 0],
    [1, 1, 0, 0, 0, 1, 1, 0],
    [1, 0, 0, 0, 0, 0, 1, 0],
];

const NAMES: [&str; 5] = ["heart", "one", "zero", "smiley", "star"];

pub(crate) fn preset_names() -> &'static [&'static str] {
    &NAMES
}

/// Look up a preset by name. "1"/"0" are accepted aliases for "one"/"zero".
pub(crate) fn preset(name: &str) -> Option<Pattern> {
    let grid = match name.to_lowercase().as_str() {
        "heart" => &HEART,
        "one" | "1" => &ONE,
        "zero" | "0" => &ZERO,
        "smiley" => &SMILEY,
        "star" => &STAR,
        _ => return None,
    };
    let cells = grid.iter().map(|row| row.to_vec()).collect();
    // Preset grids are static and rectangular; construction cannot fail
    Pattern::new(name.to_lowercase(), cells).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_presets_resolve() {
        for name in preset_names() {
            let p = preset(name).unwrap();
            assert_eq!(p.rows(), 8);
            assert_eq!(p.cols(), 8);
            assert!(p.on_cells() > 0);
        }
    }

    #[test]
    fn digit_aliases() {
        assert_eq!(preset("1").unwrap().cells(), preset("one").unwrap().cells());
        assert_eq!(
            preset("0").unwrap().cells(),
            preset("zero").unwrap().cells()
        );
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(preset("Heart").is_some());
        assert!(preset("STAR").is_some());
    }

    #[test]
    fn unknown_preset_is_none() {
        assert!(preset("diamond").is_none());
    }

    #[test]
    fn heart_cell_count() {
        assert_eq!(preset("heart").unwrap().on_cells(), 39);
    }
}
