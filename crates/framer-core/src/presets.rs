//! Static ratio and resolution tables used to populate interactive choices.
//!
//! These are never validated against actual image content.

use crate::types::{Ratio, Resolution};

/// Crop ratios offered to the user, with a short hint.
pub const RATIOS: &[(Ratio, &str)] = &[
    (Ratio::of(16, 9), "wide"),
    (Ratio::of(16, 10), "wide"),
    (Ratio::of(21, 9), "ultra wide"),
    (Ratio::of(32, 9), "ultra wide"),
    (Ratio::of(48, 9), "ultra wide"),
    (Ratio::of(9, 16), "portrait"),
    (Ratio::of(10, 16), "portrait"),
    (Ratio::of(9, 18), "portrait"),
    (Ratio::of(1, 1), "square"),
    (Ratio::of(3, 2), "classic"),
    (Ratio::of(4, 3), "classic"),
    (Ratio::of(5, 4), "classic"),
];

/// A named family of common display resolutions.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionGroup {
    pub name: &'static str,
    pub resolutions: &'static [Resolution],
}

const fn res(width: u32, height: u32) -> Resolution {
    Resolution::new(width, height)
}

/// Resolution groups offered to the user.
pub const RESOLUTION_GROUPS: &[ResolutionGroup] = &[
    ResolutionGroup {
        name: "ultra-wide",
        resolutions: &[res(2560, 1080), res(3440, 1440), res(3840, 1600)],
    },
    ResolutionGroup {
        name: "16:9",
        resolutions: &[
            res(1280, 720),
            res(1600, 900),
            res(1920, 1080),
            res(2560, 1440),
            res(3840, 2160),
        ],
    },
    ResolutionGroup {
        name: "16:10",
        resolutions: &[
            res(1280, 800),
            res(1600, 1000),
            res(1920, 1200),
            res(2560, 1600),
            res(3840, 2400),
        ],
    },
    ResolutionGroup {
        name: "4:3",
        resolutions: &[
            res(1280, 960),
            res(1600, 1200),
            res(1920, 1440),
            res(2560, 1920),
            res(3840, 2880),
        ],
    },
    ResolutionGroup {
        name: "5:4",
        resolutions: &[
            res(1280, 1024),
            res(1600, 1280),
            res(1920, 1536),
            res(2560, 2048),
            res(3840, 3072),
        ],
    },
];

/// Every preset resolution paired with its group name, in table order.
pub fn all_resolutions() -> impl Iterator<Item = (Resolution, &'static str)> {
    RESOLUTION_GROUPS
        .iter()
        .flat_map(|group| group.resolutions.iter().map(move |r| (*r, group.name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_names_in_order() {
        let names: Vec<_> = RESOLUTION_GROUPS.iter().map(|g| g.name).collect();
        assert_eq!(names, ["ultra-wide", "16:9", "16:10", "4:3", "5:4"]);
    }

    #[test]
    fn test_all_resolutions_positive() {
        assert_eq!(all_resolutions().count(), 23);
        assert!(all_resolutions().all(|(r, _)| !r.is_empty()));
    }

    #[test]
    fn test_ratios_unique() {
        for (i, (a, _)) in RATIOS.iter().enumerate() {
            for (b, _) in &RATIOS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
