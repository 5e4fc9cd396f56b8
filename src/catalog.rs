use std::str::FromStr;

use crate::error::{SeamwaveError, SeamwaveResult};

/// Width of one seamless tile in authored units. Translating a layer by
/// exactly this much reproduces the starting frame.
pub const TILE_WIDTH: f64 = 1440.0;

/// Paths are authored at twice the tile width so a layer can slide a full
/// tile before wrapping.
pub const AUTHORED_WIDTH: f64 = 2880.0;

/// Height of the authored coordinate box.
pub const AUTHORED_HEIGHT: f64 = 60.0;

/// One section boundary of the page. Closed set: a new boundary means a new
/// catalog entry, there is no dynamic registration.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WaveVariant {
    Hero,
    Menu,
    Events,
    Findus,
    Gallery,
    About,
}

/// Two wave outlines for one boundary, back and front, as SVG path data.
///
/// Both span the full authored box and close along its bottom edge. The top
/// profile at x=0 matches the top profile at x=AUTHORED_WIDTH so the wrap
/// from one loop to the next never shows a seam.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeEntry {
    pub back: &'static str,
    pub front: &'static str,
}

/// Seconds for one full tile of horizontal travel, per layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpeedEntry {
    pub back_secs: f64,
    pub front_secs: f64,
}

// Hero -> Menu: long, slow double-sine, very gentle.
const HERO: ShapeEntry = ShapeEntry {
    back: "M0,36 C240,56 480,16 720,36 C960,56 1200,16 1440,36 C1680,56 1920,16 2160,36 C2400,56 2640,16 2880,36 L2880,60 L0,60 Z",
    front: "M0,44 C180,24 360,56 540,44 C720,24 900,56 1080,44 C1260,24 1440,56 1620,44 C1800,24 1980,56 2160,44 C2340,24 2520,56 2700,44 C2880,24 2880,44 2880,44 L2880,60 L0,60 Z",
};

// Menu -> Events: scallop arches.
const MENU: ShapeEntry = ShapeEntry {
    back: "M0,30 Q180,0 360,30 Q540,60 720,30 Q900,0 1080,30 Q1260,60 1440,30 Q1620,0 1800,30 Q1980,60 2160,30 Q2340,0 2520,30 Q2700,60 2880,30 L2880,60 L0,60 Z",
    front: "M0,50 Q120,20 240,50 Q360,60 480,50 Q600,20 720,50 Q840,60 960,50 Q1080,20 1200,50 Q1320,60 1440,50 Q1560,20 1680,50 Q1800,60 1920,50 Q2040,20 2160,50 Q2280,60 2400,50 Q2520,20 2640,50 Q2760,60 2880,50 L2880,60 L0,60 Z",
};

// Events -> FindUs: sharp peaks / mountain range.
const EVENTS: ShapeEntry = ShapeEntry {
    back: "M0,60 L240,10 L480,50 L720,5 L960,45 L1200,15 L1440,55 L1680,10 L1920,50 L2160,5 L2400,45 L2640,15 L2880,60 Z",
    front: "M0,60 L160,35 L320,55 L480,20 L640,50 L800,25 L960,55 L1120,30 L1280,52 L1440,18 L1600,48 L1760,22 L1920,52 L2080,28 L2240,55 L2400,18 L2560,45 L2720,28 L2880,60 Z",
};

// FindUs -> Gallery: asymmetric tidal wave.
const FINDUS: ShapeEntry = ShapeEntry {
    back: "M0,40 C360,70 720,10 1080,40 C1440,70 1800,10 2160,40 C2520,70 2880,40 2880,40 L2880,60 L0,60 Z",
    front: "M0,50 C120,30 300,60 540,50 C780,40 900,20 1080,50 C1260,70 1440,30 1620,50 C1800,70 2040,20 2160,50 C2280,70 2520,30 2880,50 L2880,60 L0,60 Z",
};

// Gallery -> About: layered S-curve. The back path's right edge is pinned to
// the same y as its left edge so the tile boundary stays seamless.
const GALLERY: ShapeEntry = ShapeEntry {
    back: "M0,20 C300,55 600,5 900,30 C1200,55 1500,5 1800,20 C2100,45 2400,10 2880,20 L2880,60 L0,60 Z",
    front: "M0,45 C200,15 500,55 800,40 C1100,25 1300,55 1440,40 C1580,25 1780,55 2000,40 C2220,25 2500,55 2880,45 L2880,60 L0,60 Z",
};

// About -> Footer: rolling hills, generous arcs.
const ABOUT: ShapeEntry = ShapeEntry {
    back: "M0,35 C400,65 800,5 1200,35 C1600,65 2000,5 2400,35 C2640,55 2760,40 2880,35 L2880,60 L0,60 Z",
    front: "M0,50 C200,25 500,60 800,50 C1100,30 1300,65 1440,50 C1580,30 1800,65 2100,50 C2400,30 2680,60 2880,50 L2880,60 L0,60 Z",
};

impl WaveVariant {
    pub const ALL: [WaveVariant; 6] = [
        WaveVariant::Hero,
        WaveVariant::Menu,
        WaveVariant::Events,
        WaveVariant::Findus,
        WaveVariant::Gallery,
        WaveVariant::About,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Menu => "menu",
            Self::Events => "events",
            Self::Findus => "findus",
            Self::Gallery => "gallery",
            Self::About => "about",
        }
    }

    pub fn shape(self) -> &'static ShapeEntry {
        match self {
            Self::Hero => &HERO,
            Self::Menu => &MENU,
            Self::Events => &EVENTS,
            Self::Findus => &FINDUS,
            Self::Gallery => &GALLERY,
            Self::About => &ABOUT,
        }
    }

    /// Loop durations per layer. The front layer is always faster than the
    /// back one; that difference is what reads as parallax depth.
    pub fn speed(self) -> SpeedEntry {
        let (back_secs, front_secs) = match self {
            Self::Hero => (18.0, 11.0),
            Self::Menu => (14.0, 8.0),
            Self::Events => (10.0, 6.0),
            Self::Findus => (16.0, 9.0),
            Self::Gallery => (12.0, 7.0),
            Self::About => (20.0, 13.0),
        };
        SpeedEntry {
            back_secs,
            front_secs,
        }
    }

    /// Background color of the section below this boundary, as shipped on
    /// the site. The divider reads as a seam only when its fill matches that
    /// color, so this is the right default for previews.
    pub fn suggested_fill(self) -> &'static str {
        match self {
            Self::Hero => "#FFF0F6",
            Self::Menu => "#FFF0F6",
            Self::Events => "#FDE8EF",
            Self::Findus => "#FFF0F6",
            Self::Gallery => "#FFFFFF",
            Self::About => "#FFF0F6",
        }
    }
}

/// Shape and speed for one boundary. Infallible: the variant set is closed,
/// so a missing entry cannot be expressed.
pub fn lookup(variant: WaveVariant) -> (&'static ShapeEntry, SpeedEntry) {
    (variant.shape(), variant.speed())
}

impl FromStr for WaveVariant {
    type Err = SeamwaveError;

    fn from_str(s: &str) -> SeamwaveResult<Self> {
        for v in Self::ALL {
            if s.eq_ignore_ascii_case(v.as_str()) {
                return Ok(v);
            }
        }
        Err(SeamwaveError::config(format!(
            "unknown wave variant '{s}' (expected one of: hero, menu, events, findus, gallery, about)"
        )))
    }
}

impl std::fmt::Display for WaveVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_covers_every_variant() {
        for v in WaveVariant::ALL {
            let (shape, speed) = lookup(v);
            assert!(!shape.back.is_empty());
            assert!(!shape.front.is_empty());
            assert!(speed.back_secs > 0.0);
            assert!(speed.front_secs > 0.0);
        }
    }

    #[test]
    fn front_is_always_faster_than_back() {
        for v in WaveVariant::ALL {
            let speed = v.speed();
            assert!(
                speed.front_secs < speed.back_secs,
                "{v}: front {} !< back {}",
                speed.front_secs,
                speed.back_secs
            );
        }
    }

    #[test]
    fn from_str_roundtrips() {
        for v in WaveVariant::ALL {
            assert_eq!(v.as_str().parse::<WaveVariant>().unwrap(), v);
        }
        assert_eq!("MENU".parse::<WaveVariant>().unwrap(), WaveVariant::Menu);
    }

    #[test]
    fn from_str_rejects_unknown_variant() {
        let err = "nonexistent".parse::<WaveVariant>().unwrap_err();
        assert!(matches!(err, SeamwaveError::Config(_)));
        assert!(err.to_string().contains("unknown wave variant"));
    }

    #[test]
    fn serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&WaveVariant::Findus).unwrap();
        assert_eq!(json, "\"findus\"");
        let back: WaveVariant = serde_json::from_str("\"about\"").unwrap();
        assert_eq!(back, WaveVariant::About);
    }

    #[test]
    fn suggested_fills_are_valid_hex() {
        for v in WaveVariant::ALL {
            assert!(
                crate::core::Rgba8Premul::parse_hex(v.suggested_fill()).is_some(),
                "{v} has an unparsable suggested fill"
            );
        }
    }
}
