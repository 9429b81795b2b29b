//! Background asset catalog.
//!
//! Asset names coming from the external filesystem are classified exactly
//! once when the catalog is built; everything after that dispatches on
//! [`AssetKind`], never on filename substrings. The catalog keeps the
//! presentation order: hero image first, then stills, animations, weather
//! art, and the mascot last.

use heapless::{String, Vec};
use log::warn;

pub const MAX_ASSETS: usize = 32;
pub const MAX_ASSET_NAME_LEN: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    /// The one signature still that opens the rotation.
    HeroStill,
    Still,
    Animation,
    WeatherArt,
    Mascot,
    Other,
}

impl AssetKind {
    fn rank(&self) -> u8 {
        match self {
            AssetKind::HeroStill => 0,
            AssetKind::Still => 1,
            AssetKind::Animation => 2,
            AssetKind::WeatherArt => 3,
            AssetKind::Mascot => 4,
            AssetKind::Other => 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    pub name: String<MAX_ASSET_NAME_LEN>,
    pub kind: AssetKind,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return false;
    }
    haystack
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name.as_bytes()[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
}

fn is_jpeg(name: &str) -> bool {
    ends_with_ignore_case(name, ".jpg") || ends_with_ignore_case(name, ".jpeg")
}

fn is_gif(name: &str) -> bool {
    ends_with_ignore_case(name, ".gif")
}

fn classify(name: &str) -> AssetKind {
    if contains_ignore_case(name, "weather") {
        AssetKind::WeatherArt
    } else if contains_ignore_case(name, "vaultboy") {
        AssetKind::Mascot
    } else if is_jpeg(name) {
        AssetKind::Still
    } else if is_gif(name) {
        AssetKind::Animation
    } else {
        AssetKind::Other
    }
}

/// Ordered background catalog. Indexed by the settings' background index.
#[derive(Default)]
pub struct Catalog {
    assets: Vec<Asset, MAX_ASSETS>,
}

impl Catalog {
    /// Classify and order a batch of asset names. Names that do not fit
    /// the bounded storage are dropped with a warning; classification
    /// happens here and nowhere else.
    pub fn build<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut staged: Vec<Asset, MAX_ASSETS> = Vec::new();
        for name in names {
            let mut stored = String::new();
            if stored.push_str(name).is_err() {
                warn!("asset name too long, skipping: {name}");
                continue;
            }
            let kind = classify(name);
            if staged.push(Asset { name: stored, kind }).is_err() {
                warn!("asset catalog full, skipping: {name}");
                break;
            }
        }

        // The first signature still leads the rotation.
        if let Some(hero) = staged
            .iter_mut()
            .find(|a| a.kind == AssetKind::Still && contains_ignore_case(&a.name, "ironman"))
        {
            hero.kind = AssetKind::HeroStill;
        }

        // Stable bucket ordering, one pass per rank.
        let mut ordered: Vec<Asset, MAX_ASSETS> = Vec::new();
        for rank in 0..=5 {
            for asset in &staged {
                if asset.kind.rank() == rank {
                    // capacity matches `staged`, push cannot fail
                    let _ = ordered.push(asset.clone());
                }
            }
        }

        Self { assets: ordered }
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Asset> {
        self.assets.get(index)
    }

    /// Index of the next background in rotation.
    pub fn next_index(&self, current: usize) -> usize {
        if self.assets.is_empty() {
            0
        } else {
            (current + 1) % self.assets.len()
        }
    }
}
