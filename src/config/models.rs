//! Configuration data models
//!
//! This module defines the data structures persisted between runs: the preview
//! size and the tray icon. Neither feeds into the session lifecycle beyond
//! sizing the preview surface.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Preview surface dimensions in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewSize {
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl PreviewSize {
    /// "Smol" preset
    pub const SMALL: Self = Self::new(380, 190);
    /// "Average" preset (default)
    pub const AVERAGE: Self = Self::new(480, 240);
    /// "Beeg" preset
    pub const LARGE: Self = Self::new(640, 320);

    /// All presets in menu order with their labels
    pub const PRESETS: [(&'static str, Self); 3] = [
        ("Smol", Self::SMALL),
        ("Average", Self::AVERAGE),
        ("Beeg", Self::LARGE),
    ];

    /// Create a size from its dimensions
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are non-zero
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Menu label of the matching preset, if any
    pub fn preset_label(&self) -> Option<&'static str> {
        Self::PRESETS
            .iter()
            .find(|(_, size)| size == self)
            .map(|(label, _)| *label)
    }
}

impl Default for PreviewSize {
    fn default() -> Self {
        Self::AVERAGE
    }
}

impl fmt::Display for PreviewSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Icons available for the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuBarIcon {
    /// Camcorder
    Camcoder,
    /// DSLR camera
    Dslr,
    /// Pair of eyes
    Eyes,
    /// Rear-view mirror
    Rearmirror,
    /// Side mirror
    Sidemirror,
    /// Webcam (default)
    #[default]
    Webcam,
    /// Alternate webcam
    Webcam2,
}

impl MenuBarIcon {
    /// Every icon, in catalogue order
    pub const ALL: [Self; 7] = [
        Self::Camcoder,
        Self::Dslr,
        Self::Eyes,
        Self::Rearmirror,
        Self::Sidemirror,
        Self::Webcam,
        Self::Webcam2,
    ];

    /// Asset name of the icon
    pub fn name(self) -> &'static str {
        match self {
            Self::Camcoder => "camcoder",
            Self::Dslr => "dslr",
            Self::Eyes => "eyes",
            Self::Rearmirror => "rearmirror",
            Self::Sidemirror => "sidemirror",
            Self::Webcam => "webcam",
            Self::Webcam2 => "webcam2",
        }
    }

    /// Pick an icon uniformly at random
    pub fn random() -> Self {
        // v4 UUIDs carry 122 random bits
        let roll = Uuid::new_v4().as_u128();
        let len = Self::ALL.len() as u128;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "remainder is below ALL.len()"
        )]
        let index = (roll % len) as usize;
        Self::ALL[index]
    }
}

impl fmt::Display for MenuBarIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Preview surface size
    pub preview_size: PreviewSize,
    /// Control surface icon
    pub icon: MenuBarIcon,
    /// How long the owner loop waits for control input before draining
    /// session updates, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preview_size: PreviewSize::default(),
            icon: MenuBarIcon::default(),
            poll_interval_ms: 50,
        }
    }
}

impl AppConfig {
    /// Longest accepted owner-loop wait, in milliseconds
    pub const MAX_POLL_INTERVAL_MS: u64 = 1000;

    /// Replace out-of-range values with defaults, returning whether anything changed
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        if !self.preview_size.is_valid() {
            self.preview_size = PreviewSize::default();
            changed = true;
        }
        if self.poll_interval_ms == 0 {
            self.poll_interval_ms = Self::default().poll_interval_ms;
            changed = true;
        } else if self.poll_interval_ms > Self::MAX_POLL_INTERVAL_MS {
            self.poll_interval_ms = Self::MAX_POLL_INTERVAL_MS;
            changed = true;
        }
        changed
    }
}
