//! Steel Battalion LED panel report.
//!
//! # Report layout (22 bytes, interrupt OUT)
//! | Offset | Size | Field   | Encoding                                     |
//! |--------|------|---------|----------------------------------------------|
//! | 0      | u8   | header  | always `0x00`                                |
//! | 1      | u8   | length  | always `0x16`                                |
//! | 2–20   | 19   | leds    | 38 nibbles, slot `2k` low, slot `2k+1` high  |
//! | 21     | u8   | padding | always `0x00`                                |
//!
//! Each nibble is a brightness level from 0 (off) to [`MAX_INTENSITY`].

use crate::{SbcError, SbcResult};
use serde::{Deserialize, Serialize};

pub const LED_REPORT_LEN: usize = 22;

/// Nibble slots in the report, including the one unused slot.
pub const LED_COUNT: usize = 38;

pub const MAX_INTENSITY: u8 = 0x0F;

const LED_PAYLOAD_OFFSET: usize = 2;

/// Panel LEDs, numbered by their nibble slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SbcLed {
    EmergencyEject = 0,
    CockpitHatch = 1,
    Ignition = 2,
    Start = 3,
    OpenClose = 4,
    MapZoomInOut = 5,
    ModeSelect = 6,
    SubMonitorModeSelect = 7,
    MainMonitorZoomIn = 8,
    MainMonitorZoomOut = 9,
    ForecastShootingSystem = 10,
    Manipulator = 11,
    LineColorChange = 12,
    Washing = 13,
    Extinguisher = 14,
    Chaff = 15,
    TankDetach = 16,
    Override = 17,
    NightScope = 18,
    F1 = 19,
    F2 = 20,
    F3 = 21,
    MainWeaponControl = 22,
    SubWeaponControl = 23,
    MagazineChange = 24,
    Comm1 = 25,
    Comm2 = 26,
    Comm3 = 27,
    Comm4 = 28,
    Comm5 = 29,
    // Slot 30 is wired to nothing.
    GearR = 31,
    GearN = 32,
    Gear1 = 33,
    Gear2 = 34,
    Gear3 = 35,
    Gear4 = 36,
    Gear5 = 37,
}

impl SbcLed {
    pub const ALL: [SbcLed; 37] = [
        Self::EmergencyEject,
        Self::CockpitHatch,
        Self::Ignition,
        Self::Start,
        Self::OpenClose,
        Self::MapZoomInOut,
        Self::ModeSelect,
        Self::SubMonitorModeSelect,
        Self::MainMonitorZoomIn,
        Self::MainMonitorZoomOut,
        Self::ForecastShootingSystem,
        Self::Manipulator,
        Self::LineColorChange,
        Self::Washing,
        Self::Extinguisher,
        Self::Chaff,
        Self::TankDetach,
        Self::Override,
        Self::NightScope,
        Self::F1,
        Self::F2,
        Self::F3,
        Self::MainWeaponControl,
        Self::SubWeaponControl,
        Self::MagazineChange,
        Self::Comm1,
        Self::Comm2,
        Self::Comm3,
        Self::Comm4,
        Self::Comm5,
        Self::GearR,
        Self::GearN,
        Self::Gear1,
        Self::Gear2,
        Self::Gear3,
        Self::Gear4,
        Self::Gear5,
    ];

    pub fn slot(self) -> usize {
        usize::from(self as u8)
    }
}

impl TryFrom<u8> for SbcLed {
    type Error = SbcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|led| *led as u8 == value)
            .ok_or(SbcError::UnknownLed(value))
    }
}

/// Brightness of every panel LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SbcLeds {
    levels: [u8; LED_COUNT],
}

impl Default for SbcLeds {
    fn default() -> Self {
        Self {
            levels: [0; LED_COUNT],
        }
    }
}

impl SbcLeds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every LED at the same level.
    pub fn uniform(intensity: u8) -> SbcResult<Self> {
        let mut leds = Self::default();
        for led in SbcLed::ALL {
            leds.set(led, intensity)?;
        }
        Ok(leds)
    }

    pub fn set(&mut self, led: SbcLed, intensity: u8) -> SbcResult<&mut Self> {
        if intensity > MAX_INTENSITY {
            return Err(SbcError::IntensityOutOfRange(intensity));
        }
        if let Some(level) = self.levels.get_mut(led.slot()) {
            *level = intensity;
        }
        Ok(self)
    }

    pub fn get(&self, led: SbcLed) -> u8 {
        self.levels.get(led.slot()).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.levels = [0; LED_COUNT];
    }

    /// Encode the 22-byte OUT report.
    pub fn to_report(&self) -> [u8; LED_REPORT_LEN] {
        let mut report = [0u8; LED_REPORT_LEN];
        if let Some(length) = report.get_mut(1) {
            *length = LED_REPORT_LEN as u8;
        }
        let packed = report
            .iter_mut()
            .skip(LED_PAYLOAD_OFFSET)
            .zip(self.levels.chunks_exact(2));
        for (byte, pair) in packed {
            if let &[low, high] = pair {
                *byte = (low & MAX_INTENSITY) | ((high & MAX_INTENSITY) << 4);
            }
        }
        report
    }
}
