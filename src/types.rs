use crate::error::{QpResult, QsoPartyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

// === BANDS ===

/// Contest bands, declared low frequency first so `Ord` follows the dial.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, Serialize, Deserialize,
)]
pub enum Band {
    #[strum(serialize = "160")]
    #[serde(rename = "160m")]
    M160,
    #[strum(serialize = "80")]
    #[serde(rename = "80m")]
    M80,
    #[strum(serialize = "40")]
    #[serde(rename = "40m")]
    M40,
    #[strum(serialize = "20")]
    #[serde(rename = "20m")]
    M20,
    #[strum(serialize = "15")]
    #[serde(rename = "15m")]
    M15,
    #[strum(serialize = "10")]
    #[serde(rename = "10m")]
    M10,
    #[strum(serialize = "6")]
    #[serde(rename = "6m")]
    M6,
    #[strum(serialize = "2")]
    #[serde(rename = "2m")]
    M2,
}

impl Band {
    pub fn meters(self) -> u32 {
        match self {
            Self::M160 => 160,
            Self::M80 => 80,
            Self::M40 => 40,
            Self::M20 => 20,
            Self::M15 => 15,
            Self::M10 => 10,
            Self::M6 => 6,
            Self::M2 => 2,
        }
    }

    pub fn from_meters(meters: u32) -> Option<Self> {
        Band::iter().find(|b| b.meters() == meters)
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.meters())
    }
}

// === MODES ===

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Cw,
    Ph,
    Ry,
    Dg,
    Dig,
    Fm,
    Ssb,
    Lsb,
    Usb,
    Rtty,
    Ft8,
    Ft4,
}

/// Scoring class of a mode. Which modes land in which class is configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum ModeClass {
    #[strum(serialize = "Phone")]
    Phone,
    #[strum(serialize = "CW/Digital")]
    CwDigital,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Serialize, Deserialize)]
pub enum ModeCategory {
    PhoneOnly,
    CwDigitalOnly,
    Mixed,
}

impl ModeCategory {
    pub fn code(self) -> u8 {
        match self {
            Self::PhoneOnly => 0,
            Self::CwDigitalOnly => 1,
            Self::Mixed => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        ModeCategory::iter().find(|m| m.code() == code)
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Self::PhoneOnly => "ph",
            Self::CwDigitalOnly => "cw",
            Self::Mixed => "mx",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PhoneOnly => "Phone Only",
            Self::CwDigitalOnly => "CW/Digital Only",
            Self::Mixed => "Mixed",
        }
    }
}

// === DECLARED STATION CLASSES ===

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerClass {
    Qrp,
    Low,
    High,
}

impl PowerClass {
    pub fn code(self) -> u8 {
        match self {
            Self::Qrp => 0,
            Self::Low => 1,
            Self::High => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        PowerClass::iter().find(|p| p.code() == code)
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Self::Qrp => "qp",
            Self::Low => "lo",
            Self::High => "hi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Qrp => "QRP",
            Self::Low => "Low Power",
            Self::High => "High Power",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum StationClass {
    Fixed,
    Portable,
    Mobile,
    Rover,
}

impl StationClass {
    /// FIXED and PORTABLE both operate from a single location.
    pub fn is_fixed_type(self) -> bool {
        matches!(self, Self::Fixed | Self::Portable)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
pub enum Overlay {
    #[strum(serialize = "WIRES")]
    #[serde(rename = "WIRES")]
    Wires,
    #[strum(serialize = "TB-WIRES")]
    #[serde(rename = "TB-WIRES")]
    TbWires,
    #[strum(serialize = "POTA")]
    #[serde(rename = "POTA")]
    Pota,
}

impl Overlay {
    pub fn code(self) -> u8 {
        match self {
            Self::Wires => 1,
            Self::TbWires => 2,
            Self::Pota => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Overlay::iter().find(|o| o.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Wires => "Wires Only",
            Self::TbWires => "Tribander + Wires",
            Self::Pota => "Parks on the Air",
        }
    }
}

// === LOCATIONS ===

/// Classification of a single location code against the reference sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum LocationKind {
    Local,
    Regional,
    Foreign,
}

/// Where the log's own station operated from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display, Serialize, Deserialize,
)]
pub enum LocationClass {
    Foreign,
    Regional,
    LocalFixed,
    LocalRover,
}

impl LocationClass {
    pub fn code(self) -> u8 {
        match self {
            Self::Foreign => 0,
            Self::Regional => 1,
            Self::LocalFixed => 2,
            Self::LocalRover => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        LocationClass::iter().find(|l| l.code() == code)
    }

    pub fn is_local(self) -> bool {
        matches!(self, Self::LocalFixed | Self::LocalRover)
    }

    pub fn award_station(self) -> AwardStation {
        match self {
            Self::Foreign | Self::Regional => AwardStation::NonLocal,
            Self::LocalFixed => AwardStation::LocalFixed,
            Self::LocalRover => AwardStation::LocalRover,
        }
    }
}

// === CATEGORY ===

/// Derived contest category of one log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryAssignment {
    pub location: LocationClass,
    pub mode: ModeCategory,
    pub power: PowerClass,
    pub overlay: Option<Overlay>,
}

impl CategoryAssignment {
    /// Compact `location,mode,power,overlay` code list used by the synthetic directive.
    pub fn to_code(&self) -> String {
        format!(
            "{},{},{},{}",
            self.location.code(),
            self.mode.code(),
            self.power.code(),
            self.overlay.map_or(0, Overlay::code)
        )
    }

    pub fn from_code(code: &str) -> QpResult<Self> {
        let parts: Vec<&str> = code.trim().split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(QsoPartyError::Prepared(format!(
                "Category code '{}' requires 4 values",
                code
            )));
        }

        let mut nums = [0u8; 4];
        for (i, p) in parts.iter().enumerate() {
            nums[i] = p.parse().map_err(|_| {
                QsoPartyError::Prepared(format!("Invalid number '{}' in category code", p))
            })?;
        }

        let bad = |what: &str, n: u8| {
            QsoPartyError::Prepared(format!("Unknown {} code {} in '{}'", what, n, code))
        };

        let location = LocationClass::from_code(nums[0]).ok_or_else(|| bad("location", nums[0]))?;
        let mode = ModeCategory::from_code(nums[1]).ok_or_else(|| bad("mode", nums[1]))?;
        let power = PowerClass::from_code(nums[2]).ok_or_else(|| bad("power", nums[2]))?;
        let overlay = match nums[3] {
            0 => None,
            n => Some(Overlay::from_code(n).ok_or_else(|| bad("overlay", n))?),
        };

        Ok(Self {
            location,
            mode,
            power,
            overlay,
        })
    }

    pub fn base_group(&self) -> AwardGroup {
        AwardGroup {
            station: self.location.award_station(),
            mode: self.mode,
            division: Division::Power(self.power),
        }
    }

    pub fn overlay_group(&self) -> Option<AwardGroup> {
        self.overlay.map(|_| AwardGroup {
            station: self.location.award_station(),
            mode: self.mode,
            division: Division::Overlay,
        })
    }

    /// Every award group this log competes in: its base group first.
    pub fn groups(&self) -> Vec<AwardGroup> {
        let mut groups = vec![self.base_group()];
        groups.extend(self.overlay_group());
        groups
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Serialize, Deserialize,
)]
pub enum AwardStation {
    NonLocal,
    LocalFixed,
    LocalRover,
}

impl AwardStation {
    pub fn short_name(self) -> &'static str {
        match self {
            Self::NonLocal => "nl",
            Self::LocalFixed => "lf",
            Self::LocalRover => "lr",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NonLocal => "Non-Local",
            Self::LocalFixed => "Local Fixed",
            Self::LocalRover => "Local Rover",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Division {
    Power(PowerClass),
    Overlay,
}

/// One of the award groups logs are ranked within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AwardGroup {
    pub station: AwardStation,
    pub mode: ModeCategory,
    pub division: Division,
}

impl AwardGroup {
    /// All 36 groups in ranking-report order.
    pub fn all() -> Vec<AwardGroup> {
        let mut groups = Vec::new();
        for station in AwardStation::iter() {
            for mode in ModeCategory::iter() {
                for power in PowerClass::iter() {
                    groups.push(AwardGroup {
                        station,
                        mode,
                        division: Division::Power(power),
                    });
                }
                groups.push(AwardGroup {
                    station,
                    mode,
                    division: Division::Overlay,
                });
            }
        }
        groups
    }

    pub fn short_name(&self) -> String {
        let division = match self.division {
            Division::Power(p) => p.short_name(),
            Division::Overlay => "ol",
        };
        format!(
            "{}_{}_{}",
            self.station.short_name(),
            self.mode.short_name(),
            division
        )
    }

    pub fn full_name(&self) -> String {
        let division = match self.division {
            Division::Power(p) => p.label(),
            Division::Overlay => "Overlay",
        };
        format!(
            "{} - {} - {}",
            self.station.label(),
            self.mode.label(),
            division
        )
    }
}

impl fmt::Display for AwardGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}
