//! Localized names of Archicad property groups and properties.
//!
//! Archicad exports `elementProperties` keyed by the UI language of the
//! authoring session, so every lookup goes through these tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    #[serde(alias = "uk")]
    Ua,
}

impl Locale {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ua => "ua",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ua" | "uk" => Ok(Locale::Ua),
            other => Err(ConfigError::UnknownLocale(other.to_string())),
        }
    }
}

/// Property groups inside `elementProperties`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    General,
    BuildingInfo,
    Openings,
    WindowFilling,
    Zones,
    ZoneSummary,
}

impl Group {
    #[must_use]
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Group::General, Locale::En) => "General Parameters",
            (Group::General, Locale::Ua) => "Загальні параметри",
            (Group::BuildingInfo, Locale::En) => "BUILDING INFORMATION",
            (Group::BuildingInfo, Locale::Ua) => "ІНФОРМАЦІЯ ПРО БУДИНОК",
            (Group::Openings, Locale::En) => "OPENINGS",
            (Group::Openings, Locale::Ua) => "ОТВОРИ",
            (Group::WindowFilling, Locale::En) => "WINDOW OPENING FILLING",
            (Group::WindowFilling, Locale::Ua) => "ЗАПОВНЕННЯ ВІКОННИХ ОТВОРІВ",
            (Group::Zones, Locale::En) => "ZONES",
            (Group::Zones, Locale::Ua) => "ЗОНИ",
            (Group::ZoneSummary, _) => "ZONESUM",
        }
    }
}

/// Individual properties, looked up inside a [`Group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prop {
    ElementId,
    TopLinkStory,
    CrossSectionWidth,
    CrossSectionHeight,
    BottomElevationHomeStory,
    TopElevationHomeStory,
    BottomElevationProjectZero,
    BuildingPart,
    Discipline,
    OpeningLevel,
    Orientation,
    ApartmentLocation,
    ZoneGid,
    ZoneNumber,
    ZoneFunction,
    ZoneCoefficient,
    ZoneFlatArea,
    ZoneTotalArea,
    ZoneLivingArea,
    ZoneType,
}

impl Prop {
    #[must_use]
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Prop::ElementId, Locale::En) => "Element ID",
            (Prop::ElementId, Locale::Ua) => "ID Елементу",
            (Prop::TopLinkStory, Locale::En) => "Top Link Story",
            (Prop::TopLinkStory, Locale::Ua) => "Поверх верхньої прив’язки",
            (Prop::CrossSectionWidth, Locale::En) => "Cross Section Width at Bottom Start (cut)",
            (Prop::CrossSectionWidth, Locale::Ua) => {
                "Ширина поперечного перетину внизу  на початку (зріз)"
            }
            (Prop::CrossSectionHeight, Locale::En) => {
                "Cross Section Height at Bottom Start (cut)"
            }
            (Prop::CrossSectionHeight, Locale::Ua) => {
                "Висота поперечного перетину внизу  на початку (зріз)"
            }
            (Prop::BottomElevationHomeStory, Locale::En) => "Bottom Elevation To Home Story",
            (Prop::BottomElevationHomeStory, Locale::Ua) => {
                "Нижня висотна відмітка відносно вихідного поверху"
            }
            (Prop::TopElevationHomeStory, Locale::En) => "Top Elevation To Home Story",
            (Prop::TopElevationHomeStory, Locale::Ua) => {
                "Верхня висотна відмітка відносно вихідного поверху"
            }
            (Prop::BottomElevationProjectZero, Locale::En) => "Bottom Elevation To Project Zero",
            (Prop::BottomElevationProjectZero, Locale::Ua) => {
                "Нижня висотна відмітка відносно нуля проекту"
            }
            (Prop::BuildingPart, Locale::En) => "RLL-Building Part",
            (Prop::BuildingPart, Locale::Ua) => "RLL-Частина будівлі",
            (Prop::Orientation, Locale::En) => "Window Filling Orientation",
            (Prop::Orientation, Locale::Ua) => "Орієнтація віконного заповнення",
            (Prop::ApartmentLocation, Locale::En) => "LOCATION Apartment",
            (Prop::ApartmentLocation, Locale::Ua) => "ЛОКАЦИЯ Квартира",
            // custom properties carry the same key in every language
            (Prop::Discipline, _) => "spk_prop_discipline",
            (Prop::OpeningLevel, _) => "spk_opening_level",
            (Prop::ZoneGid, _) => "spk_prop_gid",
            (Prop::ZoneNumber, _) => "spk_prop_num",
            (Prop::ZoneFunction, _) => "spk_prop_func",
            (Prop::ZoneCoefficient, _) => "spk_prop_coef",
            (Prop::ZoneFlatArea, _) => "spk_prop_flat",
            (Prop::ZoneTotalArea, _) => "spk_prop_total",
            (Prop::ZoneLivingArea, _) => "spk_prop_living",
            (Prop::ZoneType, _) => "spk_prop_type",
        }
    }
}
