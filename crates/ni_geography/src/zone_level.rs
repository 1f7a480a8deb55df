use std::fmt::Display;

/// The statistical geographies the travel matrices are built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneLevel {
    /// Census 2021 Data Zone
    DataZone,
    /// Census 2021 Super Data Zone
    SuperDataZone,
    /// Census 2011 Small Area
    SmallArea,
}

impl ZoneLevel {
    /// Column holding the zone identifier in the published centroid tables.
    pub fn code_column(self) -> &'static str {
        match self {
            ZoneLevel::DataZone => "DZ2021_code",
            ZoneLevel::SuperDataZone => "SDZ2021_code",
            ZoneLevel::SmallArea => "SA2011",
        }
    }

    /// Property holding the zone identifier in the boundary files, for the
    /// levels that have one.
    pub fn boundary_key(self) -> Option<&'static str> {
        match self {
            ZoneLevel::DataZone => Some("DZ2021_cd"),
            ZoneLevel::SuperDataZone => None,
            ZoneLevel::SmallArea => Some("SA2011"),
        }
    }

    pub fn file_prefix(self) -> &'static str {
        match self {
            ZoneLevel::DataZone => "dz",
            ZoneLevel::SuperDataZone => "sdz",
            ZoneLevel::SmallArea => "sa",
        }
    }
}

impl Display for ZoneLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ZoneLevel::DataZone => "data zone",
                ZoneLevel::SuperDataZone => "super data zone",
                ZoneLevel::SmallArea => "small area",
            }
        )
    }
}
