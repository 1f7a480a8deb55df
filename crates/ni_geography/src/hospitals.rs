use fxhash::FxHashMap;
use serde::Serialize;
use tracing::warn;

use crate::{postcodes::PostcodeRecord, zone_level::ZoneLevel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hospital {
    pub name: &'static str,
    pub postcode: &'static str,
    /// Has a maternity unit
    pub maternity: bool,
}

const fn hospital(name: &'static str, postcode: &'static str, maternity: bool) -> Hospital {
    Hospital {
        name,
        postcode,
        maternity,
    }
}

/// Acute hospitals in Northern Ireland.
pub const HOSPITALS: [Hospital; 15] = [
    hospital("Royal Victoria Hospital", "BT12 6BA", true),
    hospital("Belfast City Hospital", "BT9 7AB", false),
    hospital("Ulster Hospital", "BT16 1RH", true),
    hospital("Mater Hospital", "BT14 6AB", false),
    hospital("Antrim Area Hospital", "BT41 2RL", true),
    hospital("Altnagelvin Area Hospital", "BT47 6SB", true),
    hospital("Craigavon Area Hospital", "BT63 5QQ", true),
    hospital("Daisy Hill Hospital", "BT35 8DR", true),
    hospital("South West Acute Hospital", "BT74 6DN", true),
    hospital("Causeway Hospital", "BT52 1HS", false),
    hospital("Mid Ulster Hospital", "BT45 5EX", false),
    hospital("Downe Hospital", "BT30 6RL", false),
    hospital("Lagan Valley Hospital", "BT28 1JP", false),
    hospital("South Tyrone Hospital", "BT71 4AU", false),
    hospital("Robinson Memorial Hospital", "BT53 6HB", false),
];

/// A hospital resolved to the zones containing its postcode.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LocatedHospital {
    pub name: String,
    pub postcode: String,
    #[serde(rename = "SA2011")]
    pub sa2011: String,
    #[serde(rename = "DZ2021")]
    pub dz2021: String,
    pub maternity: bool,
}

impl LocatedHospital {
    pub fn zone_code(&self, level: ZoneLevel) -> Option<&str> {
        match level {
            ZoneLevel::DataZone => Some(self.dz2021.as_str()),
            ZoneLevel::SmallArea => Some(self.sa2011.as_str()),
            ZoneLevel::SuperDataZone => None,
        }
    }
}

pub fn normalize_postcode(postcode: &str) -> String {
    postcode.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Joins hospitals with the postcode directory. Hospitals whose postcode is
/// not in the directory are left out.
pub fn locate_hospitals(
    hospitals: &[Hospital],
    postcodes: &[PostcodeRecord],
) -> Vec<LocatedHospital> {
    let by_postcode = postcodes
        .iter()
        .map(|record| (record.postcode.as_str(), record))
        .collect::<FxHashMap<_, _>>();

    hospitals
        .iter()
        .filter_map(|hospital| {
            let Some(record) = by_postcode.get(normalize_postcode(hospital.postcode).as_str())
            else {
                warn!(
                    hospital = hospital.name,
                    postcode = hospital.postcode,
                    "Hospital postcode not found in postcode directory"
                );
                return None;
            };

            Some(LocatedHospital {
                name: hospital.name.to_string(),
                postcode: hospital.postcode.to_string(),
                sa2011: record.sa2011.clone(),
                dz2021: record.dz2021.clone(),
                maternity: hospital.maternity,
            })
        })
        .collect()
}

/// Zone codes of the hospitals with a maternity unit.
pub fn maternity_zone_codes(hospitals: &[LocatedHospital], level: ZoneLevel) -> Vec<&str> {
    hospitals
        .iter()
        .filter(|hospital| hospital.maternity)
        .filter_map(|hospital| hospital.zone_code(level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(postcode: &str, sa2011: &str, dz2021: &str) -> PostcodeRecord {
        PostcodeRecord {
            postcode: postcode.to_string(),
            sa2011: sa2011.to_string(),
            dz2021: dz2021.to_string(),
        }
    }

    #[test]
    fn test_normalize_postcode() {
        assert_eq!(normalize_postcode("BT12 6BA"), "BT126BA");
        assert_eq!(normalize_postcode(" BT9 7AB "), "BT97AB");
    }

    #[test]
    fn test_locate_hospitals() {
        let postcodes = vec![
            record("BT97AB", "N00000100", "95GG02S1"),
            record("BT126BA", "N00000200", "95GG03S4"),
        ];

        let located = locate_hospitals(&HOSPITALS, &postcodes);

        assert_eq!(located.len(), 2);
        assert_eq!(located[0].name, "Royal Victoria Hospital");
        assert_eq!(located[0].sa2011, "N00000200");
        assert!(located[0].maternity);
        assert_eq!(located[1].name, "Belfast City Hospital");
        assert!(!located[1].maternity);
    }

    #[test]
    fn test_maternity_zone_codes() {
        let postcodes = vec![
            record("BT97AB", "N00000100", "95GG02S1"),
            record("BT126BA", "N00000200", "95GG03S4"),
            record("BT358DR", "N00000300", "95NN10S3"),
        ];
        let located = locate_hospitals(&HOSPITALS, &postcodes);

        assert_eq!(
            maternity_zone_codes(&located, ZoneLevel::SmallArea),
            vec!["N00000200", "N00000300"]
        );
        assert_eq!(
            maternity_zone_codes(&located, ZoneLevel::DataZone),
            vec!["95GG03S4", "95NN10S3"]
        );
        assert!(maternity_zone_codes(&located, ZoneLevel::SuperDataZone).is_empty());
    }

    #[test]
    fn test_directory() {
        assert_eq!(HOSPITALS.iter().filter(|h| h.maternity).count(), 7);
    }
}
