use ni_geography::zone_level::ZoneLevel;

pub fn parse_date(input: &str) -> Result<jiff::civil::Date, String> {
    input
        .parse::<jiff::civil::Date>()
        .map_err(|err| format!("Invalid date: {err}"))
}

pub fn parse_zone_level(input: &str) -> Result<ZoneLevel, String> {
    match input.to_lowercase().as_str() {
        "dz" | "data-zone" => Ok(ZoneLevel::DataZone),
        "sdz" | "super-data-zone" => Ok(ZoneLevel::SuperDataZone),
        "sa" | "small-area" => Ok(ZoneLevel::SmallArea),
        _ => Err(String::from("Invalid zone level, expected dz, sdz or sa")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2025-01-26").unwrap();
        assert_eq!(date.to_string(), "2025-01-26");
        assert!(parse_date("26/01/2025").is_err());
    }

    #[test]
    fn test_parse_zone_level() {
        assert_eq!(parse_zone_level("DZ").unwrap(), ZoneLevel::DataZone);
        assert_eq!(parse_zone_level("sdz").unwrap(), ZoneLevel::SuperDataZone);
        assert_eq!(parse_zone_level("small-area").unwrap(), ZoneLevel::SmallArea);
        assert!(parse_zone_level("lgd").is_err());
    }
}
