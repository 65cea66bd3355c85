// Location domain model
use crate::error::{AppError, AppResult};

/// How a location string is sent to the weather provider.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Place(String),
    Coordinates { lat: f64, lon: f64 },
}

impl Location {
    /// A comma means "lat,lon"; anything else is a place name.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let Some((lat, lon)) = raw.split_once(',') else {
            return Ok(Location::Place(raw.to_string()));
        };

        let invalid = || AppError::InvalidCoordinateFormat(raw.to_string());
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;
        if !lat.is_finite() || !lon.is_finite() {
            return Err(invalid());
        }

        Ok(Location::Coordinates { lat, lon })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place_name() {
        assert_eq!(
            Location::parse("London").unwrap(),
            Location::Place("London".to_string())
        );
        assert_eq!(
            Location::parse("New York").unwrap(),
            Location::Place("New York".to_string())
        );
    }

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(
            Location::parse("51.5074,-0.1278").unwrap(),
            Location::Coordinates {
                lat: 51.5074,
                lon: -0.1278
            }
        );
        assert_eq!(
            Location::parse("40.7, -74").unwrap(),
            Location::Coordinates { lat: 40.7, lon: -74.0 }
        );
    }

    #[test]
    fn test_parse_invalid_coordinates() {
        for raw in ["abc,def", "12.5,", ",3", "1,2,3", "NaN,1", "London, UK"] {
            let err = Location::parse(raw).unwrap_err();
            assert!(
                matches!(err, AppError::InvalidCoordinateFormat(ref s) if s == raw),
                "{raw} gave {err:?}"
            );
        }
    }
}
