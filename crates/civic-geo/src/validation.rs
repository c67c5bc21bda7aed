use civic_core::models::GeoPoint;

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>) -> Self {
        Self { is_valid: false, errors }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
            self.errors.extend(other.errors);
        }
    }
}

/// Validate a WGS 84 point.
///
/// The clustering engine itself only needs finite values; out-of-range
/// coordinates cluster to nonsense but never fail. This check is for callers
/// that want to flag bad rows before they reach it.
pub fn validate_point(point: &GeoPoint) -> ValidationResult {
    let mut result = ValidationResult::valid();
    let location = format!("Point({}, {})", point.lat, point.lng);

    if !point.is_finite() {
        result.add_error(location, "Coordinates must be finite".to_string());
        return result;
    }

    if !(-90.0..=90.0).contains(&point.lat) {
        result.add_error(location.clone(), format!("Latitude {} outside [-90, 90]", point.lat));
    }
    if !(-180.0..=180.0).contains(&point.lng) {
        result.add_error(location, format!("Longitude {} outside [-180, 180]", point.lng));
    }

    result
}

/// Validate many points, labelling errors by input position
pub fn validate_points(points: &[GeoPoint]) -> ValidationResult {
    let mut result = ValidationResult::valid();
    for (i, point) in points.iter().enumerate() {
        let mut single = validate_point(point);
        for error in &mut single.errors {
            error.location = format!("[{}] {}", i, error.location);
        }
        result.merge(single);
    }
    result
}
