use std::time::Duration;

pub fn duration_to_ms_string(duration: Duration) -> String {
    format!("{:.2}ms", duration.as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_milliseconds_with_two_decimals() {
        assert_eq!(duration_to_ms_string(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(duration_to_ms_string(Duration::from_secs(2)), "2000.00ms");
        assert_eq!(duration_to_ms_string(Duration::ZERO), "0.00ms");
    }
}
