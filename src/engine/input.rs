//! Parsing of user-entered durations

use super::error::{Result, TimerError};

/// Parse a typed minute count such as `" 10 "`.
///
/// Only positive whole numbers are accepted.
pub fn parse_minutes(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    let minutes: i64 = trimmed
        .parse()
        .map_err(|_| TimerError::InvalidInput(trimmed.to_string()))?;

    if minutes <= 0 {
        return Err(TimerError::InvalidDuration(minutes));
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_padded_positive_numbers() {
        assert_eq!(parse_minutes("5"), Ok(5));
        assert_eq!(parse_minutes("  25\n"), Ok(25));
    }

    #[test]
    fn rejects_non_positive() {
        assert_eq!(parse_minutes("0"), Err(TimerError::InvalidDuration(0)));
        assert_eq!(parse_minutes("-2"), Err(TimerError::InvalidDuration(-2)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            parse_minutes("five"),
            Err(TimerError::InvalidInput("five".to_string()))
        );
        assert_eq!(
            parse_minutes("1.5"),
            Err(TimerError::InvalidInput("1.5".to_string()))
        );
        assert_eq!(parse_minutes(""), Err(TimerError::InvalidInput(String::new())));
    }
}
