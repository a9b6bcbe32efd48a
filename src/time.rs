use std::fmt;
use std::str::FromStr;

/// Time of day, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd)]
pub struct ClockTime(u16);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a time of day: {0:?}")]
pub struct ParseTimeError(String);

impl ClockTime {
    pub const MINUTES_PER_DAY: u16 = 24 * 60;

    pub fn new(hours: u16, minutes: u16) -> Option<Self> {
        (hours < 24 && minutes < 60).then(|| ClockTime(hours * 60 + minutes))
    }

    pub fn hours(self) -> u16 {
        self.0 / 60
    }

    pub fn minutes(self) -> u16 {
        self.0 % 60
    }

    /// Minutes from `self` to `later`. An earlier `later` is taken to be on the next day.
    pub fn minutes_until(self, later: ClockTime) -> u16 {
        if later.0 >= self.0 {
            later.0 - self.0
        } else {
            later.0 + Self::MINUTES_PER_DAY - self.0
        }
    }
}

/// Rewrites free-form time text as `HH:MM`, or `None` when it cannot be read.
pub fn normalize(text: &str) -> Option<String> {
    text.parse::<ClockTime>().ok().map(|t| t.to_string())
}

#[derive(Clone, Copy)]
enum Meridiem {
    Am,
    Pm,
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for ClockTime {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseTimeError(s.to_string());
        let lower = s.trim().to_ascii_lowercase();

        let (body, meridiem) = if let Some(rest) = lower.strip_suffix("am") {
            (rest.trim_end(), Some(Meridiem::Am))
        } else if let Some(rest) = lower.strip_suffix("pm") {
            (rest.trim_end(), Some(Meridiem::Pm))
        } else {
            (lower.as_str(), None)
        };

        let (hours, minutes) = match body.find([':', '.', 'h']) {
            Some(pos) => (&body[..pos], &body[pos + 1..]),
            // compact 830 / 0830
            None if body.len() > 2 && is_digits(body) => body.split_at(body.len() - 2),
            None => (body, "00"),
        };
        if !is_digits(hours) || !is_digits(minutes) || hours.len() > 2 || minutes.len() > 2 {
            return Err(invalid());
        }

        let mut hours: u16 = hours.parse().map_err(|_| invalid())?;
        let minutes: u16 = minutes.parse().map_err(|_| invalid())?;

        if let Some(meridiem) = meridiem {
            if !(1..=12).contains(&hours) {
                return Err(invalid());
            }
            hours = match meridiem {
                Meridiem::Am => hours % 12,
                Meridiem::Pm => hours % 12 + 12,
            };
        }

        ClockTime::new(hours, minutes).ok_or_else(invalid)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_accepted_forms() {
        assert_eq!(ClockTime::new(8, 0), Some(t("08:00")));
        assert_eq!(ClockTime::new(8, 5), Some(t("8:05")));
        assert_eq!(ClockTime::new(8, 5), Some(t("8:5")));
        assert_eq!(ClockTime::new(17, 45), Some(t(" 17.45 ")));
        assert_eq!(ClockTime::new(17, 45), Some(t("17h45")));
        assert_eq!(ClockTime::new(8, 30), Some(t("830")));
        assert_eq!(ClockTime::new(23, 59), Some(t("2359")));
        assert_eq!(ClockTime::new(9, 0), Some(t("9")));
    }

    #[test]
    fn test_meridiem() {
        assert_eq!(ClockTime::new(0, 15), Some(t("12:15am")));
        assert_eq!(ClockTime::new(12, 15), Some(t("12:15 PM")));
        assert_eq!(ClockTime::new(19, 0), Some(t("7pm")));
        assert_eq!(ClockTime::new(7, 30), Some(t("7:30 AM")));
        assert!("13pm".parse::<ClockTime>().is_err());
        assert!("0am".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_rejected_forms() {
        for bad in ["", "24:00", "12:60", "noon", "8:", ":30", "12345", "1:2:3", "-1:00", "８:00"] {
            assert!(bad.parse::<ClockTime>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_display_and_normalize() {
        assert_eq!("07:05", t("7:5").to_string());
        assert_eq!(Some("21:10".to_string()), normalize("9:10pm"));
        assert_eq!(None, normalize("soon"));
    }

    #[test]
    fn test_minutes_until_wraps_midnight() {
        assert_eq!(180, t("08:00").minutes_until(t("11:00")));
        assert_eq!(0, t("08:00").minutes_until(t("08:00")));
        assert_eq!(150, t("23:00").minutes_until(t("01:30")));
    }
}
