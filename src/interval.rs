use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 주당 근무 시간. 시간 단위 빈도를 주 단위로 환산할 때 쓴다.
pub const WORK_HOURS_PER_WEEK: f64 = 40.0;
/// 주당 근무 일수.
pub const WORK_DAYS_PER_WEEK: f64 = 5.0;
/// 한 달의 평균 주 수(근사값 그대로 유지해야 모든 금액이 일치한다).
pub const WEEKS_PER_MONTH: f64 = 4.33;
/// 1년의 주 수.
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// 빈도를 측정하는 시간 단위. 내부 기준은 주(week)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Hour,
    Day,
    Week,
    Month,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Hour => "hour",
            Interval::Day => "day",
            Interval::Week => "week",
            Interval::Month => "month",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 알 수 없는 간격 문자열.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interval: {0} (expected hour, day, week or month)")]
pub struct ParseIntervalError(pub String);

impl FromStr for Interval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hour" | "h" => Ok(Interval::Hour),
            "day" | "d" => Ok(Interval::Day),
            "week" | "w" => Ok(Interval::Week),
            "month" | "m" => Ok(Interval::Month),
            other => Err(ParseIntervalError(other.to_string())),
        }
    }
}

/// 간격 기준 빈도를 주당 발생 횟수로 환산한다.
pub fn to_weekly(frequency: f64, interval: Interval) -> f64 {
    match interval {
        Interval::Hour => frequency * WORK_HOURS_PER_WEEK,
        Interval::Day => frequency * WORK_DAYS_PER_WEEK,
        Interval::Week => frequency,
        Interval::Month => frequency / WEEKS_PER_MONTH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_per_interval_to_weekly() {
        assert_eq!(to_weekly(1.0, Interval::Hour), 40.0);
        assert_eq!(to_weekly(1.0, Interval::Day), 5.0);
        assert_eq!(to_weekly(1.0, Interval::Week), 1.0);
        assert_eq!(to_weekly(1.0, Interval::Month), 1.0 / 4.33);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Month".parse::<Interval>(), Ok(Interval::Month));
        assert_eq!(" day ".parse::<Interval>(), Ok(Interval::Day));
        assert!("fortnight".parse::<Interval>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Interval::Hour).unwrap();
        assert_eq!(json, "\"hour\"");
    }
}
