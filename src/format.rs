//! 화면/내보내기용 문자열 변환. 계산 로직은 두지 않는다.

use crate::calculator::roi::{Payback, Roi};

/// 기본 통화 기호.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
/// 정의되지 않은 값의 표기.
pub const NOT_AVAILABLE: &str = "N/A";

/// 금액을 정수 단위로 반올림하고 천 단위 구분 기호를 넣는다. (예: `$1,235`)
pub fn format_currency(amount: f64) -> String {
    format_currency_with(amount, DEFAULT_CURRENCY_SYMBOL)
}

/// 통화 기호를 지정해 금액을 표시한다.
pub fn format_currency_with(amount: f64, symbol: &str) -> String {
    if !amount.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{}", group_thousands(rounded.abs()))
}

fn group_thousands(whole: f64) -> String {
    let digits = format!("{whole:.0}");
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 소수점 한 자리 백분율. (예: `80.0%`)
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// 시간(h)을 읽기 쉬운 형태로 표시한다.
///
/// 1시간 미만은 분 단위(`30 min`), 그 이상은 `1h`, `1h 15m` 형태.
pub fn format_duration(hours: f64) -> String {
    if hours < 1.0 {
        let minutes = (hours * 60.0).round();
        return format!("{minutes:.0} min");
    }
    let mut whole_hours = hours.floor();
    let mut minutes = ((hours - whole_hours) * 60.0).round();
    if minutes >= 60.0 {
        whole_hours += 1.0;
        minutes = 0.0;
    }
    if minutes == 0.0 {
        format!("{whole_hours:.0}h")
    } else {
        format!("{whole_hours:.0}h {minutes:.0}m")
    }
}

/// ROI 표시. 정의되지 않으면 `N/A`.
pub fn format_roi(roi: Roi) -> String {
    match roi {
        Roi::Percent(v) => format_percentage(v),
        Roi::Undefined => NOT_AVAILABLE.to_string(),
    }
}

/// 회수기간 표시. (예: `3.0 months`, `Immediate`, `∞`)
pub fn format_payback(payback: Payback) -> String {
    match payback {
        Payback::Months(m) => format!("{m:.1} months"),
        Payback::Immediate => "Immediate".to_string(),
        Payback::Never => "∞".to_string(),
    }
}
