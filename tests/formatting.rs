use automation_cost_calculator::{
    calculator::{Payback, Roi},
    format::{
        format_currency, format_currency_with, format_duration, format_payback, format_percentage,
        format_roi,
    },
};

#[test]
fn currency_rounds_and_groups() {
    assert_eq!(format_currency(1234.5), "$1,235");
    assert_eq!(format_currency(999.4), "$999");
    assert_eq!(format_currency(0.0), "$0");
    assert_eq!(format_currency(1_234_567.0), "$1,234,567");
    assert_eq!(format_currency(-1234.5), "-$1,235");
    assert_eq!(format_currency_with(3250.0, "€"), "€3,250");
    assert_eq!(format_currency(f64::INFINITY), "N/A");
}

#[test]
fn percentage_one_decimal() {
    assert_eq!(format_percentage(80.0), "80.0%");
    assert_eq!(format_percentage(33.333), "33.3%");
    assert_eq!(format_percentage(-100.0), "-100.0%");
}

#[test]
fn duration_minutes_and_hours() {
    assert_eq!(format_duration(0.5), "30 min");
    assert_eq!(format_duration(0.25), "15 min");
    assert_eq!(format_duration(1.0), "1h");
    assert_eq!(format_duration(1.25), "1h 15m");
    assert_eq!(format_duration(2.5), "2h 30m");
    assert_eq!(format_duration(1.999), "2h");
}

#[test]
fn sentinels_render_readably() {
    assert_eq!(format_roi(Roi::Percent(300.0)), "300.0%");
    assert_eq!(format_roi(Roi::Undefined), "N/A");
    assert_eq!(format_payback(Payback::Months(3.0)), "3.0 months");
    assert_eq!(format_payback(Payback::Immediate), "Immediate");
    assert_eq!(format_payback(Payback::Never), "∞");
}
