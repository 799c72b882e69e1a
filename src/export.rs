//! 활동 목록 CSV 내보내기. 모든 필드는 큰따옴표로 감싼다.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::activity::ActivityWithCosts;
use crate::calculator::roi::{self, Payback, Roi};
use crate::format::{self, NOT_AVAILABLE};

pub const CSV_HEADER: [&str; 15] = [
    "Activity #",
    "Name",
    "Category",
    "Frequency",
    "Interval",
    "Duration",
    "Hourly Rate",
    "Weekly Cost",
    "Monthly Cost",
    "Annual Cost",
    "Automation Cost",
    "Efficiency Improvement (%)",
    "Annual Savings",
    "ROI (%)",
    "Payback (months)",
];

/// 내보내기 오류.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write CSV: {0}")]
    Io(#[from] io::Error),
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn write_row<W: Write>(out: &mut W, fields: &[String]) -> io::Result<()> {
    let line: Vec<String> = fields.iter().map(|f| quote(f)).collect();
    writeln!(out, "{}", line.join(","))
}

fn money(v: f64) -> String {
    format!("{v:.2}")
}

/// 활동 한 줄의 필드를 만든다. 시나리오가 없으면 ROI 열은 `N/A`.
pub fn row_fields(entry: &ActivityWithCosts) -> Vec<String> {
    let a = &entry.activity;
    let c = &entry.costs;
    let mut fields = vec![
        a.activity_number.to_string(),
        a.name.clone(),
        a.category.clone(),
        a.frequency.to_string(),
        a.interval.to_string(),
        format::format_duration(a.duration),
        money(a.hourly_rate),
        money(c.weekly),
        money(c.monthly),
        money(c.annual),
    ];
    match &a.scenario {
        Some(scenario) => {
            let r = roi::scenario_roi(c, scenario);
            fields.push(money(r.automation_cost));
            fields.push(format!("{:.1}", r.efficiency_reduction));
            fields.push(money(r.annual_savings));
            fields.push(match r.roi {
                Roi::Percent(v) => format!("{v:.1}"),
                Roi::Undefined => NOT_AVAILABLE.to_string(),
            });
            fields.push(match r.payback {
                Payback::Months(m) => format!("{m:.1}"),
                Payback::Immediate => "0.0".to_string(),
                Payback::Never => NOT_AVAILABLE.to_string(),
            });
        }
        None => fields.extend(std::iter::repeat(NOT_AVAILABLE.to_string()).take(5)),
    }
    fields
}

/// 헤더와 활동별 행을 순서대로 기록한다.
pub fn export_csv<'a, W, I>(entries: I, out: &mut W) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a ActivityWithCosts>,
{
    let header: Vec<String> = CSV_HEADER.iter().map(|h| h.to_string()).collect();
    write_row(out, &header)?;
    let mut rows = 0;
    for entry in entries {
        write_row(out, &row_fields(entry))?;
        rows += 1;
    }
    out.flush()?;
    log::debug!("exported {rows} activities to CSV");
    Ok(rows)
}

/// CSV 파일을 만들어 기록한다.
pub fn export_csv_file<'a, I>(entries: I, path: &Path) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a ActivityWithCosts>,
{
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    export_csv(entries, &mut BufWriter::new(file))
}

/// 문자열로 내보낸다.
pub fn export_csv_string<'a, I>(entries: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a ActivityWithCosts>,
{
    let mut buf = Vec::new();
    export_csv(entries, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(quote(r#"say "hi", ok"#), r#""say ""hi"", ok""#);
    }

    #[test]
    fn header_only_for_empty_list() {
        let text = export_csv_string(&Vec::<ActivityWithCosts>::new()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("\"Activity #\",\"Name\""));
    }
}
