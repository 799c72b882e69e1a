use automation_cost_calculator::{
    activity::{Activity, ActivityWithCosts, AutomationScenario},
    export::{self, CSV_HEADER},
    interval::Interval,
};
use pretty_assertions::assert_eq;

fn activity(n: u32, name: &str, scenario: Option<AutomationScenario>) -> ActivityWithCosts {
    ActivityWithCosts::new(Activity {
        id: format!("id-{n}"),
        activity_number: n,
        name: name.to_string(),
        frequency: 1.0,
        interval: Interval::Week,
        duration: 1.0,
        hourly_rate: 20.0,
        category: "Administrative".to_string(),
        scenario,
    })
}

#[test]
fn header_and_rows_in_ledger_order() {
    let entries = vec![
        activity(1, "Sort mail", None),
        activity(2, "Say \"hi\", team", Some(AutomationScenario::new(2_000.0, 80.0))),
    ];
    let csv = export::export_csv_string(&entries).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);

    let header: Vec<String> = CSV_HEADER.iter().map(|h| format!("\"{h}\"")).collect();
    assert_eq!(lines[0], header.join(","));

    assert_eq!(
        lines[1],
        "\"1\",\"Sort mail\",\"Administrative\",\"1\",\"week\",\"1h\",\"20.00\",\
         \"20.00\",\"86.60\",\"1040.00\",\"N/A\",\"N/A\",\"N/A\",\"N/A\",\"N/A\""
    );
    assert_eq!(
        lines[2],
        "\"2\",\"Say \"\"hi\"\", team\",\"Administrative\",\"1\",\"week\",\"1h\",\"20.00\",\
         \"20.00\",\"86.60\",\"1040.00\",\"2000.00\",\"80.0\",\"832.00\",\"-58.4\",\"28.8\""
    );
}

#[test]
fn empty_ledger_exports_header_only() {
    let csv = export::export_csv_string(&Vec::<ActivityWithCosts>::new()).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn writes_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let entries = vec![activity(1, "Sort mail", None)];
    let mut file = std::fs::File::create(&path).unwrap();
    let rows = export::export_csv(&entries, &mut file).unwrap();
    assert_eq!(rows, 1);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("\"Activity #\""));
}
