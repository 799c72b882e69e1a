use std::io::{self, Write};
use std::path::PathBuf;

use crate::activity::{ActivityUpdate, AutomationScenario, NewActivity, DEFAULT_CATEGORIES};
use crate::app::AppError;
use crate::breakdown;
use crate::calculator::{CostCalculation, PaybackRating, PortfolioRoi, RoiRating, RoiResult};
use crate::config::Config;
use crate::export;
use crate::format::{
    format_currency_with, format_duration, format_payback, format_percentage, format_roi,
};
use crate::i18n::{keys, Translator};
use crate::interval::Interval;
use crate::ledger::{ActivityLedger, SortField, SortState};
use crate::repository::ActivityRepository;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    Edit,
    Scenario,
    Remove,
    Totals,
    Portfolio,
    Export,
    Settings,
    Clear,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_ADD,
        keys::MAIN_MENU_LIST,
        keys::MAIN_MENU_EDIT,
        keys::MAIN_MENU_SCENARIO,
        keys::MAIN_MENU_REMOVE,
        keys::MAIN_MENU_TOTALS,
        keys::MAIN_MENU_PORTFOLIO,
        keys::MAIN_MENU_EXPORT,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_CLEAR,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match parse_menu(sel.trim()) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn parse_menu(sel: &str) -> Option<MenuChoice> {
    match sel {
        "1" => Some(MenuChoice::Add),
        "2" => Some(MenuChoice::List),
        "3" => Some(MenuChoice::Edit),
        "4" => Some(MenuChoice::Scenario),
        "5" => Some(MenuChoice::Remove),
        "6" => Some(MenuChoice::Totals),
        "7" => Some(MenuChoice::Portfolio),
        "8" => Some(MenuChoice::Export),
        "9" => Some(MenuChoice::Settings),
        "10" => Some(MenuChoice::Clear),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 활동 추가 메뉴. 입력이 모두 유효하면 비용 미리보기를 보여준 뒤 저장한다.
pub fn handle_add<R: ActivityRepository>(
    tr: &Translator,
    cfg: &Config,
    ledger: &mut ActivityLedger<R>,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::ADD_HEADING));
    println!("{}", tr.t(keys::PROMPT_KEEP_HINT));
    let defaults = cfg.defaults.new_activity();
    let name = read_line(tr.t(keys::PROMPT_NAME))?.trim().to_string();
    let category = read_category(tr, &defaults.category)?;
    let frequency = read_f64_or(tr, keys::PROMPT_FREQUENCY, defaults.frequency)?;
    let interval = read_interval(tr, defaults.interval)?;
    let duration = read_f64_or(tr, keys::PROMPT_DURATION, defaults.duration)?;
    let hourly_rate = read_f64_or(tr, keys::PROMPT_HOURLY_RATE, defaults.hourly_rate)?;
    let input = NewActivity {
        name,
        frequency,
        interval,
        duration,
        hourly_rate,
        category,
    };
    if let Some(costs) = input.preview_costs() {
        println!("{}", preview_line(tr, cfg, &costs));
    }
    match ledger.add(input) {
        Ok(entry) => {
            let number = entry.activity.activity_number;
            println!("{}", tr.tf(keys::ADD_DONE, &[("number", number.to_string())]));
        }
        Err(crate::ledger::LedgerError::Invalid(e)) => {
            println!("{}: {e}", tr.t(keys::ADD_REJECTED));
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn preview_line(tr: &Translator, cfg: &Config, costs: &CostCalculation) -> String {
    let money = |v: f64| format_currency_with(v, &cfg.currency_symbol);
    tr.tf(
        keys::ADD_PREVIEW,
        &[
            ("per", money(costs.per_activity)),
            ("weekly", money(costs.weekly)),
            ("monthly", money(costs.monthly)),
            ("annual", money(costs.annual)),
        ],
    )
}

/// 활동 목록 메뉴. 정렬 상태는 호출 사이에 유지된다.
pub fn handle_list<R: ActivityRepository>(
    tr: &Translator,
    cfg: &Config,
    ledger: &ActivityLedger<R>,
    sort: &mut SortState,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::LIST_HEADING));
    if ledger.is_empty() {
        println!("{}", tr.t(keys::NOTHING_RECORDED));
        return Ok(());
    }
    println!("{}", tr.t(keys::LIST_SORT_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
    *sort = next_sort(*sort, sel.trim());
    print_table(tr, cfg, ledger, *sort);
    Ok(())
}

fn next_sort(current: SortState, sel: &str) -> SortState {
    let field = match sel {
        "1" => SortField::ActivityNumber,
        "2" => SortField::PerActivity,
        "3" => SortField::Weekly,
        "4" => SortField::Monthly,
        "5" => SortField::Annual,
        _ => return current,
    };
    current.toggle(field)
}

/// 표 형태로 활동을 출력한다.
pub fn print_table<R: ActivityRepository>(
    tr: &Translator,
    cfg: &Config,
    ledger: &ActivityLedger<R>,
    sort: SortState,
) {
    let money = |v: f64| format_currency_with(v, &cfg.currency_symbol);
    println!("{}", tr.t(keys::LIST_COLUMNS));
    for entry in ledger.sorted(sort) {
        let a = &entry.activity;
        println!(
            "{:<3} {} / {} / {}x per {} / {} / {} / {} / {}",
            a.activity_number,
            a.name,
            a.category,
            a.frequency,
            a.interval,
            format_duration(a.duration),
            money(entry.costs.weekly),
            money(entry.costs.monthly),
            money(entry.costs.annual),
        );
    }
}

/// 활동 수정 메뉴. 엔터는 현재 값을 유지한다.
pub fn handle_edit<R: ActivityRepository>(
    tr: &Translator,
    ledger: &mut ActivityLedger<R>,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::EDIT_HEADING));
    let Some(id) = select_activity(tr, ledger)? else {
        return Ok(());
    };
    println!("{}", tr.t(keys::PROMPT_KEEP_HINT));
    let name = read_line(tr.t(keys::PROMPT_NAME))?;
    let category = read_line(tr.t(keys::PROMPT_CATEGORY))?;
    let update = ActivityUpdate {
        name: non_empty(&name),
        category: non_empty(&category).map(|c| resolve_category(&c)),
        frequency: read_optional_f64(tr, keys::PROMPT_FREQUENCY)?,
        interval: read_optional_interval(tr)?,
        duration: read_optional_f64(tr, keys::PROMPT_DURATION)?,
        hourly_rate: read_optional_f64(tr, keys::PROMPT_HOURLY_RATE)?,
    };
    match ledger.update(&id, &update) {
        Ok(_) => println!("{}", tr.t(keys::EDIT_DONE)),
        Err(crate::ledger::LedgerError::Invalid(e)) => {
            println!("{}: {e}", tr.t(keys::ADD_REJECTED));
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// 활동별 자동화 시나리오 메뉴. 입력 후 해당 활동의 ROI를 바로 보여준다.
pub fn handle_scenario<R: ActivityRepository>(
    tr: &Translator,
    cfg: &Config,
    ledger: &mut ActivityLedger<R>,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SCENARIO_HEADING));
    let Some(id) = select_activity(tr, ledger)? else {
        return Ok(());
    };
    println!("{}", tr.t(keys::SCENARIO_DETACH_HINT));
    let current = ledger
        .get(&id)
        .and_then(|e| e.activity.scenario)
        .unwrap_or(AutomationScenario::new(
            cfg.defaults.automation_cost,
            cfg.defaults.efficiency_reduction,
        ));
    let raw = read_line(&format!(
        "{}[{}] ",
        tr.t(keys::PROMPT_AUTOMATION_COST),
        current.automation_cost
    ))?;
    if raw.trim() == "-" {
        ledger.set_scenario(&id, None)?;
        println!("{}", tr.t(keys::SCENARIO_DETACHED));
        return Ok(());
    }
    let automation_cost = if raw.trim().is_empty() {
        current.automation_cost
    } else {
        match raw.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                println!("{}", tr.t(keys::ERROR_INVALID_NUMBER));
                return Ok(());
            }
        }
    };
    let efficiency = read_f64_or(tr, keys::PROMPT_EFFICIENCY, current.efficiency_reduction)?;
    let scenario = AutomationScenario::new(automation_cost, efficiency);
    match ledger.set_scenario(&id, Some(scenario)) {
        Ok(_) => {
            if let Some(result) = ledger.scenario_result(&id) {
                print_roi(tr, cfg, &result);
            }
        }
        Err(crate::ledger::LedgerError::Invalid(e)) => {
            println!("{}: {e}", tr.t(keys::ADD_REJECTED));
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// 활동 삭제 메뉴.
pub fn handle_remove<R: ActivityRepository>(
    tr: &Translator,
    ledger: &mut ActivityLedger<R>,
) -> Result<(), AppError> {
    let Some(id) = select_activity(tr, ledger)? else {
        return Ok(());
    };
    let removed = ledger.remove(&id)?;
    println!(
        "{}",
        tr.tf(
            keys::REMOVE_DONE,
            &[("number", removed.activity.activity_number.to_string())]
        )
    );
    Ok(())
}

/// 전체 삭제 메뉴.
pub fn handle_clear<R: ActivityRepository>(
    tr: &Translator,
    ledger: &mut ActivityLedger<R>,
) -> Result<(), AppError> {
    let answer = read_line(tr.t(keys::CLEAR_CONFIRM))?;
    if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
        ledger.clear()?;
        println!("{}", tr.t(keys::CLEAR_DONE));
    }
    Ok(())
}

/// 비용 합계와 기간별/활동별 분해를 출력한다.
pub fn print_totals<R: ActivityRepository>(tr: &Translator, cfg: &Config, ledger: &ActivityLedger<R>) {
    println!("{}", tr.t(keys::TOTALS_HEADING));
    let money = |v: f64| format_currency_with(v, &cfg.currency_symbol);
    let totals = ledger.totals();
    println!("{}", tr.tf(keys::TOTALS_COUNT, &[("count", ledger.len().to_string())]));
    let rows = breakdown::period_breakdown(&totals);
    let max = rows.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    for (period, amount) in rows {
        let fraction = if max > 0.0 { amount / max } else { 0.0 };
        println!(
            "{:<8} {} {}",
            period.label(),
            breakdown::text_bar(fraction, 30),
            money(amount)
        );
    }
    if ledger.is_empty() {
        return;
    }
    println!("{}", tr.t(keys::TOTALS_SHARES));
    for share in breakdown::activity_shares(ledger.entries()) {
        println!(
            "  {} {} {} ({})",
            breakdown::text_bar(share.share_percent / 100.0, 20),
            share.name,
            money(share.annual),
            format_percentage(share.share_percent)
        );
    }
}

/// 포트폴리오 ROI를 출력한다.
pub fn print_portfolio<R: ActivityRepository>(
    tr: &Translator,
    cfg: &Config,
    ledger: &ActivityLedger<R>,
) {
    println!("{}", tr.t(keys::PORTFOLIO_HEADING));
    if ledger.is_empty() {
        println!("{}", tr.t(keys::NOTHING_RECORDED));
        return;
    }
    let portfolio: PortfolioRoi = ledger.portfolio();
    let money = |v: f64| format_currency_with(v, &cfg.currency_symbol);
    println!(
        "{}",
        tr.tf(
            keys::PORTFOLIO_INVESTMENT,
            &[("value", money(portfolio.total_automation_cost))]
        )
    );
    println!(
        "{}",
        tr.tf(
            keys::PORTFOLIO_EFFICIENCY,
            &[("value", format_percentage(portfolio.blended_efficiency))]
        )
    );
    if portfolio.used_default_efficiency {
        println!("{}", tr.t(keys::PORTFOLIO_DEFAULT_NOTE));
    }
    println!(
        "{}",
        tr.tf(
            keys::RESULT_ANNUAL_COST,
            &[("value", money(portfolio.total_annual_cost))]
        )
    );
    print_roi(tr, cfg, &portfolio.result);
}

/// ROI 결과 블록을 출력한다.
pub fn print_roi(tr: &Translator, cfg: &Config, result: &RoiResult) {
    let money = |v: f64| format_currency_with(v, &cfg.currency_symbol);
    println!(
        "{}",
        tr.tf(keys::RESULT_ANNUAL_SAVINGS, &[("value", money(result.annual_savings))])
    );
    println!("{}", tr.tf(keys::RESULT_ROI, &[("value", format_roi(result.roi))]));
    println!(
        "{}",
        tr.tf(keys::RESULT_PAYBACK, &[("value", format_payback(result.payback))])
    );
    println!(
        "{}",
        tr.tf(
            keys::RESULT_RATING,
            &[
                ("roi", tr.t(roi_rating_key(RoiRating::of(result.roi))).to_string()),
                (
                    "payback",
                    tr.t(payback_rating_key(PaybackRating::of(result.payback))).to_string()
                ),
            ]
        )
    );
}

fn roi_rating_key(rating: RoiRating) -> &'static str {
    match rating {
        RoiRating::Excellent => keys::RATING_EXCELLENT,
        RoiRating::Good => keys::RATING_GOOD,
        RoiRating::Moderate => keys::RATING_MODERATE,
        RoiRating::Negative => keys::RATING_NEGATIVE,
        RoiRating::Undefined => keys::RATING_UNDEFINED,
    }
}

fn payback_rating_key(rating: PaybackRating) -> &'static str {
    match rating {
        PaybackRating::Fast => keys::PAYBACK_FAST,
        PaybackRating::Reasonable => keys::PAYBACK_REASONABLE,
        PaybackRating::Slow => keys::PAYBACK_SLOW,
        PaybackRating::Long => keys::PAYBACK_LONG,
    }
}

/// CSV 내보내기 메뉴.
pub fn handle_export<R: ActivityRepository>(
    tr: &Translator,
    ledger: &ActivityLedger<R>,
) -> Result<(), AppError> {
    let raw = read_line(tr.t(keys::EXPORT_PROMPT_PATH))?;
    let path = if raw.trim().is_empty() {
        PathBuf::from("activities.csv")
    } else {
        PathBuf::from(raw.trim())
    };
    let count = export_to_file(ledger, &path)?;
    println!(
        "{}",
        tr.tf(
            keys::EXPORT_DONE,
            &[("count", count.to_string()), ("path", path.display().to_string())]
        )
    );
    Ok(())
}

/// 장부 순서대로 CSV 파일을 쓴다.
pub fn export_to_file<R: ActivityRepository>(
    ledger: &ActivityLedger<R>,
    path: &std::path::Path,
) -> Result<usize, AppError> {
    Ok(export::export_csv_file(ledger.entries(), path)?)
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{}",
        tr.tf(
            keys::SETTINGS_CURRENT,
            &[
                ("lang", cfg.language.clone()),
                ("symbol", cfg.currency_symbol.clone())
            ]
        )
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
    match sel.trim() {
        "1" => {
            let code = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            if !code.trim().is_empty() {
                cfg.language = code.trim().to_string();
            }
        }
        "2" => {
            let symbol = read_line(tr.t(keys::SETTINGS_PROMPT_CURRENCY))?;
            if !symbol.trim().is_empty() {
                cfg.currency_symbol = symbol.trim().to_string();
            }
        }
        "" => return Ok(()),
        _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
    }
    Ok(())
}

fn select_activity<R: ActivityRepository>(
    tr: &Translator,
    ledger: &ActivityLedger<R>,
) -> Result<Option<String>, AppError> {
    if ledger.is_empty() {
        println!("{}", tr.t(keys::NOTHING_RECORDED));
        return Ok(None);
    }
    let number = read_f64(tr, keys::PROMPT_ACTIVITY_NUMBER)?;
    let found = if number >= 1.0 && number.fract() == 0.0 {
        ledger.get_by_number(number as u32)
    } else {
        None
    };
    match found {
        Some(entry) => Ok(Some(entry.activity.id.clone())),
        None => {
            println!("{}", tr.t(keys::ERROR_UNKNOWN_ACTIVITY));
            Ok(None)
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

/// 번호(1~8)면 기본 분류로, 그 밖의 문자열은 자유 입력 분류로 본다.
fn resolve_category(input: &str) -> String {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=DEFAULT_CATEGORIES.len()).contains(&n) => DEFAULT_CATEGORIES[n - 1].to_string(),
        _ => input.trim().to_string(),
    }
}

fn read_category(tr: &Translator, default: &str) -> Result<String, AppError> {
    let options: Vec<String> = DEFAULT_CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}={c}", i + 1))
        .collect();
    println!("{}", options.join("  "));
    let raw = read_line(&format!("{}[{default}] ", tr.t(keys::PROMPT_CATEGORY)))?;
    Ok(non_empty(&raw)
        .map(|c| resolve_category(&c))
        .unwrap_or_else(|| default.to_string()))
}

fn read_interval(tr: &Translator, default: Interval) -> Result<Interval, AppError> {
    loop {
        let raw = read_line(&format!("{}[{default}] ", tr.t(keys::PROMPT_INTERVAL)))?;
        if raw.trim().is_empty() {
            return Ok(default);
        }
        match raw.parse::<Interval>() {
            Ok(i) => return Ok(i),
            Err(_) => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn read_optional_interval(tr: &Translator) -> Result<Option<Interval>, AppError> {
    loop {
        let raw = read_line(tr.t(keys::PROMPT_INTERVAL))?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        match raw.parse::<Interval>() {
            Ok(i) => return Ok(Some(i)),
            Err(_) => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "standard input closed").into());
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, key: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(tr.t(key))?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_f64_or(tr: &Translator, key: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{}[{default}] ", tr.t(key)))?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_optional_f64(tr: &Translator, key: &str) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(tr.t(key))?;
        if s.trim().is_empty() {
            return Ok(None);
        }
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 오류 메시지 앞에 번역된 접두어를 붙인다.
pub fn error_line(tr: &Translator, err: &dyn std::error::Error) -> String {
    format!("{}: {err}", tr.t(keys::ERROR_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers() {
        assert_eq!(parse_menu("1"), Some(MenuChoice::Add));
        assert_eq!(parse_menu("10"), Some(MenuChoice::Clear));
        assert_eq!(parse_menu("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu("11"), None);
    }

    #[test]
    fn repeated_sort_choice_reverses_direction() {
        use crate::ledger::SortDirection;
        let s = next_sort(SortState::default(), "5");
        assert_eq!((s.field, s.direction), (SortField::Annual, SortDirection::Asc));
        let s = next_sort(s, "3");
        assert_eq!((s.field, s.direction), (SortField::Weekly, SortDirection::Desc));
        let s = next_sort(s, "3");
        assert_eq!((s.field, s.direction), (SortField::Weekly, SortDirection::Asc));
        assert_eq!(next_sort(s, ""), s);
    }

    #[test]
    fn category_by_number_or_name() {
        assert_eq!(resolve_category("2"), "Data Entry");
        assert_eq!(resolve_category("8"), "Other");
        assert_eq!(resolve_category("9"), "9");
        assert_eq!(resolve_category(" Payroll "), "Payroll");
    }
}
