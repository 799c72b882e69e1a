use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const NOTHING_RECORDED: &str = "general.nothing_recorded";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_ADD: &str = "main_menu.add";
    pub const MAIN_MENU_LIST: &str = "main_menu.list";
    pub const MAIN_MENU_EDIT: &str = "main_menu.edit";
    pub const MAIN_MENU_SCENARIO: &str = "main_menu.scenario";
    pub const MAIN_MENU_REMOVE: &str = "main_menu.remove";
    pub const MAIN_MENU_TOTALS: &str = "main_menu.totals";
    pub const MAIN_MENU_PORTFOLIO: &str = "main_menu.portfolio";
    pub const MAIN_MENU_EXPORT: &str = "main_menu.export";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_CLEAR: &str = "main_menu.clear";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_UNKNOWN_ACTIVITY: &str = "error.unknown_activity";

    pub const ADD_HEADING: &str = "add.heading";
    pub const PROMPT_NAME: &str = "prompt.name";
    pub const PROMPT_CATEGORY: &str = "prompt.category";
    pub const PROMPT_FREQUENCY: &str = "prompt.frequency";
    pub const PROMPT_INTERVAL: &str = "prompt.interval";
    pub const PROMPT_DURATION: &str = "prompt.duration";
    pub const PROMPT_HOURLY_RATE: &str = "prompt.hourly_rate";
    pub const PROMPT_KEEP_HINT: &str = "prompt.keep_hint";
    pub const ADD_PREVIEW: &str = "add.preview";
    pub const ADD_DONE: &str = "add.done";
    pub const ADD_REJECTED: &str = "add.rejected";

    pub const LIST_HEADING: &str = "list.heading";
    pub const LIST_SORT_OPTIONS: &str = "list.sort_options";
    pub const LIST_COLUMNS: &str = "list.columns";

    pub const PROMPT_ACTIVITY_NUMBER: &str = "prompt.activity_number";
    pub const EDIT_HEADING: &str = "edit.heading";
    pub const EDIT_DONE: &str = "edit.done";

    pub const SCENARIO_HEADING: &str = "scenario.heading";
    pub const PROMPT_AUTOMATION_COST: &str = "prompt.automation_cost";
    pub const PROMPT_EFFICIENCY: &str = "prompt.efficiency";
    pub const SCENARIO_DETACH_HINT: &str = "scenario.detach_hint";
    pub const SCENARIO_DETACHED: &str = "scenario.detached";

    pub const REMOVE_DONE: &str = "remove.done";
    pub const CLEAR_CONFIRM: &str = "clear.confirm";
    pub const CLEAR_DONE: &str = "clear.done";

    pub const TOTALS_HEADING: &str = "totals.heading";
    pub const TOTALS_COUNT: &str = "totals.count";
    pub const TOTALS_SHARES: &str = "totals.shares";

    pub const PORTFOLIO_HEADING: &str = "portfolio.heading";
    pub const PORTFOLIO_INVESTMENT: &str = "portfolio.investment";
    pub const PORTFOLIO_EFFICIENCY: &str = "portfolio.efficiency";
    pub const PORTFOLIO_DEFAULT_NOTE: &str = "portfolio.default_note";
    pub const RESULT_ANNUAL_COST: &str = "result.annual_cost";
    pub const RESULT_ANNUAL_SAVINGS: &str = "result.annual_savings";
    pub const RESULT_ROI: &str = "result.roi";
    pub const RESULT_PAYBACK: &str = "result.payback";
    pub const RESULT_RATING: &str = "result.rating";

    pub const EXPORT_PROMPT_PATH: &str = "export.prompt_path";
    pub const EXPORT_DONE: &str = "export.done";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_CURRENCY: &str = "settings.prompt_currency";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const RATING_EXCELLENT: &str = "rating.excellent";
    pub const RATING_GOOD: &str = "rating.good";
    pub const RATING_MODERATE: &str = "rating.moderate";
    pub const RATING_NEGATIVE: &str = "rating.negative";
    pub const RATING_UNDEFINED: &str = "rating.undefined";
    pub const PAYBACK_FAST: &str = "payback.fast";
    pub const PAYBACK_REASONABLE: &str = "payback.reasonable";
    pub const PAYBACK_SLOW: &str = "payback.slow";
    pub const PAYBACK_LONG: &str = "payback.long";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        if overrides.is_some() {
            log::debug!("loaded language pack for {lang_code}");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    /// 번역을 가져온다. 언어팩 → 선택 언어 → 영어 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)).unwrap_or(key),
            Language::En => en(key).unwrap_or(key),
        }
    }

    /// `{name}` 자리표시자를 채운 번역.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }
}

/// `{k}` 자리표시자를 값으로 바꾼다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" | "ko-kr" => Some("ko".into()),
        "en" | "en-us" | "en-uk" | "en-gb" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 테이블.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = dir.join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) 전체 코드(en-us) 2) 기본 코드(en)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        NOTHING_RECORDED => "기록된 활동이 없습니다. 먼저 활동을 추가하세요.",
        MAIN_MENU_TITLE => "\n=== 수작업 비용 계산기 ===",
        MAIN_MENU_ADD => "1) 활동 추가",
        MAIN_MENU_LIST => "2) 활동 목록",
        MAIN_MENU_EDIT => "3) 활동 수정",
        MAIN_MENU_SCENARIO => "4) 자동화 시나리오",
        MAIN_MENU_REMOVE => "5) 활동 삭제",
        MAIN_MENU_TOTALS => "6) 비용 합계",
        MAIN_MENU_PORTFOLIO => "7) 자동화 투자 ROI",
        MAIN_MENU_EXPORT => "8) CSV 내보내기",
        MAIN_MENU_SETTINGS => "9) 설정",
        MAIN_MENU_CLEAR => "10) 전체 삭제",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_UNKNOWN_ACTIVITY => "해당 번호의 활동이 없습니다.",
        ADD_HEADING => "\n-- 활동 추가 --",
        PROMPT_NAME => "활동 이름: ",
        PROMPT_CATEGORY => "분류 번호 또는 이름: ",
        PROMPT_FREQUENCY => "빈도(간격당 횟수): ",
        PROMPT_INTERVAL => "간격 (hour/day/week/month): ",
        PROMPT_DURATION => "1회 소요 시간 [h]: ",
        PROMPT_HOURLY_RATE => "시간당 단가: ",
        PROMPT_KEEP_HINT => "(엔터 = 기본값/현재값 유지)",
        ADD_PREVIEW => "미리보기: 1회 {per}, 주 {weekly}, 월 {monthly}, 연 {annual}",
        ADD_DONE => "활동 #{number} 을(를) 추가했습니다.",
        ADD_REJECTED => "입력이 올바르지 않아 저장하지 않았습니다",
        LIST_HEADING => "\n-- 활동 목록 --",
        LIST_SORT_OPTIONS => "정렬: 1) 순번 2) 1회 비용 3) 주간 4) 월간 5) 연간 (같은 번호를 다시 고르면 방향 전환, 엔터 = 현재 정렬 유지)",
        LIST_COLUMNS => "#   이름 / 분류 / 빈도 / 소요 시간 / 주간 / 월간 / 연간",
        PROMPT_ACTIVITY_NUMBER => "활동 번호: ",
        EDIT_HEADING => "\n-- 활동 수정 --",
        EDIT_DONE => "수정하고 비용을 다시 계산했습니다.",
        SCENARIO_HEADING => "\n-- 자동화 시나리오 --",
        PROMPT_AUTOMATION_COST => "자동화 투자비: ",
        PROMPT_EFFICIENCY => "효율 개선율 [%] (0~100): ",
        SCENARIO_DETACH_HINT => "시나리오를 제거하려면 투자비에 '-' 입력",
        SCENARIO_DETACHED => "시나리오를 제거했습니다.",
        REMOVE_DONE => "활동 #{number} 을(를) 삭제했습니다.",
        CLEAR_CONFIRM => "모든 활동을 삭제할까요? (y/N): ",
        CLEAR_DONE => "모든 활동을 삭제했습니다.",
        TOTALS_HEADING => "\n-- 비용 합계 --",
        TOTALS_COUNT => "활동 수: {count}",
        TOTALS_SHARES => "활동별 연간 비용 비중:",
        PORTFOLIO_HEADING => "\n-- 자동화 투자 ROI --",
        PORTFOLIO_INVESTMENT => "총 자동화 투자비: {value}",
        PORTFOLIO_EFFICIENCY => "가중 평균 효율 개선율: {value}",
        PORTFOLIO_DEFAULT_NOTE => "(시나리오가 없어 기본값 80%를 사용)",
        RESULT_ANNUAL_COST => "현재 연간 비용: {value}",
        RESULT_ANNUAL_SAVINGS => "연간 절감액: {value}",
        RESULT_ROI => "ROI: {value}",
        RESULT_PAYBACK => "회수기간: {value}",
        RESULT_RATING => "평가: {roi} / {payback}",
        EXPORT_PROMPT_PATH => "저장할 CSV 경로 (엔터 = activities.csv): ",
        EXPORT_DONE => "{count}개 활동을 {path} 에 저장했습니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재 언어: {lang}, 통화 기호: {symbol}",
        SETTINGS_OPTIONS => "1) 언어  2) 통화 기호",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드 (auto/ko/en-us): ",
        SETTINGS_PROMPT_CURRENCY => "통화 기호: ",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        RATING_EXCELLENT => "매우 우수한 ROI",
        RATING_GOOD => "양호한 ROI",
        RATING_MODERATE => "보통 ROI",
        RATING_NEGATIVE => "손실 ROI",
        RATING_UNDEFINED => "ROI 산정 불가",
        PAYBACK_FAST => "빠른 회수",
        PAYBACK_REASONABLE => "적정 회수",
        PAYBACK_SLOW => "느린 회수",
        PAYBACK_LONG => "장기 회수",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        NOTHING_RECORDED => "No activities recorded yet. Add one first.",
        MAIN_MENU_TITLE => "\n=== Manual Activity Waste Calculator ===",
        MAIN_MENU_ADD => "1) Add activity",
        MAIN_MENU_LIST => "2) List activities",
        MAIN_MENU_EDIT => "3) Edit activity",
        MAIN_MENU_SCENARIO => "4) Automation scenario",
        MAIN_MENU_REMOVE => "5) Remove activity",
        MAIN_MENU_TOTALS => "6) Cost totals",
        MAIN_MENU_PORTFOLIO => "7) Automation investment ROI",
        MAIN_MENU_EXPORT => "8) Export CSV",
        MAIN_MENU_SETTINGS => "9) Settings",
        MAIN_MENU_CLEAR => "10) Clear all",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_UNKNOWN_ACTIVITY => "No activity with that number.",
        ADD_HEADING => "\n-- Add Activity --",
        PROMPT_NAME => "Activity name: ",
        PROMPT_CATEGORY => "Category number or name: ",
        PROMPT_FREQUENCY => "Frequency (times per interval): ",
        PROMPT_INTERVAL => "Interval (hour/day/week/month): ",
        PROMPT_DURATION => "Duration per occurrence [h]: ",
        PROMPT_HOURLY_RATE => "Hourly rate: ",
        PROMPT_KEEP_HINT => "(enter = keep default/current value)",
        ADD_PREVIEW => "Preview: per activity {per}, weekly {weekly}, monthly {monthly}, annual {annual}",
        ADD_DONE => "Added activity #{number}.",
        ADD_REJECTED => "Input rejected, nothing saved",
        LIST_HEADING => "\n-- Activities --",
        LIST_SORT_OPTIONS => "Sort: 1) number 2) per activity 3) weekly 4) monthly 5) annual (pick the same one again to reverse, enter = keep current order)",
        LIST_COLUMNS => "#   Name / Category / Frequency / Duration / Weekly / Monthly / Annual",
        PROMPT_ACTIVITY_NUMBER => "Activity number: ",
        EDIT_HEADING => "\n-- Edit Activity --",
        EDIT_DONE => "Updated and recalculated.",
        SCENARIO_HEADING => "\n-- Automation Scenario --",
        PROMPT_AUTOMATION_COST => "Automation investment: ",
        PROMPT_EFFICIENCY => "Efficiency improvement [%] (0-100): ",
        SCENARIO_DETACH_HINT => "Enter '-' as investment to remove the scenario",
        SCENARIO_DETACHED => "Scenario removed.",
        REMOVE_DONE => "Removed activity #{number}.",
        CLEAR_CONFIRM => "Remove all activities? (y/N): ",
        CLEAR_DONE => "All activities removed.",
        TOTALS_HEADING => "\n-- Cost Totals --",
        TOTALS_COUNT => "Activities: {count}",
        TOTALS_SHARES => "Share of annual cost by activity:",
        PORTFOLIO_HEADING => "\n-- Automation Investment ROI --",
        PORTFOLIO_INVESTMENT => "Total automation investment: {value}",
        PORTFOLIO_EFFICIENCY => "Weighted efficiency improvement: {value}",
        PORTFOLIO_DEFAULT_NOTE => "(no scenarios recorded, using the 80% default)",
        RESULT_ANNUAL_COST => "Current annual cost: {value}",
        RESULT_ANNUAL_SAVINGS => "Annual savings: {value}",
        RESULT_ROI => "ROI: {value}",
        RESULT_PAYBACK => "Payback period: {value}",
        RESULT_RATING => "Rating: {roi} / {payback}",
        EXPORT_PROMPT_PATH => "CSV path (enter = activities.csv): ",
        EXPORT_DONE => "Wrote {count} activities to {path}.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Language: {lang}, currency symbol: {symbol}",
        SETTINGS_OPTIONS => "1) Language  2) Currency symbol",
        SETTINGS_PROMPT_LANGUAGE => "Language code (auto/ko/en-us): ",
        SETTINGS_PROMPT_CURRENCY => "Currency symbol: ",
        SETTINGS_SAVED => "Settings saved.",
        RATING_EXCELLENT => "Excellent ROI",
        RATING_GOOD => "Good ROI",
        RATING_MODERATE => "Moderate ROI",
        RATING_NEGATIVE => "Negative ROI",
        RATING_UNDEFINED => "ROI undefined",
        PAYBACK_FAST => "Fast Payback",
        PAYBACK_REASONABLE => "Reasonable Payback",
        PAYBACK_SLOW => "Slow Payback",
        PAYBACK_LONG => "Long Payback",
        _ => return None,
    })
}
