use std::path::PathBuf;

use automation_cost_calculator::{
    activity::AutomationScenario,
    app::{self, AppError},
    calculator, config,
    format::format_currency_with,
    i18n::{self, Translator},
    interval::Interval,
    ledger::{ActivityLedger, SortState},
    repository::JsonFileRepository,
    ui_cli,
};
use clap::{Parser, Subcommand};

/// 수작업 비용과 자동화 ROI 계산기.
#[derive(Debug, Parser)]
#[command(name = "automation_cost_calculator", version, about)]
struct Cli {
    /// 설정 파일 경로 (기본: ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// 활동 저장 파일 경로 (설정값보다 우선)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// 언어 코드: auto, ko, en-us
    #[arg(long, short = 'L', global = true)]
    lang: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 대화형 메뉴 (기본)
    Menu,
    /// 활동 목록, 합계, 포트폴리오 ROI 출력
    Summary,
    /// 활동 목록을 CSV로 내보내기
    Export { path: PathBuf },
    /// 저장하지 않고 활동 하나의 비용/ROI 계산
    Cost {
        #[arg(long)]
        frequency: f64,
        #[arg(long, default_value = "week")]
        interval: Interval,
        /// 1회 소요 시간 [h]
        #[arg(long)]
        duration: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        automation_cost: Option<f64>,
        /// 효율 개선율 [%]
        #[arg(long)]
        efficiency: Option<f64>,
    },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령을 실행한다.
fn main() {
    let cli = Cli::parse();
    let lang = cli.lang.clone();
    if let Err(err) = try_run(cli) {
        let tr = Translator::new(&i18n::resolve_language(lang.as_deref(), None));
        eprintln!("{}", ui_cli::error_line(&tr, &err));
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // 테스트 등에서 이미 초기화된 경우는 무시한다.
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let config_path = cli.config.as_deref();
    let mut cfg = config::load_or_default(config_path)?;
    init_logging(&cfg.log_level);
    log::debug!("config: {cfg:?}");

    let tr = app::translator_for(&cfg, cli.lang.as_deref());
    let data_file = cli.data.clone().unwrap_or_else(|| cfg.data_file.clone());

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let mut ledger = ActivityLedger::open(JsonFileRepository::new(data_file));
            app::run(&mut cfg, config_path, &mut ledger, cli.lang.as_deref())
        }
        Command::Summary => {
            let ledger = ActivityLedger::open(JsonFileRepository::new(data_file));
            ui_cli::print_table(&tr, &cfg, &ledger, SortState::default());
            ui_cli::print_totals(&tr, &cfg, &ledger);
            ui_cli::print_portfolio(&tr, &cfg, &ledger);
            Ok(())
        }
        Command::Export { path } => {
            let ledger = ActivityLedger::open(JsonFileRepository::new(data_file));
            let count = ui_cli::export_to_file(&ledger, &path)?;
            log::info!("exported {count} activities to {}", path.display());
            println!("{count} -> {}", path.display());
            Ok(())
        }
        Command::Cost {
            frequency,
            interval,
            duration,
            rate,
            automation_cost,
            efficiency,
        } => {
            let costs = calculator::calculate(frequency, interval, duration, rate);
            let money = |v: f64| format_currency_with(v, &cfg.currency_symbol);
            println!("per activity: {}", money(costs.per_activity));
            println!("weekly:       {}", money(costs.weekly));
            println!("monthly:      {}", money(costs.monthly));
            println!("annual:       {}", money(costs.annual));
            let scenario = AutomationScenario::new(
                automation_cost.unwrap_or(cfg.defaults.automation_cost),
                efficiency.unwrap_or(cfg.defaults.efficiency_reduction),
            );
            scenario
                .validate()
                .map_err(|e| AppError::InvalidArgument(e.to_string()))?;
            match calculator::preview_roi(
                Some(&costs),
                scenario.automation_cost,
                scenario.efficiency_reduction,
            ) {
                Some(result) => ui_cli::print_roi(&tr, &cfg, &result),
                None => log::warn!("annual cost is zero, ROI preview skipped"),
            }
            Ok(())
        }
    }
}
