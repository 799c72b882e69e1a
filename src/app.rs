use std::io::ErrorKind;
use std::path::Path;

use crate::config::{Config, ConfigError};
use crate::export::ExportError;
use crate::i18n::{self, Translator};
use crate::ledger::{ActivityLedger, LedgerError, SortState};
use crate::repository::ActivityRepository;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 활동 장부 오류
    #[error("activity error: {0}")]
    Ledger(#[from] LedgerError),
    /// 내보내기 오류
    #[error("export error: {0}")]
    Export(#[from] ExportError),
    /// 명령줄 입력 오류
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// 설정의 언어 코드와 언어팩 디렉터리로 번역기를 만든다.
pub fn translator_for(config: &Config, cli_lang: Option<&str>) -> Translator {
    let lang = i18n::resolve_language(cli_lang, Some(config.language.as_str()));
    Translator::new_with_pack(&lang, config.locale_dir.as_deref())
}

/// 표준 입출력 자체가 깨진 경우만 세션을 끝낸다. 나머지는 메시지를 보여주고 메뉴로 돌아간다.
fn ends_session(err: &AppError) -> bool {
    matches!(
        err,
        AppError::Io(e) if matches!(e.kind(), ErrorKind::UnexpectedEof | ErrorKind::BrokenPipe)
    )
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run<R: ActivityRepository>(
    config: &mut Config,
    config_path: Option<&Path>,
    ledger: &mut ActivityLedger<R>,
    cli_lang: Option<&str>,
) -> Result<(), AppError> {
    let mut tr = translator_for(config, cli_lang);
    let mut sort = SortState::default();
    loop {
        let choice = ui_cli::main_menu(&tr)?;
        let outcome = match choice {
            MenuChoice::Add => ui_cli::handle_add(&tr, config, ledger),
            MenuChoice::List => ui_cli::handle_list(&tr, config, ledger, &mut sort),
            MenuChoice::Edit => ui_cli::handle_edit(&tr, ledger),
            MenuChoice::Scenario => ui_cli::handle_scenario(&tr, config, ledger),
            MenuChoice::Remove => ui_cli::handle_remove(&tr, ledger),
            MenuChoice::Totals => {
                ui_cli::print_totals(&tr, config, ledger);
                Ok(())
            }
            MenuChoice::Portfolio => {
                ui_cli::print_portfolio(&tr, config, ledger);
                Ok(())
            }
            MenuChoice::Export => ui_cli::handle_export(&tr, ledger),
            MenuChoice::Clear => ui_cli::handle_clear(&tr, ledger),
            MenuChoice::Settings => ui_cli::handle_settings(&tr, config).and_then(|()| {
                config.save(config_path)?;
                tr = translator_for(config, None);
                println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
                Ok(())
            }),
            MenuChoice::Exit => {
                config.save(config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        match outcome {
            Err(e) if ends_session(&e) => return Err(e),
            Err(e) => {
                log::warn!("menu action failed: {e}");
                println!("{}", ui_cli::error_line(&tr, &e));
            }
            Ok(()) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use std::io;

    #[test]
    fn only_closed_input_ends_session() {
        let eof = AppError::Io(io::Error::new(ErrorKind::UnexpectedEof, "closed"));
        assert!(ends_session(&eof));
        let other = AppError::Io(io::Error::new(ErrorKind::NotFound, "missing"));
        assert!(!ends_session(&other));
    }

    #[test]
    fn bad_export_path_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("out.csv");
        let ledger = ActivityLedger::open(InMemoryRepository::new());
        let err = ui_cli::export_to_file(&ledger, &path).unwrap_err();
        assert!(matches!(err, AppError::Export(ExportError::Create { .. })));
        assert!(!ends_session(&err));
    }
}
