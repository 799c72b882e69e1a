//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 추후 GUI 확장도 쉽게 한다.

pub mod activity;
pub mod app;
pub mod breakdown;
pub mod calculator;
pub mod config;
pub mod export;
pub mod format;
pub mod i18n;
pub mod interval;
pub mod ledger;
pub mod repository;
pub mod ui_cli;
