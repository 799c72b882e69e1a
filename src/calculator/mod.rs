//! 비용/ROI 계산 엔진 모음. 모든 함수는 입출력이 없는 순수 함수다.

pub mod aggregate;
pub mod cost;
pub mod roi;

pub use aggregate::*;
pub use cost::*;
pub use roi::*;
