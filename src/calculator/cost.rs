use serde::Serialize;

use crate::activity::Activity;
use crate::interval::{self, Interval, WEEKS_PER_MONTH, WEEKS_PER_YEAR};

/// 기간별 비용 계산 결과. 저장하지 않고 활동이 바뀔 때마다 새로 만든다.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostCalculation {
    /// 1회 수행 비용
    pub per_activity: f64,
    /// 주간 비용
    pub weekly: f64,
    /// 월간 비용(주간 × 4.33)
    pub monthly: f64,
    /// 연간 비용(주간 × 52)
    pub annual: f64,
}

/// 빈도/간격/소요 시간/단가로 기간별 비용을 계산한다.
///
/// 반올림은 하지 않는다. 유효하지 않은 입력(0, 음수)도 그대로 산술 결과를 돌려준다.
pub fn calculate(frequency: f64, interval: Interval, duration: f64, hourly_rate: f64) -> CostCalculation {
    let per_activity = duration * hourly_rate;
    let weekly = interval::to_weekly(frequency, interval) * per_activity;
    CostCalculation {
        per_activity,
        weekly,
        monthly: weekly * WEEKS_PER_MONTH,
        annual: weekly * WEEKS_PER_YEAR,
    }
}

/// 활동 하나의 비용을 계산한다.
pub fn activity_costs(activity: &Activity) -> CostCalculation {
    calculate(
        activity.frequency,
        activity.interval,
        activity.duration,
        activity.hourly_rate,
    )
}
