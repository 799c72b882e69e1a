//! 자동화 투자 ROI와 회수기간 계산.
//!
//! 0으로 나누는 경우는 부동소수점 무한대/NaN에 맡기지 않고 [`Roi`], [`Payback`]의
//! 태그 값으로 표현한다.

use serde::Serialize;

use crate::activity::{ActivityWithCosts, AutomationScenario};
use crate::calculator::cost::CostCalculation;

/// 시나리오가 하나도 없을 때 포트폴리오 화면에 쓰는 기본 효율 개선율(%).
pub const DEFAULT_EFFICIENCY_REDUCTION: f64 = 80.0;
/// 미리보기 화면의 기본 자동화 투자비.
pub const DEFAULT_AUTOMATION_COST: f64 = 2000.0;

const MONTHS_PER_YEAR: f64 = 12.0;

/// ROI(%) 값. 투자비가 0이면 정의되지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Roi {
    Percent(f64),
    Undefined,
}

impl Roi {
    pub fn percent(&self) -> Option<f64> {
        match self {
            Roi::Percent(v) => Some(*v),
            Roi::Undefined => None,
        }
    }
}

/// 회수기간.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Payback {
    /// 개월 수
    Months(f64),
    /// 투자비가 0이라 회수할 금액이 없다.
    Immediate,
    /// 절감액이 0 이하라 회수되지 않는다.
    Never,
}

impl Payback {
    pub fn months(&self) -> Option<f64> {
        match self {
            Payback::Months(v) => Some(*v),
            Payback::Immediate => Some(0.0),
            Payback::Never => None,
        }
    }
}

/// 단일 시나리오 ROI 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    pub automation_cost: f64,
    pub efficiency_reduction: f64,
    /// 연간 절감액
    pub annual_savings: f64,
    pub roi: Roi,
    pub payback: Payback,
}

/// 연간 비용, 투자비, 효율 개선율(%)로 ROI를 계산한다.
pub fn calculate_roi(annual_cost: f64, automation_cost: f64, efficiency_reduction: f64) -> RoiResult {
    let annual_savings = annual_cost * (efficiency_reduction / 100.0);

    let roi = if automation_cost == 0.0 {
        Roi::Undefined
    } else {
        let pct = (annual_savings - automation_cost) / automation_cost * 100.0;
        if pct.is_finite() {
            Roi::Percent(pct)
        } else {
            Roi::Undefined
        }
    };

    let payback = if automation_cost == 0.0 {
        Payback::Immediate
    } else if annual_savings > 0.0 {
        let months = automation_cost / (annual_savings / MONTHS_PER_YEAR);
        if months.is_finite() {
            Payback::Months(months)
        } else {
            Payback::Never
        }
    } else {
        Payback::Never
    };

    RoiResult {
        automation_cost,
        efficiency_reduction,
        annual_savings,
        roi,
        payback,
    }
}

/// 시나리오 입력을 주어진 비용에 적용한다.
pub fn scenario_roi(costs: &CostCalculation, scenario: &AutomationScenario) -> RoiResult {
    calculate_roi(
        costs.annual,
        scenario.automation_cost,
        scenario.efficiency_reduction,
    )
}

/// 입력 중 ROI 미리보기. 비용이 없거나 연간 비용이 0이면 결과를 내지 않는다.
pub fn preview_roi(
    costs: Option<&CostCalculation>,
    automation_cost: f64,
    efficiency_reduction: f64,
) -> Option<RoiResult> {
    let costs = costs?;
    if costs.annual == 0.0 {
        return None;
    }
    Some(calculate_roi(costs.annual, automation_cost, efficiency_reduction))
}

/// 전체 활동을 묶은 포트폴리오 ROI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRoi {
    /// 전체 연간 비용
    pub total_annual_cost: f64,
    /// 활동별 투자비 합계
    pub total_automation_cost: f64,
    /// 연간 비용 가중 평균 효율 개선율(%)
    pub blended_efficiency: f64,
    /// 시나리오가 없어 기본값을 썼는지 여부
    pub used_default_efficiency: bool,
    pub result: RoiResult,
}

/// 포트폴리오 ROI를 계산한다.
///
/// 효율 개선율은 단순 평균이 아니라 각 활동의 연간 비용으로 가중한 평균이며,
/// 분모는 시나리오 유무와 상관없이 전체 연간 비용이다.
pub fn portfolio_roi(activities: &[ActivityWithCosts]) -> PortfolioRoi {
    let total_annual_cost: f64 = activities.iter().map(|a| a.costs.annual).sum();
    let total_automation_cost: f64 = activities
        .iter()
        .filter_map(|a| a.activity.scenario.as_ref())
        .map(|s| s.automation_cost)
        .sum();

    let with_scenario: Vec<(&AutomationScenario, f64)> = activities
        .iter()
        .filter_map(|a| a.activity.scenario.as_ref().map(|s| (s, a.costs.annual)))
        .collect();

    let used_default_efficiency = with_scenario.is_empty();
    let blended_efficiency = if used_default_efficiency {
        DEFAULT_EFFICIENCY_REDUCTION
    } else if total_annual_cost > 0.0 {
        let weighted: f64 = with_scenario
            .iter()
            .map(|(s, annual)| s.efficiency_reduction * annual)
            .sum();
        weighted / total_annual_cost
    } else {
        0.0
    };

    PortfolioRoi {
        total_annual_cost,
        total_automation_cost,
        blended_efficiency,
        used_default_efficiency,
        result: calculate_roi(total_annual_cost, total_automation_cost, blended_efficiency),
    }
}

/// ROI 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoiRating {
    Excellent,
    Good,
    Moderate,
    Negative,
    Undefined,
}

impl RoiRating {
    pub fn of(roi: Roi) -> Self {
        match roi {
            Roi::Undefined => RoiRating::Undefined,
            Roi::Percent(v) if v >= 200.0 => RoiRating::Excellent,
            Roi::Percent(v) if v >= 100.0 => RoiRating::Good,
            Roi::Percent(v) if v >= 0.0 => RoiRating::Moderate,
            Roi::Percent(_) => RoiRating::Negative,
        }
    }
}

/// 회수기간 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaybackRating {
    Fast,
    Reasonable,
    Slow,
    Long,
}

impl PaybackRating {
    pub fn of(payback: Payback) -> Self {
        match payback {
            Payback::Immediate => PaybackRating::Fast,
            Payback::Never => PaybackRating::Long,
            Payback::Months(m) if m <= 6.0 => PaybackRating::Fast,
            Payback::Months(m) if m <= 12.0 => PaybackRating::Reasonable,
            Payback::Months(m) if m <= 24.0 => PaybackRating::Slow,
            Payback::Months(_) => PaybackRating::Long,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cost_is_undefined_and_immediate() {
        let r = calculate_roi(10_000.0, 0.0, 80.0);
        assert_eq!(r.annual_savings, 8000.0);
        assert_eq!(r.roi, Roi::Undefined);
        assert_eq!(r.payback, Payback::Immediate);
    }

    #[test]
    fn zero_savings_never_pays_back() {
        let r = calculate_roi(0.0, 500.0, 80.0);
        assert_eq!(r.roi, Roi::Percent(-100.0));
        assert_eq!(r.payback, Payback::Never);
    }

    #[test]
    fn non_finite_input_maps_to_sentinels() {
        let r = calculate_roi(f64::NAN, 100.0, 50.0);
        assert_eq!(r.roi, Roi::Undefined);
        assert_eq!(r.payback, Payback::Never);
    }

    #[test]
    fn preview_requires_annual_cost() {
        assert!(preview_roi(None, 2000.0, 80.0).is_none());
        let zero = CostCalculation::default();
        assert!(preview_roi(Some(&zero), 2000.0, 80.0).is_none());
    }

    #[test]
    fn ratings_follow_thresholds() {
        assert_eq!(RoiRating::of(Roi::Percent(200.0)), RoiRating::Excellent);
        assert_eq!(RoiRating::of(Roi::Percent(150.0)), RoiRating::Good);
        assert_eq!(RoiRating::of(Roi::Percent(0.0)), RoiRating::Moderate);
        assert_eq!(RoiRating::of(Roi::Percent(-0.1)), RoiRating::Negative);
        assert_eq!(RoiRating::of(Roi::Undefined), RoiRating::Undefined);

        assert_eq!(PaybackRating::of(Payback::Months(6.0)), PaybackRating::Fast);
        assert_eq!(PaybackRating::of(Payback::Months(12.0)), PaybackRating::Reasonable);
        assert_eq!(PaybackRating::of(Payback::Months(20.0)), PaybackRating::Slow);
        assert_eq!(PaybackRating::of(Payback::Months(30.0)), PaybackRating::Long);
        assert_eq!(PaybackRating::of(Payback::Never), PaybackRating::Long);
        assert_eq!(PaybackRating::of(Payback::Immediate), PaybackRating::Fast);
    }
}
