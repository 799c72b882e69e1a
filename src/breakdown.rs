//! 차트용 비용 분해 데이터.

use crate::activity::ActivityWithCosts;
use crate::calculator::CostCalculation;

/// 집계 기간.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Weekly,
    Monthly,
    Annual,
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::Weekly => "Weekly",
            Period::Monthly => "Monthly",
            Period::Annual => "Annual",
        }
    }
}

/// 기간별 합계 막대.
pub fn period_breakdown(totals: &CostCalculation) -> [(Period, f64); 3] {
    [
        (Period::Weekly, totals.weekly),
        (Period::Monthly, totals.monthly),
        (Period::Annual, totals.annual),
    ]
}

/// 활동별 연간 비용 비중.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityShare {
    pub name: String,
    pub annual: f64,
    /// 전체 연간 비용 대비 비율(%)
    pub share_percent: f64,
}

/// 활동별 연간 비용 비중을 목록 순서대로 계산한다. 전체가 0이면 비중도 0이다.
pub fn activity_shares(entries: &[ActivityWithCosts]) -> Vec<ActivityShare> {
    let total: f64 = entries.iter().map(|e| e.costs.annual).sum();
    entries
        .iter()
        .map(|e| ActivityShare {
            name: e.activity.name.clone(),
            annual: e.costs.annual,
            share_percent: if total > 0.0 {
                e.costs.annual / total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// 텍스트 막대. `width` 칸 기준으로 비율만큼 채운다.
pub fn text_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"·".repeat(width - filled));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_fixed_width() {
        assert_eq!(text_bar(0.5, 4), "██··");
        assert_eq!(text_bar(2.0, 3), "███");
        assert_eq!(text_bar(-1.0, 2), "··");
    }

    #[test]
    fn empty_shares() {
        assert!(activity_shares(&[]).is_empty());
    }
}
