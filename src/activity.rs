//! 기록된 수작업 활동과 입력 검증 경계.

use serde::{Deserialize, Serialize};

use crate::calculator::cost::{self, CostCalculation};
use crate::interval::Interval;

/// 빈도 최소값(폼 입력 기준).
pub const MIN_FREQUENCY: f64 = 0.1;
/// 1회 소요 시간 최소값 [h].
pub const MIN_DURATION_HOURS: f64 = 0.01;
/// 시간당 단가 최소값.
pub const MIN_HOURLY_RATE: f64 = 0.01;

/// 기본 제공 분류 목록. 자유 입력도 허용한다.
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Administrative",
    "Data Entry",
    "Communication",
    "Reporting",
    "Documentation",
    "Quality Assurance",
    "Customer Service",
    "Other",
];

/// 입력값 검증 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActivityError {
    #[error("activity name is required")]
    EmptyName,
    #[error("category is required")]
    EmptyCategory,
    #[error("frequency must be at least {min} (got {0})", min = MIN_FREQUENCY)]
    Frequency(f64),
    #[error("duration must be at least {min} h (got {0})", min = MIN_DURATION_HOURS)]
    Duration(f64),
    #[error("hourly rate must be at least {min} (got {0})", min = MIN_HOURLY_RATE)]
    HourlyRate(f64),
    #[error("automation cost must be zero or positive (got {0})")]
    AutomationCost(f64),
    #[error("efficiency improvement must be between 0 and 100 % (got {0})")]
    EfficiencyReduction(f64),
}

/// 활동에 붙는 자동화 시나리오 입력. 파생 ROI 값은 저장하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationScenario {
    /// 자동화 투자비
    pub automation_cost: f64,
    /// 효율 개선율(0~100 %)
    pub efficiency_reduction: f64,
}

impl AutomationScenario {
    pub fn new(automation_cost: f64, efficiency_reduction: f64) -> Self {
        Self {
            automation_cost,
            efficiency_reduction,
        }
    }

    pub fn validate(&self) -> Result<(), ActivityError> {
        if !self.automation_cost.is_finite() || self.automation_cost < 0.0 {
            return Err(ActivityError::AutomationCost(self.automation_cost));
        }
        if !(0.0..=100.0).contains(&self.efficiency_reduction) {
            return Err(ActivityError::EfficiencyReduction(self.efficiency_reduction));
        }
        Ok(())
    }
}

/// 기록된 수작업 활동 하나.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// 생성 시 부여되는 고유 식별자
    pub id: String,
    /// 표시용 순번
    pub activity_number: u32,
    pub name: String,
    /// 간격당 발생 횟수
    pub frequency: f64,
    pub interval: Interval,
    /// 1회 소요 시간 [h]
    pub duration: f64,
    pub hourly_rate: f64,
    pub category: String,
    #[serde(default, rename = "roiData", skip_serializing_if = "Option::is_none")]
    pub scenario: Option<AutomationScenario>,
}

/// 아직 id/순번이 없는 입력 폼 데이터.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub name: String,
    pub frequency: f64,
    pub interval: Interval,
    pub duration: f64,
    pub hourly_rate: f64,
    pub category: String,
}

impl Default for NewActivity {
    fn default() -> Self {
        Self {
            name: String::new(),
            frequency: 1.0,
            interval: Interval::Day,
            duration: 0.5,
            hourly_rate: 25.0,
            category: DEFAULT_CATEGORIES[0].to_string(),
        }
    }
}

impl NewActivity {
    /// 필수 항목과 범위를 확인한다.
    pub fn validate(&self) -> Result<(), ActivityError> {
        validate_fields(
            &self.name,
            &self.category,
            self.frequency,
            self.duration,
            self.hourly_rate,
        )
    }

    /// 입력이 모두 유효할 때만 실시간 미리보기 비용을 돌려준다.
    pub fn preview_costs(&self) -> Option<CostCalculation> {
        self.validate().ok()?;
        Some(cost::calculate(
            self.frequency,
            self.interval,
            self.duration,
            self.hourly_rate,
        ))
    }

    pub(crate) fn into_activity(self, id: String, activity_number: u32) -> Activity {
        Activity {
            id,
            activity_number,
            name: self.name.trim().to_string(),
            frequency: self.frequency,
            interval: self.interval,
            duration: self.duration,
            hourly_rate: self.hourly_rate,
            category: self.category.trim().to_string(),
            scenario: None,
        }
    }
}

/// 부분 수정 요청. `None` 항목은 그대로 둔다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityUpdate {
    pub name: Option<String>,
    pub frequency: Option<f64>,
    pub interval: Option<Interval>,
    pub duration: Option<f64>,
    pub hourly_rate: Option<f64>,
    pub category: Option<String>,
}

impl Activity {
    pub fn validate(&self) -> Result<(), ActivityError> {
        validate_fields(
            &self.name,
            &self.category,
            self.frequency,
            self.duration,
            self.hourly_rate,
        )?;
        if let Some(scenario) = &self.scenario {
            scenario.validate()?;
        }
        Ok(())
    }

    /// 수정 사항을 합친 새 레코드를 만든다. 원본은 바꾸지 않는다.
    pub fn merged(&self, update: &ActivityUpdate) -> Activity {
        let mut next = self.clone();
        if let Some(name) = &update.name {
            next.name = name.trim().to_string();
        }
        if let Some(v) = update.frequency {
            next.frequency = v;
        }
        if let Some(v) = update.interval {
            next.interval = v;
        }
        if let Some(v) = update.duration {
            next.duration = v;
        }
        if let Some(v) = update.hourly_rate {
            next.hourly_rate = v;
        }
        if let Some(category) = &update.category {
            next.category = category.trim().to_string();
        }
        next
    }
}

fn validate_fields(
    name: &str,
    category: &str,
    frequency: f64,
    duration: f64,
    hourly_rate: f64,
) -> Result<(), ActivityError> {
    if name.trim().is_empty() {
        return Err(ActivityError::EmptyName);
    }
    if category.trim().is_empty() {
        return Err(ActivityError::EmptyCategory);
    }
    if !frequency.is_finite() || frequency < MIN_FREQUENCY {
        return Err(ActivityError::Frequency(frequency));
    }
    if !duration.is_finite() || duration < MIN_DURATION_HOURS {
        return Err(ActivityError::Duration(duration));
    }
    if !hourly_rate.is_finite() || hourly_rate < MIN_HOURLY_RATE {
        return Err(ActivityError::HourlyRate(hourly_rate));
    }
    Ok(())
}

/// 활동과 파생 비용의 묶음. 비용은 활동이 바뀔 때마다 통째로 다시 계산한다.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityWithCosts {
    pub activity: Activity,
    pub costs: CostCalculation,
}

impl ActivityWithCosts {
    pub fn new(activity: Activity) -> Self {
        let costs = cost::activity_costs(&activity);
        Self { activity, costs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewActivity {
        NewActivity {
            name: "Invoice matching".into(),
            ..NewActivity::default()
        }
    }

    #[test]
    fn default_form_needs_a_name() {
        assert_eq!(NewActivity::default().validate(), Err(ActivityError::EmptyName));
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn rejects_values_below_minimums() {
        let mut a = sample();
        a.frequency = 0.05;
        assert_eq!(a.validate(), Err(ActivityError::Frequency(0.05)));

        let mut a = sample();
        a.duration = 0.0;
        assert_eq!(a.validate(), Err(ActivityError::Duration(0.0)));

        let mut a = sample();
        a.hourly_rate = f64::NAN;
        assert!(matches!(a.validate(), Err(ActivityError::HourlyRate(_))));

        let mut a = sample();
        a.category = "  ".into();
        assert_eq!(a.validate(), Err(ActivityError::EmptyCategory));
    }

    #[test]
    fn preview_is_suppressed_for_incomplete_input() {
        assert!(NewActivity::default().preview_costs().is_none());
        let costs = sample().preview_costs().expect("valid input");
        // 0.5h * 25 * 5일
        assert_eq!(costs.weekly, 62.5);
    }

    #[test]
    fn scenario_bounds() {
        assert!(AutomationScenario::new(0.0, 0.0).validate().is_ok());
        assert!(AutomationScenario::new(2000.0, 100.0).validate().is_ok());
        assert_eq!(
            AutomationScenario::new(-1.0, 50.0).validate(),
            Err(ActivityError::AutomationCost(-1.0))
        );
        assert_eq!(
            AutomationScenario::new(10.0, 120.0).validate(),
            Err(ActivityError::EfficiencyReduction(120.0))
        );
    }

    #[test]
    fn merged_leaves_untouched_fields() {
        let original = sample().into_activity("a".into(), 1);
        let next = original.merged(&ActivityUpdate {
            interval: Some(Interval::Week),
            name: Some("  Renamed ".into()),
            ..ActivityUpdate::default()
        });
        assert_eq!(next.name, "Renamed");
        assert_eq!(next.interval, Interval::Week);
        assert_eq!(next.hourly_rate, original.hourly_rate);
        assert_eq!(original.interval, Interval::Day);
    }

    #[test]
    fn persisted_shape_uses_camel_case_keys() {
        let mut a = sample().into_activity("id-1".into(), 3);
        a.scenario = Some(AutomationScenario::new(2000.0, 80.0));
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["activityNumber"], 3);
        assert_eq!(json["hourlyRate"], 25.0);
        assert_eq!(json["interval"], "day");
        assert_eq!(json["roiData"]["automationCost"], 2000.0);
    }
}
