//! 활동 목록을 소유하는 장부. 변경될 때마다 파생 비용을 다시 계산하고 저장소에 반영한다.

use std::cmp::Ordering;

use crate::activity::{
    Activity, ActivityError, ActivityUpdate, ActivityWithCosts, AutomationScenario, NewActivity,
};
use crate::calculator::{self, CostCalculation, PortfolioRoi, RoiResult};
use crate::repository::{ActivityRepository, RepositoryError};

/// 장부 조작 오류.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid activity: {0}")]
    Invalid(#[from] ActivityError),
    #[error("no activity with id {0}")]
    NotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 정렬 기준.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    ActivityNumber,
    PerActivity,
    Weekly,
    Monthly,
    Annual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// 표 정렬 상태. 기본은 연간 비용 내림차순.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Annual,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    /// 같은 기준이면 방향을 뒤집고, 다른 기준이면 순번은 오름차순, 비용은 내림차순으로 시작한다.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            let direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
            Self { field, direction }
        } else {
            let direction = if field == SortField::ActivityNumber {
                SortDirection::Asc
            } else {
                SortDirection::Desc
            };
            Self { field, direction }
        }
    }

    fn key(&self, entry: &ActivityWithCosts) -> f64 {
        match self.field {
            SortField::ActivityNumber => f64::from(entry.activity.activity_number),
            SortField::PerActivity => entry.costs.per_activity,
            SortField::Weekly => entry.costs.weekly,
            SortField::Monthly => entry.costs.monthly,
            SortField::Annual => entry.costs.annual,
        }
    }
}

/// 활동 목록 소유자. 저장소는 생성 시 주입한다.
pub struct ActivityLedger<R: ActivityRepository> {
    repo: R,
    entries: Vec<ActivityWithCosts>,
}

impl<R: ActivityRepository> ActivityLedger<R> {
    /// 저장소에서 목록을 불러온다. 읽기에 실패하면 경고만 남기고 빈 목록으로 시작한다.
    pub fn open(repo: R) -> Self {
        let activities = match repo.load() {
            Ok(list) => list,
            Err(e) => {
                log::warn!("could not load saved activities, starting empty: {e}");
                Vec::new()
            }
        };
        let entries = activities.into_iter().map(ActivityWithCosts::new).collect();
        Self { repo, entries }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn entries(&self) -> &[ActivityWithCosts] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ActivityWithCosts> {
        self.entries.iter().find(|e| e.activity.id == id)
    }

    /// 표시 순번으로 찾는다.
    pub fn get_by_number(&self, activity_number: u32) -> Option<&ActivityWithCosts> {
        self.entries
            .iter()
            .find(|e| e.activity.activity_number == activity_number)
    }

    /// 새 활동을 검증 후 추가한다.
    pub fn add(&mut self, input: NewActivity) -> Result<&ActivityWithCosts, LedgerError> {
        input.validate()?;
        let id = uuid::Uuid::new_v4().to_string();
        let number = self.next_activity_number();
        let activity = input.into_activity(id, number);
        log::info!("adding activity #{number} \"{}\"", activity.name);
        let mut next = self.entries.clone();
        next.push(ActivityWithCosts::new(activity));
        self.commit(next)?;
        let idx = self.entries.len() - 1;
        Ok(&self.entries[idx])
    }

    /// 부분 수정 후 비용을 통째로 다시 계산한다.
    pub fn update(&mut self, id: &str, update: &ActivityUpdate) -> Result<&ActivityWithCosts, LedgerError> {
        let idx = self.index_of(id)?;
        let next = self.entries[idx].activity.merged(update);
        next.validate()?;
        self.replace_at(idx, next)?;
        log::info!("updated activity {id}");
        Ok(&self.entries[idx])
    }

    /// 자동화 시나리오를 붙이거나(`Some`) 뗀다(`None`).
    pub fn set_scenario(
        &mut self,
        id: &str,
        scenario: Option<AutomationScenario>,
    ) -> Result<&ActivityWithCosts, LedgerError> {
        if let Some(s) = &scenario {
            s.validate()?;
        }
        let idx = self.index_of(id)?;
        let mut next = self.entries[idx].activity.clone();
        next.scenario = scenario;
        self.replace_at(idx, next)?;
        log::info!("scenario for activity {id} set to {scenario:?}");
        Ok(&self.entries[idx])
    }

    pub fn remove(&mut self, id: &str) -> Result<ActivityWithCosts, LedgerError> {
        let idx = self.index_of(id)?;
        let mut next = self.entries.clone();
        let removed = next.remove(idx);
        self.commit(next)?;
        log::info!("removed activity #{}", removed.activity.activity_number);
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<(), LedgerError> {
        self.commit(Vec::new())?;
        log::info!("cleared all activities");
        Ok(())
    }

    /// 전체 합계.
    pub fn totals(&self) -> CostCalculation {
        calculator::total_costs(&self.entries)
    }

    /// 포트폴리오 ROI.
    pub fn portfolio(&self) -> PortfolioRoi {
        calculator::portfolio_roi(&self.entries)
    }

    /// 시나리오가 있는 활동의 개별 ROI.
    pub fn scenario_result(&self, id: &str) -> Option<RoiResult> {
        let entry = self.get(id)?;
        let scenario = entry.activity.scenario.as_ref()?;
        Some(calculator::scenario_roi(&entry.costs, scenario))
    }

    /// 정렬된 사본을 돌려준다. 원래 순서는 바꾸지 않는다.
    pub fn sorted(&self, sort: SortState) -> Vec<&ActivityWithCosts> {
        let mut view: Vec<&ActivityWithCosts> = self.entries.iter().collect();
        view.sort_by(|a, b| {
            let ord = sort.key(a).partial_cmp(&sort.key(b)).unwrap_or(Ordering::Equal);
            match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        view
    }

    fn next_activity_number(&self) -> u32 {
        self.entries
            .iter()
            .map(|e| e.activity.activity_number)
            .max()
            .map_or(1, |n| n + 1)
    }

    fn index_of(&self, id: &str) -> Result<usize, LedgerError> {
        self.entries
            .iter()
            .position(|e| e.activity.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    fn replace_at(&mut self, idx: usize, activity: Activity) -> Result<(), LedgerError> {
        let mut next = self.entries.clone();
        next[idx] = ActivityWithCosts::new(activity);
        self.commit(next)
    }

    /// 저장에 성공한 목록만 장부에 반영한다. 실패하면 메모리 상태는 그대로다.
    fn commit(&mut self, next: Vec<ActivityWithCosts>) -> Result<(), LedgerError> {
        let activities: Vec<Activity> = next.iter().map(|e| e.activity.clone()).collect();
        self.repo.save(&activities)?;
        self.entries = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;
    use crate::repository::InMemoryRepository;

    fn new_activity(name: &str, frequency: f64, interval: Interval) -> NewActivity {
        NewActivity {
            name: name.into(),
            frequency,
            interval,
            duration: 1.0,
            hourly_rate: 10.0,
            ..NewActivity::default()
        }
    }

    #[test]
    fn numbers_are_monotonic_and_ids_unique() {
        let mut ledger = ActivityLedger::open(InMemoryRepository::new());
        let a = ledger.add(new_activity("a", 1.0, Interval::Week)).unwrap().activity.clone();
        let b = ledger.add(new_activity("b", 1.0, Interval::Week)).unwrap().activity.clone();
        ledger.remove(&b.id).unwrap();
        let c = ledger.add(new_activity("c", 1.0, Interval::Week)).unwrap().activity.clone();
        assert_eq!(a.activity_number, 1);
        assert_eq!(b.activity_number, 2);
        assert_eq!(c.activity_number, 2);
        assert_ne!(b.id, c.id);
    }

    #[test]
    fn invalid_input_is_not_added() {
        let mut ledger = ActivityLedger::open(InMemoryRepository::new());
        let err = ledger.add(NewActivity::default()).unwrap_err();
        assert!(matches!(err, LedgerError::Invalid(ActivityError::EmptyName)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn update_recomputes_costs() {
        let mut ledger = ActivityLedger::open(InMemoryRepository::new());
        let id = ledger.add(new_activity("a", 1.0, Interval::Week)).unwrap().activity.id.clone();
        assert_eq!(ledger.get(&id).unwrap().costs.weekly, 10.0);
        let updated = ledger
            .update(
                &id,
                &ActivityUpdate {
                    interval: Some(Interval::Day),
                    ..ActivityUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.costs.weekly, 50.0);
        assert_eq!(updated.costs.annual, 50.0 * 52.0);
    }

    #[test]
    fn update_unknown_id_fails() {
        let mut ledger = ActivityLedger::open(InMemoryRepository::new());
        let err = ledger.update("missing", &ActivityUpdate::default()).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
    }

    #[test]
    fn every_mutation_is_saved() {
        let mut ledger = ActivityLedger::open(InMemoryRepository::new());
        let id = ledger.add(new_activity("a", 1.0, Interval::Week)).unwrap().activity.id.clone();
        ledger
            .set_scenario(&id, Some(AutomationScenario::new(500.0, 50.0)))
            .unwrap();
        let saved = ledger.repository().snapshot();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].scenario, Some(AutomationScenario::new(500.0, 50.0)));
        ledger.clear().unwrap();
        assert!(ledger.repository().snapshot().is_empty());
    }

    #[test]
    fn sort_toggle_rules() {
        let s = SortState::default();
        assert_eq!(s.field, SortField::Annual);
        assert_eq!(s.direction, SortDirection::Desc);
        let s = s.toggle(SortField::Annual);
        assert_eq!(s.direction, SortDirection::Asc);
        let s = s.toggle(SortField::ActivityNumber);
        assert_eq!(s.direction, SortDirection::Asc);
        let s = s.toggle(SortField::Weekly);
        assert_eq!(s.direction, SortDirection::Desc);
    }

    #[test]
    fn sorted_by_annual_desc() {
        let mut ledger = ActivityLedger::open(InMemoryRepository::new());
        ledger.add(new_activity("small", 1.0, Interval::Month)).unwrap();
        ledger.add(new_activity("big", 1.0, Interval::Hour)).unwrap();
        ledger.add(new_activity("mid", 1.0, Interval::Day)).unwrap();
        let names: Vec<_> = ledger
            .sorted(SortState::default())
            .into_iter()
            .map(|e| e.activity.name.as_str())
            .collect();
        assert_eq!(names, ["big", "mid", "small"]);
        let by_number: Vec<_> = ledger
            .sorted(SortState::default().toggle(SortField::ActivityNumber))
            .into_iter()
            .map(|e| e.activity.activity_number)
            .collect();
        assert_eq!(by_number, [1, 2, 3]);
    }
}
