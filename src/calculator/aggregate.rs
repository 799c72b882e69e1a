use crate::activity::ActivityWithCosts;
use crate::calculator::cost::CostCalculation;

impl std::ops::Add for CostCalculation {
    type Output = CostCalculation;

    fn add(self, rhs: CostCalculation) -> CostCalculation {
        CostCalculation {
            per_activity: self.per_activity + rhs.per_activity,
            weekly: self.weekly + rhs.weekly,
            monthly: self.monthly + rhs.monthly,
            annual: self.annual + rhs.annual,
        }
    }
}

impl std::iter::Sum for CostCalculation {
    fn sum<I: Iterator<Item = CostCalculation>>(iter: I) -> Self {
        iter.fold(CostCalculation::default(), |acc, c| acc + c)
    }
}

/// 모든 활동의 비용을 항목별로 합산한다. 빈 목록이면 모두 0이다.
pub fn total_costs<'a, I>(activities: I) -> CostCalculation
where
    I: IntoIterator<Item = &'a ActivityWithCosts>,
{
    activities.into_iter().map(|a| a.costs).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_all_zero() {
        let empty: Vec<ActivityWithCosts> = Vec::new();
        assert_eq!(total_costs(&empty), CostCalculation::default());
    }

    #[test]
    fn sums_each_field() {
        let a = CostCalculation {
            per_activity: 1.0,
            weekly: 2.0,
            monthly: 3.0,
            annual: 4.0,
        };
        let total: CostCalculation = [a, a, a].into_iter().sum();
        assert_eq!(total.per_activity, 3.0);
        assert_eq!(total.weekly, 6.0);
        assert_eq!(total.monthly, 9.0);
        assert_eq!(total.annual, 12.0);
    }
}
