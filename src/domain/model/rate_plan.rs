use crate::domain::model::{Money, RatePlanId};

/// レートプラン
/// 1泊料金に適用する倍率を持つ。設定で定義され、エンドユーザーは変更できない
#[derive(Debug, Clone, PartialEq)]
pub struct RatePlan {
    id: RatePlanId,
    name: String,
    multiplier_percent: u32,
}

impl RatePlan {
    /// 新しいレートプランを作成
    ///
    /// # Arguments
    /// * `multiplier_percent` - パーセント表記の倍率（115 = ×1.15）
    pub fn new(id: RatePlanId, name: impl Into<String>, multiplier_percent: u32) -> Self {
        Self {
            id,
            name: name.into(),
            multiplier_percent,
        }
    }

    pub fn id(&self) -> &RatePlanId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn multiplier_percent(&self) -> u32 {
        self.multiplier_percent
    }

    /// 金額にこのプランの倍率を適用
    pub fn apply(&self, amount: Money) -> Money {
        amount.apply_percent(self.multiplier_percent)
    }
}

/// 設定済みレートプランの不変な集合
#[derive(Debug, Clone)]
pub struct RatePlanCatalog {
    plans: Vec<RatePlan>,
}

impl RatePlanCatalog {
    /// プランのリストからカタログを作成
    pub fn new(plans: Vec<RatePlan>) -> Self {
        Self { plans }
    }

    /// 標準のカタログ（朝食なし ×1.0 / 朝食付き ×1.15）
    pub fn standard() -> Self {
        Self::new(vec![
            RatePlan::new(RatePlanId::new("wob"), "Without Breakfast", 100),
            RatePlan::new(RatePlanId::new("wb"), "With Breakfast", 115),
        ])
    }

    /// IDでプランを検索
    /// 未知のIDはNoneを返し、呼び出し側で検証エラーにする
    /// （元システムは黙って×1.0にフォールバックしていたが、ここでは明示的に失敗させる）
    pub fn resolve(&self, id: &RatePlanId) -> Option<&RatePlan> {
        self.plans.iter().find(|plan| plan.id() == id)
    }

    pub fn plans(&self) -> &[RatePlan] {
        &self.plans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_plan_apply() {
        let plan = RatePlan::new(RatePlanId::new("wb"), "With Breakfast", 115);
        let result = plan.apply(Money::usd(51000));
        assert_eq!(result.amount_cents(), 58650);
    }

    #[test]
    fn test_catalog_resolve_known() {
        let catalog = RatePlanCatalog::standard();
        let plan = catalog.resolve(&RatePlanId::new("wb")).unwrap();
        assert_eq!(plan.multiplier_percent(), 115);
        let plan = catalog.resolve(&RatePlanId::new("wob")).unwrap();
        assert_eq!(plan.multiplier_percent(), 100);
    }

    #[test]
    fn test_catalog_resolve_unknown_is_none() {
        let catalog = RatePlanCatalog::standard();
        assert!(catalog.resolve(&RatePlanId::new("unknown")).is_none());
    }
}
