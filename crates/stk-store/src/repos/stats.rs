//! Dashboard aggregation.

use std::collections::BTreeMap;

use stk_core::responses::DashboardStats;

use crate::service::AssetService;

impl AssetService {
    /// Counts per category, recomputed from a read snapshot of each one.
    #[must_use]
    pub fn dashboard_stats(&self) -> DashboardStats {
        let mut stats = DashboardStats {
            category_count: 0,
            asset_count: 0,
            user_count: self.users().user_count(),
            asset_counts_by_category: BTreeMap::new(),
            active_asset_counts_by_category: BTreeMap::new(),
        };

        for slot in self.catalog().slots() {
            let Ok(state) = slot.read() else {
                continue;
            };
            let total = state.records.len();
            let active = state.records.iter().filter(|r| r.is_active()).count();
            stats.category_count += 1;
            stats.asset_count += total;
            stats
                .asset_counts_by_category
                .insert(slot.name().to_string(), total);
            stats
                .active_asset_counts_by_category
                .insert(slot.name().to_string(), active);
        }
        stats
    }
}
