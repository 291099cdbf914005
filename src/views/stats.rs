//! Simulator usage statistics, rendered as a horizontal bar chart.

use async_trait::async_trait;

use super::ListSource;
use crate::api::{ApiClient, Result};
use crate::models::SimulatorUsage;

/// Width in characters of a 100% bar.
const BAR_WIDTH: usize = 40;

pub struct StatsSource;

#[async_trait]
impl ListSource for StatsSource {
    type Item = SimulatorUsage;
    type Filter = ();

    fn name(&self) -> &'static str {
        "simulator-stats"
    }

    async fn fetch(&self, client: &ApiClient, _filter: &()) -> Result<Vec<SimulatorUsage>> {
        client.require_admin()?;
        client.get_list("/simulator-stats", &[]).await
    }

    fn render_item(&self, usage: &SimulatorUsage) -> String {
        format!("{}: {}", usage.simulator, usage.count)
    }

    fn empty_message(&self) -> &'static str {
        "No simulator usage recorded yet."
    }

    fn render(&self, items: &[SimulatorUsage]) -> String {
        render_bars(&usage_bars(items))
    }
}

/// One row of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageBar {
    pub label: String,
    pub count: u64,
    /// Share of the total, rounded to one decimal.
    pub percent: f64,
}

/// Chart rows sorted by count, highest first; ties keep response order.
#[allow(clippy::cast_precision_loss)]
pub fn usage_bars(items: &[SimulatorUsage]) -> Vec<UsageBar> {
    let total = items.iter().map(|u| u.count).fold(0u64, u64::saturating_add);
    let mut bars: Vec<UsageBar> = items
        .iter()
        .map(|u| UsageBar {
            label: u.simulator.clone(),
            count: u.count,
            percent: if total == 0 {
                0.0
            } else {
                (u.count as f64 * 1000.0 / total as f64).round() / 10.0
            },
        })
        .collect();
    bars.sort_by(|a, b| b.count.cmp(&a.count));
    bars
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn render_bars(bars: &[UsageBar]) -> String {
    let label_width = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    bars.iter()
        .map(|b| {
            let filled = ((b.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
            format!(
                "{:<lw$} {:<bw$} {:>6} ({:.1}%)",
                b.label,
                "#".repeat(filled.min(BAR_WIDTH)),
                b.count,
                b.percent,
                lw = label_width,
                bw = BAR_WIDTH,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
