//! Simulation report generation.

use super::runner::RunStats;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub generated_at: DateTime<Utc>,
    pub num_runs: u32,
    pub runs_game_over: u32,
    pub runs_timed_out: u32,

    // Aggregated stats
    pub avg_landings: f64,
    pub avg_crashes: f64,
    pub avg_out_of_bounds: f64,
    pub avg_final_score: f64,
    pub avg_fuel_used: f64,
    pub avg_frames: f64,
    /// Landings over all attempts, 0..=1.
    pub landing_rate: f64,
    /// Mean points per successful landing.
    pub avg_points_per_landing: f64,

    // Distribution data
    pub score_distribution: BTreeMap<u32, u32>,

    // Individual run stats for detailed analysis
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, max_frames: u64) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = f64::from(num_runs.max(1));
        let runs_game_over = runs.iter().filter(|r| r.game_over).count() as u32;
        let runs_timed_out = runs
            .iter()
            .filter(|r| !r.game_over && r.frames >= max_frames)
            .count() as u32;

        let avg = |f: fn(&RunStats) -> f64| runs.iter().map(f).sum::<f64>() / divisor;
        let avg_landings = avg(|r| f64::from(r.landings));
        let avg_crashes = avg(|r| f64::from(r.crashes));
        let avg_out_of_bounds = avg(|r| f64::from(r.out_of_bounds));
        let avg_final_score = avg(|r| f64::from(r.final_score));
        let avg_fuel_used = avg(|r| r.fuel_used);
        let avg_frames = avg(|r| r.frames as f64);

        let total_landings: u32 = runs.iter().map(|r| r.landings).sum();
        let total_attempts: u32 = runs.iter().map(RunStats::attempts).sum();
        let total_points: u32 = runs.iter().map(|r| r.points_earned).sum();
        let landing_rate = f64::from(total_landings) / f64::from(total_attempts.max(1));
        let avg_points_per_landing = f64::from(total_points) / f64::from(total_landings.max(1));

        let mut score_distribution = BTreeMap::new();
        for run in &runs {
            *score_distribution.entry(run.final_score).or_insert(0) += 1;
        }

        Self {
            generated_at: Utc::now(),
            num_runs,
            runs_game_over,
            runs_timed_out,
            avg_landings,
            avg_crashes,
            avg_out_of_bounds,
            avg_final_score,
            avg_fuel_used,
            avg_frames,
            landing_rate,
            avg_points_per_landing,
            score_distribution,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 LUNAR LANDER SIMULATION REPORT\n");
        report.push_str(&format!(
            "                  {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} game over, {} hit the frame cap\n\n",
            self.num_runs, self.runs_game_over, self.runs_timed_out
        ));

        report.push_str("── ATTEMPTS ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Landings:       {:.2}\n", self.avg_landings));
        report.push_str(&format!("  Avg Crashes:        {:.2}\n", self.avg_crashes));
        report.push_str(&format!(
            "  Avg Out of Bounds:  {:.2}\n",
            self.avg_out_of_bounds
        ));
        report.push_str(&format!(
            "  Landing Rate:       {:.1}%\n\n",
            self.landing_rate * 100.0
        ));

        report.push_str("── SCORING ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Score:    {:.1}\n", self.avg_final_score));
        report.push_str(&format!(
            "  Avg Points/Landing: {:.1}\n",
            self.avg_points_per_landing
        ));
        let min_score = self.run_stats.iter().map(|r| r.final_score).min().unwrap_or(0);
        let max_score = self.run_stats.iter().map(|r| r.final_score).max().unwrap_or(0);
        let median_score = {
            let mut sorted: Vec<u32> = self.run_stats.iter().map(|r| r.final_score).collect();
            sorted.sort_unstable();
            sorted.get(sorted.len() / 2).copied().unwrap_or(0)
        };
        report.push_str(&format!("  Min Score:          {}\n", min_score));
        report.push_str(&format!("  Median Score:       {}\n", median_score));
        report.push_str(&format!("  Max Score:          {}\n\n", max_score));

        report.push_str("── RESOURCES ────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Fuel Used:      {:.0}\n", self.avg_fuel_used));
        report.push_str(&format!("  Avg Frames:         {:.0}\n\n", self.avg_frames));

        report.push_str("── SCORE DISTRIBUTION ───────────────────────────────────────────\n");
        for (score, count) in &self.score_distribution {
            let pct = f64::from(*count) / f64::from(self.num_runs.max(1)) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:>5}: {:>5.1}% {}\n", score, pct, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.landing_rate > 0.8 {
            "TOO EASY - Nearly every approach lands"
        } else if self.landing_rate > 0.4 {
            "GOOD - Landable with care"
        } else if self.landing_rate > 0.1 {
            "HARD - Most approaches end badly"
        } else {
            "TOO HARD - Landings are rare"
        };
        report.push_str(&format!("  Difficulty Rating: {}\n", rating));

        if self.avg_out_of_bounds > self.avg_crashes && self.avg_out_of_bounds > 0.0 {
            report.push_str("  ⚠️  More losses to leaving the world than to crashes\n");
        }
        if self.runs_timed_out == self.num_runs && self.num_runs > 0 {
            report.push_str("  ⚠️  No run reached game over - frame cap too low?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// Summary fields only; per-run stats stay out of the JSON output
impl serde::Serialize for SimReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SimReport", 14)?;
        state.serialize_field("generated_at", &self.generated_at.to_rfc3339())?;
        state.serialize_field("num_runs", &self.num_runs)?;
        state.serialize_field("runs_game_over", &self.runs_game_over)?;
        state.serialize_field("runs_timed_out", &self.runs_timed_out)?;
        state.serialize_field("avg_landings", &self.avg_landings)?;
        state.serialize_field("avg_crashes", &self.avg_crashes)?;
        state.serialize_field("avg_out_of_bounds", &self.avg_out_of_bounds)?;
        state.serialize_field("avg_final_score", &self.avg_final_score)?;
        state.serialize_field("avg_fuel_used", &self.avg_fuel_used)?;
        state.serialize_field("avg_frames", &self.avg_frames)?;
        state.serialize_field("landing_rate", &self.landing_rate)?;
        state.serialize_field("avg_points_per_landing", &self.avg_points_per_landing)?;
        state.serialize_field("score_distribution", &self.score_distribution)?;
        state.serialize_field("run_stats", &self.run_stats)?;
        state.end()
    }
}
