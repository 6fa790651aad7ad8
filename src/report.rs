use std::io::{self, Write};

use serde::Serialize;

use crate::error::{LcaError, Result};
use crate::fleet::{percent_change, terminal_ratio};
use crate::scenario::ScenarioResult;

/// Terminal totals of one scenario, compared against a reference scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub terminal_co2_kg: f64,
    pub terminal_co2_tonnes: f64,
    /// Ratio of this scenario's terminal total to the reference's.
    pub ratio_to_reference: f64,
    pub change_vs_reference_percent: f64,
}

/// One row per scenario, in input order.
pub fn summarize(results: &[ScenarioResult], reference: &str) -> Result<Vec<ScenarioReport>> {
    let reference = results
        .iter()
        .find(|r| r.name == reference)
        .ok_or_else(|| LcaError::UnknownScenario(reference.to_string()))?;

    results
        .iter()
        .map(|r| -> Result<ScenarioReport> {
            let ratio = terminal_ratio(&r.trajectory, &reference.trajectory)?;
            let kg = r.trajectory.terminal_co2_kg();
            Ok(ScenarioReport {
                name: r.name.clone(),
                terminal_co2_kg: kg,
                terminal_co2_tonnes: kg / 1000.0,
                ratio_to_reference: ratio,
                change_vs_reference_percent: percent_change(ratio),
            })
        })
        .collect()
}

/// Long-format table: `scenario,distance_km,co2_kg`.
pub fn write_csv<W: Write>(mut out: W, results: &[ScenarioResult]) -> io::Result<()> {
    writeln!(out, "scenario,distance_km,co2_kg")?;
    for r in results {
        let name = csv_field(&r.name);
        for p in r.trajectory.points() {
            writeln!(out, "{},{},{}", name, p.distance_km, p.co2_kg)?;
        }
    }
    Ok(())
}

/// Human-readable summary table.
pub fn write_summary<W: Write>(mut out: W, reports: &[ScenarioReport]) -> io::Result<()> {
    writeln!(out, "{:<28} {:>14} {:>10}", "scenario", "CO2 [tonnes]", "change")?;
    for r in reports {
        writeln!(
            out,
            "{:<28} {:>14.1} {:>9.0}%",
            r.name, r.terminal_co2_tonnes, r.change_vs_reference_percent
        )?;
    }
    Ok(())
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Phase, Scenario};
    use crate::vehicle::{ConsumptionCost, Vehicle, VehicleParams};

    fn result(name: &str, weight: f64) -> ScenarioResult {
        let v = Vehicle::new(VehicleParams {
            name: "car".to_string(),
            weight,
            battery_capacity: 0.0,
            consumption_per_km: 0.05,
            usage: 1.0,
            co2_build_cost_per_kg: 8.0,
            co2_battery_build_cost_per_kwh: 77.0,
            co2_cost_per_consumption: ConsumptionCost::fuel(3.0),
            vehicle_life_km: 300_000.0,
        })
        .unwrap();
        let s = Scenario::new(name, vec![Phase::new(v, vec![0.0, 1000.0]).unwrap()]);
        ScenarioResult {
            name: name.to_string(),
            trajectory: s.evaluate().unwrap(),
        }
    }

    #[test]
    fn test_summarize_against_reference() {
        let results = vec![result("base", 1000.0), result("heavy", 2000.0)];
        let reports = summarize(&results, "base").unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].ratio_to_reference, 1.0);
        assert_eq!(reports[0].change_vs_reference_percent, 0.0);
        // 8150 vs 16150
        assert!((reports[1].terminal_co2_kg - 16_150.0).abs() < 1e-9);
        assert!((reports[1].terminal_co2_tonnes - 16.15).abs() < 1e-9);
        assert!(reports[1].change_vs_reference_percent > 98.0);

        assert!(matches!(
            summarize(&results, "missing"),
            Err(LcaError::UnknownScenario(_))
        ));
    }

    #[test]
    fn test_csv_rows() {
        let results = vec![result("a, b", 1000.0)];
        let mut buf = Vec::new();
        write_csv(&mut buf, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "scenario,distance_km,co2_kg");
        assert_eq!(lines[1], "\"a, b\",0,8000");
        assert_eq!(lines[2], "\"a, b\",1000,8150");
    }

    #[test]
    fn test_json_summary() {
        let reports = summarize(&[result("base", 1000.0)], "base").unwrap();
        let json = to_json(&reports).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "base");
        assert_eq!(value[0]["terminal_co2_kg"], 8150.0);
    }
}
