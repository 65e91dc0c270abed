use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

use crate::cli::MeasureCmd;
use crate::models::{BodyMeasurement, BodyParts, WeightUnit};
use crate::state::AppState;
use crate::types::{OutputFmt, emit};
use crate::utils;

fn unit_label(unit: WeightUnit) -> &'static str {
    match unit {
        WeightUnit::Kg => "kg",
        WeightUnit::Lbs => "lbs",
    }
}

/// Plot values over their insertion order as a small terminal graph, sized to
/// the terminal. Points are drawn as ● with · filling the connecting lines.
fn ascii_graph(data: &[(String, f64)], title: &str) -> Vec<String> {
    if data.len() < 2 {
        return vec!["Not enough data to graph".to_string()];
    }

    let min = data.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max = data.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range == 0.0 {
        return vec!["No variation in data".to_string()];
    }

    let (term_width, term_height) = term_size::dimensions().unwrap_or((80, 24));
    let width = (term_width / 2).clamp(20, 60);
    let height = (term_height / 2).clamp(8, 15);

    let mut grid = vec![vec![' '; width]; height];

    let place = |i: usize, v: f64| -> (usize, usize) {
        let x = (i as f64 / (data.len() - 1) as f64 * (width - 1) as f64) as usize;
        let y = ((v - min) / range * (height - 1) as f64) as usize;
        (x, height - 1 - y)
    };

    for (i, (_, value)) in data.iter().enumerate() {
        let (x, y) = place(i, *value);
        grid[y][x] = '●';

        if i > 0 {
            let (px, py) = place(i - 1, data[i - 1].1);
            let dx = x as isize - px as isize;
            let dy = y as isize - py as isize;
            let steps = dx.abs().max(dy.abs());
            for step in 1..steps {
                let gx = (px as isize + dx * step / steps) as usize;
                let gy = (py as isize + dy * step / steps) as usize;
                if grid[gy][gx] == ' ' {
                    grid[gy][gx] = '·';
                }
            }
        }
    }

    let mut out = Vec::with_capacity(height + 4);
    out.push(format!("\n{}", title.bold()));
    out.push("─".repeat(width + 7));

    let step = range / (height - 1) as f64;
    for (i, row) in grid.iter().enumerate() {
        let value = min + step * (height - 1 - i) as f64;
        out.push(format!("{:5.1} │{}", value, row.iter().collect::<String>()));
    }
    out.push(format!("      └{}", "─".repeat(width)));
    out.push(format!(
        "      {}  {}",
        data.first().map(|(d, _)| d.as_str()).unwrap_or(""),
        data.last().map(|(d, _)| d.as_str()).unwrap_or("")
    ));

    out
}

pub async fn handle(cmd: MeasureCmd, state: &mut AppState, fmt: OutputFmt) -> Result<()> {
    match cmd {
        MeasureCmd::Add {
            weight,
            height,
            body_fat,
            chest,
            waist,
            hips,
            arms,
            thighs,
            notes,
            date,
        } => {
            if weight <= 0.0 {
                println!("{} weight must be > 0", "error:".red().bold());
                return Ok(());
            }

            let girths = BodyParts {
                chest,
                waist,
                hips,
                arms,
                thighs,
            };

            let previous = state.measurements().first().map(|m| m.weight);

            let measurement = BodyMeasurement {
                id: utils::time_based_id(),
                date: date.unwrap_or_else(|| Utc::now().to_rfc3339()),
                weight,
                height,
                body_fat,
                measurements: (!girths.is_empty()).then_some(girths),
                notes,
            };

            state.add_measurement(measurement).await?;

            let unit = unit_label(state.settings().weight_unit);
            match previous {
                Some(prev) => {
                    let delta = weight - prev;
                    let arrow = if delta > 0.0 { "▲".red() } else { "▼".green() };
                    println!(
                        "{} recorded {} {} ({} {:+.1} {} since last entry)",
                        "ok:".green().bold(),
                        weight,
                        unit,
                        arrow,
                        delta,
                        unit
                    );
                }
                None => println!("{} recorded {} {}", "ok:".green().bold(), weight, unit),
            }
        }

        MeasureCmd::List { limit, graph } => {
            let entries = state.measurements();
            if entries.is_empty() {
                println!("{}", "  (no measurements recorded)".dimmed());
                return Ok(());
            }

            let shown: Vec<&BodyMeasurement> =
                entries.iter().take(limit.unwrap_or(entries.len())).collect();
            let unit = unit_label(state.settings().weight_unit);

            emit(fmt, &shown, || {
                println!("{}", "Measurements:".cyan().bold());

                for m in &shown {
                    let date = m.date.get(..10).unwrap_or(&m.date);
                    let mut extras = Vec::new();
                    if let Some(bf) = m.body_fat {
                        extras.push(format!("{bf:.1}% bf"));
                    }
                    if let Some(h) = m.height {
                        extras.push(format!("{h:.0} cm"));
                    }
                    let extras = if extras.is_empty() {
                        String::new()
                    } else {
                        format!(" ({})", extras.join(", ")).dimmed().to_string()
                    };

                    println!(
                        " {} • {} {}{}",
                        date.yellow(),
                        format!("{:.1}", m.weight).bold(),
                        unit,
                        extras
                    );

                    if let Some(notes) = &m.notes {
                        println!("     {}", notes.dimmed());
                    }
                }

                if graph {
                    // Oldest first for the graph's left-to-right axis.
                    let series: Vec<(String, f64)> = entries
                        .iter()
                        .rev()
                        .map(|m| (m.date.get(..10).unwrap_or(&m.date).to_string(), m.weight))
                        .collect();

                    for line in ascii_graph(&series, &format!("Body weight ({unit})")) {
                        println!("{}", line);
                    }
                }
            });
        }
    }

    Ok(())
}
