use std::io::Write;

use ansi_term::{Colour, Style};
use anyhow::Result;
use chrono::NaiveDate;

use crate::{progress::phase::PhaseCalendar, utils::percentage::Percentage};

use super::daily::Snapshot;

/// Prints the metrics of the last recorded day without calling the text-generation service.
pub fn print_status(snapshot: &Snapshot, out: &mut impl Write) -> Result<()> {
    let Snapshot {
        today,
        latest,
        metrics,
    } = snapshot;
    let bold = Style::new().bold();

    writeln!(
        out,
        "{} {} — {}",
        bold.paint("Phase"),
        Colour::Cyan.bold().paint(metrics.phase_code.as_str()),
        metrics.phase_description
    )?;
    writeln!(
        out,
        "{}\t{}",
        bold.paint("Time progress"),
        Percentage::from_ratio(metrics.time_progress)
    )?;

    let Some(date) = latest.date else {
        writeln!(
            out,
            "{}",
            Colour::Yellow.paint(format!("No tasks recorded before {today}"))
        )?;
        return Ok(());
    };

    writeln!(out, "{}\t{date}", bold.paint("Last journal"))?;
    writeln!(
        out,
        "{}\t{}",
        bold.paint("Completion"),
        Percentage::from_ratio(metrics.completion_rate)
    )?;
    writeln!(
        out,
        "{}\t{:.1}h / {:.1}h ({:.2}x)",
        bold.paint("Estimated/actual"),
        metrics.total_estimated,
        metrics.total_spent,
        metrics.efficiency
    )?;
    for task in &latest.entries.done {
        writeln!(
            out,
            "  {} {} ({:.1}h / {:.1}h)",
            Colour::Green.paint("DONE"),
            task.text,
            task.estimated_hours,
            task.actual_hours
        )?;
    }
    for task in &latest.entries.todo {
        writeln!(
            out,
            "  {} {} ({:.1}h / {:.1}h)",
            Colour::Red.paint("TODO"),
            task.text,
            task.estimated_hours,
            task.spent_hours
        )?;
    }
    Ok(())
}

/// Prints the phase calendar, marking the phase that is current on `today`.
pub fn print_phases(calendar: &PhaseCalendar, today: NaiveDate, out: &mut impl Write) -> Result<()> {
    let current = calendar.current_phase(today);
    for phase in calendar.phases() {
        let marker = if phase == current { "*" } else { " " };
        let line = format!(
            "{marker} {}\t{} → {}\t{:>4}\t{}",
            phase.code,
            phase.start,
            phase.end,
            Percentage::from_ratio(phase.time_progress(today)).to_string(),
            phase.description
        );
        if phase == current {
            writeln!(out, "{}", Style::new().bold().paint(line))?;
        } else {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}
