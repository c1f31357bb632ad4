use chrono::{DateTime, Local};

use crate::{progress::metrics::DailyMetrics, utils::percentage::Percentage};

/// Bullets a model likes to put in front of list items. They are dropped before the line is
/// turned into a `- TODO` block.
const BULLET_CHARS: &[char] = &['•', '·', '–'];

/// Markdown list markers, only treated as bullets when followed by whitespace.
const LIST_MARKERS: &[char] = &['-', '*'];

const STATUS_WORDS: &[&str] = &["TODO", "DONE"];

/// Section with the daily metrics followed by the generated plan, one `- TODO` per nonblank line.
pub fn plan_section(metrics: &DailyMetrics, plan: &str, now: DateTime<Local>) -> String {
    let mut section = format!(
        "\n## GPT 任务 · {}\n\
         - 阶段：{}\n\
         - 时间进度：{}\n\
         - 昨日完成率：{}\n\
         - 昨日预计/实际：{:.1}h / {:.1}h\n",
        now.format("%H:%M"),
        metrics.phase_code,
        Percentage::from_ratio(metrics.time_progress),
        Percentage::from_ratio(metrics.completion_rate),
        metrics.total_estimated,
        metrics.total_spent
    );
    for line in clean_lines(plan).map(strip_status) {
        section.push_str(&format!("- TODO {line}\n"));
    }
    section
}

/// Section holding the free text review, one block per nonblank line.
pub fn review_section(review: &str, now: DateTime<Local>) -> String {
    let mut section = format!("\n## GPT 复盘 · {}\n", now.format("%H:%M"));
    for line in clean_lines(review) {
        section.push_str(&format!("- {line}\n"));
    }
    section
}

fn clean_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
}

fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix(BULLET_CHARS) {
        return rest.trim_start();
    }
    match line.strip_prefix(LIST_MARKERS) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => line,
    }
}

/// `TODO 写引言` and `DONE 写引言` both become `写引言`, the plan decides the status itself.
fn strip_status(line: &str) -> &str {
    STATUS_WORDS
        .iter()
        .find_map(|word| line.strip_prefix(word))
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map_or(line, str::trim_start)
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate, NaiveTime, TimeZone};

    use crate::{
        journal::entry::{parse_journal, parse_line, TaskRecord},
        progress::metrics::DailyMetrics,
    };

    use super::{plan_section, review_section};

    fn test_now() -> chrono::DateTime<Local> {
        Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2025, 5, 3)
                    .unwrap()
                    .and_time(NaiveTime::from_hms_opt(8, 5, 0).unwrap()),
            )
            .unwrap()
    }

    fn test_metrics() -> DailyMetrics {
        DailyMetrics {
            completion_rate: 0.5,
            time_progress: 0.25,
            total_estimated: 5.,
            total_spent: 4.,
            efficiency: 0.8,
            phase_code: "P0".into(),
            phase_description: "2D CFD".into(),
        }
    }

    #[test]
    fn test_plan_section_layout() {
        let plan = "• 运行 50m 网格收敛算例 (预计 2h)\n\n  • 整理反射系数结果 (预计 1h)  \n";
        let section = plan_section(&test_metrics(), plan, test_now());
        assert_eq!(
            section,
            "\n## GPT 任务 · 08:05\n\
             - 阶段：P0\n\
             - 时间进度：25%\n\
             - 昨日完成率：50%\n\
             - 昨日预计/实际：5.0h / 4.0h\n\
             - TODO 运行 50m 网格收敛算例 (预计 2h)\n\
             - TODO 整理反射系数结果 (预计 1h)\n"
        );
    }

    #[test]
    fn test_plan_lines_parse_back_as_tasks() {
        let plan = "- 运行网格收敛算例 (预计 2.5h)\n* 写引言 (预计 1h)";
        let section = plan_section(&test_metrics(), plan, test_now());
        let entries = parse_journal(&section);
        assert!(entries.done.is_empty());
        assert_eq!(entries.todo.len(), 2);
        assert_eq!(entries.todo[0].text, "运行网格收敛算例");
        assert_eq!(entries.todo[0].estimated_hours, 2.5);
        assert_eq!(
            parse_line(section.lines().last().unwrap()),
            Some(TaskRecord::Todo(entries.todo[1].clone()))
        );
    }

    #[test]
    fn test_plan_keeps_status_and_minus_sign_once() {
        let plan = "- TODO 写引言 (预计 1h)\n• DONE 校核边界条件\n-5% 误差复核\n**重点** 整理图表\nTODOS 清单";
        let section = plan_section(&test_metrics(), plan, test_now());
        let tasks = section
            .lines()
            .filter(|l| l.starts_with("- TODO"))
            .collect::<Vec<_>>();
        assert_eq!(
            tasks,
            vec![
                "- TODO 写引言 (预计 1h)",
                "- TODO 校核边界条件",
                "- TODO -5% 误差复核",
                "- TODO **重点** 整理图表",
                "- TODO TODOS 清单",
            ]
        );
    }

    #[test]
    fn test_empty_plan_only_has_header() {
        let section = plan_section(&test_metrics(), "  \n", test_now());
        assert_eq!(section.lines().filter(|l| l.starts_with("- TODO")).count(), 0);
    }

    #[test]
    fn test_review_section() {
        let section = review_section("完成了网格收敛\n\n反射算例延误", test_now());
        assert_eq!(
            section,
            "\n## GPT 复盘 · 08:05\n- 完成了网格收敛\n- 反射算例延误\n"
        );
        assert!(parse_journal(&section).is_empty());
    }
}
