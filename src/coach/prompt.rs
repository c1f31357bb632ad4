use crate::{
    config::ProjectConfig,
    journal::lookback::LatestEntries,
    progress::{metrics::DailyMetrics, phase::PhaseCalendar},
    utils::percentage::Percentage,
};

/// How much work to ask for today, judged by how long the last day's tasks took compared to
/// their estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfficiencyPolicy {
    /// Actual hours exceeded the estimate by more than 10%.
    Overloaded,
    /// Actual hours stayed more than 10% below the estimate.
    Underloaded,
    OnTrack,
}

impl EfficiencyPolicy {
    pub fn from_efficiency(efficiency: f64) -> Self {
        if efficiency > 1.1 {
            Self::Overloaded
        } else if efficiency < 0.9 {
            Self::Underloaded
        } else {
            Self::OnTrack
        }
    }

    /// Number of tasks requested, as shown in the prompt.
    pub fn task_range(&self) -> &'static str {
        match self {
            Self::Overloaded => "1-2",
            Self::Underloaded => "2-3",
            Self::OnTrack => "1-3",
        }
    }

    fn directive(&self) -> &'static str {
        match self {
            Self::Overloaded => "实际耗时超过预计的 1.1 倍，今天请把任务减至 1-2 条，每条范围要小。",
            Self::Underloaded => "实际耗时低于预计的 0.9 倍，今天可以给出 2-3 条稍具挑战性的任务。",
            Self::OnTrack => "实际耗时与预计基本一致，保持当前节奏，给出 1-3 条任务。",
        }
    }
}

/// System prompt shared by the plan and review requests.
pub fn system_prompt(
    project: &ProjectConfig,
    calendar: &PhaseCalendar,
    metrics: &DailyMetrics,
) -> String {
    let mut prompt = format!(
        "You are an academic coach for the project titled '{}'.\n\
         Phase: {} — {}\n\
         Overall milestones:\n",
        project.title, metrics.phase_code, metrics.phase_description
    );
    for phase in calendar.phases() {
        prompt.push_str(&format!(
            " • {} ({}→{}): {}\n",
            phase.code,
            phase.start.format("%m-%d"),
            phase.end.format("%m-%d"),
            phase.description
        ));
    }
    if !project.resources.is_empty() {
        prompt.push_str("Resources:\n");
        for resource in &project.resources {
            prompt.push_str(&format!(" • {resource}\n"));
        }
    }
    prompt
}

/// Metrics and task lists of the last recorded day, used by both requests.
fn day_context(metrics: &DailyMetrics, latest: &LatestEntries) -> String {
    let last_record = match latest.date {
        Some(date) => format!("上次记录日期：{}\n", date.format("%Y-%m-%d")),
        None => "最近没有任务记录。\n".to_string(),
    };
    let done = latest
        .entries
        .done
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>();
    let todo = latest
        .entries
        .todo
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>();
    format!(
        "{last_record}\
         昨天完成率 {}，时间进度 {}；\n\
         预计 {:.1}h，实际 {:.1}h。\n\
         已完成：{}\n\
         未完成：{}\n",
        Percentage::from_ratio(metrics.completion_rate),
        Percentage::from_ratio(metrics.time_progress),
        metrics.total_estimated,
        metrics.total_spent,
        done.join(", "),
        todo.join(", ")
    )
}

/// User prompt asking for today's tasks.
pub fn plan_prompt(metrics: &DailyMetrics, latest: &LatestEntries) -> String {
    let policy = EfficiencyPolicy::from_efficiency(metrics.efficiency);
    format!(
        "{}\n{}\n\
         列出 **今日需完成的 {} 个任务**，格式：\n\
         • 动词 开头，中文任务描述 (预计 Xh)\n\
         每条 ≤ 30 字，独立行，无编号。",
        day_context(metrics, latest),
        policy.directive(),
        policy.task_range()
    )
}

/// User prompt asking for a short review of the last recorded day.
pub fn review_prompt(metrics: &DailyMetrics, latest: &LatestEntries) -> String {
    let mut prompt = day_context(metrics, latest);
    prompt.push('\n');
    prompt.push_str("请复盘上一个工作日，3-5 行：\n");
    prompt.push_str("完成了什么；哪些任务延误及可能原因；对照阶段目标的差距；今天的一个具体改进。\n");
    prompt.push_str("每行独立，无编号，不要输出任务列表。");
    prompt
}
