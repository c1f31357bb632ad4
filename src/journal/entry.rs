use std::sync::LazyLock;

use regex::Regex;

/// Estimate used when a task line carries no `(预计 Xh)` annotation.
pub const DEFAULT_ESTIMATE_HOURS: f64 = 2.0;

static TASK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- (TODO|DONE)\s+(.*)$").expect("valid task regex"));

// `3`, `3.`, `3.5` and `.5` are accepted, same as a float literal. Anything else does not match
// and the annotation stays in the text.
static ESTIMATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(预计\s*([0-9]+(?:\.[0-9]*)?|\.[0-9]+)\s*h\)").expect("valid estimate regex")
});

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[耗时\s*([0-9]+(?:\.[0-9]*)?|\.[0-9]+)\s*h\]").expect("valid duration regex")
});

static SPENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[已耗时\s*([0-9]+(?:\.[0-9]*)?|\.[0-9]+)\s*h\]").expect("valid spent regex")
});

/// A task that was marked `DONE` in the journal.
#[derive(Debug, Clone, PartialEq)]
pub struct DoneTask {
    pub text: String,
    pub estimated_hours: f64,
    pub actual_hours: f64,
}

/// A task still marked `TODO`. `spent_hours` is the work already put into it.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoTask {
    pub text: String,
    pub estimated_hours: f64,
    pub spent_hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskRecord {
    Done(DoneTask),
    Todo(TodoTask),
}

/// Tasks found in a single journal file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayEntries {
    pub done: Vec<DoneTask>,
    pub todo: Vec<TodoTask>,
}

impl DayEntries {
    pub fn is_empty(&self) -> bool {
        self.done.is_empty() && self.todo.is_empty()
    }

    pub fn push(&mut self, record: TaskRecord) {
        match record {
            TaskRecord::Done(task) => self.done.push(task),
            TaskRecord::Todo(task) => self.todo.push(task),
        }
    }
}

impl FromIterator<TaskRecord> for DayEntries {
    fn from_iter<T: IntoIterator<Item = TaskRecord>>(iter: T) -> Self {
        let mut entries = DayEntries::default();
        for record in iter {
            entries.push(record);
        }
        entries
    }
}

/// Parses a whole journal file.
pub fn parse_journal(text: &str) -> DayEntries {
    text.lines().filter_map(parse_line).collect()
}

/// Parses a single journal line. Lines that are not `- TODO ...` or `- DONE ...` yield `None`.
/// Indentation is ignored, so nested Logseq blocks are picked up as well.
pub fn parse_line(line: &str) -> Option<TaskRecord> {
    let captures = TASK_RE.captures(line.trim())?;
    let status = captures.get(1)?.as_str();
    let body = captures.get(2).map_or("", |v| v.as_str());

    let estimated_hours = capture_hours(&ESTIMATE_RE, body).unwrap_or(DEFAULT_ESTIMATE_HOURS);

    let record = if status == "DONE" {
        let actual_hours = capture_hours(&DURATION_RE, body).unwrap_or(estimated_hours);
        TaskRecord::Done(DoneTask {
            text: strip(&DURATION_RE, &strip(&ESTIMATE_RE, body)),
            estimated_hours,
            actual_hours,
        })
    } else {
        let spent_hours = capture_hours(&SPENT_RE, body).unwrap_or(0.);
        TaskRecord::Todo(TodoTask {
            text: strip(&SPENT_RE, &strip(&ESTIMATE_RE, body)),
            estimated_hours,
            spent_hours,
        })
    };
    Some(record)
}

/// Renders a record back into journal syntax, annotations included.
pub fn format_line(record: &TaskRecord) -> String {
    match record {
        TaskRecord::Done(task) => format!(
            "- DONE {} (预计 {}h) [耗时 {}h]",
            task.text, task.estimated_hours, task.actual_hours
        ),
        TaskRecord::Todo(task) => format!(
            "- TODO {} (预计 {}h) [已耗时 {}h]",
            task.text, task.estimated_hours, task.spent_hours
        ),
    }
}

fn capture_hours(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|v| v.as_str().parse::<f64>().ok())
}

fn strip(re: &Regex, text: &str) -> String {
    re.replace_all(text, "").trim().to_string()
}
