//! Plain-text rendering of the task list.

use taskpad_core::{Locale, Task};

fn empty_placeholder(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "No tasks yet",
        Locale::Indonesian => "Belum ada tugas",
    }
}

/// Renders one line per task, descriptions indented underneath.
pub fn render_tasks(tasks: &[Task], locale: Locale) -> String {
    if tasks.is_empty() {
        return format!("{}\n", empty_placeholder(locale));
    }

    let id_width = tasks
        .iter()
        .map(|task| task.id.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for task in tasks {
        let mark = if task.done { 'x' } else { ' ' };
        out.push_str(&format!(
            "[{mark}] {:>id_width$}  {}\n",
            task.id.get(),
            task.title
        ));
        for line in task.desc.lines().filter(|line| !line.trim().is_empty()) {
            out.push_str(&format!("    {:id_width$}  {line}\n", ""));
        }
    }
    out
}
