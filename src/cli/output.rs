use colored::Colorize;

/// Render `body` inside an ASCII box headed by `title`.
pub fn render_panel(title: &str, body: &str) -> String {
    let lines: Vec<&str> = body.lines().collect();
    let inner = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0);

    let border = format!("+{}+", "-".repeat(inner + 2));
    let mut out = Vec::with_capacity(lines.len() + 4);
    out.push(border.clone());
    out.push(format!("| {:^width$} |", title, width = inner));
    out.push(border.clone());
    for line in &lines {
        out.push(format!("| {:<width$} |", line, width = inner));
    }
    out.push(border);
    out.join("\n")
}

pub fn print_panel(title: &str, body: &str) {
    println!("{}", render_panel(title, body).dimmed());
}
