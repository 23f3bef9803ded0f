use std::path::Path;

use console::Style;
use markscan_core::pipeline::{GradedSheet, GradingConfig};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    correct: Style,
    incorrect: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            correct: Style::new().green(),
            incorrect: Style::new().red(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

/// Bubble label: A, B, C... while letters last, then 1-based numbers.
fn choice_label(choice: usize) -> String {
    match u8::try_from(choice) {
        Ok(c) if c < 26 => char::from(b'A' + c).to_string(),
        _ => (choice + 1).to_string(),
    }
}

pub fn print_run_header(
    config: &GradingConfig,
    image: &Path,
    output: &Path,
    montage: Option<&Path>,
) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("MarkScan"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(8)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(image.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    match montage {
        Some(path) => println!(
            "  {:<14}{}",
            s.label.apply_to("Montage"),
            s.path.apply_to(path.display())
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Montage"),
            s.disabled.apply_to("disabled")
        ),
    }
    println!();

    println!("  {}", s.header.apply_to("Sheet"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Grid"),
        s.value.apply_to(format!(
            "{} questions x {} choices",
            config.questions, config.choices
        ))
    );
    let key: Vec<String> = config.answer_key.iter().map(|&a| choice_label(a)).collect();
    println!(
        "    {:<12}{}",
        s.label.apply_to("Key"),
        s.value.apply_to(key.join(" "))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Threshold"),
        s.value.apply_to(&config.binarize)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Blank rows"),
        s.value.apply_to(format!(
            "{} (fill > {:.0}%)",
            config.blank_rows.policy,
            config.blank_rows.min_fill * 100.0
        ))
    );
    println!();
}

pub fn print_grade_summary(sheet: &GradedSheet, key: &[usize], saved: Option<&Path>) {
    let s = Styles::new();
    let grade = &sheet.grade;

    println!("  {}", s.header.apply_to("Responses"));
    for (q, ((response, &answer), &ok)) in sheet
        .responses
        .iter()
        .zip(key)
        .zip(&grade.correctness)
        .enumerate()
    {
        let marked = match response {
            Some(choice) => choice_label(*choice),
            None => "-".to_string(),
        };
        let verdict = if ok {
            s.correct.apply_to("\u{2713}".to_string())
        } else {
            s.incorrect.apply_to(format!("\u{2717} (key {})", choice_label(answer)))
        };
        println!(
            "    {:<12}{}  {}",
            s.label.apply_to(format!("Q{}", q + 1)),
            s.value.apply_to(marked),
            verdict
        );
    }
    println!();

    let score_style = if grade.all_correct() {
        &s.correct
    } else {
        &s.value
    };
    println!(
        "  {:<14}{}",
        s.header.apply_to("Score"),
        score_style.apply_to(format!(
            "{}%  ({}/{})",
            grade.display_percent(),
            grade.correct,
            grade.questions()
        ))
    );
    if let Some(path) = saved {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Saved"),
            s.path.apply_to(path.display())
        );
    }
    println!();
}
