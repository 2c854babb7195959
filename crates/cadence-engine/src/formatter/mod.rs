use cadence_core::{
    Alphabet, Analysis, Block, CyclePositionStat, Report, RowTransition, Sequence, Suggestion,
};

fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

fn insufficient(what: &str, required: usize, available: usize) -> String {
    format!(
        "{}: not enough history yet ({} of {} symbols)",
        what, available, required
    )
}

pub fn format_blocks(blocks: &[Block], alphabet: &Alphabet) -> String {
    if blocks.is_empty() {
        return "(empty)".to_string();
    }

    let mut output = String::new();
    for block in blocks {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&format!("Block {} ({}):", block.index + 1, block.len()));
        for row in &block.rows {
            output.push_str(&format!("\n  {}", alphabet.render(row)));
        }
    }
    output
}

pub fn format_history(sequence: &Sequence, alphabet: &Alphabet) -> String {
    if sequence.is_empty() {
        return "(empty)".to_string();
    }
    sequence
        .iter()
        .enumerate()
        .map(|(i, s)| format!("#{} {}", i + 1, alphabet.label(*s)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_suggestion(suggestion: &Suggestion, alphabet: &Alphabet) -> String {
    format!(
        "{} {:>4} [{}] {}",
        alphabet.label(suggestion.symbol),
        percent(suggestion.confidence),
        suggestion.source.as_str(),
        suggestion.rationale
    )
}

pub fn format_suggestions(
    suggestions: &[Suggestion],
    alphabet: &Alphabet,
    limit: usize,
) -> String {
    if suggestions.is_empty() {
        return "No suggestion: the history is empty.".to_string();
    }

    let mut output = String::from("Suggestions:");
    for (rank, suggestion) in suggestions.iter().take(limit).enumerate() {
        output.push_str(&format!(
            "\n{}. {}",
            rank + 1,
            format_suggestion(suggestion, alphabet)
        ));
    }
    output
}

fn format_cycle_stat(stat: &CyclePositionStat, alphabet: &Alphabet) -> String {
    let significance = match stat.p_value {
        Some(p) => format!("p={:.4}", p),
        None => "unanimous".to_string(),
    };
    format!(
        "  pos {:>2}: {} {:>4} of {} ({})",
        stat.position + 1,
        alphabet.label(stat.symbol),
        percent(stat.frequency),
        stat.samples,
        significance
    )
}

pub fn format_cycles(
    cycles: &Analysis<Vec<CyclePositionStat>>,
    cycle_length: usize,
    alphabet: &Alphabet,
) -> String {
    let title = format!("Cycle positions ({}-cycle)", cycle_length);
    match cycles {
        Analysis::Insufficient {
            required,
            available,
        } => insufficient(&title, *required, *available),
        Analysis::NoPattern => format!("{}: no dominant position", title),
        Analysis::Found(stats) => {
            let mut output = format!("{}:", title);
            for stat in stats {
                output.push('\n');
                output.push_str(&format_cycle_stat(stat, alphabet));
            }
            output
        }
    }
}

pub fn format_transition(transition: &Analysis<RowTransition>, alphabet: &Alphabet) -> String {
    let title = "Row transition";
    match transition {
        Analysis::Insufficient {
            required,
            available,
        } => insufficient(title, *required, *available),
        Analysis::NoPattern => format!("{}: no earlier row ends the same way", title),
        Analysis::Found(t) => {
            let mut output = format!(
                "{}: row {} ends with {}, matched by {} earlier row(s)",
                title,
                t.reference_row + 1,
                alphabet.render(&t.tail),
                t.matches.len()
            );
            for m in &t.matches {
                output.push_str(&format!(
                    "\n  after row {}: {}",
                    m.row + 1,
                    alphabet.render(&m.lead)
                ));
            }
            output.push_str(&format!(
                "\n  next row tends to open with {} ({})",
                alphabet.label(t.symbol),
                percent(t.confidence)
            ));
            output
        }
    }
}

pub fn format_report(
    report: &Report,
    alphabet: &Alphabet,
    cycle_length: usize,
    limit: usize,
) -> String {
    let mut sections = vec![format!("Length: {}", report.length)];
    if let Some(structure) = &report.tail_structure {
        sections.push(format!("Tail structure: {}", structure));
    }
    sections.push(format_suggestions(&report.suggestions, alphabet, limit));
    sections.push(format_cycles(&report.cycles, cycle_length, alphabet));
    sections.push(format_transition(&report.transition, alphabet));
    sections.join("\n\n")
}

pub fn format_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
