use crate::models::LabeledLine;

/// Join labeled lines into the final labeled-transcript string: each line
/// as `label: text`, lines separated by a blank line. Empty input renders
/// to the empty string.
pub fn assemble(lines: &[LabeledLine]) -> String {
    lines
        .iter()
        .map(|line| format!("{}: {}", line.label, line.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render a start/end pair of second offsets as `[MM:SS.ss - MM:SS.ss]`.
/// Used by the detailed per-segment report listing.
pub fn format_time_range(start: f64, end: f64) -> String {
    format!("[{} - {}]", format_clock(start), format_clock(end))
}

fn format_clock(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as u64;
    format!("{:02}:{:05.2}", minutes, seconds % 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(label: &str, text: &str) -> LabeledLine {
        LabeledLine {
            label: label.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_assemble_separates_lines_with_blank_line() {
        let lines = vec![line("Agent", "Buenos días."), line("Customer", "Hola.")];
        assert_eq!(assemble(&lines), "Agent: Buenos días.\n\nCustomer: Hola.");
    }

    #[test]
    fn test_assemble_empty() {
        assert_eq!(assemble(&[]), "");
    }

    #[test]
    fn test_format_time_range() {
        assert_eq!(format_time_range(75.2, 138.07), "[01:15.20 - 02:18.07]");
    }

    #[test]
    fn test_format_time_range_zero_pads() {
        assert_eq!(format_time_range(0.0, 5.2), "[00:00.00 - 00:05.20]");
        assert_eq!(format_time_range(600.0, 3600.5), "[10:00.00 - 60:00.50]");
    }
}
