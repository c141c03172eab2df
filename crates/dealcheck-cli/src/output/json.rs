use crate::output::Report;

/// Pretty-print the full report as JSON.
pub fn print_json(report: &Report) {
    let serialized = match report {
        Report::Analysis(output) => serde_json::to_string_pretty(output),
        Report::Schedule(schedule) => serde_json::to_string_pretty(schedule),
    };

    match serialized {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}
