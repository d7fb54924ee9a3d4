use mzformula::search::CandidateResult;

const HEADERS: [&str; 6] = [
    "#",
    "Molecular Formula",
    "Monoisotopic Mass [g/mol]",
    "m/z [g/mol]",
    "Deviation [ppm]",
    "Unsaturation [-]",
];

/// Render the results as a plain text table: left aligned columns separated by two spaces with
/// a line of dashes as wide as the header below the header.
pub(crate) fn render(results: &[CandidateResult]) -> String {
    let rows: Vec<[String; 6]> = results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            [
                (index + 1).to_string(),
                result.formula.to_string(),
                format!("{:.4}", result.mass),
                format!("{:.4}", result.mz),
                format!("{:.3}", result.deviation),
                format!("{:.1}", result.unsaturation),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| {
        let mut text = String::new();
        for (index, (cell, width)) in cells.iter().zip(widths).enumerate() {
            if index != 0 {
                text.push_str("  ");
            }
            text.push_str(cell);
            text.extend(std::iter::repeat_n(' ', width - cell.chars().count()));
        }
        text.trim_end().to_string()
    };

    let header = line(&HEADERS);
    let mut output = String::new();
    output.push_str(&header);
    output.push('\n');
    output.push_str(&"-".repeat(header.chars().count()));
    output.push('\n');
    for row in &rows {
        output.push_str(&line(&row.each_ref().map(String::as_str)));
        output.push('\n');
    }
    output
}
