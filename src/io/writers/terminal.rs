use crate::core::{AnalysisResult, FunctionRecord};
use crate::io::output::OutputWriter;
use colored::*;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use std::io::Write;

const HOTSPOT_LIMIT: usize = 5;

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_results(&mut self, results: &AnalysisResult) -> anyhow::Result<()> {
        self.write_header()?;
        self.write_summary(results)?;
        self.write_architecture(results)?;
        self.write_complexity_hotspots(results)?;
        self.write_api_endpoints(results)?;
        self.write_skipped_files(results)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_header(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(self.writer, "{}", "           REPOSITORY ANALYSIS".bold().cyan())?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, results: &AnalysisResult) -> anyhow::Result<()> {
        let metrics = &results.metrics;

        writeln!(self.writer, "📊 {} Summary", "CODEBASE".bold())?;
        writeln!(self.writer, "───────────────────────────────────────────")?;
        writeln!(self.writer, "  Files analyzed:      {}", metrics.total_files)?;
        writeln!(self.writer, "  Total lines:         {}", metrics.total_lines)?;
        writeln!(self.writer, "  Total functions:     {}", metrics.total_functions)?;
        writeln!(self.writer, "  Total classes:       {}", metrics.total_classes)?;
        writeln!(self.writer, "  Components:          {}", metrics.total_components)?;
        writeln!(self.writer, "  API endpoints:       {}", metrics.total_api_endpoints)?;
        writeln!(
            self.writer,
            "  Average complexity:  {}",
            format_complexity(metrics.average_complexity)
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_architecture(&mut self, results: &AnalysisResult) -> anyhow::Result<()> {
        let architecture = &results.architecture;
        if architecture.kind.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "🏗  {}", "ARCHITECTURE".bold())?;
        writeln!(self.writer, "───────────────────────────────────────────")?;
        writeln!(self.writer, "  Kind:        {}", architecture.kind)?;
        writeln!(self.writer, "  Framework:   {}", architecture.framework)?;
        writeln!(self.writer, "  Language:    {}", architecture.language)?;
        let optional = [
            ("Database", &architecture.database),
            ("Auth", &architecture.authentication),
            ("Styling", &architecture.styling),
            ("Testing", &architecture.testing),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                writeln!(self.writer, "  {:<12} {}", format!("{label}:"), value)?;
            }
        }
        if !results.technologies.is_empty() {
            let technologies: Vec<&str> = results.technologies.iter().map(String::as_str).collect();
            writeln!(self.writer, "  Stack:       {}", technologies.join(", "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_complexity_hotspots(&mut self, results: &AnalysisResult) -> anyhow::Result<()> {
        let hotspots = top_complex_functions(results, HOTSPOT_LIMIT);
        if hotspots.is_empty() {
            return Ok(());
        }

        writeln!(
            self.writer,
            "⚠️  {} (Top {})",
            "COMPLEXITY HOTSPOTS".bold(),
            HOTSPOT_LIMIT
        )?;

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Function", "File", "Lines", "Complexity"]);
        for (path, function) in hotspots {
            table.add_row(vec![
                function.name.clone(),
                path.to_string(),
                format!("{}-{}", function.line_start, function.line_end),
                function.complexity.to_string(),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_api_endpoints(&mut self, results: &AnalysisResult) -> anyhow::Result<()> {
        if results.api_endpoints.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "🌐 {}", "API ENDPOINTS".bold())?;
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Method", "Route", "File", "Line"]);
        for endpoint in &results.api_endpoints {
            table.add_row(vec![
                endpoint.http_method.to_string(),
                endpoint.route_path.clone(),
                endpoint.source_file.clone(),
                endpoint.line_number.to_string(),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_skipped_files(&mut self, results: &AnalysisResult) -> anyhow::Result<()> {
        if results.skipped_files.is_empty() {
            return Ok(());
        }

        writeln!(
            self.writer,
            "{} {} file(s) skipped",
            "note:".yellow(),
            results.skipped_files.len()
        )?;
        for skipped in &results.skipped_files {
            match &skipped.detail {
                Some(detail) => writeln!(self.writer, "  {} ({})", skipped.path, detail)?,
                None => writeln!(self.writer, "  {}", skipped.path)?,
            }
        }
        Ok(())
    }
}

fn format_complexity(average: f64) -> ColoredString {
    let text = format!("{average:.1}");
    if average < 5.0 {
        text.green()
    } else if average < 10.0 {
        text.yellow()
    } else {
        text.red()
    }
}

/// Highest-complexity functions across all files, ties broken by path
fn top_complex_functions(results: &AnalysisResult, limit: usize) -> Vec<(&str, &FunctionRecord)> {
    let mut functions: Vec<(&str, &FunctionRecord)> = results
        .source_files
        .iter()
        .flat_map(|file| file.functions.iter().map(move |f| (file.path.as_str(), f)))
        .collect();
    functions.sort_by(|(path_a, a), (path_b, b)| {
        b.complexity
            .cmp(&a.complexity)
            .then_with(|| path_a.cmp(path_b))
            .then_with(|| a.line_start.cmp(&b.line_start))
    });
    functions.truncate(limit);
    functions
}
