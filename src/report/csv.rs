//! CSV rendering of a [`Report`]
//!
//! One long-format table, `scope,category,item,value`, so every field of the
//! report fits without a schema per section. `scope` is a protocol name or
//! `comparison`.

use super::{ProtocolSection, Report};
use crate::error::{AnalysisError, Result};

const HEADER: [&str; 4] = ["scope", "category", "item", "value"];

struct Rows<'r> {
    writer: ::csv::Writer<Vec<u8>>,
    scope: &'r str,
}

impl Rows<'_> {
    fn row(&mut self, category: &str, item: &str, value: String) -> Result<()> {
        self.writer
            .write_record([self.scope, category, item, value.as_str()])
            .map_err(|e| AnalysisError::Io(e.into()))
    }
}

fn protocol_rows(rows: &mut Rows<'_>, section: &ProtocolSection) -> Result<()> {
    let s = &section.summary;
    rows.row("summary", "count", s.count.to_string())?;
    rows.row("summary", "mean_total_size", format!("{:.1}", s.total_size.mean))?;
    rows.row("summary", "min_total_size", s.total_size.min.to_string())?;
    rows.row("summary", "max_total_size", s.total_size.max.to_string())?;
    rows.row("summary", "mean_payload_size", format!("{:.1}", s.payload_size.mean))?;
    rows.row("summary", "min_payload_size", s.payload_size.min.to_string())?;
    rows.row("summary", "max_payload_size", s.payload_size.max.to_string())?;
    rows.row(
        "summary",
        "mean_efficiency_percent",
        format!("{:.1}", s.mean_efficiency_percent),
    )?;
    rows.row(
        "summary",
        "mean_overhead_percent",
        format!("{:.1}", s.mean_overhead_percent),
    )?;
    rows.row(
        "summary",
        "efficiency_trend",
        s.efficiency_trend
            .map(|slope| format!("{:.3}", slope))
            .unwrap_or_default(),
    )?;

    for layer in &s.layers {
        let name = layer.layer.name();
        rows.row("layer_bytes", name, format!("{:.1}", layer.mean_bytes))?;
        rows.row(
            "layer_share_of_overhead",
            name,
            format!("{:.1}", layer.share_of_overhead_percent),
        )?;
        rows.row(
            "layer_share_of_total",
            name,
            format!("{:.1}", layer.share_of_total_percent),
        )?;
    }

    for kind in &s.message_types {
        rows.row(
            "message_type_mean_size",
            &kind.message_type,
            format!("{:.1}", kind.mean_total_size),
        )?;
        rows.row("message_type_count", &kind.message_type, kind.count.to_string())?;
    }

    let bins = &section.efficiency_by_bin;
    for bin in bins.bins.iter().chain(bins.overflow.iter()) {
        rows.row(
            "bin_efficiency",
            &bin.label,
            format!("{:.1}", bin.mean_efficiency_percent),
        )?;
        rows.row("bin_count", &bin.label, bin.count.to_string())?;
    }
    rows.row("bin_count", "unassigned", bins.unassigned.to_string())
}

/// Render `report` as CSV text
pub fn render(report: &Report) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .map_err(|e| AnalysisError::Io(e.into()))?;

    let mut rows = Rows { writer, scope: "" };
    for section in &report.protocols {
        rows.scope = &section.summary.name;
        protocol_rows(&mut rows, section)?;
    }

    let c = &report.comparison;
    rows.scope = "comparison";
    rows.row("size", "baseline", c.baseline_name.clone())?;
    rows.row("size", "candidate", c.candidate_name.clone())?;
    rows.row("size", "baseline_mean", format!("{:.1}", c.baseline_mean_size))?;
    rows.row("size", "candidate_mean", format!("{:.1}", c.candidate_mean_size))?;
    rows.row("size", "difference", format!("{:.1}", c.size_difference))?;
    rows.row("size", "percent_difference", format!("{:.1}", c.percent_difference))?;
    rows.row("size", "efficiency_gap", format!("{:.1}", c.efficiency_gap))?;
    rows.row("size", "baseline_variance", format!("{:.1}", c.baseline_variance))?;
    rows.row("size", "candidate_variance", format!("{:.1}", c.candidate_variance))?;
    rows.row("significance", "t_statistic", format!("{:.3}", c.t_statistic))?;
    rows.row(
        "significance",
        "degrees_of_freedom",
        format!("{:.1}", c.degrees_of_freedom),
    )?;
    rows.row("significance", "p_value", format!("{:.6}", c.p_value))?;
    rows.row(
        "significance",
        "significance_level",
        c.significance_level.to_string(),
    )?;
    rows.row("significance", "significant", c.significant.to_string())?;
    rows.row("effect", "cohens_d", format!("{:.3}", c.effect_size))?;
    rows.row("effect", "pooled_std", format!("{:.1}", c.pooled_std))?;
    rows.row("effect", "band", c.effect_band.to_string())?;
    rows.row("sample", "baseline_count", c.baseline_count.to_string())?;
    rows.row("sample", "candidate_count", c.candidate_count.to_string())?;

    let bytes = rows
        .writer
        .into_inner()
        .map_err(|e| AnalysisError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| AnalysisError::Parse(format!("non UTF-8 CSV output: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn test_header_and_scopes() {
        let csv = render(&sample_report()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("scope,category,item,value"));
        assert!(csv.contains("\nLwM2M,summary,count,20\n"));
        assert!(csv.contains("\nMatter,layer_bytes,Transport,40.0\n"));
        assert!(csv.contains("\ncomparison,effect,band,"));
    }

    #[test]
    fn test_labels_with_commas_are_quoted() {
        let mut report = sample_report();
        report.protocols[0].efficiency_by_bin.bins[0].label = "Tiny, really".to_string();
        let csv = render(&report).unwrap();
        assert!(csv.contains("\"Tiny, really\""));
    }

    #[test]
    fn test_every_row_has_four_fields() {
        let csv = render(&sample_report()).unwrap();
        let mut reader = ::csv::Reader::from_reader(csv.as_bytes());
        for record in reader.records() {
            assert_eq!(record.unwrap().len(), 4);
        }
    }
}
