//! Rendering of resolved records for stdout.

use fileinfo_core::FileRecord;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ScanSummary<'a> {
    pub status: &'static str,
    pub resolved: usize,
    pub records: &'a [FileRecord],
}

/// One record per line, followed by nothing else.
pub fn render_text(records: &[FileRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{}\t{}", r.uri(), r))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(records: &[FileRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

pub fn render_scan_json(records: &[FileRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ScanSummary {
        status: "ok",
        resolved: records.len(),
        records,
    })
}

pub fn render_scan_text(records: &[FileRecord]) -> String {
    let total = records
        .iter()
        .fold(0i64, |acc, r| acc.saturating_add(r.size()));
    let body = render_text(records);
    let summary = format!("scan: resolved {}, total {} bytes", records.len(), total);
    if body.is_empty() {
        summary
    } else {
        format!("{body}\n{summary}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<FileRecord> {
        vec![
            FileRecord::new(
                "content://media/external/images/42",
                "vacation.jpg",
                Some("image/jpeg".to_string()),
                204800,
            ),
            FileRecord::new("file:///tmp/blob", "blob", None, 3),
        ]
    }

    #[test]
    fn text_has_one_line_per_record() {
        let text = render_text(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "content://media/external/images/42\tvacation.jpg (image/jpeg, 204800 bytes)",
                "file:///tmp/blob\tblob (unknown, 3 bytes)",
            ]
        );
    }

    #[test]
    fn json_is_an_array_of_records() {
        let value: serde_json::Value = serde_json::from_str(&render_json(&sample()).unwrap()).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["displayName"], "vacation.jpg");
        assert!(arr[1]["mimeType"].is_null());
    }

    #[test]
    fn scan_summaries_count_records() {
        let records = sample();
        let value: serde_json::Value =
            serde_json::from_str(&render_scan_json(&records).unwrap()).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["resolved"], 2);

        let text = render_scan_text(&records);
        assert!(text.ends_with("scan: resolved 2, total 204803 bytes"));
        assert_eq!(render_scan_text(&[]), "scan: resolved 0, total 0 bytes");
    }

    #[test]
    fn scan_total_saturates_on_huge_sizes() {
        let records = vec![
            FileRecord::new("u1", "big", None, i64::MAX),
            FileRecord::new("u2", "bigger", None, i64::MAX - 1),
        ];
        let text = render_scan_text(&records);
        assert!(text.ends_with(&format!("scan: resolved 2, total {} bytes", i64::MAX)));
    }
}
