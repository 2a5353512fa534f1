//! Presentation of results and history
//!
//! The pipeline only talks to [`Presenter`]; [`TerminalPresenter`] is the
//! CLI rendering.

use camxuc_core::{ClassificationPayload, HistoryRecord, RejectReason, Result};
use serde::Serialize;
use std::io::Write;

/// Receives everything the pipeline wants shown for one request
pub trait Presenter {
    /// Input was not eligible for classification
    fn show_rejected(&mut self, reason: RejectReason) -> Result<()>;

    /// Classification failed, or the result could not be saved
    fn show_error(&mut self, message: &str) -> Result<()>;

    /// Classification succeeded
    fn show_result(&mut self, payload: &ClassificationPayload) -> Result<()>;

    /// Recent history, newest first
    fn show_history(&mut self, records: &[HistoryRecord]) -> Result<()>;
}

/// History row as shown to users
#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    #[serde(rename = "Câu nhập")]
    text: &'a str,
    #[serde(rename = "Kết quả")]
    label: &'static str,
    #[serde(rename = "Sentiment")]
    sentiment: &'static str,
    #[serde(rename = "Thời gian")]
    timestamp: &'a str,
}

impl<'a> From<&'a HistoryRecord> for HistoryRow<'a> {
    fn from(record: &'a HistoryRecord) -> Self {
        Self {
            text: &record.text,
            label: record.sentiment.vietnamese_label(),
            sentiment: record.sentiment.as_str(),
            timestamp: &record.timestamp,
        }
    }
}

/// Line-oriented terminal output, optionally as JSON
pub struct TerminalPresenter<W: Write> {
    out: W,
    json: bool,
}

impl TerminalPresenter<std::io::Stdout> {
    pub fn stdout(json: bool) -> Self {
        Self::new(std::io::stdout(), json)
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_rejected(&mut self, reason: RejectReason) -> Result<()> {
        if self.json {
            let value = serde_json::json!({ "rejected": reason, "message": reason.to_string() });
            writeln!(self.out, "{}", value)?;
        } else {
            writeln!(self.out, "⚠️ {}", reason.user_message())?;
        }
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<()> {
        if self.json {
            writeln!(self.out, "{}", serde_json::json!({ "error": message }))?;
        } else {
            writeln!(self.out, "❌ {}", message)?;
        }
        Ok(())
    }

    fn show_result(&mut self, payload: &ClassificationPayload) -> Result<()> {
        if self.json {
            writeln!(self.out, "{}", serde_json::to_string(payload)?)?;
            return Ok(());
        }

        let sentiment = payload.sentiment;
        writeln!(
            self.out,
            "{} {} ({})",
            sentiment.icon(),
            sentiment.vietnamese_label(),
            sentiment
        )?;
        writeln!(self.out, "Độ tin cậy: {}%", payload.confidence_percent())?;
        writeln!(self.out, "Câu (chuẩn hóa): {}", payload.normalized_text)?;
        writeln!(self.out, "{}", payload.result_dict())?;
        Ok(())
    }

    fn show_history(&mut self, records: &[HistoryRecord]) -> Result<()> {
        if self.json {
            let rows: Vec<HistoryRow<'_>> = records.iter().map(HistoryRow::from).collect();
            writeln!(self.out, "{}", serde_json::to_string(&rows)?)?;
            return Ok(());
        }

        writeln!(self.out)?;
        writeln!(self.out, "Lịch sử phân loại")?;
        if records.is_empty() {
            writeln!(self.out, "Chưa có lịch sử. Hãy nhập câu để bắt đầu.")?;
            return Ok(());
        }

        for record in records {
            let row = HistoryRow::from(record);
            writeln!(
                self.out,
                "{}  {:<10} {:<8}  {}",
                row.timestamp, row.label, row.sentiment, row.text
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camxuc_core::Sentiment;

    fn render<F>(json: bool, f: F) -> String
    where
        F: FnOnce(&mut TerminalPresenter<Vec<u8>>),
    {
        let mut presenter = TerminalPresenter::new(Vec::new(), json);
        f(&mut presenter);
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    fn payload() -> ClassificationPayload {
        ClassificationPayload {
            text: "Phim này buồn cười quá".to_string(),
            sentiment: Sentiment::Positive,
            confidence_score: 0.9123,
            normalized_text: "phim này hài hước quá".to_string(),
        }
    }

    #[test]
    fn test_result_text_output() {
        let output = render(false, |p| p.show_result(&payload()).unwrap());
        assert!(output.contains("😊 Tích cực (POSITIVE)"));
        assert!(output.contains("Độ tin cậy: 91.23%"));
        assert!(output.contains("Câu (chuẩn hóa): phim này hài hước quá"));
        assert!(output.contains("\"sentiment\":\"POSITIVE\""));
    }

    #[test]
    fn test_result_json_output() {
        let output = render(true, |p| p.show_result(&payload()).unwrap());
        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["sentiment"], "POSITIVE");
        assert_eq!(value["normalized_text"], "phim này hài hước quá");
    }

    #[test]
    fn test_rejection_uses_vietnamese_message() {
        let output = render(false, |p| p.show_rejected(RejectReason::Empty).unwrap());
        assert!(output.contains("Vui lòng nhập câu cần phân tích!"));
    }

    #[test]
    fn test_empty_history() {
        let output = render(false, |p| p.show_history(&[]).unwrap());
        assert!(output.contains("Chưa có lịch sử"));
    }

    #[test]
    fn test_history_json_rows() {
        let records = vec![HistoryRecord {
            id: 1,
            text: "tôi buồn".to_string(),
            sentiment: Sentiment::Negative,
            timestamp: "2024-05-01 10:00:00".to_string(),
        }];

        let output = render(true, |p| p.show_history(&records).unwrap());
        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value[0]["Câu nhập"], "tôi buồn");
        assert_eq!(value[0]["Kết quả"], "Tiêu cực");
        assert_eq!(value[0]["Sentiment"], "NEGATIVE");
        assert_eq!(value[0]["Thời gian"], "2024-05-01 10:00:00");
    }
}
