//! End-of-level receipt
//!
//! Printed on the ticket that slides out after the last delivery, or exported
//! as JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::judge::LevelReport;

/// One deduction on the receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub description: String,
    pub penalty: i32,
}

/// One delivered burger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptEntry {
    /// Order as shown on the ticket, e.g. "2 patty + tomato + ketchup"
    pub order: String,
    pub note: i32,
    pub lines: Vec<ReceiptLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// One-based level number
    pub level: u32,
    pub entries: Vec<ReceiptEntry>,
    pub average: i32,
    pub min_passing_average: i32,
    pub passed: bool,
}

impl Receipt {
    pub fn new(report: &LevelReport) -> Self {
        let entries = report
            .burgers
            .iter()
            .map(|burger| ReceiptEntry {
                order: burger.target.to_string(),
                note: burger.grade.note,
                lines: burger
                    .grade
                    .defects
                    .iter()
                    .map(|d| ReceiptLine {
                        description: d.description().to_string(),
                        penalty: d.penalty(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            level: report.level + 1,
            entries,
            average: report.average,
            min_passing_average: report.min_passing_average,
            passed: report.passed,
        }
    }

    /// Total points deducted over the level
    pub fn total_penalty(&self) -> i32 {
        self.entries
            .iter()
            .flat_map(|e| e.lines.iter())
            .map(|l| l.penalty)
            .sum()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&LevelReport> for Receipt {
    fn from(report: &LevelReport) -> Self {
        Self::new(report)
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Level {} ===", self.level)?;
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(f, "#{} {:<36} {:>3}/20", i + 1, entry.order, entry.note)?;
            for line in &entry.lines {
                writeln!(f, "    {:<36} -{}", line.description, line.penalty)?;
            }
        }
        writeln!(f, "Average: {} (needed {})", self.average, self.min_passing_average)?;
        write!(f, "{}", if self.passed { "PASSED" } else { "FAILED" })
    }
}
