//! Scoring report produced by the engine and consumed by printers/exporters.
//!
//! Field names of `Report`, `Criterion` and `Issue` are the wire shape read
//! by every renderer; keep them stable.

use super::Issue;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
/// Letter bucket derived from the overall score.
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    /// Map an overall score onto a grade. Lower bounds are inclusive and
    /// evaluated from the top.
    pub fn from_score(score: f64) -> Grade {
        if score >= 90.0 {
            Grade::A
        } else if score >= 80.0 {
            Grade::B
        } else if score >= 70.0 {
            Grade::C
        } else if score >= 60.0 {
            Grade::D
        } else if score >= 50.0 {
            Grade::E
        } else {
            Grade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Per-rule line of the report.
pub struct Criterion {
    pub name: String,
    pub score: u32,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Result of one engine run.
pub struct Report {
    /// Weighted total in `[0, 100]`, two decimals.
    pub score: f64,
    pub grade: Grade,
    pub criteria: Vec<Criterion>,
    pub issues: Vec<Issue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries_are_inclusive() {
        assert_eq!(Grade::from_score(100.0), Grade::A);
        assert_eq!(Grade::from_score(90.0), Grade::A);
        assert_eq!(Grade::from_score(89.99), Grade::B);
        assert_eq!(Grade::from_score(80.0), Grade::B);
        assert_eq!(Grade::from_score(79.99), Grade::C);
        assert_eq!(Grade::from_score(70.0), Grade::C);
        assert_eq!(Grade::from_score(60.0), Grade::D);
        assert_eq!(Grade::from_score(50.0), Grade::E);
        assert_eq!(Grade::from_score(49.99), Grade::F);
        assert_eq!(Grade::from_score(0.0), Grade::F);
    }

    #[test]
    fn test_report_serializes_wire_fields() {
        let report = Report {
            score: 87.5,
            grade: Grade::B,
            criteria: vec![Criterion {
                name: "Security".into(),
                score: 50,
                weight: 10,
            }],
            issues: vec![],
        };
        let out = serde_json::to_value(&report).unwrap();
        assert_eq!(out["score"], 87.5);
        assert_eq!(out["grade"], "B");
        assert_eq!(out["criteria"][0]["name"], "Security");
        assert_eq!(out["criteria"][0]["score"], 50);
        assert_eq!(out["criteria"][0]["weight"], 10);
        assert!(out["issues"].as_array().unwrap().is_empty());
    }
}
