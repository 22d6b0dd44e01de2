//! Function-level coverage of the operations under verification
//!
//! Subject operations declare a [`Probe`]. Scenarios record hits through
//! [`crate::scenario::Context`], and after a run the hits are folded into a
//! [`CoverageReport`] that renders as a text table or as lcov.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::GlobSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CoverageConfig;
use crate::scenario::{build_globset, normalize_path};

/// A named, located operation whose invocations are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Probe {
    /// Source file declaring the operation
    pub file: &'static str,
    /// Line of the declaration
    pub line: u32,
    /// Function name
    pub name: &'static str,
}

impl Probe {
    pub const fn new(name: &'static str, file: &'static str, line: u32) -> Self {
        Self { file, line, name }
    }
}

/// Hit counts per probe
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hits(BTreeMap<Probe, u64>);

impl Hits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, probe: &Probe) {
        *self.0.entry(*probe).or_insert(0) += 1;
    }

    pub fn count(&self, probe: &Probe) -> u64 {
        self.0.get(probe).copied().unwrap_or(0)
    }

    pub fn merge(&mut self, other: &Hits) {
        for (probe, count) in &other.0 {
            *self.0.entry(*probe).or_insert(0) += count;
        }
    }
}

/// Output format for coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reporter {
    /// Human-readable table on stdout
    Text,
    /// `lcov.info` in the reports directory
    Lcov,
}

/// Which probe files count toward coverage
pub struct CoverageScope {
    include: GlobSet,
    exclude: GlobSet,
}

impl CoverageScope {
    pub fn from_config(config: &CoverageConfig) -> crate::error::Result<Self> {
        Ok(Self {
            include: build_globset(&config.include)?,
            exclude: build_globset(&config.exclude)?,
        })
    }

    pub fn contains(&self, file: &str) -> bool {
        let file = normalize_path(file);
        self.include.is_match(&file) && !self.exclude.is_match(&file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCoverage {
    pub name: String,
    pub line: u32,
    pub hits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCoverage {
    pub file: String,
    pub functions: Vec<FunctionCoverage>,
}

impl FileCoverage {
    pub fn functions_found(&self) -> usize {
        self.functions.len()
    }

    pub fn functions_hit(&self) -> usize {
        self.functions.iter().filter(|f| f.hits > 0).count()
    }
}

/// Coverage of every in-scope probe, grouped by file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    pub files: Vec<FileCoverage>,
}

impl CoverageReport {
    /// Fold hits over the known probes. Probes outside `scope` are dropped.
    pub fn collect(probes: &[Probe], hits: &Hits, scope: &CoverageScope) -> Self {
        let mut by_file: BTreeMap<String, Vec<FunctionCoverage>> = BTreeMap::new();

        for probe in probes {
            if !scope.contains(probe.file) {
                debug!(file = probe.file, function = probe.name, "probe out of coverage scope");
                continue;
            }
            by_file.entry(normalize_path(probe.file)).or_default().push(FunctionCoverage {
                name: probe.name.to_string(),
                line: probe.line,
                hits: hits.count(probe),
            });
        }

        let files = by_file
            .into_iter()
            .map(|(file, mut functions)| {
                functions.sort_by_key(|f| f.line);
                FileCoverage { file, functions }
            })
            .collect();

        Self { files }
    }

    pub fn functions_found(&self) -> usize {
        self.files.iter().map(FileCoverage::functions_found).sum()
    }

    pub fn functions_hit(&self) -> usize {
        self.files.iter().map(FileCoverage::functions_hit).sum()
    }

    /// Percentage of functions hit, 100 when nothing is in scope
    pub fn percent(&self) -> f64 {
        let found = self.functions_found();
        if found == 0 {
            return 100.0;
        }
        self.functions_hit() as f64 * 100.0 / found as f64
    }

    pub fn render_text(&self) -> String {
        let width = self
            .files
            .iter()
            .flat_map(|f| f.functions.iter().map(move |func| f.file.len() + func.name.len() + 2))
            .max()
            .unwrap_or(0)
            .max("Function".len());

        let mut out = String::new();
        let _ = writeln!(out, "{:<width$}  {:>6}", "Function", "Hits", width = width);
        let _ = writeln!(out, "{}", "-".repeat(width + 8));
        for file in &self.files {
            for func in &file.functions {
                let label = format!("{}::{}", file.file, func.name);
                let _ = writeln!(out, "{:<width$}  {:>6}", label, func.hits, width = width);
            }
        }
        let _ = writeln!(out, "{}", "-".repeat(width + 8));
        let _ = writeln!(
            out,
            "Functions: {}/{} ({:.2}%)",
            self.functions_hit(),
            self.functions_found(),
            self.percent()
        );
        out
    }

    pub fn render_lcov(&self) -> String {
        let mut out = String::new();
        for file in &self.files {
            out.push_str("TN:\n");
            let _ = writeln!(out, "SF:{}", file.file);
            for func in &file.functions {
                let _ = writeln!(out, "FN:{},{}", func.line, func.name);
            }
            for func in &file.functions {
                let _ = writeln!(out, "FNDA:{},{}", func.hits, func.name);
            }
            let _ = writeln!(out, "FNF:{}", file.functions_found());
            let _ = writeln!(out, "FNH:{}", file.functions_hit());
            out.push_str("end_of_record\n");
        }
        out
    }
}

/// What the reporters produced
#[derive(Debug, Default)]
pub struct CoverageOutput {
    /// Text table to print, when the text reporter is enabled
    pub text: Option<String>,
    /// Files written to the reports directory
    pub written: Vec<PathBuf>,
}

/// Run every configured reporter over `report`
pub fn emit(
    report: &CoverageReport,
    reporters: &[Reporter],
    reports_dir: &Path,
) -> Result<CoverageOutput> {
    let mut output = CoverageOutput::default();

    for reporter in reporters {
        match reporter {
            Reporter::Text => output.text = Some(report.render_text()),
            Reporter::Lcov => {
                fs::create_dir_all(reports_dir).with_context(|| {
                    format!(
                        "Failed to create reports directory: {}",
                        reports_dir.display()
                    )
                })?;
                let path = reports_dir.join("lcov.info");
                fs::write(&path, report.render_lcov())
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                output.written.push(path);
            }
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const GREET: Probe = Probe::new("greet", "app/src/subject/greet.rs", 3);
    const WAVE: Probe = Probe::new("wave", "app/src/subject/greet.rs", 9);
    const SUM: Probe = Probe::new("sum", "app/src/subject/math.rs", 1);
    const HELPER: Probe = Probe::new("helper", "app/src/suites/helper.rs", 1);

    fn scope() -> CoverageScope {
        CoverageScope::from_config(&CoverageConfig {
            include: vec!["**/src/**/*.rs".to_string()],
            exclude: vec!["**/suites/**".to_string()],
            ..CoverageConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_hits_record_and_merge() {
        let mut a = Hits::new();
        a.record(&GREET);
        a.record(&GREET);
        let mut b = Hits::new();
        b.record(&GREET);
        b.record(&SUM);

        a.merge(&b);
        assert_eq!(a.count(&GREET), 3);
        assert_eq!(a.count(&SUM), 1);
        assert_eq!(a.count(&WAVE), 0);
    }

    #[test]
    fn test_collect_groups_by_file_and_respects_scope() {
        let mut hits = Hits::new();
        hits.record(&GREET);
        hits.record(&HELPER);

        let report = CoverageReport::collect(&[WAVE, GREET, SUM, HELPER], &hits, &scope());
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.files[0].file, "app/src/subject/greet.rs");
        assert_eq!(report.files[0].functions[0].name, "greet");
        assert_eq!(report.files[0].functions[1].name, "wave");
        assert_eq!(report.functions_found(), 3);
        assert_eq!(report.functions_hit(), 1);
    }

    #[test]
    fn test_collect_normalizes_backslash_paths() {
        let windows_add = Probe::new("add", "smoke-harness\\src\\subject\\arith.rs", 9);
        let mut hits = Hits::new();
        hits.record(&windows_add);

        let scope = CoverageScope::from_config(&CoverageConfig::default()).unwrap();
        let report = CoverageReport::collect(&[windows_add], &hits, &scope);

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].file, "smoke-harness/src/subject/arith.rs");
        assert_eq!(report.functions_hit(), 1);
        assert!(report
            .render_lcov()
            .contains("SF:smoke-harness/src/subject/arith.rs\n"));
    }

    #[test]
    fn test_percent_with_nothing_in_scope() {
        let report = CoverageReport::default();
        assert_eq!(report.percent(), 100.0);
    }

    #[test]
    fn test_render_lcov() {
        let mut hits = Hits::new();
        hits.record(&SUM);
        hits.record(&SUM);

        let report = CoverageReport::collect(&[SUM], &hits, &scope());
        assert_eq!(
            report.render_lcov(),
            "TN:\nSF:app/src/subject/math.rs\nFN:1,sum\nFNDA:2,sum\nFNF:1\nFNH:1\nend_of_record\n"
        );
    }

    #[test]
    fn test_render_text_summary_line() {
        let mut hits = Hits::new();
        hits.record(&GREET);
        let report = CoverageReport::collect(&[GREET, WAVE], &hits, &scope());

        let text = report.render_text();
        assert!(text.contains("app/src/subject/greet.rs::greet"));
        assert!(text.contains("Functions: 1/2 (50.00%)"));
    }

    #[test]
    fn test_emit_writes_lcov_only_when_requested() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("coverage");
        let report = CoverageReport::collect(&[SUM], &Hits::new(), &scope());

        let output = emit(&report, &[Reporter::Text], &dir).unwrap();
        assert!(output.text.is_some());
        assert!(output.written.is_empty());
        assert!(!dir.exists());

        let output = emit(&report, &[Reporter::Lcov], &dir).unwrap();
        assert!(output.text.is_none());
        assert_eq!(output.written, vec![dir.join("lcov.info")]);
        assert!(fs::read_to_string(dir.join("lcov.info"))
            .unwrap()
            .contains("FNH:0"));
    }
}
