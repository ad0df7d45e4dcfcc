use std::sync::Arc;
use std::thread;

use crossbeam_channel::unbounded;
use log::{error, info};

use crate::analysis::{run_pipeline, AnalysisError, PipelineOutput};
use crate::config::AppConfig;
use crate::preprocess::{self, add_csv_extension, read_recording, PreparedSignals, PreprocessError, ReadError};
use crate::types::{Recording, RecoveryReport};

/// 单个案例的完整分析结果
#[derive(Debug, Clone)]
pub struct CaseAnalysis {
    pub recording: Recording,
    pub prepared: PreparedSignals,
    pub output: PipelineOutput,
    pub report: RecoveryReport,
}

/// 案例处理错误
#[derive(Debug, thiserror::Error)]
pub enum CaseError {
    #[error("Failed to read recording: {0}")]
    Read(#[from] ReadError),
    #[error("Preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}

/// 读取 `<case>.csv` 并完成分析
pub fn analyze_case(case: &str, config: &AppConfig) -> Result<CaseAnalysis, CaseError> {
    let path = add_csv_extension(case);
    info!("Loading case {} from {}", case, path.display());
    let recording = read_recording(&path)?;
    analyze_recording(recording, config)
}

/// 对已载入的记录执行预处理、检测与评分
pub fn analyze_recording(recording: Recording, config: &AppConfig) -> Result<CaseAnalysis, CaseError> {
    let prepared = preprocess::prepare(&recording, &config.preprocess)?;
    let cleaned = prepared.cleaned(config.detection.axis);
    let output = run_pipeline(&cleaned, &prepared.unfiltered, &config.pipeline_config())?;
    let report = output.to_report(&recording.name, recording.len(), recording.duration_seconds());

    Ok(CaseAnalysis {
        recording,
        prepared,
        output,
        report,
    })
}

/// 每个案例一个工作线程，结果按输入顺序返回
pub fn analyze_cases(cases: &[String], config: Arc<AppConfig>) -> Vec<(String, Result<CaseAnalysis, CaseError>)> {
    let (sender, receiver) = unbounded();
    let mut handles = Vec::with_capacity(cases.len());

    for (index, case) in cases.iter().enumerate() {
        let sender = sender.clone();
        let config = Arc::clone(&config);
        let case = case.clone();
        handles.push(thread::spawn(move || {
            let result = analyze_case(&case, &config);
            // 结果连同输入序号一起发回
            let _ = sender.send((index, case, result));
        }));
    }
    drop(sender);

    let mut results: Vec<Option<(String, Result<CaseAnalysis, CaseError>)>> =
        (0..cases.len()).map(|_| None).collect();
    for (index, case, result) in receiver.iter() {
        results[index] = Some((case, result));
    }

    for handle in handles {
        if handle.join().is_err() {
            error!("Analysis worker panicked");
        }
    }

    results.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecoveryOutcome, Sample};
    use std::f64::consts::PI;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.detection.window_size = 200;
        config.detection.step_size = Some(50);
        config.detection.factor = 1.0;
        config.detection.percentile = 50.0;
        config
    }

    fn burst_recording() -> Recording {
        let samples = (0..4001)
            .map(|i| {
                let t = i as f64 * 0.005;
                let burst = if (1500..2100).contains(&i) {
                    2.0 * (2.0 * PI * 1.0 * t).sin()
                } else {
                    0.0
                };
                Sample::new(t, 0.1, 0.2, 9.8 + burst)
            })
            .collect();
        Recording::new("synthetic", None, samples)
    }

    #[test]
    fn test_analyze_recording_scores_burst() {
        let analysis = analyze_recording(burst_recording(), &test_config()).unwrap();
        assert_eq!(analysis.report.case, "synthetic");
        assert_eq!(analysis.report.samples, 4001);
        assert_eq!(analysis.report.outcome, RecoveryOutcome::Scored);
        assert!(analysis.report.detection.roi_count() >= 1);
        assert_eq!(analysis.prepared.unfiltered.len(), 4001);
    }

    #[test]
    fn test_short_recording_is_preprocess_error() {
        let samples = (0..8)
            .map(|i| Sample::new(i as f64 * 0.005, 0.0, 0.0, 9.8))
            .collect();
        let recording = Recording::new("short", None, samples);
        let result = analyze_recording(recording, &test_config());
        assert!(matches!(
            result,
            Err(CaseError::Preprocess(PreprocessError::SignalTooShort { len: 8, .. }))
        ));
    }

    #[test]
    fn test_missing_case_is_read_error() {
        let result = analyze_case("definitely-missing-case-file", &test_config());
        assert!(matches!(result, Err(CaseError::Read(ReadError::Io(_)))));
    }

    #[test]
    fn test_analyze_cases_preserves_input_order() {
        let cases = vec!["missing-b".to_string(), "missing-a".to_string(), "missing-c".to_string()];
        let results = analyze_cases(&cases, Arc::new(test_config()));
        let names: Vec<&str> = results.iter().map(|(case, _)| case.as_str()).collect();
        assert_eq!(names, vec!["missing-b", "missing-a", "missing-c"]);
        assert!(results.iter().all(|(_, result)| result.is_err()));
    }
}
