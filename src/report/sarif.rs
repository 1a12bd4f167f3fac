use crate::types::report::EvaluationResult;
use serde_json::{json, Value};

pub fn to_sarif(result: &EvaluationResult) -> Result<String, serde_json::Error> {
    let mut results: Vec<Value> = Vec::new();
    for (name, analysis) in result.details.iter() {
        for (level, entries) in [
            ("error", &analysis.issues),
            ("warning", &analysis.warnings),
            ("note", &analysis.suggestions),
        ] {
            results.extend(entries.iter().map(|text| {
                json!({
                    "ruleId": name,
                    "level": level,
                    "message": { "text": text },
                })
            }));
        }
    }

    let sarif = json!({
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "git-evaluate",
                    "version": env!("CARGO_PKG_VERSION"),
                }
            },
            "results": results,
            "properties": {
                "overallScore": result.overall_score,
                "status": result.status,
            }
        }]
    });

    serde_json::to_string_pretty(&sarif)
}
