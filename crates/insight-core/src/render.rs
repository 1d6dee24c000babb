//! Markdown renderings of stored phase context and gate status.

use crate::context::{ConceptContext, RequirementsContext};
use crate::gate::GateEvaluation;
use crate::types::Phase;

const NONE_RECORDED: &str = "_None recorded._";

fn paragraph(out: &mut String, heading: &str, body: Option<&str>) {
    let text = body
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .unwrap_or(NONE_RECORDED);
    out.push_str(&format!("## {heading}\n\n{text}\n\n"));
}

fn bullets(out: &mut String, heading: &str, items: &[String]) {
    out.push_str(&format!("## {heading}\n\n"));
    if items.is_empty() {
        out.push_str(NONE_RECORDED);
        out.push_str("\n\n");
        return;
    }
    for item in items {
        out.push_str(&format!("- {item}\n"));
    }
    out.push('\n');
}

/// Product brief for the concept phase.
pub fn product_brief(ctx: &ConceptContext) -> String {
    let mut out = String::from("# Product Brief\n\n");
    paragraph(&mut out, "Problem Statement", ctx.problem_statement.as_deref());
    paragraph(&mut out, "Value Proposition", ctx.value_proposition.as_deref());
    bullets(&mut out, "Success Criteria", &ctx.success_criteria);
    bullets(&mut out, "Constraints", &ctx.constraints);

    out.push_str("## Key Decisions\n\n");
    if ctx.decisions.is_empty() {
        out.push_str(NONE_RECORDED);
        out.push('\n');
    }
    for d in &ctx.decisions {
        out.push_str(&format!("- **{}**: {}\n", d.date, d.decision));
        if !d.rationale.trim().is_empty() {
            out.push_str(&format!("  - Rationale: {}\n", d.rationale));
        }
    }
    out
}

/// Requirements document with numbered sections followed by the
/// MUST / SHOULD / MAY / MUST NOT lists.
pub fn requirements_document(ctx: &RequirementsContext) -> String {
    let mut out = String::from("# Requirements\n\n");
    for (i, section) in ctx.sections.iter().enumerate() {
        let n = i + 1;
        out.push_str(&format!("## {n}. {}\n\n", section.title));
        if !section.content.trim().is_empty() {
            out.push_str(&format!("{}\n\n", section.content.trim()));
        }
        for (j, sub) in section.subsections.iter().enumerate() {
            out.push_str(&format!("### {n}.{} {}\n\n", j + 1, sub.title));
            if !sub.content.trim().is_empty() {
                out.push_str(&format!("{}\n\n", sub.content.trim()));
            }
        }
    }
    bullets(&mut out, "MUST", &ctx.must_requirements);
    bullets(&mut out, "SHOULD", &ctx.should_requirements);
    bullets(&mut out, "MAY", &ctx.may_requirements);
    bullets(&mut out, "MUST NOT", &ctx.must_not_requirements);
    out
}

/// Current phase plus the verdict of each evaluated gate.
pub fn status_report(current: Phase, evaluations: &[GateEvaluation]) -> String {
    let mut out = format!("# Process Status\n\nCurrent phase: **{current}**\n\n## Gates\n\n");
    if evaluations.is_empty() {
        out.push_str(NONE_RECORDED);
        out.push('\n');
    }
    for eval in evaluations {
        let verdict = if eval.passed { "passed" } else { "blocked" };
        let latest = eval
            .scores
            .last()
            .map(|a| format!("latest score {}", a.score))
            .unwrap_or_else(|| "no assessments".to_string());
        out.push_str(&format!("- `{}`: {verdict} ({latest})\n", eval.gate));
        if !eval.missing_criteria.is_empty() {
            out.push_str(&format!(
                "  - missing: {}\n",
                eval.missing_criteria.join(", ")
            ));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
