use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::warn;

use crate::config::{Config, TieBreakPolicy};
use crate::data_types::*;
use crate::types::*;

// data types with "never expressed" evidence per gene and condition,
// derived from the presence/absence engine
pub type NeverExpressedMap = HashMap<CallKey, HashSet<DataType>>;

pub fn never_expressed_from_calls(calls: &ExpressionCallMap) -> NeverExpressedMap {
    let mut ret: NeverExpressedMap = HashMap::new();

    for ((gene_uniquename, condition), call) in calls {
        for (&data_type, summary) in &call.per_data_type {
            if summary.flag == DetectionFlag::Absent {
                ret.entry((gene_uniquename.clone(), condition.clone()))
                    .or_default()
                    .insert(data_type);
            }
        }
    }

    ret
}

// merge all analysis results of one (gene, axis, condition, data type)
// by p-value-weighted voting: each result votes for its call with
// weight conditions_compared / p, so larger analyses count more
pub fn resolve_data_type_results(results: &[&DiffAnalysisResult], config: &Config)
    -> DiffDataTypeCall
{
    let mut weights: BTreeMap<DiffCall, f64> = BTreeMap::new();

    for result in results {
        if result.call == DiffCall::NoData {
            continue;
        }
        let weight = f64::from(result.conditions_compared) /
            result.p_value.max(config.p_value_floor);
        *weights.entry(result.call).or_insert(0.0) += weight;
    }

    if weights.is_empty() {
        return DiffDataTypeCall {
            call: DiffCall::NoData,
            best_p_value: 1.0,
            support_count: 0,
            conflict_count: 0,
        };
    }

    let max_weight = weights.values().cloned().fold(f64::MIN, f64::max);
    let tied: Vec<DiffCall> =
        weights.iter()
            .filter(|&(_, &weight)| weight == max_weight)
            .map(|(&call, _)| call)
            .collect();

    // the BTreeMap keeps tied in the fixed call order, so tied[0] is
    // the numerically best call
    let winner =
        match config.tie_break {
            TieBreakPolicy::BestCall => tied[0],
            TieBreakPolicy::PreferNotDiffExpressed => {
                if tied.len() > 1 && tied.contains(&DiffCall::NotDiffExpressed) {
                    DiffCall::NotDiffExpressed
                } else {
                    tied[0]
                }
            },
        };

    let mut best_p_value = 1.0_f64;
    let mut support_count = 0;
    let mut conflict_count = 0;

    for result in results {
        if result.call == DiffCall::NoData {
            continue;
        }
        if result.call == winner {
            support_count += 1;
            best_p_value = best_p_value.min(result.p_value);
        } else {
            conflict_count += 1;
        }
    }

    DiffDataTypeCall {
        call: winner,
        best_p_value,
        support_count,
        conflict_count,
    }
}

// no ontology propagation here: differential expression is only
// meaningful at the conditions the analyses actually compared
pub fn resolve_diff_calls(results: &[DiffAnalysisResult],
                          never_expressed: &NeverExpressedMap,
                          config: &Config)
    -> DiffExpressionCallMap
{
    let mut grouped: BTreeMap<DiffCallKey, BTreeMap<DataType, Vec<&DiffAnalysisResult>>> =
        BTreeMap::new();

    for result in results {
        if result.conditions_compared < 3 {
            warn!("skipping diff analysis result for gene {} with only {} conditions compared",
                  result.gene_uniquename, result.conditions_compared);
            continue;
        }
        grouped
            .entry((result.gene_uniquename.clone(), result.axis,
                    result.condition.clone()))
            .or_default()
            .entry(result.data_type)
            .or_default()
            .push(result);
    }

    grouped.into_iter()
        .map(|((gene_uniquename, axis, condition), by_data_type)| {
            let per_data_type: BTreeMap<DataType, DiffDataTypeCall> =
                by_data_type.into_iter()
                    .map(|(data_type, data_type_results)| {
                        (data_type,
                         resolve_data_type_results(&data_type_results, config))
                    })
                    .collect();

            let never_expressed_types = never_expressed
                .get(&(gene_uniquename.clone(), condition.clone()));

            let call = merge_diff_data_types(gene_uniquename.clone(), condition.clone(),
                                             axis, per_data_type,
                                             never_expressed_types);

            ((gene_uniquename, axis, condition), call)
        })
        .collect()
}

fn merge_diff_data_types(gene_uniquename: GeneUniquename, condition: Condition,
                         axis: ComparisonAxis,
                         per_data_type: BTreeMap<DataType, DiffDataTypeCall>,
                         never_expressed_types: Option<&HashSet<DataType>>)
    -> DiffExpressionCall
{
    let mut has_over = false;
    let mut has_under = false;
    let mut has_not_diff = false;
    let mut any_conflict = false;

    for data_type_call in per_data_type.values() {
        match data_type_call.call {
            DiffCall::OverExpressed => has_over = true,
            DiffCall::UnderExpressed => has_under = true,
            DiffCall::NotDiffExpressed => has_not_diff = true,
            DiffCall::NoData => continue,
        }
        any_conflict |= data_type_call.conflict_count > 0;
    }

    // "never expressed" from a data type that didn't itself vote a
    // direction counts as conflicting evidence of no expression
    let never_expressed_elsewhere =
        never_expressed_types.is_some_and(|types| {
            types.iter().any(|data_type| {
                per_data_type.get(data_type)
                    .map_or(true, |data_type_call| {
                        matches!(data_type_call.call,
                                 DiffCall::NotDiffExpressed | DiffCall::NoData)
                    })
            })
        });

    let (summary, quality) =
        match (has_over, has_under, has_not_diff) {
            (true, true, _) =>
                (DiffExpressionSummary::StrongAmbiguity, CallQuality::NotAvailable),
            (true, false, true) =>
                (DiffExpressionSummary::WeakAmbiguity, CallQuality::NotAvailable),
            (false, true, true) =>
                (DiffExpressionSummary::WeakAmbiguity, CallQuality::NotAvailable),
            (true, false, false) => {
                if never_expressed_elsewhere {
                    (DiffExpressionSummary::WeakAmbiguity, CallQuality::NotAvailable)
                } else if any_conflict {
                    (DiffExpressionSummary::OverExpressed, CallQuality::Low)
                } else {
                    (DiffExpressionSummary::OverExpressed, CallQuality::High)
                }
            },
            (false, true, false) => {
                // documented exception: under-expression against "never
                // expressed" evidence demotes to a poor quality
                // under-expression call instead of an ambiguity state
                if never_expressed_elsewhere || any_conflict {
                    (DiffExpressionSummary::UnderExpressed, CallQuality::Low)
                } else {
                    (DiffExpressionSummary::UnderExpressed, CallQuality::High)
                }
            },
            (false, false, true) => {
                if any_conflict {
                    (DiffExpressionSummary::NotDiffExpressed, CallQuality::Low)
                } else {
                    (DiffExpressionSummary::NotDiffExpressed, CallQuality::High)
                }
            },
            (false, false, false) =>
                (DiffExpressionSummary::NoData, CallQuality::NotAvailable),
        };

    DiffExpressionCall {
        gene_uniquename,
        condition,
        axis,
        summary,
        quality,
        per_data_type,
    }
}
