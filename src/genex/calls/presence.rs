use std::collections::{BTreeMap, HashMap};

use crate::data_types::*;
use crate::snapshot::Snapshot;
use crate::types::*;

#[derive(Clone, Copy, Debug)]
struct PropagatedFlag {
    quality: DataQuality,
    direct: bool,
}

impl PropagatedFlag {
    fn merge_from(&mut self, quality: DataQuality, direct: bool) {
        self.quality = self.quality.max(quality);
        self.direct = self.direct || direct;
    }
}

type ConditionFlagMap = HashMap<Condition, PropagatedFlag>;

// merges the per-data-type raw detections of each gene into one
// ExpressionCall per condition: per-data-type ontology propagation
// first, then the cross-data-type merge
pub struct CallAggregator<'a> {
    snapshot: &'a Snapshot,

    // per (gene, data type), the post-propagation call sets
    present: HashMap<(GeneUniquename, DataType), ConditionFlagMap>,
    absent: HashMap<(GeneUniquename, DataType), ConditionFlagMap>,
}

impl<'a> CallAggregator<'a> {
    pub fn new(snapshot: &'a Snapshot) -> CallAggregator<'a> {
        CallAggregator {
            snapshot,
            present: HashMap::new(),
            absent: HashMap::new(),
        }
    }

    pub fn aggregate(mut self) -> ExpressionCallMap {
        self.propagate_present();
        self.propagate_absent();
        self.merge_data_types()
    }

    // a present call at a precise condition implies presence at every
    // broader condition, through both ontologies
    fn propagate_present(&mut self) {
        for observation in &self.snapshot.observations {
            match observation.flag {
                DetectionFlag::Present => (),
                DetectionFlag::Absent => continue,
                DetectionFlag::NoData =>
                    panic!("raw observation with a no data flag for gene: {}",
                           observation.gene_uniquename),
            }

            let condition = &observation.condition;
            let anat_ancestors =
                self.snapshot.anatomy.ancestors_of(&condition.anat_entity, true);
            let stage_ancestors =
                self.snapshot.stages.ancestors_of(&condition.dev_stage, true);

            let flag_map = self.present
                .entry((observation.gene_uniquename.clone(), observation.data_type))
                .or_default();

            for anat_entity in &anat_ancestors {
                for dev_stage in &stage_ancestors {
                    let direct = *anat_entity == condition.anat_entity &&
                        *dev_stage == condition.dev_stage;
                    flag_map.entry(Condition::new(anat_entity.clone(), dev_stage.clone()))
                        .and_modify(|flag| flag.merge_from(observation.quality, direct))
                        .or_insert(PropagatedFlag {
                            quality: observation.quality,
                            direct,
                        });
                }
            }
        }
    }

    // absent calls walk down the anatomy only, never the stage ontology,
    // and are discarded wherever the same data type shows presence at the
    // target condition or below it (the present set is upward-closed in
    // anatomy, so a membership test at the target covers its descendants)
    fn propagate_absent(&mut self) {
        for observation in &self.snapshot.observations {
            if observation.flag != DetectionFlag::Absent {
                continue;
            }

            if observation.data_type == DataType::Est {
                panic!("EST observation with an absent flag for gene: {}",
                       observation.gene_uniquename);
            }

            let condition = &observation.condition;
            let anat_descendants =
                self.snapshot.anatomy.descendants_of(&condition.anat_entity, true);

            let key = (observation.gene_uniquename.clone(), observation.data_type);
            let present_map = self.present.get(&key);
            let flag_map = self.absent.entry(key.clone()).or_default();

            for anat_entity in &anat_descendants {
                let target =
                    Condition::new(anat_entity.clone(), condition.dev_stage.clone());

                let contradicted =
                    present_map.is_some_and(|conditions| conditions.contains_key(&target));
                if contradicted {
                    continue;
                }

                let direct = *anat_entity == condition.anat_entity;
                flag_map.entry(target)
                    .and_modify(|flag| flag.merge_from(observation.quality, direct))
                    .or_insert(PropagatedFlag {
                        quality: observation.quality,
                        direct,
                    });
            }
        }
    }

    fn merge_data_types(self) -> ExpressionCallMap {
        // gene+condition -> data type -> per-type summary
        let mut by_condition: BTreeMap<CallKey, BTreeMap<DataType, DataTypeCallSummary>> =
            BTreeMap::new();

        let mut collect =
            |maps: HashMap<(GeneUniquename, DataType), ConditionFlagMap>,
             detection: DetectionFlag| {
                for ((gene_uniquename, data_type), conditions) in maps {
                    for (condition, flag) in conditions {
                        let observed =
                            if flag.direct {
                                ObservedState::Direct
                            } else {
                                ObservedState::Propagated
                            };
                        by_condition
                            .entry((gene_uniquename.clone(), condition))
                            .or_default()
                            .insert(data_type, DataTypeCallSummary {
                                flag: detection,
                                quality: flag.quality,
                                observed,
                            });
                    }
                }
            };

        collect(self.present, DetectionFlag::Present);
        collect(self.absent, DetectionFlag::Absent);

        by_condition.into_iter()
            .map(|((gene_uniquename, condition), per_data_type)| {
                let call = merge_condition_calls(gene_uniquename.clone(), condition.clone(),
                                                 per_data_type);
                ((gene_uniquename, condition), call)
            })
            .collect()
    }
}

fn merge_condition_calls(gene_uniquename: GeneUniquename, condition: Condition,
                         per_data_type: BTreeMap<DataType, DataTypeCallSummary>)
    -> ExpressionCall
{
    let mut any_present = false;
    let mut any_absent = false;
    let mut direct_present = false;
    let mut direct_absent = false;
    let mut any_direct = false;
    let mut any_high_quality = false;

    for summary in per_data_type.values() {
        match summary.flag {
            DetectionFlag::Present => {
                any_present = true;
                direct_present |= summary.observed.is_direct();
            },
            DetectionFlag::Absent => {
                any_absent = true;
                direct_absent |= summary.observed.is_direct();
            },
            DetectionFlag::NoData =>
                panic!("no data flag in a merged call for gene: {}", gene_uniquename),
        }
        any_direct |= summary.observed.is_direct();
        any_high_quality |= summary.quality == DataQuality::High;
    }

    let summary =
        match (any_present, any_absent) {
            (true, false) => ExpressionSummary::Present,
            (false, true) => ExpressionSummary::Absent,
            (true, true) => {
                // both directions seen directly at this exact condition is
                // a hard conflict, anything else only emerged through
                // propagation
                if direct_present && direct_absent {
                    ExpressionSummary::HighAmbiguity
                } else {
                    ExpressionSummary::LowAmbiguity
                }
            },
            (false, false) =>
                panic!("merged call without any detection for gene: {}", gene_uniquename),
        };

    let quality =
        if summary.is_ambiguous() {
            CallQuality::NotAvailable
        } else if per_data_type.len() >= 2 || any_high_quality {
            CallQuality::High
        } else {
            CallQuality::Low
        };

    let observed =
        if any_direct {
            ObservedState::Direct
        } else {
            ObservedState::Propagated
        };

    ExpressionCall {
        gene_uniquename,
        condition,
        summary,
        quality,
        per_data_type,
        observed,
    }
}
