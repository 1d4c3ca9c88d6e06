use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::data_types::*;
use crate::ontology::NoCommonAncestorError;
use crate::snapshot::Snapshot;
use crate::types::*;
use crate::utils::join;

// how each user-requested anatomical entity ID fared: found and in a
// similarity group, found but ungrouped, or not in the snapshot at all
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AnatEntityPartition {
    pub grouped: BTreeMap<AnatEntityId, BTreeSet<SimilarityGroupId>>,
    pub no_similarity_group: BTreeSet<AnatEntityId>,
    pub not_found: BTreeSet<AnatEntityId>,
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpeciesExpressionCounts {
    pub present: u32,
    pub absent: u32,
    pub low_ambiguity: u32,
    pub high_ambiguity: u32,
}

impl SpeciesExpressionCounts {
    fn add(&mut self, summary: ExpressionSummary) {
        match summary {
            ExpressionSummary::Present => self.present += 1,
            ExpressionSummary::Absent => self.absent += 1,
            ExpressionSummary::LowAmbiguity => self.low_ambiguity += 1,
            ExpressionSummary::HighAmbiguity => self.high_ambiguity += 1,
        }
    }

    fn is_empty(&self) -> bool {
        *self == SpeciesExpressionCounts::default()
    }
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpeciesDiffCounts {
    pub over_expressed: u32,
    pub under_expressed: u32,
    pub not_diff_expressed: u32,
    pub weak_ambiguity: u32,
    pub strong_ambiguity: u32,
}

impl SpeciesDiffCounts {
    fn add(&mut self, summary: DiffExpressionSummary) {
        match summary {
            DiffExpressionSummary::OverExpressed => self.over_expressed += 1,
            DiffExpressionSummary::UnderExpressed => self.under_expressed += 1,
            DiffExpressionSummary::NotDiffExpressed => self.not_diff_expressed += 1,
            DiffExpressionSummary::WeakAmbiguity => self.weak_ambiguity += 1,
            DiffExpressionSummary::StrongAmbiguity => self.strong_ambiguity += 1,
            DiffExpressionSummary::NoData => (),
        }
    }

    fn is_empty(&self) -> bool {
        *self == SpeciesDiffCounts::default()
    }
}

// per-species call summary counts for one similarity group and one
// OMA orthology group, restricted to the requested species with data
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct GroupComparison {
    pub similarity_group: SimilarityGroupId,
    pub oma_group: OmaGroupId,
    pub expression_counts: BTreeMap<SpeciesTaxonId, SpeciesExpressionCounts>,
    pub diff_counts: BTreeMap<SpeciesTaxonId, SpeciesDiffCounts>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct MultiGeneExprAnalysis {
    // the least common ancestor taxon of the requested species
    pub taxon: TaxonId,
    pub selected_similarities: BTreeSet<SimilarityGroupId>,
    pub partition: AnatEntityPartition,
    pub comparisons: Vec<GroupComparison>,
}

pub struct MultiSpeciesAnalyser<'a> {
    snapshot: &'a Snapshot,
    calls_by_gene: HashMap<&'a GeneUniquename, Vec<&'a ExpressionCall>>,
    diff_calls_by_gene: HashMap<&'a GeneUniquename, Vec<&'a DiffExpressionCall>>,
}

impl<'a> MultiSpeciesAnalyser<'a> {
    pub fn new(snapshot: &'a Snapshot,
               expression_calls: &'a ExpressionCallMap,
               diff_calls: &'a DiffExpressionCallMap)
        -> MultiSpeciesAnalyser<'a>
    {
        let mut calls_by_gene: HashMap<&GeneUniquename, Vec<&ExpressionCall>> =
            HashMap::new();
        for ((gene_uniquename, _), call) in expression_calls {
            calls_by_gene.entry(gene_uniquename).or_default().push(call);
        }

        let mut diff_calls_by_gene: HashMap<&GeneUniquename, Vec<&DiffExpressionCall>> =
            HashMap::new();
        for ((gene_uniquename, _, _), call) in diff_calls {
            diff_calls_by_gene.entry(gene_uniquename).or_default().push(call);
        }

        MultiSpeciesAnalyser {
            snapshot,
            calls_by_gene,
            diff_calls_by_gene,
        }
    }

    // requested_anat_entities = None means a full scan over every
    // selected similarity group
    pub fn analyse(&self, species_taxon_ids: &[SpeciesTaxonId],
                   requested_anat_entities: Option<&[AnatEntityId]>)
        -> Result<MultiGeneExprAnalysis, NoCommonAncestorError>
    {
        let taxon = self.resolve_taxon(species_taxon_ids)?;
        debug!("taxon resolved: {}", taxon);

        let selected_similarities = self.select_similarities(&taxon);
        debug!("similarity groups selected: {}", selected_similarities.len());

        let mut annotation_taxa: Vec<TaxonId> = vec![taxon.clone()];
        for similarity in &selected_similarities {
            if !annotation_taxa.contains(&similarity.taxon) {
                annotation_taxa.push(similarity.taxon.clone());
            }
        }
        self.warn_on_unrelated_taxa(&annotation_taxa);

        let partition =
            self.partition_requested(&selected_similarities, requested_anat_entities);

        let comparisons =
            self.aggregate(species_taxon_ids, &taxon, &selected_similarities,
                           &partition, requested_anat_entities.is_some());
        debug!("aggregated {} group comparisons", comparisons.len());

        let selected_similarities =
            selected_similarities.iter()
                .map(|similarity| similarity.id.clone())
                .collect();

        Ok(MultiGeneExprAnalysis {
            taxon,
            selected_similarities,
            partition,
            comparisons,
        })
    }

    fn resolve_taxon(&self, species_taxon_ids: &[SpeciesTaxonId])
        -> Result<TaxonId, NoCommonAncestorError>
    {
        let mut taxa = vec![];

        for species_taxon_id in species_taxon_ids {
            if let Some(species) = self.snapshot.species_by_taxonid(species_taxon_id) {
                if !taxa.contains(&species.parent_taxon) {
                    taxa.push(species.parent_taxon.clone());
                }
            } else {
                warn!("ignoring unknown species in comparison set: {}", species_taxon_id);
            }
        }

        self.snapshot.taxonomy.least_common_ancestor(&taxa)
    }

    // upstream annotation sometimes produces taxa that aren't all
    // ancestors/descendants of each other, tolerated with a warning; in
    // a chain of n distinct taxa all but the most specific one are an
    // ancestor of another element
    fn warn_on_unrelated_taxa(&self, taxa: &[TaxonId]) {
        if taxa.len() < 2 {
            return;
        }

        let ancestors_among =
            self.snapshot.taxonomy.ancestors_among_elements(taxa, None);

        if ancestors_among.len() + 1 < taxa.len() {
            warn!("taxa in comparison set are not all ancestors/descendants of each other: {}",
                  join(taxa, ", "));
        }
    }

    // every group annotated at the LCA taxon or an ancestor of it, and
    // never at a more specific taxon; annotations judged wrong upstream
    // (CIO rejected) don't qualify
    fn select_similarities(&self, taxon: &TaxonId) -> Vec<&'a AnatEntitySimilarity> {
        self.snapshot.similarities.values()
            .filter(|similarity| {
                if similarity.confidence == CioConfidence::Rejected {
                    debug!("skipping rejected similarity annotation: {}", similarity.id);
                    return false;
                }
                similarity.taxon == *taxon ||
                    self.snapshot.taxonomy.is_ancestor_of(&similarity.taxon, taxon)
            })
            .collect()
    }

    fn partition_requested(&self, selected: &[&AnatEntitySimilarity],
                           requested_anat_entities: Option<&[AnatEntityId]>)
        -> AnatEntityPartition
    {
        let mut partition = AnatEntityPartition::default();

        let Some(requested) = requested_anat_entities
        else {
            return partition;
        };

        for anat_entity_id in requested {
            if self.snapshot.anat_entity_by_id(anat_entity_id).is_none() {
                partition.not_found.insert(anat_entity_id.clone());
                continue;
            }

            let groups: BTreeSet<SimilarityGroupId> =
                selected.iter()
                    .filter(|similarity| similarity.anat_entities.contains(anat_entity_id))
                    .map(|similarity| similarity.id.clone())
                    .collect();

            if groups.is_empty() {
                partition.no_similarity_group.insert(anat_entity_id.clone());
            } else {
                partition.grouped.insert(anat_entity_id.clone(), groups);
            }
        }

        partition
    }

    fn aggregate(&self, species_taxon_ids: &[SpeciesTaxonId], taxon: &TaxonId,
                 selected: &[&AnatEntitySimilarity],
                 partition: &AnatEntityPartition, restrict_to_requested: bool)
        -> Vec<GroupComparison>
    {
        let requested_groups: BTreeSet<&SimilarityGroupId> =
            partition.grouped.values().flatten().collect();

        let oma_groups: Vec<&OmaGroup> =
            self.snapshot.oma_groups.values()
                .filter(|group| {
                    group.taxon == *taxon ||
                        self.snapshot.taxonomy.is_ancestor_of(&group.taxon, taxon)
                })
                .collect();

        let mut comparisons = vec![];

        for similarity in selected {
            if restrict_to_requested && !requested_groups.contains(&similarity.id) {
                continue;
            }

            for oma_group in &oma_groups {
                if let Some(comparison) =
                    self.compare_group(species_taxon_ids, similarity, oma_group)
                {
                    comparisons.push(comparison);
                }
            }
        }

        comparisons
    }

    fn compare_group(&self, species_taxon_ids: &[SpeciesTaxonId],
                     similarity: &AnatEntitySimilarity, oma_group: &OmaGroup)
        -> Option<GroupComparison>
    {
        let mut expression_counts: BTreeMap<SpeciesTaxonId, SpeciesExpressionCounts> =
            BTreeMap::new();
        let mut diff_counts: BTreeMap<SpeciesTaxonId, SpeciesDiffCounts> =
            BTreeMap::new();

        for gene_uniquename in &oma_group.genes {
            let Some(gene) = self.snapshot.gene_by_uniquename(gene_uniquename)
            else {
                continue;
            };
            if !species_taxon_ids.contains(&gene.species) {
                continue;
            }

            if let Some(calls) = self.calls_by_gene.get(gene_uniquename) {
                for call in calls {
                    if similarity.anat_entities.contains(&call.condition.anat_entity) {
                        expression_counts.entry(gene.species.clone())
                            .or_default()
                            .add(call.summary);
                    }
                }
            }

            if let Some(calls) = self.diff_calls_by_gene.get(gene_uniquename) {
                for call in calls {
                    if similarity.anat_entities.contains(&call.condition.anat_entity) {
                        diff_counts.entry(gene.species.clone())
                            .or_default()
                            .add(call.summary);
                    }
                }
            }
        }

        expression_counts.retain(|_, counts| !counts.is_empty());
        diff_counts.retain(|_, counts| !counts.is_empty());

        if expression_counts.is_empty() && diff_counts.is_empty() {
            return None;
        }

        Some(GroupComparison {
            similarity_group: similarity.id.clone(),
            oma_group: oma_group.id.clone(),
            expression_counts,
            diff_counts,
        })
    }
}
