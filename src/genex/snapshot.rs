use std::fs::File;
use std::io::{BufReader, Read};

use anyhow::Context;

use flexstr::SharedStr as FlexStr;

use crate::data_types::*;
use crate::ontology::{Ontology, OntologyBuilder};
use crate::types::*;

// one release of the upstream batch pipeline, as serialized to JSON
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct RawSnapshot {
    #[serde(default)]
    pub taxa: Vec<Taxon>,
    #[serde(default)]
    pub species: Vec<Species>,
    #[serde(default)]
    pub genes: Vec<Gene>,
    #[serde(default)]
    pub anat_entities: Vec<AnatEntity>,
    #[serde(default)]
    pub dev_stages: Vec<DevStage>,
    #[serde(default)]
    pub observations: Vec<DataTypeObservation>,
    #[serde(default)]
    pub diff_analysis_results: Vec<DiffAnalysisResult>,
    #[serde(default)]
    pub anat_entity_similarities: Vec<AnatEntitySimilarity>,
    #[serde(default)]
    pub oma_groups: Vec<OmaGroup>,
}

impl RawSnapshot {
    pub fn from_file(file_name: &str) -> anyhow::Result<RawSnapshot> {
        let file = File::open(file_name)
            .with_context(|| format!("failed to open {}", file_name))?;
        let mut reader = BufReader::new(file);

        let mut decoded_json = String::new();
        reader.read_to_string(&mut decoded_json)
            .with_context(|| format!("failed to read {}", file_name))?;

        let raw: RawSnapshot = serde_json::from_str(&decoded_json)
            .with_context(|| format!("failed to parse {}", file_name))?;

        Ok(raw)
    }
}

fn build_ontology<I>(nodes: I) -> Ontology
    where I: IntoIterator<Item = (FlexStr, Vec<FlexStr>)>
{
    let mut builder = OntologyBuilder::new();
    for (id, parents) in nodes {
        builder.add_node(id.clone());
        for parent in parents {
            builder.add_edge(id.clone(), parent);
        }
    }
    builder.build()
}

// the immutable per-release input of the engine: reference data maps
// plus the three built ontologies
pub struct Snapshot {
    pub taxa: IdTaxonMap,
    pub species: TaxonIdSpeciesMap,
    pub genes: UniquenameGeneMap,
    pub anat_entities: IdAnatEntityMap,
    pub dev_stages: IdDevStageMap,

    pub taxonomy: Ontology,
    pub anatomy: Ontology,
    pub stages: Ontology,

    pub observations: Vec<DataTypeObservation>,
    pub diff_analysis_results: Vec<DiffAnalysisResult>,

    pub similarities: IdSimilarityMap,
    pub oma_groups: IdOmaGroupMap,
}

impl Snapshot {
    pub fn new(raw: RawSnapshot) -> Snapshot {
        let taxonomy =
            build_ontology(raw.taxa.iter()
                           .map(|taxon| (taxon.taxon_id.clone(), taxon.parents.clone())));
        let anatomy =
            build_ontology(raw.anat_entities.iter()
                           .map(|entity| (entity.id.clone(), entity.parents.clone())));
        let stages =
            build_ontology(raw.dev_stages.iter()
                           .map(|stage| (stage.id.clone(), stage.parents.clone())));

        let taxa: IdTaxonMap =
            raw.taxa.into_iter()
                .map(|taxon| (taxon.taxon_id.clone(), taxon)).collect();
        let species: TaxonIdSpeciesMap =
            raw.species.into_iter()
                .map(|species| (species.taxon_id.clone(), species)).collect();
        let genes: UniquenameGeneMap =
            raw.genes.into_iter()
                .map(|gene| (gene.uniquename.clone(), gene)).collect();
        let anat_entities: IdAnatEntityMap =
            raw.anat_entities.into_iter()
                .map(|entity| (entity.id.clone(), entity)).collect();
        let dev_stages: IdDevStageMap =
            raw.dev_stages.into_iter()
                .map(|stage| (stage.id.clone(), stage)).collect();

        for species_details in species.values() {
            if !taxonomy.contains(&species_details.parent_taxon) {
                panic!("species {} anchored to unknown taxon: {}",
                       species_details.taxon_id, species_details.parent_taxon);
            }
        }
        for gene in genes.values() {
            if !species.contains_key(&gene.species) {
                panic!("gene {} belongs to unknown species: {}",
                       gene.uniquename, gene.species);
            }
        }
        for observation in &raw.observations {
            if !genes.contains_key(&observation.gene_uniquename) {
                panic!("observation references unknown gene: {}",
                       observation.gene_uniquename);
            }
            if !anatomy.contains(&observation.condition.anat_entity) {
                panic!("observation references unknown anatomical entity: {}",
                       observation.condition.anat_entity);
            }
            if !stages.contains(&observation.condition.dev_stage) {
                panic!("observation references unknown developmental stage: {}",
                       observation.condition.dev_stage);
            }
        }

        let similarities: IdSimilarityMap =
            raw.anat_entity_similarities.into_iter()
                .map(|similarity| (similarity.id.clone(), similarity)).collect();
        let oma_groups: IdOmaGroupMap =
            raw.oma_groups.into_iter()
                .map(|group| (group.id.clone(), group)).collect();

        Snapshot {
            taxa,
            species,
            genes,
            anat_entities,
            dev_stages,
            taxonomy,
            anatomy,
            stages,
            observations: raw.observations,
            diff_analysis_results: raw.diff_analysis_results,
            similarities,
            oma_groups,
        }
    }

    pub fn from_file(file_name: &str) -> anyhow::Result<Snapshot> {
        Ok(Snapshot::new(RawSnapshot::from_file(file_name)?))
    }

    pub fn gene_by_uniquename(&self, uniquename: &GeneUniquename) -> Option<&Gene> {
        self.genes.get(uniquename)
    }

    pub fn species_by_taxonid(&self, taxon_id: &SpeciesTaxonId) -> Option<&Species> {
        self.species.get(taxon_id)
    }

    pub fn anat_entity_by_id(&self, id: &AnatEntityId) -> Option<&AnatEntity> {
        self.anat_entities.get(id)
    }

    pub fn dev_stage_by_id(&self, id: &DevStageId) -> Option<&DevStage> {
        self.dev_stages.get(id)
    }

    pub fn taxon_by_id(&self, id: &TaxonId) -> Option<&Taxon> {
        self.taxa.get(id)
    }
}
