#![allow(dead_code)]

use std::collections::BTreeSet;

use flexstr::SharedStr as FlexStr;

use genex::data_types::*;
use genex::snapshot::{RawSnapshot, Snapshot};

pub const HUMAN: &str = "9606";
pub const CHIMP: &str = "9598";
pub const MOUSE: &str = "10090";

pub const TAXON_VERTEBRATA: &str = "NCBITaxon:7742";
pub const TAXON_EUTELEOSTOMI: &str = "NCBITaxon:117571";
pub const TAXON_PRIMATES: &str = "NCBITaxon:9443";
pub const TAXON_RODENTIA: &str = "NCBITaxon:9989";
pub const TAXON_HUMAN: &str = "NCBITaxon:9606";
pub const TAXON_CHIMP: &str = "NCBITaxon:9598";
pub const TAXON_MOUSE: &str = "NCBITaxon:10090";

pub const ANAT_ROOT: &str = "UBERON:0001062";
pub const BRAIN: &str = "UBERON:0000955";
pub const MIDBRAIN: &str = "UBERON:0001891";
pub const CEREBELLUM: &str = "UBERON:0002037";
pub const HEART: &str = "UBERON:0000948";

pub const STAGE_ROOT: &str = "UBERON:0000104";
pub const EMBRYO_STAGE: &str = "UBERON:0000068";
pub const ADULT_STAGE: &str = "UBERON:0000066";

pub const HUMAN_GENE: &str = "ENSG00000075891";
pub const CHIMP_GENE: &str = "ENSPTRG00000002773";
pub const MOUSE_GENE: &str = "ENSMUSG00000004231";

pub const SIM_BRAIN: &str = "SIM:brain";
pub const SIM_HEART: &str = "SIM:heart";
pub const SIM_MIDBRAIN_PRIMATES: &str = "SIM:midbrain-primates";
pub const SIM_REJECTED: &str = "SIM:rejected-brain";

pub const OMA_PAX2: &str = "OMA:77863";

fn taxon(taxon_id: &str, scientific_name: &str, parents: &[&str]) -> Taxon {
    Taxon {
        taxon_id: taxon_id.into(),
        scientific_name: scientific_name.into(),
        parents: parents.iter().map(|&parent| parent.into()).collect(),
    }
}

fn species(taxon_id: &str, scientific_name: &str, common_name: &str,
           parent_taxon: &str) -> Species {
    Species {
        taxon_id: taxon_id.into(),
        scientific_name: scientific_name.into(),
        common_name: Some(common_name.into()),
        assembly_version: None,
        parent_taxon: parent_taxon.into(),
    }
}

fn gene(uniquename: &str, name: &str, species: &str) -> Gene {
    Gene {
        uniquename: uniquename.into(),
        name: Some(name.into()),
        species: species.into(),
    }
}

fn anat_entity(id: &str, name: &str, parents: &[&str]) -> AnatEntity {
    AnatEntity {
        id: id.into(),
        name: name.into(),
        parents: parents.iter().map(|&parent| parent.into()).collect(),
    }
}

fn dev_stage(id: &str, name: &str, parents: &[&str]) -> DevStage {
    DevStage {
        id: id.into(),
        name: name.into(),
        parents: parents.iter().map(|&parent| parent.into()).collect(),
    }
}

fn similarity(id: &str, anat_entities: &[&str], taxon: &str,
              confidence: CioConfidence) -> AnatEntitySimilarity {
    AnatEntitySimilarity {
        id: id.into(),
        anat_entities: anat_entities.iter().map(|&entity| entity.into()).collect(),
        taxon: taxon.into(),
        confidence,
    }
}

pub fn observation(gene_uniquename: &str, anat_entity: &str, dev_stage: &str,
                   data_type: DataType, flag: DetectionFlag, quality: DataQuality)
    -> DataTypeObservation
{
    DataTypeObservation {
        gene_uniquename: gene_uniquename.into(),
        condition: Condition::new(anat_entity.into(), dev_stage.into()),
        data_type,
        flag,
        quality,
    }
}

pub fn diff_result(gene_uniquename: &str, anat_entity: &str, dev_stage: &str,
                   axis: ComparisonAxis, data_type: DataType, call: DiffCall,
                   p_value: f64, conditions_compared: u32)
    -> DiffAnalysisResult
{
    DiffAnalysisResult {
        gene_uniquename: gene_uniquename.into(),
        condition: Condition::new(anat_entity.into(), dev_stage.into()),
        axis,
        data_type,
        call,
        p_value,
        conditions_compared,
    }
}

pub fn condition(anat_entity: &str, dev_stage: &str) -> Condition {
    Condition::new(anat_entity.into(), dev_stage.into())
}

pub fn call_key(gene_uniquename: &str, anat_entity: &str, dev_stage: &str) -> CallKey {
    (gene_uniquename.into(), condition(anat_entity, dev_stage))
}

// reference data shared by all tests: a small vertebrate taxonomy where
// the human/mouse LCA is Euteleostomi, a brain-centred anatomy and a
// three-node stage ontology
pub fn get_test_raw_snapshot() -> RawSnapshot {
    RawSnapshot {
        taxa: vec![
            taxon(TAXON_VERTEBRATA, "Vertebrata", &[]),
            taxon(TAXON_EUTELEOSTOMI, "Euteleostomi", &[TAXON_VERTEBRATA]),
            taxon(TAXON_PRIMATES, "Primates", &[TAXON_EUTELEOSTOMI]),
            taxon(TAXON_RODENTIA, "Rodentia", &[TAXON_EUTELEOSTOMI]),
            taxon(TAXON_HUMAN, "Homo sapiens", &[TAXON_PRIMATES]),
            taxon(TAXON_CHIMP, "Pan troglodytes", &[TAXON_PRIMATES]),
            taxon(TAXON_MOUSE, "Mus musculus", &[TAXON_RODENTIA]),
        ],
        species: vec![
            species(HUMAN, "Homo sapiens", "human", TAXON_HUMAN),
            species(CHIMP, "Pan troglodytes", "chimpanzee", TAXON_CHIMP),
            species(MOUSE, "Mus musculus", "mouse", TAXON_MOUSE),
        ],
        genes: vec![
            gene(HUMAN_GENE, "PAX2", HUMAN),
            gene(CHIMP_GENE, "PAX2", CHIMP),
            gene(MOUSE_GENE, "Pax2", MOUSE),
        ],
        anat_entities: vec![
            anat_entity(ANAT_ROOT, "anatomical entity", &[]),
            anat_entity(BRAIN, "brain", &[ANAT_ROOT]),
            anat_entity(MIDBRAIN, "midbrain", &[BRAIN]),
            anat_entity(CEREBELLUM, "cerebellum", &[BRAIN]),
            anat_entity(HEART, "heart", &[ANAT_ROOT]),
        ],
        dev_stages: vec![
            dev_stage(STAGE_ROOT, "life cycle", &[]),
            dev_stage(EMBRYO_STAGE, "embryo stage", &[STAGE_ROOT]),
            dev_stage(ADULT_STAGE, "fully formed stage", &[STAGE_ROOT]),
        ],
        observations: vec![],
        diff_analysis_results: vec![],
        anat_entity_similarities: vec![
            similarity(SIM_BRAIN, &[BRAIN, MIDBRAIN], TAXON_EUTELEOSTOMI,
                       CioConfidence::High),
            similarity(SIM_HEART, &[HEART], TAXON_VERTEBRATA,
                       CioConfidence::Medium),
            similarity(SIM_MIDBRAIN_PRIMATES, &[MIDBRAIN], TAXON_PRIMATES,
                       CioConfidence::High),
            similarity(SIM_REJECTED, &[BRAIN], TAXON_EUTELEOSTOMI,
                       CioConfidence::Rejected),
        ],
        oma_groups: vec![
            OmaGroup {
                id: OMA_PAX2.into(),
                taxon: TAXON_EUTELEOSTOMI.into(),
                genes: [HUMAN_GENE, CHIMP_GENE, MOUSE_GENE].iter()
                    .map(|&gene_uniquename| FlexStr::from(gene_uniquename))
                    .collect::<BTreeSet<_>>(),
            },
        ],
    }
}

pub fn get_test_snapshot(observations: Vec<DataTypeObservation>,
                         diff_analysis_results: Vec<DiffAnalysisResult>)
    -> Snapshot
{
    let mut raw = get_test_raw_snapshot();
    raw.observations = observations;
    raw.diff_analysis_results = diff_analysis_results;
    Snapshot::new(raw)
}

pub fn species_set(ids: &[&str]) -> Vec<FlexStr> {
    ids.iter().map(|&id| FlexStr::from(id)).collect()
}
