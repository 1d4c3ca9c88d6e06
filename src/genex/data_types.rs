use std::collections::{BTreeMap, BTreeSet, HashMap};

use std::fmt;
use std::fmt::Display;

use crate::types::*;

pub type UniquenameGeneMap = BTreeMap<GeneUniquename, Gene>;
pub type TaxonIdSpeciesMap = BTreeMap<SpeciesTaxonId, Species>;
pub type IdTaxonMap = HashMap<TaxonId, Taxon>;
pub type IdAnatEntityMap = HashMap<AnatEntityId, AnatEntity>;
pub type IdDevStageMap = HashMap<DevStageId, DevStage>;
pub type IdSimilarityMap = BTreeMap<SimilarityGroupId, AnatEntitySimilarity>;
pub type IdOmaGroupMap = BTreeMap<OmaGroupId, OmaGroup>;

pub type CallKey = (GeneUniquename, Condition);
pub type ExpressionCallMap = BTreeMap<CallKey, ExpressionCall>;

pub type DiffCallKey = (GeneUniquename, ComparisonAxis, Condition);
pub type DiffExpressionCallMap = BTreeMap<DiffCallKey, DiffExpressionCall>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Species {
    pub taxon_id: SpeciesTaxonId,
    pub scientific_name: SpeciesName,
    #[serde(skip_serializing_if="Option::is_none", default)]
    pub common_name: Option<SpeciesName>,
    #[serde(skip_serializing_if="Option::is_none", default)]
    pub assembly_version: Option<AssemblyVersion>,
    // the taxonomy node this species hangs off
    pub parent_taxon: TaxonId,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Gene {
    pub uniquename: GeneUniquename,
    #[serde(skip_serializing_if="Option::is_none", default)]
    pub name: Option<GeneName>,
    pub species: SpeciesTaxonId,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Taxon {
    pub taxon_id: TaxonId,
    pub scientific_name: TaxonName,
    #[serde(skip_serializing_if="Vec::is_empty", default)]
    pub parents: Vec<TaxonId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AnatEntity {
    pub id: AnatEntityId,
    pub name: AnatEntityName,
    #[serde(skip_serializing_if="Vec::is_empty", default)]
    pub parents: Vec<AnatEntityId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DevStage {
    pub id: DevStageId,
    pub name: DevStageName,
    #[serde(skip_serializing_if="Vec::is_empty", default)]
    pub parents: Vec<DevStageId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Condition {
    pub anat_entity: AnatEntityId,
    pub dev_stage: DevStageId,
}

impl Condition {
    pub fn new(anat_entity: AnatEntityId, dev_stage: DevStageId) -> Condition {
        Condition {
            anat_entity,
            dev_stage,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Affymetrix,
    Est,
    InSitu,
    RnaSeq,
}

impl DataType {
    pub const ALL: [DataType; 4] =
        [DataType::Affymetrix, DataType::Est, DataType::InSitu, DataType::RnaSeq];

    pub fn display_name(&self) -> &'static str {
        match *self {
            DataType::Affymetrix => "Affymetrix",
            DataType::Est => "EST",
            DataType::InSitu => "in situ",
            DataType::RnaSeq => "RNA-Seq",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DetectionFlag {
    Present,
    Absent,
    NoData,
}

impl Display for DetectionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DetectionFlag::Present => write!(f, "present"),
            DetectionFlag::Absent => write!(f, "absent"),
            DetectionFlag::NoData => write!(f, "no data"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DataQuality {
    Low,
    High,
}

impl Display for DataQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DataQuality::High => write!(f, "high quality"),
            DataQuality::Low => write!(f, "poor quality"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ObservedState {
    Direct,
    Propagated,
}

impl ObservedState {
    pub fn is_direct(&self) -> bool {
        *self == ObservedState::Direct
    }
}

// one raw detection from the batch pipeline, always at the exact
// condition where the assay was made
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DataTypeObservation {
    pub gene_uniquename: GeneUniquename,
    pub condition: Condition,
    pub data_type: DataType,
    pub flag: DetectionFlag,
    pub quality: DataQuality,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionSummary {
    Present,
    Absent,
    LowAmbiguity,
    HighAmbiguity,
}

impl ExpressionSummary {
    pub fn is_ambiguous(&self) -> bool {
        matches!(*self,
                 ExpressionSummary::LowAmbiguity | ExpressionSummary::HighAmbiguity)
    }
}

impl Display for ExpressionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ExpressionSummary::Present => write!(f, "present"),
            ExpressionSummary::Absent => write!(f, "absent"),
            ExpressionSummary::LowAmbiguity => write!(f, "low ambiguity"),
            ExpressionSummary::HighAmbiguity => write!(f, "high ambiguity"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallQuality {
    #[serde(rename = "high")]
    High,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "NA")]
    NotAvailable,
}

impl Display for CallQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CallQuality::High => write!(f, "high quality"),
            CallQuality::Low => write!(f, "poor quality"),
            CallQuality::NotAvailable => write!(f, "NA"),
        }
    }
}

// the per-data-type part of an ExpressionCall, after propagation
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataTypeCallSummary {
    pub flag: DetectionFlag,
    pub quality: DataQuality,
    pub observed: ObservedState,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExpressionCall {
    pub gene_uniquename: GeneUniquename,
    pub condition: Condition,
    pub summary: ExpressionSummary,
    pub quality: CallQuality,
    pub per_data_type: BTreeMap<DataType, DataTypeCallSummary>,
    pub observed: ObservedState,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonAxis {
    AcrossAnatomy,
    AcrossStages,
}

// note: the variant order is the "numerically best call" order used
// by the default voting tie-break
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DiffCall {
    OverExpressed,
    UnderExpressed,
    NotDiffExpressed,
    NoData,
}

impl Display for DiffCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DiffCall::OverExpressed => write!(f, "over-expression"),
            DiffCall::UnderExpressed => write!(f, "under-expression"),
            DiffCall::NotDiffExpressed => write!(f, "no diff expression"),
            DiffCall::NoData => write!(f, "no data"),
        }
    }
}

// one statistical comparison from one analysis run, produced upstream
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DiffAnalysisResult {
    pub gene_uniquename: GeneUniquename,
    pub condition: Condition,
    pub axis: ComparisonAxis,
    pub data_type: DataType,
    pub call: DiffCall,
    pub p_value: f64,
    pub conditions_compared: u32,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffExpressionSummary {
    OverExpressed,
    UnderExpressed,
    NotDiffExpressed,
    WeakAmbiguity,
    StrongAmbiguity,
    NoData,
}

impl Display for DiffExpressionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DiffExpressionSummary::OverExpressed => write!(f, "over-expression"),
            DiffExpressionSummary::UnderExpressed => write!(f, "under-expression"),
            DiffExpressionSummary::NotDiffExpressed => write!(f, "no diff expression"),
            DiffExpressionSummary::WeakAmbiguity => write!(f, "weak ambiguity"),
            DiffExpressionSummary::StrongAmbiguity => write!(f, "strong ambiguity"),
            DiffExpressionSummary::NoData => write!(f, "no data"),
        }
    }
}

// the resolved vote for one data type, fixed once the cross-data-type
// summary has been computed
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DiffDataTypeCall {
    pub call: DiffCall,
    pub best_p_value: f64,
    pub support_count: u32,
    pub conflict_count: u32,
}

impl DiffDataTypeCall {
    pub fn quality(&self) -> DataQuality {
        if self.conflict_count == 0 {
            DataQuality::High
        } else {
            DataQuality::Low
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DiffExpressionCall {
    pub gene_uniquename: GeneUniquename,
    pub condition: Condition,
    pub axis: ComparisonAxis,
    pub summary: DiffExpressionSummary,
    pub quality: CallQuality,
    pub per_data_type: BTreeMap<DataType, DiffDataTypeCall>,
}

// CIO confidence of a homology annotation, ordered worst to best
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CioConfidence {
    Rejected,
    Low,
    Medium,
    High,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AnatEntitySimilarity {
    pub id: SimilarityGroupId,
    pub anat_entities: BTreeSet<AnatEntityId>,
    // the taxon the homology was annotated at
    pub taxon: TaxonId,
    pub confidence: CioConfidence,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct OmaGroup {
    pub id: OmaGroupId,
    pub taxon: TaxonId,
    pub genes: BTreeSet<GeneUniquename>,
}
