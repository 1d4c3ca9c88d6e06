use flexstr::SharedStr as FlexStr;

pub type GeneUniquename = FlexStr;
pub type GeneName = FlexStr;

pub type SpeciesTaxonId = FlexStr;
pub type SpeciesName = FlexStr;

pub type TaxonId = FlexStr;
pub type TaxonName = FlexStr;

pub type AnatEntityId = FlexStr;
pub type AnatEntityName = FlexStr;

pub type DevStageId = FlexStr;
pub type DevStageName = FlexStr;

pub type OmaGroupId = FlexStr;
pub type SimilarityGroupId = FlexStr;

pub type AssemblyVersion = FlexStr;
