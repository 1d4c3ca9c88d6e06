use once_cell::sync::Lazy;

use crate::data_types::DataType;

// download file column names, a durable contract with downstream
// consumers of the TSV exports
pub const EXPRESSION_CALL_COLUMNS: &[&str; 13] =
    &["Gene ID", "Gene name",
      "Anatomical entity ID", "Anatomical entity name",
      "Developmental stage ID", "Developmental stage name",
      "Expression", "Call quality",
      "Affymetrix data", "EST data", "In situ data", "RNA-Seq data",
      "Including observed data"];

pub const DIFF_CALL_BASE_COLUMNS: &[&str; 8] =
    &["Gene ID", "Gene name",
      "Anatomical entity ID", "Anatomical entity name",
      "Developmental stage ID", "Developmental stage name",
      "Differential expression", "Call quality"];

// only these data types come from differential expression analyses
pub const DIFF_DATA_TYPES: [DataType; 2] = [DataType::Affymetrix, DataType::RnaSeq];

pub static DIFF_CALL_COLUMNS: Lazy<Vec<String>> = Lazy::new(|| {
    let mut columns: Vec<String> =
        DIFF_CALL_BASE_COLUMNS.iter().map(|column| column.to_string()).collect();

    for data_type in DIFF_DATA_TYPES {
        let name = data_type.display_name();
        columns.push(format!("{} data", name));
        columns.push(format!("{} call quality", name));
        columns.push(format!("{} best supporting p-value", name));
        columns.push(format!("{} supporting analysis count", name));
        columns.push(format!("{} conflicting analysis count", name));
    }

    columns
});
