use std::io;
use std::io::Write;

use flexstr::shared_str as flex_str;

use crate::constants::{DIFF_CALL_COLUMNS, DIFF_DATA_TYPES, EXPRESSION_CALL_COLUMNS};
use crate::data_types::*;
use crate::snapshot::Snapshot;

fn observed_str(observed: ObservedState) -> &'static str {
    match observed {
        ObservedState::Direct => "yes",
        ObservedState::Propagated => "no",
    }
}

pub fn write_expression_call_header(writer: &mut dyn Write) -> Result<(), io::Error> {
    let line = EXPRESSION_CALL_COLUMNS.join("\t");
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")
}

pub fn write_expression_call_row(writer: &mut dyn Write,
                                 snapshot: &Snapshot,
                                 call: &ExpressionCall)
   -> Result<(), io::Error>
{
    let empty_string = flex_str!("");

    let Some(gene) = snapshot.gene_by_uniquename(&call.gene_uniquename)
    else {
        panic!("can't find gene details for: {}", call.gene_uniquename);
    };
    let gene_name = gene.name.as_ref().unwrap_or(&empty_string);

    let Some(anat_entity) = snapshot.anat_entity_by_id(&call.condition.anat_entity)
    else {
        panic!("can't find anatomical entity details for: {}",
               call.condition.anat_entity);
    };
    let Some(dev_stage) = snapshot.dev_stage_by_id(&call.condition.dev_stage)
    else {
        panic!("can't find developmental stage details for: {}",
               call.condition.dev_stage);
    };

    let data_cells: Vec<String> =
        DataType::ALL.iter()
            .map(|data_type| {
                match call.per_data_type.get(data_type) {
                    Some(summary) => format!("{} {}", summary.flag, summary.quality),
                    None => String::from("no data"),
                }
            })
            .collect();

    let line = format!("{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
                       gene.uniquename, gene_name,
                       anat_entity.id, anat_entity.name,
                       dev_stage.id, dev_stage.name,
                       call.summary, call.quality,
                       data_cells.join("\t"),
                       observed_str(call.observed));

    writer.write_all(line.as_bytes())
}

pub fn write_diff_call_header(writer: &mut dyn Write) -> Result<(), io::Error> {
    let line = DIFF_CALL_COLUMNS.join("\t");
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")
}

pub fn write_diff_call_row(writer: &mut dyn Write,
                           snapshot: &Snapshot,
                           call: &DiffExpressionCall)
   -> Result<(), io::Error>
{
    let empty_string = flex_str!("");

    let Some(gene) = snapshot.gene_by_uniquename(&call.gene_uniquename)
    else {
        panic!("can't find gene details for: {}", call.gene_uniquename);
    };
    let gene_name = gene.name.as_ref().unwrap_or(&empty_string);

    let Some(anat_entity) = snapshot.anat_entity_by_id(&call.condition.anat_entity)
    else {
        panic!("can't find anatomical entity details for: {}",
               call.condition.anat_entity);
    };
    let Some(dev_stage) = snapshot.dev_stage_by_id(&call.condition.dev_stage)
    else {
        panic!("can't find developmental stage details for: {}",
               call.condition.dev_stage);
    };

    let mut data_cells = vec![];

    for data_type in DIFF_DATA_TYPES {
        match call.per_data_type.get(&data_type) {
            Some(data_type_call) if data_type_call.call != DiffCall::NoData => {
                data_cells.push(data_type_call.call.to_string());
                data_cells.push(data_type_call.quality().to_string());
                data_cells.push(format!("{}", data_type_call.best_p_value));
                data_cells.push(format!("{}", data_type_call.support_count));
                data_cells.push(format!("{}", data_type_call.conflict_count));
            },
            _ => {
                data_cells.push(String::from("no data"));
                data_cells.push(String::from("NA"));
                data_cells.push(String::from("1"));
                data_cells.push(String::from("0"));
                data_cells.push(String::from("0"));
            },
        }
    }

    let line = format!("{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
                       gene.uniquename, gene_name,
                       anat_entity.id, anat_entity.name,
                       dev_stage.id, dev_stage.name,
                       call.summary, call.quality,
                       data_cells.join("\t"));

    writer.write_all(line.as_bytes())
}
