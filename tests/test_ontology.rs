use flexstr::SharedStr as FlexStr;

use genex::ontology::OntologyBuilder;

mod util;
use crate::util::*;

fn id(s: &str) -> FlexStr {
    FlexStr::from(s)
}

#[test]
fn test_parents_and_children() {
    let snapshot = get_test_snapshot(vec![], vec![]);

    assert_eq!(snapshot.anatomy.len(), 5);
    assert!(snapshot.anatomy.contains(&id(MIDBRAIN)));
    assert!(!snapshot.anatomy.contains(&id("UBERON:9999999")));

    let midbrain_parents = snapshot.anatomy.parents_of(&id(MIDBRAIN));
    assert_eq!(midbrain_parents.len(), 1);
    assert!(midbrain_parents.contains(&id(BRAIN)));

    let brain_children = snapshot.anatomy.children_of(&id(BRAIN));
    assert_eq!(brain_children.len(), 2);
    assert!(brain_children.contains(&id(MIDBRAIN)));
    assert!(brain_children.contains(&id(CEREBELLUM)));
}

#[test]
fn test_ancestors_and_descendants() {
    let snapshot = get_test_snapshot(vec![], vec![]);

    let brain_ancestors = snapshot.anatomy.ancestors_of(&id(MIDBRAIN), false);
    assert_eq!(brain_ancestors.len(), 2);
    assert!(brain_ancestors.contains(&id(BRAIN)));
    assert!(brain_ancestors.contains(&id(ANAT_ROOT)));

    let with_self = snapshot.anatomy.ancestors_of(&id(MIDBRAIN), true);
    assert_eq!(with_self.len(), 3);
    assert!(with_self.contains(&id(MIDBRAIN)));

    let brain_descendants = snapshot.anatomy.descendants_of(&id(BRAIN), false);
    assert_eq!(brain_descendants.len(), 2);
    assert!(brain_descendants.contains(&id(MIDBRAIN)));
    assert!(brain_descendants.contains(&id(CEREBELLUM)));

    assert!(snapshot.anatomy.is_ancestor_of(&id(BRAIN), &id(MIDBRAIN)));
    assert!(!snapshot.anatomy.is_ancestor_of(&id(MIDBRAIN), &id(BRAIN)));
    assert!(!snapshot.anatomy.is_ancestor_of(&id(BRAIN), &id(BRAIN)));
}

#[test]
fn test_depths() {
    let snapshot = get_test_snapshot(vec![], vec![]);

    assert_eq!(snapshot.taxonomy.depth_of(&id(TAXON_VERTEBRATA)), 0);
    assert_eq!(snapshot.taxonomy.depth_of(&id(TAXON_EUTELEOSTOMI)), 1);
    assert_eq!(snapshot.taxonomy.depth_of(&id(TAXON_HUMAN)), 3);
}

#[test]
fn test_least_common_ancestor() {
    let snapshot = get_test_snapshot(vec![], vec![]);

    // human and mouse branch below Euteleostomi, so the LCA must be
    // Euteleostomi and not Vertebrata
    let lca = snapshot.taxonomy
        .least_common_ancestor(&[id(TAXON_HUMAN), id(TAXON_MOUSE)]).unwrap();
    assert_eq!(lca, id(TAXON_EUTELEOSTOMI));

    let lca = snapshot.taxonomy
        .least_common_ancestor(&[id(TAXON_HUMAN), id(TAXON_CHIMP)]).unwrap();
    assert_eq!(lca, id(TAXON_PRIMATES));

    let lca = snapshot.taxonomy
        .least_common_ancestor(&[id(TAXON_HUMAN), id(TAXON_CHIMP), id(TAXON_MOUSE)])
        .unwrap();
    assert_eq!(lca, id(TAXON_EUTELEOSTOMI));

    // a node is an ancestor of itself for LCA purposes
    let lca = snapshot.taxonomy
        .least_common_ancestor(&[id(TAXON_HUMAN)]).unwrap();
    assert_eq!(lca, id(TAXON_HUMAN));

    let lca = snapshot.taxonomy
        .least_common_ancestor(&[id(TAXON_HUMAN), id(TAXON_PRIMATES)]).unwrap();
    assert_eq!(lca, id(TAXON_PRIMATES));
}

#[test]
fn test_no_common_ancestor() {
    let snapshot = get_test_snapshot(vec![], vec![]);

    assert!(snapshot.taxonomy.least_common_ancestor(&[]).is_err());

    // two disconnected roots share nothing
    let mut builder = OntologyBuilder::new();
    builder.add_edge(id("X:child1"), id("X:root1"));
    builder.add_edge(id("X:child2"), id("X:root2"));
    let disconnected = builder.build();

    let result =
        disconnected.least_common_ancestor(&[id("X:child1"), id("X:child2")]);
    assert!(result.is_err());
}

#[test]
fn test_ancestors_among_elements() {
    let snapshot = get_test_snapshot(vec![], vec![]);

    let elements = [id(TAXON_PRIMATES), id(TAXON_HUMAN), id(TAXON_MOUSE)];
    let ancestors = snapshot.taxonomy.ancestors_among_elements(&elements, None);
    assert_eq!(ancestors.len(), 1);
    assert!(ancestors.contains(&id(TAXON_PRIMATES)));

    // Euteleostomi is two steps above the human species taxon, so a
    // one-step search can't see it
    let elements = [id(TAXON_EUTELEOSTOMI), id(TAXON_HUMAN)];
    let ancestors =
        snapshot.taxonomy.ancestors_among_elements(&elements, Some(1));
    assert!(ancestors.is_empty());

    let ancestors =
        snapshot.taxonomy.ancestors_among_elements(&elements, Some(2));
    assert_eq!(ancestors.len(), 1);
    assert!(ancestors.contains(&id(TAXON_EUTELEOSTOMI)));
}

#[test]
#[should_panic(expected = "cycle in ontology")]
fn test_cycle_detection() {
    let mut builder = OntologyBuilder::new();
    builder.add_edge(id("X:a"), id("X:b"));
    builder.add_edge(id("X:b"), id("X:c"));
    builder.add_edge(id("X:c"), id("X:a"));
    builder.build();
}

#[test]
fn test_multiple_parents() {
    // anatomy allows multiple parents
    let mut builder = OntologyBuilder::new();
    builder.add_edge(id("X:shared"), id("X:parent1"));
    builder.add_edge(id("X:shared"), id("X:parent2"));
    builder.add_edge(id("X:parent1"), id("X:root"));
    builder.add_edge(id("X:parent2"), id("X:root"));
    let ontology = builder.build();

    let ancestors = ontology.ancestors_of(&id("X:shared"), false);
    assert_eq!(ancestors.len(), 3);

    let lca = ontology
        .least_common_ancestor(&[id("X:parent1"), id("X:parent2")]).unwrap();
    assert_eq!(lca, id("X:root"));
}
